//! Engine context for host communication.
//!
//! The `EngineContext` struct is a simple data container with public
//! fields the host integration reads after each `process_key()` call.
//! Zero abstraction: no callbacks, no traits; the host maps the fields
//! onto its own commit/preedit/candidate-list updates.
//!
//! Field ↔ host-boundary mapping:
//! - `commit_text` → `on_commit(text)` (consume via `take_commit`)
//! - `preedit_text`, `preedit_visible` → `on_preedit_update`
//! - `candidates`, `candidate_cursor`, `candidates_visible` →
//!   `on_candidates_update`

/// Display state produced by the engine for the host to render.
#[derive(Debug, Clone, Default)]
pub struct EngineContext {
    /// Uncommitted composition text.
    pub preedit_text: String,

    /// Whether the preedit should be shown.
    pub preedit_visible: bool,

    /// Finalized text for the host to insert. Cleared by the engine at
    /// the start of the next key event; consume it first.
    pub commit_text: String,

    /// Candidate display texts for the current page.
    pub candidates: Vec<String>,

    /// Highlighted candidate index within the page (0-based).
    pub candidate_cursor: usize,

    /// Whether the candidate list should be shown.
    pub candidates_visible: bool,

    /// Hint text, e.g. a page indicator when the list spans pages.
    pub auxiliary_text: String,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear display state. Does NOT clear `commit_text`; the host
    /// should consume that first.
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.preedit_visible = false;
        self.candidates.clear();
        self.candidate_cursor = 0;
        self.candidates_visible = false;
        self.auxiliary_text.clear();
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    pub fn has_visible_state(&self) -> bool {
        self.preedit_visible || self.candidates_visible
    }
}
