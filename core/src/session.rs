//! Translation session state.
//!
//! The `StenoSession` owns everything that belongs to one composition:
//! the accumulated stroke sequence, the preedit text it currently
//! renders to, and the candidate list. The session is a state container;
//! the engine drives the transitions and dictionary lookups.

use crate::candidate::{Candidate, CandidateList};
use crate::context::EngineContext;
use crate::stroke::{Stroke, StrokeSequence};

/// Session state: Empty (nothing composed) or Composing (preedit and/or
/// candidates present).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Composing,
}

/// Owned state of one translation session. Never shared across
/// sessions; created empty and cleared on commit, cancel or reset.
#[derive(Debug, Clone)]
pub struct StenoSession {
    sequence: StrokeSequence,
    preedit: String,
    candidates: CandidateList,
    state: SessionState,
}

impl StenoSession {
    pub fn new() -> Self {
        Self::with_page_size(crate::candidate::DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            sequence: StrokeSequence::new(),
            preedit: String::new(),
            candidates: CandidateList::with_page_size(page_size),
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state == SessionState::Composing
    }

    pub fn preedit(&self) -> &str {
        &self.preedit
    }

    pub fn sequence(&self) -> &StrokeSequence {
        &self.sequence
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    /// Append a completed stroke and enter Composing.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.sequence.push(stroke);
        self.state = SessionState::Composing;
    }

    /// Set the preedit rendering for the current sequence.
    pub fn set_preedit<T: Into<String>>(&mut self, text: T) {
        self.preedit = text.into();
    }

    /// Replace the candidate set for the current sequence.
    pub fn refresh_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates.refresh(candidates);
    }

    /// Discard everything and return to Empty.
    pub fn clear(&mut self) {
        self.sequence.clear();
        self.preedit.clear();
        self.candidates.clear();
        self.state = SessionState::Empty;
    }

    /// Project session state into the host-facing context.
    pub fn sync_to_context(&self, context: &mut EngineContext) {
        context.preedit_text = self.preedit.clone();
        context.preedit_visible = !self.preedit.is_empty();

        context.candidates = self
            .candidates
            .visible()
            .iter()
            .map(|c| c.text.clone())
            .collect();
        context.candidate_cursor = self.candidates.cursor();
        context.candidates_visible = !self.candidates.is_empty();

        // Page indicator when the list spans several pages.
        if self.candidates.num_pages() > 1 {
            context.auxiliary_text = format!(
                "page {}/{}",
                self.candidates.page() + 1,
                self.candidates.num_pages()
            );
        } else {
            context.auxiliary_text.clear();
        }
    }
}

impl Default for StenoSession {
    fn default() -> Self {
        Self::new()
    }
}
