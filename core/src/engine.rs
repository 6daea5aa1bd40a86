//! Steno engine: the translation state machine.
//!
//! `StenoEngine` ties the components together: raw key events feed the
//! chord accumulator; completed strokes extend the session's stroke
//! sequence and drive dictionary lookups; control keys commit, cancel
//! or navigate. After each `process_key()` the host reads the
//! `EngineContext` to update its UI.
//!
//! Single-threaded and synchronous: each key event is handled to
//! completion before the next is accepted, and every lookup is a
//! bounded in-memory operation.

use crate::candidate::Candidate;
use crate::chord::{ChordAccumulator, ChordEvent};
use crate::context::EngineContext;
use crate::dictionary::StenoDict;
use crate::error::LoadError;
use crate::keymap::{KeyCode, KeyMap, StenoOrder};
use crate::session::StenoSession;
use crate::stroke::Stroke;
use crate::{Config, ControlKey, UnmappedKeyPolicy, CONFIG_FILE};
use ahash::AHashMap;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

/// Modifier state delivered with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift
    }
}

/// One raw key transition from the host: keycode, press/release, and
/// the modifier state at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub is_press: bool,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn press(code: KeyCode) -> Self {
        KeyEvent {
            code,
            is_press: true,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn release(code: KeyCode) -> Self {
        KeyEvent {
            code,
            is_press: false,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was consumed by the engine.
    Handled,
    /// Key should pass through to the application.
    NotHandled,
}

/// The translation engine: stroke capture, dictionary lookup, candidate
/// management and the commit protocol.
pub struct StenoEngine {
    keymap: KeyMap,
    order: StenoOrder,
    dict: Arc<StenoDict>,
    chord: ChordAccumulator,
    session: StenoSession,
    context: EngineContext,
    control_keys: AHashMap<KeyCode, ControlKey>,
    unmapped_policy: UnmappedKeyPolicy,
    /// Canonical sequence string → candidate vector. Sound because the
    /// dictionary is immutable for the lifetime of the engine.
    cache: LruCache<String, Vec<Candidate>>,
}

impl StenoEngine {
    pub fn new(config: &Config, dict: StenoDict) -> Self {
        Self::from_arc(config, Arc::new(dict))
    }

    /// Build an engine around an already-shared dictionary.
    pub fn from_arc(config: &Config, dict: Arc<StenoDict>) -> Self {
        let cache_size =
            NonZeroUsize::new(config.max_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            keymap: KeyMap::from_table(&config.keycode_to_steno),
            order: StenoOrder::new(&config.steno_order),
            dict,
            chord: ChordAccumulator::new(),
            session: StenoSession::with_page_size(config.page_size),
            context: EngineContext::new(),
            control_keys: config.control_keys.iter().map(|(k, v)| (*k, *v)).collect(),
            unmapped_policy: config.unmapped_key_policy,
            cache: LruCache::new(cache_size),
        }
    }

    /// Bootstrap from a config directory: create the directory and a
    /// default `config.json` on first run, then load config and
    /// dictionary leniently. Load problems are returned for reporting
    /// and never prevent startup; only failing to create the directory
    /// or the default config file aborts, before any session exists.
    pub fn from_config_dir<P: AsRef<Path>>(
        dir: P,
    ) -> std::io::Result<(Self, Vec<LoadError>)> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            tracing::info!(path = %config_path.display(), "writing default config");
            Config::default().save_json(&config_path)?;
        }

        let (config, config_err) = Config::load_or_default(&config_path);
        let dict_path = dir.join(&config.dictionary);
        let (dict, dict_err) = StenoDict::load_or_empty(&dict_path);

        let errors = [config_err, dict_err].into_iter().flatten().collect();
        Ok((Self::new(&config, dict), errors))
    }

    /// Host-facing display state for the last processed event.
    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.context
    }

    pub fn session(&self) -> &StenoSession {
        &self.session
    }

    pub fn dict(&self) -> &StenoDict {
        &self.dict
    }

    /// Unconditional reset (focus loss, explicit host reset): discards
    /// any chord in progress and all composition state without emitting
    /// text. Reachable from every state, including mid-accumulation.
    pub fn reset(&mut self) {
        self.chord.reset();
        self.session.clear();
        self.context.clear();
    }

    /// Process one key event to completion.
    pub fn process_key(&mut self, event: KeyEvent) -> KeyResult {
        // Commit text belongs to exactly one event; stale text from the
        // previous event must not be re-committed.
        self.context.commit_text.clear();

        // Control keys act on the composition and take precedence over
        // stroke accumulation, but only while composing.
        if self.session.is_composing() && event.is_press {
            if let Some(control) = self.control_keys.get(&event.code).copied() {
                return self.handle_control(control);
            }
        }

        // Modifier-chorded events are never steno-relevant.
        if event.modifiers.any() {
            return KeyResult::NotHandled;
        }

        if !self.keymap.is_mapped(event.code) {
            // A trailing non-steno key while composing either finalizes
            // the entry or is ignored, per configured policy. Either way
            // the host still sees the key.
            if self.session.is_composing()
                && event.is_press
                && self.unmapped_policy == UnmappedKeyPolicy::Commit
            {
                let text = self.session.preedit().to_string();
                self.commit(text);
            }
            return KeyResult::NotHandled;
        }

        match self
            .chord
            .handle_key(&self.keymap, &self.order, event.code, event.is_press)
        {
            ChordEvent::Complete(stroke) => {
                self.apply_stroke(stroke);
                KeyResult::Handled
            }
            // Mapped keys are consumed while a chord builds; a stale
            // release of a mapped key is swallowed too.
            ChordEvent::Accumulating | ChordEvent::Ignored => KeyResult::Handled,
        }
    }

    /// Commit the candidate at the given position within the visible
    /// page (e.g. the user clicked it in the host's candidate window).
    pub fn select_candidate(&mut self, page_index: usize) -> KeyResult {
        match self.session.candidates_mut().select(page_index) {
            Some(candidate) => {
                let text = candidate.text.clone();
                self.commit(text);
                KeyResult::Handled
            }
            None => KeyResult::NotHandled,
        }
    }

    fn handle_control(&mut self, control: ControlKey) -> KeyResult {
        match control {
            ControlKey::Enter => {
                let text = self.session.preedit().to_string();
                self.commit(text);
            }
            ControlKey::Space => {
                // Highlighted candidate if the list is non-empty, else
                // the raw preedit.
                let text = match self.session.candidates().current() {
                    Some(candidate) => candidate.text.clone(),
                    None => self.session.preedit().to_string(),
                };
                self.commit(text);
            }
            ControlKey::Escape | ControlKey::Backspace => self.cancel(),
            ControlKey::PageUp => {
                self.session.candidates_mut().page_up();
                self.sync();
            }
            ControlKey::PageDown => {
                self.session.candidates_mut().page_down();
                self.sync();
            }
            ControlKey::CursorUp => {
                self.session.candidates_mut().cursor_up();
                self.sync();
            }
            ControlKey::CursorDown => {
                self.session.candidates_mut().cursor_down();
                self.sync();
            }
            // Swallowed while composing so the host caret stays put.
            ControlKey::Left | ControlKey::Right => {}
        }
        KeyResult::Handled
    }

    /// Extend the sequence with a completed stroke and refresh preedit
    /// and candidates. A lookup miss degrades to the raw canonical
    /// rendering with an empty candidate list; it never blocks input.
    fn apply_stroke(&mut self, stroke: Stroke) {
        self.session.push_stroke(stroke);

        let key = self.session.sequence().canonical();
        let exact = self
            .dict
            .lookup_outline(&key)
            .map(str::to_string);
        let candidates = self.cached_candidates(&key);

        tracing::debug!(
            sequence = %key,
            exact = exact.is_some(),
            candidates = candidates.len(),
            "stroke applied"
        );

        self.session.set_preedit(exact.unwrap_or_else(|| key.clone()));
        self.session.refresh_candidates(candidates);
        self.sync();
    }

    fn cached_candidates(&mut self, key: &str) -> Vec<Candidate> {
        if let Some(hit) = self.cache.get(key) {
            return hit.clone();
        }
        let computed = self.dict.candidates_for(self.session.sequence());
        self.cache.put(key.to_string(), computed.clone());
        computed
    }

    fn commit(&mut self, text: String) {
        tracing::debug!(%text, "commit");
        self.context.commit_text = text;
        self.session.clear();
        self.chord.reset();
        self.sync();
    }

    fn cancel(&mut self) {
        self.session.clear();
        self.chord.reset();
        self.sync();
    }

    fn sync(&mut self) {
        self.session.sync_to_context(&mut self.context);
    }
}
