//! libsteno-core
//!
//! Stroke-capture and translation engine for a chorded (stenotype-style)
//! input method: physical key events are accumulated into atomic strokes,
//! strokes are looked up against a steno dictionary, and a paged
//! candidate list is managed until the user commits text.
//!
//! Public API:
//! - `StenoEngine` - key-event driven translation state machine
//! - `StenoDict` - stroke-sequence → text dictionary with prefix lookup
//! - `ChordAccumulator` - press/release set matching for stroke capture
//! - `KeyMap` / `StenoOrder` - keycode → token mapping and canonical order
//! - `CandidateList` - paged, cursor-addressable candidate navigation
//! - `EngineContext` - host-facing preedit/commit/candidate state
//! - `Config` - statically-shaped configuration with documented defaults

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub mod candidate;
pub use candidate::{Candidate, CandidateList, DEFAULT_PAGE_SIZE};

pub mod chord;
pub use chord::{ChordAccumulator, ChordEvent};

pub mod context;
pub use context::EngineContext;

pub mod dictionary;
pub use dictionary::StenoDict;

pub mod engine;
pub use engine::{KeyEvent, KeyResult, Modifiers, StenoEngine};

pub mod error;
pub use error::LoadError;

pub mod keymap;
pub use keymap::{KeyCode, KeyMap, StenoKey, StenoOrder};

pub mod session;
pub use session::{SessionState, StenoSession};

pub mod stroke;
pub use stroke::{Stroke, StrokeSequence};

/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Control function a keycode can be bound to while composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKey {
    /// Commit the preedit text.
    Enter,
    /// Commit the highlighted candidate, or the preedit if none.
    Space,
    /// Cancel the composition without committing.
    Escape,
    /// Cancel the composition without committing.
    Backspace,
    PageUp,
    PageDown,
    CursorUp,
    CursorDown,
    /// Swallowed while composing.
    Left,
    /// Swallowed while composing.
    Right,
}

/// What to do when a non-steno key is pressed mid-composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedKeyPolicy {
    /// Force-commit the current preedit; the key still reaches the host.
    #[default]
    Commit,
    /// Leave the composition untouched.
    Ignore,
}

/// Engine configuration.
///
/// Every field has a documented default; a user config file overrides
/// fields individually (`#[serde(default)]`), and a malformed file falls
/// back to the defaults entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dictionary file name, resolved relative to the config directory.
    pub dictionary: String,

    /// Candidates per page. Default: 10.
    pub page_size: usize,

    /// Entries in the stroke-sequence → candidates cache. Default: 256.
    pub max_cache_size: usize,

    /// Policy for non-steno keys arriving mid-composition.
    pub unmapped_key_policy: UnmappedKeyPolicy,

    /// Canonical token order used when serializing strokes.
    pub steno_order: Vec<String>,

    /// Physical keycode → whitespace-separated steno tokens.
    pub keycode_to_steno: HashMap<KeyCode, String>,

    /// Keycode → control function while composing.
    pub control_keys: HashMap<KeyCode, ControlKey>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: "default.json".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_cache_size: 256,
            unmapped_key_policy: UnmappedKeyPolicy::default(),
            steno_order: default_steno_order(),
            keycode_to_steno: default_keycode_table(),
            control_keys: default_control_keys(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| LoadError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| LoadError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Lenient load: a missing or malformed file yields the defaults,
    /// with the error (if any) returned for reporting. Startup never
    /// fails on a bad config.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<LoadError>) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_json(path) {
            Ok(config) => (config, None),
            Err(err) => {
                tracing::warn!(error = %err, "config load failed, using defaults");
                (Self::default(), Some(err))
            }
        }
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Standard steno key order: left bank, vowels, star, right bank.
fn default_steno_order() -> Vec<String> {
    [
        "#", "S-", "T-", "K-", "P-", "W-", "H-", "R-", "A-", "O-", "*", "-E", "-U",
        "-F", "-R", "-P", "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Default qwerty → steno layout (evdev keycodes).
fn default_keycode_table() -> HashMap<KeyCode, String> {
    let entries: &[(KeyCode, &str)] = &[
        (2, "S-"),     // 1
        (3, "T-"),     // 2
        (4, "P-"),     // 3
        (5, "H-"),     // 4
        (6, "*"),      // 5
        (7, "#"),      // 6
        (8, "-F"),     // 7
        (9, "-P"),     // 8
        (10, "-L"),    // 9
        (11, "-T"),    // 0
        (12, "-D"),    // -
        (13, "-T -D"), // =
        (16, "S-"),    // q
        (17, "K-"),    // w
        (18, "W-"),    // e
        (19, "R-"),    // r
        (20, "*"),     // t
        (21, "*"),     // y
        (22, "-R"),    // u
        (23, "-B"),    // i
        (24, "-G"),    // o
        (25, "-S"),    // p
        (26, "-Z"),    // [
        (27, "-S -Z"), // ]
        (30, "#"),     // a
        (31, "T- K-"), // s
        (32, "P- W-"), // d
        (33, "H- R-"), // f
        (34, "#"),     // g
        (35, "#"),     // h
        (36, "-F -R"), // j
        (37, "-P -B"), // k
        (38, "-L -G"), // l
        (39, "-T -S"), // ;
        (40, "-D -Z"), // '
        (45, "A- O-"), // x
        (46, "A-"),    // c
        (47, "O-"),    // v
        (49, "-E"),    // n
        (50, "-U"),    // m
        (51, "-E -U"), // ,
    ];
    entries.iter().map(|(c, t)| (*c, (*t).to_string())).collect()
}

/// Default control bindings (evdev keycodes).
fn default_control_keys() -> HashMap<KeyCode, ControlKey> {
    let entries: &[(KeyCode, ControlKey)] = &[
        (1, ControlKey::Escape),
        (14, ControlKey::Backspace),
        (28, ControlKey::Enter),
        (57, ControlKey::Space),
        (103, ControlKey::CursorUp),
        (104, ControlKey::PageUp),
        (105, ControlKey::Left),
        (106, ControlKey::Right),
        (108, ControlKey::CursorDown),
        (109, ControlKey::PageDown),
    ];
    entries.iter().copied().collect()
}
