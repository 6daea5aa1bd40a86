//! Stroke and stroke-sequence value types.
//!
//! A stroke is one atomic chord: the set of steno key tokens produced by
//! resolving every physical key in one press/release cycle. Membership
//! only; the canonical order from `StenoOrder` is applied once, when the
//! stroke is built, so the serialized form is stable.

use crate::keymap::{StenoKey, StenoOrder};
use std::fmt;

/// Delimiter between tokens inside one serialized stroke ("S-/K-").
pub const TOKEN_DELIMITER: &str = "/";

/// Delimiter between strokes in a serialized sequence ("S-/K- -T").
pub const STROKE_DELIMITER: &str = " ";

/// One atomic chord of steno keys. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    keys: Vec<StenoKey>,
}

impl Stroke {
    /// Build a stroke from resolved tokens, sorting into canonical order
    /// and dropping duplicates (two physical keys may map to the same
    /// token, e.g. both `t` and `y` produce "*" on the default layout).
    pub fn from_keys<I>(keys: I, order: &StenoOrder) -> Self
    where
        I: IntoIterator<Item = StenoKey>,
    {
        let mut keys: Vec<StenoKey> = keys.into_iter().collect();
        order.sort(&mut keys);
        Self { keys }
    }

    /// Parse a canonical stroke string ("S-/K-").
    pub fn parse(s: &str, order: &StenoOrder) -> Self {
        Self::from_keys(
            s.split(TOKEN_DELIMITER)
                .filter(|t| !t.is_empty())
                .map(StenoKey::from),
            order,
        )
    }

    pub fn keys(&self) -> &[StenoKey] {
        &self.keys
    }

    pub fn contains(&self, key: &StenoKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Canonical string form, tokens joined by `/`.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                out.push_str(TOKEN_DELIMITER);
            }
            out.push_str(key.as_str());
        }
        out
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Ordered, append-only sequence of strokes forming one dictionary
/// lookup unit. Grows while composing; cleared on commit, cancel or
/// session reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StrokeSequence {
    strokes: Vec<Stroke>,
}

impl StrokeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a canonical sequence string ("S-/K- -T").
    pub fn parse(s: &str, order: &StenoOrder) -> Self {
        let strokes = s
            .split(STROKE_DELIMITER)
            .filter(|part| !part.is_empty())
            .map(|part| Stroke::parse(part, order))
            .collect();
        Self { strokes }
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Canonical string form, strokes joined by a space. This is the
    /// dictionary key format and also the raw fallback preedit rendering
    /// when no entry matches.
    pub fn canonical(&self) -> String {
        let parts: Vec<String> = self.strokes.iter().map(Stroke::canonical).collect();
        parts.join(STROKE_DELIMITER)
    }
}

impl fmt::Display for StrokeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
