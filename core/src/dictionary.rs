//! Steno dictionary: stroke sequences to output text.
//!
//! A read-mostly map loaded once per session and never mutated by the
//! engine afterwards, so concurrent lookups are safe behind an `Arc`.
//! The on-disk format is a JSON object mapping string-encoded stroke
//! sequences (tokens joined by `/`, strokes joined by a space) to
//! output text, e.g. `{"S-/K-": "disk", "S-/K- -T": "disked"}`.

use crate::candidate::Candidate;
use crate::error::LoadError;
use crate::stroke::{StrokeSequence, STROKE_DELIMITER};
use ahash::AHashMap;
use std::path::Path;

#[derive(Debug, Clone)]
struct DictEntry {
    /// Canonical per-stroke strings of the outline.
    outline: Vec<String>,
    text: String,
}

/// Dictionary keyed by the canonical string form of a stroke sequence.
#[derive(Debug, Clone, Default)]
pub struct StenoDict {
    /// Entries in insertion order; ordering is the final tie-break for
    /// candidate ranking.
    entries: Vec<DictEntry>,
    /// Canonical joined outline → position in `entries`.
    index: AHashMap<String, usize>,
}

impl StenoDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry by its canonical outline string. A duplicate
    /// outline keeps the last-seen text and its original position.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, outline: K, text: V) {
        let outline = outline.into();
        let text = text.into();
        match self.index.get(&outline) {
            Some(&i) => self.entries[i].text = text,
            None => {
                let strokes = outline
                    .split(STROKE_DELIMITER)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                self.index.insert(outline, self.entries.len());
                self.entries.push(DictEntry {
                    outline: strokes,
                    text,
                });
            }
        }
    }

    /// Entry whose key exactly equals the given sequence, or none.
    pub fn lookup_exact(&self, seq: &StrokeSequence) -> Option<&str> {
        self.lookup_outline(&seq.canonical())
    }

    /// Exact lookup by canonical outline string.
    pub fn lookup_outline(&self, outline: &str) -> Option<&str> {
        self.index
            .get(outline)
            .map(|&i| self.entries[i].text.as_str())
    }

    /// Every entry whose key sequence starts with `prefix`, ordered by:
    /// exact match first, then ascending number of additional strokes
    /// needed, then stable insertion order.
    pub fn candidates_for(&self, prefix: &StrokeSequence) -> Vec<Candidate> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let want: Vec<String> = prefix
            .strokes()
            .iter()
            .map(|s| s.canonical())
            .collect();

        let mut matches: Vec<&DictEntry> = self
            .entries
            .iter()
            .filter(|e| e.outline.len() >= want.len() && e.outline[..want.len()] == want[..])
            .collect();
        // Stable sort; equal extra lengths keep insertion order. The
        // exact match has zero extra strokes and sorts first.
        matches.sort_by_key(|e| e.outline.len() - want.len());

        matches
            .into_iter()
            .map(|e| Candidate::new(e.text.clone(), e.outline.join(STROKE_DELIMITER)))
            .collect()
    }

    /// Iterate entries as (canonical outline, text) in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.outline.join(STROKE_DELIMITER), e.text.as_str()))
    }

    /// Parse a dictionary from JSON source text. Non-string values are
    /// skipped; duplicate keys keep the last-seen value (serde_json
    /// already resolves duplicates that way while parsing).
    pub fn from_json_str(src: &str) -> Result<Self, serde_json::Error> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(src)?;
        let mut dict = Self::new();
        for (outline, value) in map {
            match value {
                serde_json::Value::String(text) => dict.insert(outline, text),
                other => {
                    tracing::warn!(%outline, ?other, "skipping non-string dictionary value");
                }
            }
        }
        Ok(dict)
    }

    /// Load a dictionary file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| LoadError::DictionaryRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dict = Self::from_json_str(&src).map_err(|source| LoadError::DictionaryParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), entries = dict.len(), "dictionary loaded");
        Ok(dict)
    }

    /// Lenient load: a missing file yields an empty dictionary silently
    /// (a fresh config dir has no dictionary yet); an unreadable or
    /// malformed file yields an empty dictionary plus the error for the
    /// caller to report. Lookups on the result behave identically to an
    /// intentionally empty dictionary.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> (Self, Option<LoadError>) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::new(), None);
        }
        match Self::load_json(path) {
            Ok(dict) => (dict, None),
            Err(err) => {
                tracing::warn!(error = %err, "dictionary load failed, using empty dictionary");
                (Self::new(), Some(err))
            }
        }
    }
}
