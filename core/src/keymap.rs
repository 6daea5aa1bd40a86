//! Physical-key to steno-key mapping.
//!
//! This module provides:
//! - `StenoKey`: canonical token for one logical steno key position
//! - `StenoOrder`: configurable canonical ordering of tokens
//! - `KeyMap`: pure keycode → token-sequence resolver
//!
//! The map is loaded once from configuration. A keycode absent from the
//! table resolves to an empty slice and is treated as not steno-relevant
//! by the accumulator.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Physical key identifier (evdev-style keycode).
pub type KeyCode = u32;

/// Canonical identifier for one logical steno key position (e.g. "S-",
/// "-T", "*", "#"), independent of physical keyboard layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StenoKey(String);

impl StenoKey {
    pub fn new<T: Into<String>>(token: T) -> Self {
        StenoKey(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StenoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StenoKey {
    fn from(token: &str) -> Self {
        StenoKey(token.to_string())
    }
}

/// Canonical ordering of steno key tokens.
///
/// Strokes are unordered sets; ordering matters only when a stroke is
/// serialized for display or dictionary lookup. The order is defined by
/// configuration (`Config::steno_order`). Tokens missing from the
/// configured order sort after all known tokens, lexicographically.
#[derive(Debug, Clone, Default)]
pub struct StenoOrder {
    rank: AHashMap<StenoKey, usize>,
}

impl StenoOrder {
    pub fn new(tokens: &[String]) -> Self {
        let rank = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (StenoKey::new(t.as_str()), i))
            .collect();
        Self { rank }
    }

    pub fn rank(&self, key: &StenoKey) -> Option<usize> {
        self.rank.get(key).copied()
    }

    /// Sort tokens into canonical order and drop duplicates.
    pub fn sort(&self, keys: &mut Vec<StenoKey>) {
        keys.sort_by(|a, b| match (self.rank(a), self.rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        });
        keys.dedup();
    }
}

/// Key-code mapper: physical keycode → ordered steno key tokens.
///
/// Some physical keys expand to several tokens (e.g. the qwerty `s` key
/// produces both "T-" and "K-" on the default layout).
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    table: AHashMap<KeyCode, Vec<StenoKey>>,
}

impl KeyMap {
    /// Build a key map from a configuration table. Token strings are
    /// whitespace-separated lists, matching the on-disk config format.
    pub fn from_table(table: &HashMap<KeyCode, String>) -> Self {
        let table = table
            .iter()
            .map(|(code, tokens)| {
                let keys = tokens.split_whitespace().map(StenoKey::from).collect();
                (*code, keys)
            })
            .collect();
        Self { table }
    }

    /// Resolve a physical key to its steno tokens. Unmapped keys resolve
    /// to an empty slice; they never participate in stroke accumulation.
    pub fn resolve(&self, code: KeyCode) -> &[StenoKey] {
        self.table.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_mapped(&self, code: KeyCode) -> bool {
        self.table.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_map() -> KeyMap {
        let mut table = HashMap::new();
        table.insert(2, "S-".to_string());
        table.insert(31, "T- K-".to_string());
        KeyMap::from_table(&table)
    }

    #[test]
    fn test_resolve_single_token() {
        let map = test_map();
        let keys = map.resolve(2);
        assert_eq!(keys, &[StenoKey::from("S-")]);
    }

    #[test]
    fn test_resolve_multi_token() {
        let map = test_map();
        let keys = map.resolve(31);
        assert_eq!(keys, &[StenoKey::from("T-"), StenoKey::from("K-")]);
    }

    #[test]
    fn test_unmapped_key_resolves_empty() {
        let map = test_map();
        assert!(map.resolve(99).is_empty());
        assert!(!map.is_mapped(99));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let map = test_map();
        assert_eq!(map.resolve(31), map.resolve(31));
    }

    #[test]
    fn test_order_sorts_and_dedupes() {
        let order = StenoOrder::new(&[
            "S-".to_string(),
            "T-".to_string(),
            "K-".to_string(),
        ]);
        let mut keys = vec![
            StenoKey::from("K-"),
            StenoKey::from("S-"),
            StenoKey::from("K-"),
        ];
        order.sort(&mut keys);
        assert_eq!(keys, vec![StenoKey::from("S-"), StenoKey::from("K-")]);
    }

    #[test]
    fn test_unknown_tokens_sort_last() {
        let order = StenoOrder::new(&["S-".to_string()]);
        let mut keys = vec![StenoKey::from("ZZ"), StenoKey::from("S-")];
        order.sort(&mut keys);
        assert_eq!(keys[0], StenoKey::from("S-"));
    }
}
