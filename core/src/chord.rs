//! Chord accumulator: turns interleaved key transitions into strokes.
//!
//! Two-set state machine over physical keycodes. `pressed` holds every
//! steno-relevant key seen down since the chord began, `released` the
//! subset already released again. A stroke is emitted exactly once, when
//! the two sets are equal and non-empty; both sets are then cleared.
//!
//! Invariants this isolates:
//! - auto-repeat key-downs must not restart or re-emit the chord
//! - a release for a key never seen as pressed (e.g. right after a
//!   reset) is ignored, not an error
//! - keys outside the key map never enter accumulation

use crate::keymap::{KeyCode, KeyMap, StenoOrder};
use crate::stroke::Stroke;
use ahash::AHashSet;

/// Outcome of feeding one key transition into the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordEvent {
    /// Key was not steno-relevant, or a stale release; state unchanged.
    Ignored,
    /// Key joined or left the chord in progress.
    Accumulating,
    /// Every pressed key has been released again: one finished stroke.
    Complete(Stroke),
}

#[derive(Debug, Default)]
pub struct ChordAccumulator {
    pressed: AHashSet<KeyCode>,
    released: AHashSet<KeyCode>,
}

impl ChordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no chord is in progress.
    pub fn is_idle(&self) -> bool {
        self.pressed.is_empty()
    }

    /// Feed one key transition. On completion the pressed keys are
    /// resolved through the key map, unioned into a single stroke, and
    /// the accumulator returns to idle.
    pub fn handle_key(
        &mut self,
        keymap: &KeyMap,
        order: &StenoOrder,
        code: KeyCode,
        is_press: bool,
    ) -> ChordEvent {
        if !keymap.is_mapped(code) {
            return ChordEvent::Ignored;
        }

        if is_press {
            // Auto-repeat delivers the same press again; inserting into a
            // set makes that a no-op rather than a chord restart.
            self.pressed.insert(code);
        } else {
            if !self.pressed.contains(&code) {
                return ChordEvent::Ignored;
            }
            self.released.insert(code);
        }

        if !self.pressed.is_empty() && self.pressed == self.released {
            let stroke = Stroke::from_keys(
                self.pressed
                    .iter()
                    .flat_map(|c| keymap.resolve(*c).iter().cloned()),
                order,
            );
            self.reset();
            tracing::debug!(stroke = %stroke, "chord complete");
            return ChordEvent::Complete(stroke);
        }

        ChordEvent::Accumulating
    }

    /// Discard all pending state without emitting a stroke.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fixtures() -> (KeyMap, StenoOrder) {
        let mut table = HashMap::new();
        table.insert(2, "S-".to_string());
        table.insert(16, "K-".to_string());
        table.insert(31, "T- K-".to_string());
        let order = StenoOrder::new(&[
            "S-".to_string(),
            "T-".to_string(),
            "K-".to_string(),
        ]);
        (KeyMap::from_table(&table), order)
    }

    #[test]
    fn test_single_key_stroke() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        assert_eq!(acc.handle_key(&map, &order, 2, true), ChordEvent::Accumulating);
        match acc.handle_key(&map, &order, 2, false) {
            ChordEvent::Complete(stroke) => assert_eq!(stroke.canonical(), "S-"),
            other => panic!("expected Complete, got {:?}", other),
        }
        assert!(acc.is_idle());
    }

    #[test]
    fn test_chord_emits_once_when_all_released() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        acc.handle_key(&map, &order, 2, true);
        acc.handle_key(&map, &order, 16, true);
        // Partial release: no stroke yet, no subset emission.
        assert_eq!(acc.handle_key(&map, &order, 2, false), ChordEvent::Accumulating);
        match acc.handle_key(&map, &order, 16, false) {
            ChordEvent::Complete(stroke) => assert_eq!(stroke.canonical(), "S-/K-"),
            other => panic!("expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn test_consecutive_strokes_stay_separate() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        acc.handle_key(&map, &order, 2, true);
        assert!(matches!(
            acc.handle_key(&map, &order, 2, false),
            ChordEvent::Complete(_)
        ));
        // A second full cycle starts from a clean accumulator.
        assert_eq!(acc.handle_key(&map, &order, 16, true), ChordEvent::Accumulating);
        match acc.handle_key(&map, &order, 16, false) {
            ChordEvent::Complete(stroke) => assert_eq!(stroke.canonical(), "K-"),
            other => panic!("expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn test_auto_repeat_does_not_restart_or_reemit() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        acc.handle_key(&map, &order, 2, true);
        acc.handle_key(&map, &order, 2, true);
        acc.handle_key(&map, &order, 2, true);
        match acc.handle_key(&map, &order, 2, false) {
            ChordEvent::Complete(stroke) => assert_eq!(stroke.canonical(), "S-"),
            other => panic!("expected Complete, got {:?}", other),
        }
        // Nothing pending afterwards.
        assert!(acc.is_idle());
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        assert_eq!(acc.handle_key(&map, &order, 99, true), ChordEvent::Ignored);
        assert!(acc.is_idle());
        // An unmapped key mid-chord must not block completion.
        acc.handle_key(&map, &order, 2, true);
        assert_eq!(acc.handle_key(&map, &order, 99, true), ChordEvent::Ignored);
        assert_eq!(acc.handle_key(&map, &order, 99, false), ChordEvent::Ignored);
        assert!(matches!(
            acc.handle_key(&map, &order, 2, false),
            ChordEvent::Complete(_)
        ));
    }

    #[test]
    fn test_stale_release_is_ignored() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        // Release without a matching press, e.g. just after a reset.
        assert_eq!(acc.handle_key(&map, &order, 2, false), ChordEvent::Ignored);
        assert!(acc.is_idle());
    }

    #[test]
    fn test_reset_discards_without_emitting() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        acc.handle_key(&map, &order, 2, true);
        acc.handle_key(&map, &order, 16, true);
        acc.reset();
        assert!(acc.is_idle());
        // The release that would have completed the chord is now stale.
        assert_eq!(acc.handle_key(&map, &order, 2, false), ChordEvent::Ignored);
        assert_eq!(acc.handle_key(&map, &order, 16, false), ChordEvent::Ignored);
    }

    #[test]
    fn test_multi_token_keys_union_into_stroke() {
        let (map, order) = fixtures();
        let mut acc = ChordAccumulator::new();
        acc.handle_key(&map, &order, 31, true);
        acc.handle_key(&map, &order, 2, true);
        acc.handle_key(&map, &order, 31, false);
        match acc.handle_key(&map, &order, 2, false) {
            ChordEvent::Complete(stroke) => {
                // 31 expands to T- and K-; union with S-, canonical order.
                assert_eq!(stroke.canonical(), "S-/T-/K-");
            }
            other => panic!("expected Complete, got {:?}", other),
        }
    }
}
