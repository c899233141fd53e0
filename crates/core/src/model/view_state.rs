use std::collections::BTreeSet;

use crate::model::ids::CardIndex;

/// Fraction of a card's area inside the viewport, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VisibilityRatio(f64);

impl VisibilityRatio {
    /// Returns `None` for NaN or values outside `[0, 1]`.
    #[must_use]
    pub fn new(ratio: f64) -> Option<Self> {
        (0.0..=1.0).contains(&ratio).then_some(Self(ratio))
    }

    /// Inclusive threshold check.
    #[must_use]
    pub fn meets(self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

/// Per-session viewing progress.
///
/// The seen-set only grows and `unlocked` latches once. Mutation is reserved to
/// the visibility gate; everything else reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    total: usize,
    seen: BTreeSet<CardIndex>,
    current: CardIndex,
    unlocked: bool,
}

impl ViewState {
    /// Fresh state for a deck of `total` cards.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            seen: BTreeSet::new(),
            current: CardIndex::new(0),
            unlocked: false,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn has_seen(&self, index: CardIndex) -> bool {
        self.seen.contains(&index)
    }

    /// Most recently observed card; starts at the first position.
    #[must_use]
    pub fn current(&self) -> CardIndex {
        self.current
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Inserts into the seen-set and returns true if it was not there yet.
    pub(crate) fn mark_seen(&mut self, index: CardIndex) -> bool {
        self.seen.insert(index)
    }

    pub(crate) fn set_current(&mut self, index: CardIndex) {
        self.current = index;
    }

    /// Latches `unlocked` once every card has been seen. Never fires for an empty deck.
    pub(crate) fn try_unlock(&mut self) -> bool {
        if self.unlocked || self.total == 0 || self.seen.len() < self.total {
            return false;
        }
        self.unlocked = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_rejects_nan_and_out_of_range() {
        assert!(VisibilityRatio::new(f64::NAN).is_none());
        assert!(VisibilityRatio::new(-0.1).is_none());
        assert!(VisibilityRatio::new(1.01).is_none());
        assert!(VisibilityRatio::new(0.0).is_some());
        assert!(VisibilityRatio::new(1.0).is_some());
    }

    #[test]
    fn ratio_threshold_is_inclusive() {
        let exact = VisibilityRatio::new(0.6).unwrap();
        let below = VisibilityRatio::new(0.599_999).unwrap();
        assert!(exact.meets(0.6));
        assert!(!below.meets(0.6));
    }

    #[test]
    fn new_state_starts_locked_at_first_card() {
        let state = ViewState::new(3);
        assert_eq!(state.total(), 3);
        assert_eq!(state.seen_count(), 0);
        assert_eq!(state.current(), CardIndex::new(0));
        assert!(!state.is_unlocked());
    }

    #[test]
    fn empty_state_never_unlocks() {
        let mut state = ViewState::new(0);
        assert!(!state.try_unlock());
        assert!(!state.is_unlocked());
    }

    #[test]
    fn unlock_latches_once() {
        let mut state = ViewState::new(1);
        assert!(state.mark_seen(CardIndex::new(0)));
        assert!(!state.mark_seen(CardIndex::new(0)));
        assert!(state.try_unlock());
        assert!(!state.try_unlock());
        assert!(state.is_unlocked());
    }
}
