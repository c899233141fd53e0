//! Visibility gate: turns raw visibility ratios into "seen" marks and latches
//! `unlocked` once every card in the deck has been seen.

use crate::model::{
    CardIndex, DEFAULT_VISIBILITY_THRESHOLD, SurveySettings, ViewState, VisibilityRatio,
};

/// What a single visibility signal changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateUpdate {
    /// Unresolvable element, out-of-deck index, or malformed ratio. State untouched.
    Ignored,
    /// Ratio below threshold. State untouched.
    BelowThreshold,
    /// Card was already seen; only the current position moved.
    Revisited { index: CardIndex },
    /// Card entered the seen-set.
    NewlySeen {
        index: CardIndex,
        seen: usize,
        total: usize,
    },
    /// Card entered the seen-set and completed coverage. Emitted at most once.
    Unlocked { index: CardIndex, total: usize },
}

impl GateUpdate {
    /// True when the progress readout should move.
    #[must_use]
    pub fn moves_progress(self) -> bool {
        !matches!(self, GateUpdate::Ignored | GateUpdate::BelowThreshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityGate {
    threshold: f64,
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl VisibilityGate {
    #[must_use]
    pub fn from_settings(settings: &SurveySettings) -> Self {
        Self {
            threshold: settings.visibility_threshold(),
        }
    }

    /// Apply one visibility signal to `state`.
    ///
    /// `index` is `None` when the host could not map the element back to a card.
    pub fn observe(
        &self,
        state: &mut ViewState,
        index: Option<CardIndex>,
        ratio: f64,
    ) -> GateUpdate {
        let Some(index) = index.filter(|i| i.value() < state.total()) else {
            return GateUpdate::Ignored;
        };
        let Some(ratio) = VisibilityRatio::new(ratio) else {
            return GateUpdate::Ignored;
        };
        if !ratio.meets(self.threshold) {
            return GateUpdate::BelowThreshold;
        }

        let newly_seen = state.mark_seen(index);
        state.set_current(index);

        if !newly_seen {
            return GateUpdate::Revisited { index };
        }
        if state.try_unlock() {
            return GateUpdate::Unlocked {
                index,
                total: state.total(),
            };
        }
        GateUpdate::NewlySeen {
            index,
            seen: state.seen_count(),
            total: state.total(),
        }
    }
}
