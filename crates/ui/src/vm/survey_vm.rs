use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    NavigationOutcome, RedirectScheduler, SurveyCatalog, SurveyController, SurveyPhase,
    SurveyProgress, build_deck, build_deck_from_entropy,
};
use survey_core::model::{CardIndex, ItemId};

use crate::views::ViewError;
use crate::vm::card_vm::{CardVm, ComparisonOptionVm, map_cards, map_comparison_options};

#[derive(Clone, Debug, PartialEq)]
pub enum SurveyIntent {
    /// Visibility ratio reported by the host for a card; `None` if unmapped.
    Visible {
        index: Option<CardIndex>,
        ratio: f64,
    },
    Forward(CardIndex),
    Choose(ItemId),
}

/// Host-side work the view must perform after an intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveyEffect {
    None,
    ScrollTo(CardIndex),
}

pub struct SurveyVm<S> {
    controller: SurveyController<S>,
    cards: Vec<CardVm>,
    notice: Option<String>,
    acknowledgment: Option<String>,
}

impl<S: RedirectScheduler> SurveyVm<S> {
    #[must_use]
    pub fn new(controller: SurveyController<S>) -> Self {
        let cards = map_cards(controller.deck());
        Self {
            controller,
            cards,
            notice: None,
            acknowledgment: None,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[CardVm] {
        &self.cards
    }

    #[must_use]
    pub fn progress(&self) -> SurveyProgress {
        self.controller.progress()
    }

    #[must_use]
    pub fn visibility_threshold(&self) -> f64 {
        self.controller.settings().visibility_threshold()
    }

    /// Blocked-navigation notice, shown until the next forward action.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn acknowledgment(&self) -> Option<&str> {
        self.acknowledgment.as_deref()
    }

    #[must_use]
    pub fn is_comparing(&self) -> bool {
        *self.controller.phase() == SurveyPhase::Comparing
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.controller.phase(), SurveyPhase::Completed(_))
    }

    /// Item picked on the comparison view, once the survey completed through it.
    #[must_use]
    pub fn chosen_item(&self) -> Option<&ItemId> {
        match self.controller.phase() {
            SurveyPhase::Completed(target) => target.chosen_item(),
            SurveyPhase::Browsing | SurveyPhase::Comparing => None,
        }
    }

    /// The comparison view stays up after a choice while the redirect is pending.
    #[must_use]
    pub fn shows_comparison(&self) -> bool {
        self.is_comparing() || self.chosen_item().is_some()
    }

    #[must_use]
    pub fn comparison_options(&self) -> Vec<ComparisonOptionVm> {
        map_comparison_options(self.controller.deck())
    }

    #[must_use]
    pub fn controller(&self) -> &SurveyController<S> {
        &self.controller
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if a comparison choice cannot be resolved.
    pub fn dispatch(&mut self, intent: SurveyIntent) -> Result<SurveyEffect, ViewError> {
        match intent {
            SurveyIntent::Visible { index, ratio } => {
                let outcome = self.controller.on_visibility_change(index, ratio);
                if let Some(completion) = outcome.completion {
                    self.notice = None;
                    self.acknowledgment = Some(completion.acknowledgment);
                }
                Ok(SurveyEffect::None)
            }
            SurveyIntent::Forward(index) => {
                let outcome = self.controller.on_forward(index);
                Ok(self.apply(outcome))
            }
            SurveyIntent::Choose(id) => {
                let outcome = self.controller.select(&id).map_err(|err| {
                    tracing::warn!(%err, "comparison choice rejected");
                    ViewError::Unknown
                })?;
                Ok(self.apply(outcome))
            }
        }
    }

    fn apply(&mut self, outcome: NavigationOutcome) -> SurveyEffect {
        match outcome {
            NavigationOutcome::Blocked { notice } => {
                self.notice = Some(notice);
                SurveyEffect::None
            }
            NavigationOutcome::ScrollTo(index) => {
                self.notice = None;
                SurveyEffect::ScrollTo(index)
            }
            NavigationOutcome::Acknowledged(completion) => {
                self.notice = None;
                self.acknowledgment = Some(completion.acknowledgment);
                SurveyEffect::None
            }
            NavigationOutcome::ShowComparison => {
                self.notice = None;
                SurveyEffect::None
            }
            NavigationOutcome::Ignored => SurveyEffect::None,
        }
    }
}

/// Shuffle the catalog into a fresh session. `seed` pins the order for tests and demos.
///
/// # Errors
///
/// Returns `ViewError::Misconfigured` if the catalog cannot back a session.
pub fn start_survey<S: RedirectScheduler>(
    catalog: &SurveyCatalog,
    seed: Option<u64>,
    scheduler: S,
) -> Result<SurveyVm<S>, ViewError> {
    let deck = match seed {
        Some(seed) => build_deck(catalog.source(), &mut StdRng::seed_from_u64(seed)),
        None => build_deck_from_entropy(catalog.source()),
    };
    let controller =
        SurveyController::new(deck, catalog.settings().clone(), scheduler).map_err(|err| {
            tracing::error!(%err, "survey catalog cannot start a session");
            ViewError::Misconfigured
        })?;
    Ok(SurveyVm::new(controller))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use services::CatalogOverrides;
    use survey_core::model::CompletionMode;
    use url::Url;

    use super::*;

    #[derive(Default, Clone)]
    struct RecordingScheduler {
        calls: Rc<RefCell<Vec<(Duration, Url)>>>,
    }

    impl RedirectScheduler for RecordingScheduler {
        fn schedule(&self, delay: Duration, destination: Url) {
            self.calls.borrow_mut().push((delay, destination));
        }
    }

    const CATALOG: &str = r#"{
        "form_url": "https://forms.gle/shared",
        "blocked_notice": "Please view all energy bars before continuing.",
        "acknowledgment": "Thanks!",
        "items": [
            { "id": "a", "name": "A", "usp": "a", "destination": "https://forms.gle/a" },
            { "id": "b", "name": "B", "usp": "b", "destination": "https://forms.gle/b" },
            { "id": "c", "name": "C", "usp": "c", "destination": "https://forms.gle/c" }
        ]
    }"#;

    fn vm(mode: CompletionMode) -> SurveyVm<RecordingScheduler> {
        let overrides = CatalogOverrides {
            mode: Some(mode),
            form_url: None,
        };
        let catalog = SurveyCatalog::from_json_str(CATALOG, &overrides).unwrap();
        start_survey(&catalog, Some(1), RecordingScheduler::default()).unwrap()
    }

    fn see(vm: &mut SurveyVm<RecordingScheduler>, i: usize) {
        vm.dispatch(SurveyIntent::Visible {
            index: Some(CardIndex::new(i)),
            ratio: 0.6,
        })
        .unwrap();
    }

    #[test]
    fn forward_scrolls_and_blocks_on_last_card() {
        let mut vm = vm(CompletionMode::RedirectOnContinue);
        assert_eq!(
            vm.dispatch(SurveyIntent::Forward(CardIndex::new(0))).unwrap(),
            SurveyEffect::ScrollTo(CardIndex::new(1))
        );
        vm.dispatch(SurveyIntent::Forward(CardIndex::new(2))).unwrap();
        assert_eq!(
            vm.notice(),
            Some("Please view all energy bars before continuing.")
        );

        // Next successful navigation clears the notice.
        vm.dispatch(SurveyIntent::Forward(CardIndex::new(0))).unwrap();
        assert!(vm.notice().is_none());
    }

    #[test]
    fn continue_shows_acknowledgment_once_unlocked() {
        let mut vm = vm(CompletionMode::RedirectOnContinue);
        (0..3).for_each(|i| see(&mut vm, i));
        vm.dispatch(SurveyIntent::Forward(CardIndex::new(2))).unwrap();
        assert_eq!(vm.acknowledgment(), Some("Thanks!"));
        assert!(vm.is_completed());
        assert!(!vm.shows_comparison());
    }

    #[test]
    fn unlock_mode_acknowledges_from_visibility() {
        let mut vm = vm(CompletionMode::RedirectOnUnlock);
        (0..3).for_each(|i| see(&mut vm, i));
        assert_eq!(vm.acknowledgment(), Some("Thanks!"));
        assert_eq!(vm.progress().label(), "3 / 3");
    }

    #[test]
    fn compare_flow_reveals_options_then_completes() {
        let mut vm = vm(CompletionMode::Compare);
        (0..3).for_each(|i| see(&mut vm, i));
        vm.dispatch(SurveyIntent::Forward(CardIndex::new(2))).unwrap();
        assert!(vm.is_comparing());
        assert_eq!(vm.comparison_options().len(), 3);

        let err = vm
            .dispatch(SurveyIntent::Choose(ItemId::new("zzz").unwrap()))
            .unwrap_err();
        assert_eq!(err, ViewError::Unknown);

        vm.dispatch(SurveyIntent::Choose(ItemId::new("b").unwrap()))
            .unwrap();
        assert!(vm.is_completed());
        assert!(vm.shows_comparison());
        assert_eq!(vm.chosen_item().map(ItemId::as_str), Some("b"));
        let calls = vm.controller().scheduler().calls.borrow();
        assert_eq!(calls[0].1.as_str(), "https://forms.gle/b");
    }
}
