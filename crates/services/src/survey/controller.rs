use std::time::Duration;

use tracing::{debug, info, warn};

use survey_core::model::{
    CardIndex, CompletionMode, CompletionTarget, Deck, ItemId, SessionId, SurveySettings,
    ViewState,
};
use survey_core::{GateUpdate, VisibilityGate};

use super::progress::SurveyProgress;
use crate::error::ControllerError;
use crate::redirect::RedirectScheduler;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Where a survey session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyPhase {
    Browsing,
    /// Comparison view is showing; waiting for the visitor to pick an item.
    Comparing,
    /// Redirect issued. Terminal.
    Completed(CompletionTarget),
}

/// Details of a completed session, for the acknowledgment UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub target: CompletionTarget,
    pub delay: Duration,
    pub acknowledgment: String,
}

/// Result of activating a card's forward control or a comparison choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Bring the given card into view. Visibility will update the gate.
    ScrollTo(CardIndex),
    /// Last card reached before every card was seen.
    Blocked { notice: String },
    /// Redirect scheduled; show the acknowledgment.
    Acknowledged(Completion),
    /// Reveal the comparison view.
    ShowComparison,
    /// No effect in the current phase.
    Ignored,
}

/// Result of feeding one visibility signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityOutcome {
    pub update: GateUpdate,
    /// Set when this signal unlocked the gate and the mode redirects on unlock.
    pub completion: Option<Completion>,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns one survey session: the shuffled deck, its view state, and the
/// navigation state machine. All mutation goes through this type.
pub struct SurveyController<S> {
    session_id: SessionId,
    deck: Deck,
    view: ViewState,
    gate: VisibilityGate,
    settings: SurveySettings,
    phase: SurveyPhase,
    scheduler: S,
}

impl<S: RedirectScheduler> SurveyController<S> {
    /// Start a session over an already shuffled deck.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Settings` if the deck cannot satisfy the
    /// completion mode (e.g. compare mode with an item lacking a destination).
    pub fn new(deck: Deck, settings: SurveySettings, scheduler: S) -> Result<Self, ControllerError> {
        settings.check_deck(&deck)?;
        let session_id = SessionId::new_random();
        info!(
            session = %session_id,
            cards = deck.len(),
            mode = %settings.mode(),
            "survey session started"
        );
        Ok(Self {
            session_id,
            view: ViewState::new(deck.len()),
            gate: VisibilityGate::from_settings(&settings),
            deck,
            settings,
            phase: SurveyPhase::Browsing,
            scheduler,
        })
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn settings(&self) -> &SurveySettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> &SurveyPhase {
        &self.phase
    }

    #[must_use]
    pub fn progress(&self) -> SurveyProgress {
        SurveyProgress::from_view_state(&self.view)
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Feed one visibility signal from the host.
    pub fn on_visibility_change(&mut self, index: Option<CardIndex>, ratio: f64) -> VisibilityOutcome {
        let update = self.gate.observe(&mut self.view, index, ratio);
        match update {
            GateUpdate::Ignored => {
                debug!(session = %self.session_id, ?index, ratio, "visibility signal ignored");
            }
            GateUpdate::NewlySeen { index, seen, total } => {
                info!(session = %self.session_id, card = %index, "card viewed ({seen}/{total})");
            }
            GateUpdate::Unlocked { index, total } => {
                info!(session = %self.session_id, card = %index, "card viewed ({total}/{total})");
                info!(session = %self.session_id, "all cards viewed");
            }
            GateUpdate::BelowThreshold | GateUpdate::Revisited { .. } => {}
        }

        let completion = match update {
            GateUpdate::Unlocked { .. }
                if self.settings.mode() == CompletionMode::RedirectOnUnlock
                    && self.phase == SurveyPhase::Browsing =>
            {
                self.settings.shared_target().map(|target| self.complete(target))
            }
            _ => None,
        };

        VisibilityOutcome { update, completion }
    }

    /// Handle the forward control on card `index`.
    pub fn on_forward(&mut self, index: CardIndex) -> NavigationOutcome {
        if matches!(self.phase, SurveyPhase::Completed(_)) || !self.deck.contains(index) {
            return NavigationOutcome::Ignored;
        }
        if !self.deck.is_last(index) {
            return NavigationOutcome::ScrollTo(index.next());
        }

        if !self.view.is_unlocked() {
            warn!(
                session = %self.session_id,
                seen = self.view.seen_count(),
                total = self.view.total(),
                "continue blocked until all cards are viewed"
            );
            return NavigationOutcome::Blocked {
                notice: self.settings.blocked_notice().to_string(),
            };
        }

        match self.settings.mode() {
            // Unlock already scheduled the redirect, so the phase is Completed.
            CompletionMode::RedirectOnUnlock => NavigationOutcome::Ignored,
            CompletionMode::RedirectOnContinue => match self.settings.shared_target() {
                Some(target) => NavigationOutcome::Acknowledged(self.complete(target)),
                None => NavigationOutcome::Ignored,
            },
            CompletionMode::Compare => {
                if self.phase == SurveyPhase::Browsing {
                    info!(session = %self.session_id, "showing comparison view");
                }
                self.phase = SurveyPhase::Comparing;
                NavigationOutcome::ShowComparison
            }
        }
    }

    /// Handle a choice on the comparison view.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::UnknownItem` if `id` is not in the deck, or
    /// `ControllerError::MissingDestination` if the item has nowhere to go.
    pub fn select(&mut self, id: &ItemId) -> Result<NavigationOutcome, ControllerError> {
        if self.phase != SurveyPhase::Comparing {
            return Ok(NavigationOutcome::Ignored);
        }
        let item = self
            .deck
            .find(id)
            .ok_or_else(|| ControllerError::UnknownItem { id: id.to_string() })?;
        let url = item
            .destination()
            .cloned()
            .ok_or_else(|| ControllerError::MissingDestination { id: id.to_string() })?;

        let target = CompletionTarget::PerItem {
            item: id.clone(),
            url,
        };
        Ok(NavigationOutcome::Acknowledged(self.complete(target)))
    }

    fn complete(&mut self, target: CompletionTarget) -> Completion {
        let delay = self.settings.redirect_delay();
        info!(
            session = %self.session_id,
            destination = %target.url(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "survey completed; redirect scheduled"
        );
        self.scheduler.schedule(delay, target.url().clone());
        self.phase = SurveyPhase::Completed(target.clone());
        Completion {
            target,
            delay,
            acknowledgment: self.settings.acknowledgment().to_string(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
