use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::deck::Deck;
use crate::model::target::CompletionTarget;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("visibility threshold must be in (0, 1]")]
    InvalidVisibilityThreshold,

    #[error("redirect delay must be at most {max_ms} ms")]
    InvalidRedirectDelay { max_ms: u64 },

    #[error("mode {mode} requires a shared form url")]
    MissingFormUrl { mode: CompletionMode },

    #[error("compare mode requires a destination for item {id}")]
    MissingItemDestination { id: String },

    #[error("unknown completion mode: {raw}")]
    UnknownMode { raw: String },
}

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// What happens once every card has been viewed. One per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    /// Schedule the redirect the moment the gate unlocks.
    #[default]
    RedirectOnUnlock,
    /// Redirect when "Continue" is pressed on the last card.
    RedirectOnContinue,
    /// Show the comparison view on "Continue"; redirect to the picked item's form.
    Compare,
}

impl CompletionMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionMode::RedirectOnUnlock => "unlock",
            CompletionMode::RedirectOnContinue => "continue",
            CompletionMode::Compare => "compare",
        }
    }
}

impl fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unlock" | "redirect_on_unlock" => Ok(Self::RedirectOnUnlock),
            "continue" | "redirect_on_continue" => Ok(Self::RedirectOnContinue),
            "compare" => Ok(Self::Compare),
            _ => Err(SettingsError::UnknownMode { raw: s.to_string() }),
        }
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(2_500);
pub const MAX_REDIRECT_DELAY_MS: u64 = 30_000;
pub const DEFAULT_BLOCKED_NOTICE: &str =
    "Please view all products before continuing. Swipe through all cards.";
pub const DEFAULT_ACKNOWLEDGMENT: &str = "Thanks! Taking you to the survey...";

/// Deployment-level behaviour of one survey.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveySettings {
    mode: CompletionMode,
    form_url: Option<Url>,
    redirect_delay: Duration,
    visibility_threshold: f64,
    blocked_notice: String,
    acknowledgment: String,
}

impl SurveySettings {
    /// Defaults matching the shipped survey: unlock redirect, 60% threshold, 2.5s delay.
    #[must_use]
    pub fn redirect_on_unlock(form_url: Url) -> Self {
        Self {
            mode: CompletionMode::RedirectOnUnlock,
            form_url: Some(form_url),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            blocked_notice: DEFAULT_BLOCKED_NOTICE.to_string(),
            acknowledgment: DEFAULT_ACKNOWLEDGMENT.to_string(),
        }
    }

    /// Creates custom survey settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the threshold is outside `(0, 1]`, the delay
    /// exceeds the maximum, or a redirect mode lacks a form url.
    pub fn new(
        mode: CompletionMode,
        form_url: Option<Url>,
        redirect_delay: Duration,
        visibility_threshold: f64,
        blocked_notice: Option<String>,
        acknowledgment: Option<String>,
    ) -> Result<Self, SettingsError> {
        if !visibility_threshold.is_finite()
            || visibility_threshold <= 0.0
            || visibility_threshold > 1.0
        {
            return Err(SettingsError::InvalidVisibilityThreshold);
        }
        if redirect_delay > Duration::from_millis(MAX_REDIRECT_DELAY_MS) {
            return Err(SettingsError::InvalidRedirectDelay {
                max_ms: MAX_REDIRECT_DELAY_MS,
            });
        }
        if mode != CompletionMode::Compare && form_url.is_none() {
            return Err(SettingsError::MissingFormUrl { mode });
        }

        Ok(Self {
            mode,
            form_url,
            redirect_delay,
            visibility_threshold,
            blocked_notice: non_blank_or(blocked_notice, DEFAULT_BLOCKED_NOTICE),
            acknowledgment: non_blank_or(acknowledgment, DEFAULT_ACKNOWLEDGMENT),
        })
    }

    /// Checks that every item can be resolved to a destination under this mode.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::MissingItemDestination` in compare mode when an
    /// item has no destination of its own.
    pub fn check_deck(&self, deck: &Deck) -> Result<(), SettingsError> {
        if self.mode != CompletionMode::Compare {
            return Ok(());
        }
        match deck.items().iter().find(|item| item.destination().is_none()) {
            Some(item) => Err(SettingsError::MissingItemDestination {
                id: item.id().to_string(),
            }),
            None => Ok(()),
        }
    }

    // Accessors
    #[must_use]
    pub fn mode(&self) -> CompletionMode {
        self.mode
    }

    #[must_use]
    pub fn form_url(&self) -> Option<&Url> {
        self.form_url.as_ref()
    }

    /// Shared completion target, when this deployment has one.
    #[must_use]
    pub fn shared_target(&self) -> Option<CompletionTarget> {
        self.form_url.clone().map(CompletionTarget::Shared)
    }

    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    #[must_use]
    pub fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    #[must_use]
    pub fn blocked_notice(&self) -> &str {
        &self.blocked_notice
    }

    #[must_use]
    pub fn acknowledgment(&self) -> &str {
        &self.acknowledgment
    }
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
