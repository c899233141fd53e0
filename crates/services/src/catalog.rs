//! Survey catalog loading: product records plus deployment settings, from JSON.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use survey_core::model::{
    CompletionMode, DEFAULT_REDIRECT_DELAY, DEFAULT_VISIBILITY_THRESHOLD, Deck, ItemDraft,
    SurveySettings,
};

use crate::error::CatalogError;

const DEFAULT_TITLE: &str = "Product Research";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    mode: CompletionMode,
    #[serde(default)]
    form_url: Option<String>,
    #[serde(default)]
    redirect_delay_ms: Option<u64>,
    #[serde(default)]
    visibility_threshold: Option<f64>,
    #[serde(default)]
    blocked_notice: Option<String>,
    #[serde(default)]
    acknowledgment: Option<String>,
    items: Vec<ItemDraft>,
}

/// Operator overrides applied on top of the catalog file (CLI / environment).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOverrides {
    pub mode: Option<CompletionMode>,
    pub form_url: Option<String>,
}

/// Validated survey content in source order, ready for deck building.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyCatalog {
    title: String,
    source: Deck,
    settings: SurveySettings,
}

impl SurveyCatalog {
    /// Parse and validate a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for malformed JSON, invalid items, duplicate ids,
    /// a missing or malformed form url, or out-of-range settings.
    pub fn from_json_str(raw: &str, overrides: &CatalogOverrides) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;

        let items = file
            .items
            .into_iter()
            .map(ItemDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        let source = Deck::new(items)?;

        let form_url = overrides
            .form_url
            .clone()
            .or(file.form_url)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                Url::parse(raw.trim()).map_err(|_| CatalogError::InvalidFormUrl { raw })
            })
            .transpose()?;

        let settings = SurveySettings::new(
            overrides.mode.unwrap_or(file.mode),
            form_url,
            file.redirect_delay_ms
                .map_or(DEFAULT_REDIRECT_DELAY, Duration::from_millis),
            file.visibility_threshold
                .unwrap_or(DEFAULT_VISIBILITY_THRESHOLD),
            file.blocked_notice,
            file.acknowledgment,
        )?;
        settings.check_deck(&source)?;

        let title = file
            .title
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(Self {
            title,
            source,
            settings,
        })
    }

    /// Read and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as
    /// [`SurveyCatalog::from_json_str`].
    pub fn from_path(path: &Path, overrides: &CatalogOverrides) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, overrides)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Items in catalog order; shuffle with `build_deck` per session.
    #[must_use]
    pub fn source(&self) -> &Deck {
        &self.source
    }

    #[must_use]
    pub fn settings(&self) -> &SurveySettings {
        &self.settings
    }
}
