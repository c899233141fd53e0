//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use survey_core::model::{DeckError, ItemError, SettingsError};

/// Errors emitted while loading a survey catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid form url {raw:?}")]
    InvalidFormUrl { raw: String },
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors emitted by `SurveyController`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("no item with id {id} in this survey")]
    UnknownItem { id: String },
    #[error("item {id} has no completion destination")]
    MissingDestination { id: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
