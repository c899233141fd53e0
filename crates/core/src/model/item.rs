use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::{ItemId, ParseIdError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("invalid item id {raw:?}: {source}")]
    InvalidId {
        raw: String,
        #[source]
        source: ParseIdError,
    },

    #[error("item {id} has an empty name")]
    EmptyName { id: String },

    #[error("item {id} has an empty selling point")]
    EmptyUsp { id: String },

    #[error("item {id} has an invalid {field} url {raw:?}")]
    InvalidUrl {
        id: String,
        field: &'static str,
        raw: String,
    },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw item record as it appears in a survey catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDraft {
    pub id: String,
    pub name: String,
    pub usp: String,
    #[serde(default)]
    pub details: Option<ItemDetails>,
    #[serde(default)]
    pub image_label: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl ItemDraft {
    /// Validate the raw record into an immutable `Item`.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` for a malformed id, blank text, or unparsable URLs.
    pub fn validate(self) -> Result<Item, ItemError> {
        let id = ItemId::new(self.id.clone()).map_err(|source| ItemError::InvalidId {
            raw: self.id.clone(),
            source,
        })?;

        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ItemError::EmptyName {
                id: id.to_string(),
            });
        }
        let usp = self.usp.trim().to_owned();
        if usp.is_empty() {
            return Err(ItemError::EmptyUsp {
                id: id.to_string(),
            });
        }

        let details = self.details.filter(|d| !d.text.trim().is_empty());
        let image_label = self
            .image_label
            .map(|label| label.trim().to_owned())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| format!("{name} Product Image"));
        let image_url = parse_optional_url(&id, "image", self.image_url)?;
        let destination = parse_optional_url(&id, "destination", self.destination)?;

        Ok(Item {
            id,
            name,
            usp,
            details,
            image_label,
            image_url,
            destination,
        })
    }
}

fn parse_optional_url(
    id: &ItemId,
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Url>, ItemError> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    Url::parse(raw.trim())
        .map(Some)
        .map_err(|_| ItemError::InvalidUrl {
            id: id.to_string(),
            field,
            raw,
        })
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// Labelled secondary text shown under the selling point (e.g. ingredients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDetails {
    pub label: String,
    pub text: String,
}

/// One product shown as a card. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name: String,
    usp: String,
    details: Option<ItemDetails>,
    image_label: String,
    image_url: Option<Url>,
    destination: Option<Url>,
}

impl Item {
    // Accessors
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn usp(&self) -> &str {
        &self.usp
    }

    #[must_use]
    pub fn details(&self) -> Option<&ItemDetails> {
        self.details.as_ref()
    }

    /// Accessible description of the product visual; doubles as placeholder text.
    #[must_use]
    pub fn image_label(&self) -> &str {
        &self.image_label
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }

    /// Per-item completion destination, used by the comparison flow.
    #[must_use]
    pub fn destination(&self) -> Option<&Url> {
        self.destination.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
