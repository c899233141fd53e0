use url::Url;

use crate::model::ids::ItemId;

/// Where the visitor is sent once the survey completes. Resolved at redirect time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionTarget {
    /// One form shared by every visitor.
    Shared(Url),
    /// The destination of the item the visitor picked on the comparison screen.
    PerItem { item: ItemId, url: Url },
}

impl CompletionTarget {
    #[must_use]
    pub fn url(&self) -> &Url {
        match self {
            CompletionTarget::Shared(url) | CompletionTarget::PerItem { url, .. } => url,
        }
    }

    #[must_use]
    pub fn chosen_item(&self) -> Option<&ItemId> {
        match self {
            CompletionTarget::Shared(_) => None,
            CompletionTarget::PerItem { item, .. } => Some(item),
        }
    }
}
