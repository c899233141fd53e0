use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{CardIndex, ItemId};
use crate::model::item::Item;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("duplicate item id in deck: {id}")]
    DuplicateId { id: String },
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// Working order of Items for one survey session.
///
/// Identifiers are unique. A Deck is fixed once built; reordering produces a
/// new Deck and never touches the items themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deck {
    items: Vec<Item>,
}

impl Deck {
    /// Creates a Deck in the given order.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::DuplicateId` if two items share an identifier.
    pub fn new(items: Vec<Item>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(DeckError::DuplicateId {
                    id: item.id().to_string(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Returns a permuted copy using a Fisher-Yates pass.
    ///
    /// Walks from the last position down to 1; at each position `i` the card is
    /// swapped with the one at `pick(i)`, which must return a value in `0..=i`.
    /// Out-of-range picks are clamped to `i`.
    #[must_use]
    pub fn permuted(&self, mut pick: impl FnMut(usize) -> usize) -> Self {
        let mut items = self.items.clone();
        for i in (1..items.len()).rev() {
            let j = pick(i).min(i);
            items.swap(i, j);
        }
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns true when `index` addresses a card in this deck.
    #[must_use]
    pub fn contains(&self, index: CardIndex) -> bool {
        index.value() < self.items.len()
    }

    #[must_use]
    pub fn last_index(&self) -> Option<CardIndex> {
        self.items.len().checked_sub(1).map(CardIndex::new)
    }

    #[must_use]
    pub fn is_last(&self, index: CardIndex) -> bool {
        self.last_index() == Some(index)
    }

    /// Iterate cards alongside their deck position.
    pub fn indexed(&self) -> impl Iterator<Item = (CardIndex, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (CardIndex::new(i), item))
    }

    #[must_use]
    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
