mod deck;
mod ids;
mod item;
mod settings;
mod target;
mod view_state;

pub use ids::{CardIndex, ItemId, ParseIdError, SessionId};

pub use deck::{Deck, DeckError};
pub use item::{Item, ItemDetails, ItemDraft, ItemError};
pub use settings::{
    CompletionMode, DEFAULT_ACKNOWLEDGMENT, DEFAULT_BLOCKED_NOTICE, DEFAULT_REDIRECT_DELAY,
    DEFAULT_VISIBILITY_THRESHOLD, MAX_REDIRECT_DELAY_MS, SettingsError, SurveySettings,
};
pub use target::CompletionTarget;
pub use view_state::{ViewState, VisibilityRatio};
