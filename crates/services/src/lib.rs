#![forbid(unsafe_code)]

pub mod catalog;
pub mod deck_builder;
pub mod error;
pub mod redirect;
pub mod survey;

pub use catalog::{CatalogOverrides, SurveyCatalog};
pub use deck_builder::{build_deck, build_deck_from_entropy};
pub use error::{CatalogError, ControllerError};
pub use redirect::{PageNavigator, RedirectScheduler, run_redirect};
pub use survey::{
    Completion, NavigationOutcome, SurveyController, SurveyPhase, SurveyProgress,
    VisibilityOutcome,
};
