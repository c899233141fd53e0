mod controller;
mod progress;

pub use controller::{
    Completion, NavigationOutcome, SurveyController, SurveyPhase, VisibilityOutcome,
};
pub use progress::SurveyProgress;
