mod card_vm;
mod survey_vm;

pub use card_vm::{CardVm, ComparisonOptionVm, card_dom_id, map_cards, map_comparison_options};
pub use survey_vm::{SurveyEffect, SurveyIntent, SurveyVm, start_survey};
