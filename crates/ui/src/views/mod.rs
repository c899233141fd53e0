mod state;
mod survey;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use state::ViewError;
pub use survey::SurveyView;
