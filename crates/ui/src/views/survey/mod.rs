mod comparison;
mod redirect;
mod scripts;
mod survey;

pub use survey::SurveyView;
#[cfg(test)]
pub(crate) use survey::SurveyTestHandles;
