use survey_core::model::ViewState;

/// Aggregated view of survey progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyProgress {
    /// 1-based position of the most recently seen card; 0 for an empty deck.
    pub position: usize,
    pub total: usize,
    pub seen: usize,
    pub unlocked: bool,
}

impl SurveyProgress {
    #[must_use]
    pub fn from_view_state(state: &ViewState) -> Self {
        let total = state.total();
        let position = if total == 0 {
            0
        } else {
            state.current().value() + 1
        };
        Self {
            position,
            total,
            seen: state.seen_count(),
            unlocked: state.is_unlocked(),
        }
    }

    /// Readout text, e.g. `"1 / 3"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }
}
