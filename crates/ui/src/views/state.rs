use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("This survey is not configured correctly.")]
    Misconfigured,
    #[error("Something went wrong. Please try again.")]
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_visitor_facing() {
        assert_eq!(
            ViewError::Misconfigured.message(),
            "This survey is not configured correctly."
        );
        assert_eq!(
            ViewError::Unknown.to_string(),
            "Something went wrong. Please try again."
        );
    }
}
