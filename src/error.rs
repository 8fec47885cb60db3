use thiserror::Error;

/// Routing failures. These never surface to the user; the display simply
/// stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The requested identifier is not in the route table.
    #[error("no route for page '{0}'")]
    UnknownPage(String),
}

/// Failures of a fragment fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The fetch was superseded by a newer navigation. This is the normal
    /// cancellation path, not a user-visible failure.
    #[error("request aborted")]
    Aborted,
    /// The resource responded with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }
}

/// Failures of the contact-form delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// A required form field is missing from the injected fragment.
    #[error("missing form field '{0}'")]
    MissingField(&'static str),
    /// The transactional-email service rejected or never received the call.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aborted_is_not_a_failure_status() {
        assert!(FetchError::Aborted.is_aborted());
        assert!(!FetchError::Status(404).is_aborted());
        assert!(!FetchError::Transport("connection reset".into()).is_aborted());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RouteError::UnknownPage("blog".into()).to_string(),
            "no route for page 'blog'"
        );
        assert_eq!(FetchError::Status(500).to_string(), "unexpected status 500");
    }
}
