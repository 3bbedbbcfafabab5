//! Error types exposed by the discussion layer.

use thiserror::Error;

/// Errors surfaced while validating input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscussionError {
    /// A required tool argument was not supplied.
    #[error("missing required parameter: {name}")]
    MissingParameter {
        /// Name of the missing parameter.
        name: String,
    },

    /// A tool argument could not be decoded or has an unsupported value.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// The requested pagination shape is contradictory or out of range.
    #[error("{message}")]
    InvalidPagination {
        /// Description of the violated pagination rule.
        message: String,
    },

    /// The `since` filter is not an ISO 8601 timestamp or date.
    #[error("invalid ISO 8601 timestamp: {value}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
    },

    /// The discussion number is not a positive integer.
    #[error("discussion number must be a positive integer")]
    InvalidDiscussionNumber,

    /// Owner or repository name is empty.
    #[error("repository owner and name must not be empty")]
    MissingPathSegments,

    /// The API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The requested category name does not exist in the repository.
    #[error("category '{name}' not found")]
    CategoryNotFound {
        /// The category name that failed to resolve.
        name: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub rejected the request or returned an undecodable payload.
    #[error("GitHub API error: {message}")]
    Api {
        /// Error detail returned by GitHub or the decoder.
        message: String,
    },

    /// A REST fetch returned a non-success status.
    #[error("unexpected status code: {status}, body: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The caller cancelled the invocation between round trips.
    #[error("operation cancelled")]
    Cancelled,

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl DiscussionError {
    pub(crate) fn pagination(message: impl Into<String>) -> Self {
        Self::InvalidPagination {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns true when the error was raised before any network access.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. }
                | Self::InvalidArgument { .. }
                | Self::InvalidPagination { .. }
                | Self::InvalidTimestamp { .. }
                | Self::InvalidDiscussionNumber
                | Self::MissingPathSegments
                | Self::InvalidUrl(_)
                | Self::MissingToken
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::DiscussionError;

    #[rstest]
    #[case::pagination(DiscussionError::pagination("only one of 'first' or 'last' may be specified"), true)]
    #[case::token(DiscussionError::MissingToken, true)]
    #[case::category(DiscussionError::CategoryNotFound { name: "Ideas".to_owned() }, false)]
    #[case::status(DiscussionError::UnexpectedStatus { status: 500, body: String::new() }, false)]
    #[case::cancelled(DiscussionError::Cancelled, false)]
    fn classifies_validation_errors(#[case] error: DiscussionError, #[case] expected: bool) {
        assert_eq!(error.is_validation(), expected);
    }

    #[rstest]
    fn formats_status_errors_with_body() {
        let error = DiscussionError::UnexpectedStatus {
            status: 404,
            body: "Not Found".to_owned(),
        };

        assert_eq!(error.to_string(), "unexpected status code: 404, body: Not Found");
    }
}
