//! Error mapping helpers for the Octocrab discussion gateway.

use http::StatusCode;

use crate::github::error::DiscussionError;

const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> DiscussionError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let status = source.status_code;
        let message = format!(
            "{operation} failed with status {status}: {detail}",
            detail = source.message
        );
        return if is_auth_failure(status) {
            DiscussionError::Authentication { message }
        } else {
            DiscussionError::Api { message }
        };
    }

    if is_network_error(error) {
        return DiscussionError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    DiscussionError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Joins GraphQL error messages into one transport error.
pub(super) fn map_graphql_errors<'a>(messages: impl IntoIterator<Item = &'a str>) -> DiscussionError {
    let joined = messages.into_iter().collect::<Vec<_>>().join("; ");
    DiscussionError::Api {
        message: format!("GraphQL query failed: {joined}"),
    }
}
