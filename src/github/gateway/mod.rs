//! Collaborators that carry discussion requests to GitHub.
//!
//! Two seams are exposed as traits so the engine can be exercised with mocks:
//! [`QueryExecutor`] posts GraphQL documents and [`ResourceFetcher`] pages
//! through the REST discussion listing. [`OctocrabDiscussionGateway`]
//! implements both over one authenticated Octocrab client.

mod discussions;
mod error_mapping;

pub use discussions::OctocrabDiscussionGateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::github::error::DiscussionError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::ApiDiscussion;
use crate::github::queries::GraphQlRequest;

/// Executes GraphQL queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Posts the request and returns the `data` payload.
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, DiscussionError>;
}

/// Fetches raw discussion pages from the REST endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch one page of discussions (1-based page number).
    async fn fetch_page(
        &self,
        locator: &RepositoryLocator,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ApiDiscussion>, DiscussionError>;
}
