//! GitHub discussion retrieval.
//!
//! This module validates pagination requests, resolves discussion categories
//! by name, composes the GraphQL listing query, and aggregates REST pages when
//! client-side filters need to see every discussion. Octocrab sits behind the
//! [`QueryExecutor`] and [`ResourceFetcher`] traits so the engine can be
//! exercised without network access.

pub mod categories;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod intake;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod params;
pub mod queries;

pub use categories::resolve_categories;
pub use error::DiscussionError;
pub use filter::{DiscussionState, FilterSet, parse_since};
pub use gateway::{OctocrabDiscussionGateway, QueryExecutor, ResourceFetcher};
pub use intake::DiscussionIntake;
pub use locator::{
    DiscussionNumber, PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{ApiDiscussion, Category, Comment, DiscussionDetail, DiscussionSummary};
pub use pagination::{OffsetPage, PaginationRequest};
pub use params::{ListDiscussionsParams, ListingMode, SortDirection, SortField};
pub use queries::GraphQlRequest;

#[cfg(test)]
pub use gateway::{MockQueryExecutor, MockResourceFetcher};
