//! Palaver library crate providing GitHub discussion retrieval.
//!
//! The library lists discussions with cursor or offset pagination, resolves
//! category names, applies client-side filters, and exposes the operations as
//! JSON tools with friendly errors that can be displayed in the CLI.

pub mod config;
pub mod github;
pub mod tools;

pub use config::PalaverConfig;
pub use github::{
    Category, Comment, DiscussionDetail, DiscussionError, DiscussionIntake, DiscussionNumber,
    DiscussionSummary, FilterSet, ListDiscussionsParams, OctocrabDiscussionGateway,
    PaginationRequest, PersonalAccessToken, RepositoryLocator,
};
pub use tools::{DiscussionTools, ToolName, ToolOutcome};
