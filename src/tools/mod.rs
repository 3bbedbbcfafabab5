//! Tool surface over the discussion engine.
//!
//! Each tool takes a JSON argument object and produces either the JSON
//! encoding of its result or a textual error. Failures of one invocation
//! never escape as Rust errors; callers receive a [`ToolOutcome`] either way.

pub mod args;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::github::error::DiscussionError;
use crate::github::gateway::{QueryExecutor, ResourceFetcher};
use crate::github::intake::DiscussionIntake;

use args::{CategoryArgs, DiscussionArgs, ListDiscussionsArgs, decode_arguments};

/// Names of the tools this crate serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    /// List discussions with cursor or offset pagination.
    ListDiscussions,
    /// Fetch one discussion with its body.
    GetDiscussion,
    /// Fetch the comments of one discussion.
    GetDiscussionComments,
    /// List discussion categories.
    ListDiscussionCategories,
}

impl ToolName {
    /// Every tool, in documentation order.
    pub const ALL: [Self; 4] = [
        Self::ListDiscussions,
        Self::GetDiscussion,
        Self::GetDiscussionComments,
        Self::ListDiscussionCategories,
    ];

    /// Returns the wire name of the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListDiscussions => "list_discussions",
            Self::GetDiscussion => "get_discussion",
            Self::GetDiscussionComments => "get_discussion_comments",
            Self::ListDiscussionCategories => "list_discussion_categories",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = DiscussionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == value)
            .ok_or_else(|| DiscussionError::invalid_argument(format!("unknown tool: {value}")))
    }
}

/// Result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// JSON encoding of the result.
    Success(String),
    /// Textual error shown to the caller.
    Failure(String),
}

impl ToolOutcome {
    /// Returns true for a failed invocation.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the payload text regardless of outcome.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

/// Dispatches tool invocations to a [`DiscussionIntake`].
pub struct DiscussionTools<'client, Executor, Fetcher>
where
    Executor: QueryExecutor,
    Fetcher: ResourceFetcher,
{
    intake: DiscussionIntake<'client, Executor, Fetcher>,
}

impl<'client, Executor, Fetcher> DiscussionTools<'client, Executor, Fetcher>
where
    Executor: QueryExecutor,
    Fetcher: ResourceFetcher,
{
    /// Creates a dispatcher over the given collaborators.
    #[must_use]
    pub const fn new(executor: &'client Executor, fetcher: &'client Fetcher) -> Self {
        Self {
            intake: DiscussionIntake::new(executor, fetcher),
        }
    }

    /// Runs the named tool with JSON `arguments`.
    pub async fn call(
        &self,
        name: &str,
        arguments: Value,
        cancel: &CancellationToken,
    ) -> ToolOutcome {
        let result = match name.parse::<ToolName>() {
            Ok(tool) => self.dispatch(tool, arguments, cancel).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(payload) => {
                tracing::info!("tool {name} completed ({bytes} bytes)", bytes = payload.len());
                ToolOutcome::Success(payload)
            }
            Err(error) => {
                if error.is_validation() {
                    tracing::info!("tool {name} rejected its arguments: {error}");
                } else {
                    tracing::warn!("tool {name} failed: {error}");
                }
                ToolOutcome::Failure(error.to_string())
            }
        }
    }

    async fn dispatch(
        &self,
        tool: ToolName,
        arguments: Value,
        cancel: &CancellationToken,
    ) -> Result<String, DiscussionError> {
        match tool {
            ToolName::ListDiscussions => {
                let args: ListDiscussionsArgs = decode_arguments(arguments)?;
                let locator = args.locator()?;
                let params = args.into_params()?;
                let items = self
                    .intake
                    .list_discussions(&locator, &params, cancel)
                    .await?;
                encode(&items)
            }
            ToolName::GetDiscussion => {
                let args: DiscussionArgs = decode_arguments(arguments)?;
                let (locator, number) = args.target()?;
                encode(&self.intake.get_discussion(&locator, number).await?)
            }
            ToolName::GetDiscussionComments => {
                let args: DiscussionArgs = decode_arguments(arguments)?;
                let (locator, number) = args.target()?;
                encode(&self.intake.get_discussion_comments(&locator, number).await?)
            }
            ToolName::ListDiscussionCategories => {
                let args: CategoryArgs = decode_arguments(arguments)?;
                let locator = args.locator()?;
                let categories = self
                    .intake
                    .list_discussion_categories(&locator, &args.pagination())
                    .await?;
                encode(&categories)
            }
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, DiscussionError> {
    serde_json::to_string(value).map_err(|error| DiscussionError::Api {
        message: format!("response serialisation failed: {error}"),
    })
}
