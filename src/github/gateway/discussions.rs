//! Octocrab-backed implementation of both discussion collaborators.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::github::error::DiscussionError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::ApiDiscussion;
use crate::github::queries::GraphQlRequest;

use super::error_mapping::{map_graphql_errors, map_octocrab_error};
use super::{QueryExecutor, ResourceFetcher};

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Octocrab-backed gateway serving GraphQL queries and REST discussion pages.
///
/// The clients are shareable across concurrent invocations; the gateway holds
/// no per-request state.
pub struct OctocrabDiscussionGateway {
    rest: Octocrab,
    graphql: Octocrab,
}

impl OctocrabDiscussionGateway {
    /// Creates a new gateway using one Octocrab client for both APIs.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self {
            rest: client.clone(),
            graphql: client,
        }
    }

    /// Builds authenticated Octocrab clients for the given REST API base, such
    /// as `https://api.github.com` or a GitHub Enterprise `/api/v3` endpoint.
    ///
    /// GraphQL requests go to `/api/graphql` on GitHub Enterprise and to
    /// `/graphql` on the public API.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::InvalidUrl` when the base cannot be parsed
    /// or `DiscussionError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, DiscussionError> {
        let rest_base =
            Url::parse(api_base).map_err(|error| DiscussionError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            rest: build_client(token, &rest_base)?,
            graphql: build_client(token, &graphql_root(&rest_base))?,
        })
    }
}

fn build_client(token: &PersonalAccessToken, base: &Url) -> Result<Octocrab, DiscussionError> {
    let base_uri: Uri = base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| DiscussionError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| DiscussionError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Returns the root Octocrab appends `/graphql` to.
///
/// GitHub Enterprise serves REST under `/api/v3` but GraphQL at
/// `/api/graphql`.
pub(crate) fn graphql_root(rest_base: &Url) -> Url {
    let mut root = rest_base.clone();
    if let Some(prefix) = rest_base.path().trim_end_matches('/').strip_suffix("/v3") {
        let api_path = prefix.to_owned();
        root.set_path(&api_path);
    }
    root
}

#[async_trait]
impl QueryExecutor for OctocrabDiscussionGateway {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, DiscussionError> {
        let envelope: GraphQlEnvelope = self
            .graphql
            .graphql(request)
            .await
            .map_err(|error| map_octocrab_error("graphql query", &error))?;

        if !envelope.errors.is_empty() {
            return Err(map_graphql_errors(
                envelope.errors.iter().map(|error| error.message.as_str()),
            ));
        }

        envelope.data.ok_or_else(|| DiscussionError::Api {
            message: "GraphQL response carried no data".to_owned(),
        })
    }
}

#[async_trait]
impl ResourceFetcher for OctocrabDiscussionGateway {
    async fn fetch_page(
        &self,
        locator: &RepositoryLocator,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ApiDiscussion>, DiscussionError> {
        let uri: Uri = format!(
            "{path}?page={page}&per_page={per_page}",
            path = locator.discussions_path()
        )
        .parse::<Uri>()
        .map_err(|error| DiscussionError::InvalidUrl(error.to_string()))?;

        let response = self
            .rest
            ._get(uri)
            .await
            .map_err(|error| map_octocrab_error("list discussions", &error))?;

        let status = response.status();
        let body = self
            .rest
            .body_to_string(response)
            .await
            .map_err(|error| DiscussionError::Api {
                message: format!("list discussions response decode failed: {error}"),
            })?;

        if status != StatusCode::OK {
            return Err(DiscussionError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|error| DiscussionError::Api {
            message: format!("list discussions response deserialisation failed: {error}"),
        })
    }
}
