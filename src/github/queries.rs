//! GraphQL documents, variable builders, and response schemas.
//!
//! Each query has a response schema decoded once at the boundary so the rest
//! of the crate works with typed records instead of raw JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DiscussionError;
use super::locator::{DiscussionNumber, RepositoryLocator};
use super::models::{Category, Comment, DiscussionDetail, DiscussionSummary, state_from_closed};
use super::pagination::PaginationRequest;
use super::params::{SortDirection, SortField};

const CATEGORIES_QUERY: &str = r"query($owner: String!, $repo: String!, $first: Int, $last: Int, $after: String, $before: String) {
  repository(owner: $owner, name: $repo) {
    discussionCategories(first: $first, last: $last, after: $after, before: $before) {
      nodes { id name }
      pageInfo { hasNextPage endCursor }
    }
  }
}";

const DISCUSSIONS_QUERY: &str = r"query($owner: String!, $repo: String!, $first: Int, $last: Int, $after: String, $before: String, $categoryId: ID, $orderBy: DiscussionOrder, $answered: Boolean) {
  repository(owner: $owner, name: $repo) {
    discussions(first: $first, last: $last, after: $after, before: $before, categoryId: $categoryId, orderBy: $orderBy, answered: $answered) {
      nodes {
        number
        title
        createdAt
        url
        closed
        category { id name }
        labels(first: 100) { nodes { name } }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}";

const DISCUSSION_QUERY: &str = r"query($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    discussion(number: $number) { number body closed createdAt url }
  }
}";

const COMMENTS_QUERY: &str = r"query($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    discussion(number: $number) {
      comments(first: 100) { nodes { body } }
    }
  }
}";

/// GraphQL query document plus variables, as posted to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    /// Query document.
    pub query: &'static str,
    /// Variables object.
    pub variables: Value,
}

impl GraphQlRequest {
    /// Returns a variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Returns true when this request lists discussion categories.
    #[must_use]
    pub fn is_category_listing(&self) -> bool {
        self.query == CATEGORIES_QUERY
    }

    /// Returns true when this request lists discussions.
    #[must_use]
    pub fn is_discussion_listing(&self) -> bool {
        self.query == DISCUSSIONS_QUERY
    }
}

/// Builds the variables shared by every repository-scoped query.
///
/// Absent optional values are left out so the platform applies its own
/// argument defaults.
struct Variables(Map<String, Value>);

impl Variables {
    fn for_repository(locator: &RepositoryLocator) -> Self {
        let mut map = Map::new();
        map.insert("owner".to_owned(), Value::from(locator.owner().as_str()));
        map.insert("repo".to_owned(), Value::from(locator.repository().as_str()));
        Self(map)
    }

    fn set(mut self, name: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(present) = value {
            self.0.insert(name.to_owned(), present.into());
        }
        self
    }

    fn pagination(self, pagination: &PaginationRequest) -> Self {
        self.set("first", pagination.first)
            .set("last", pagination.last)
            .set("after", pagination.after.clone())
            .set("before", pagination.before.clone())
    }

    fn into_request(self, query: &'static str) -> GraphQlRequest {
        GraphQlRequest {
            query,
            variables: Value::Object(self.0),
        }
    }
}

/// Request for one page of discussion categories.
pub(crate) fn categories_request(
    locator: &RepositoryLocator,
    pagination: &PaginationRequest,
) -> GraphQlRequest {
    Variables::for_repository(locator)
        .pagination(pagination)
        .into_request(CATEGORIES_QUERY)
}

/// Variables for a single discussion-listing query.
#[derive(Debug, Clone, Default)]
pub(crate) struct DiscussionListQuery<'a> {
    pub(crate) pagination: PaginationRequest,
    pub(crate) category_id: Option<&'a str>,
    pub(crate) order: Option<(SortField, SortDirection)>,
    pub(crate) answered: Option<bool>,
}

impl DiscussionListQuery<'_> {
    pub(crate) fn into_request(self, locator: &RepositoryLocator) -> GraphQlRequest {
        let order_by = self.order.map(|(field, direction)| {
            serde_json::json!({ "field": field.as_str(), "direction": direction.as_str() })
        });

        Variables::for_repository(locator)
            .pagination(&self.pagination)
            .set("categoryId", self.category_id)
            .set("orderBy", order_by)
            .set("answered", self.answered)
            .into_request(DISCUSSIONS_QUERY)
    }
}

/// Request for a single discussion.
pub(crate) fn discussion_request(
    locator: &RepositoryLocator,
    number: DiscussionNumber,
) -> GraphQlRequest {
    Variables::for_repository(locator)
        .set("number", Some(number.get()))
        .into_request(DISCUSSION_QUERY)
}

/// Request for the first 100 comments of a discussion.
pub(crate) fn comments_request(
    locator: &RepositoryLocator,
    number: DiscussionNumber,
) -> GraphQlRequest {
    Variables::for_repository(locator)
        .set("number", Some(number.get()))
        .into_request(COMMENTS_QUERY)
}

/// Decodes a GraphQL `data` payload into its response schema.
pub(crate) fn decode<T: DeserializeOwned>(
    operation: &str,
    data: Value,
) -> Result<T, DiscussionError> {
    serde_json::from_value(data).map_err(|error| DiscussionError::Api {
        message: format!("{operation} response deserialisation failed: {error}"),
    })
}

/// Cursor page metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CursorPageInfo {
    pub(crate) has_next_page: bool,
    #[serde(default)]
    pub(crate) end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub(crate) nodes: Vec<T>,
    #[serde(default)]
    pub(crate) page_info: CursorPageInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryData<T> {
    pub(crate) repository: Option<T>,
}

impl<T> RepositoryData<T> {
    pub(crate) fn require(self, locator: &RepositoryLocator) -> Result<T, DiscussionError> {
        self.repository.ok_or_else(|| DiscussionError::Api {
            message: format!(
                "repository {}/{} not found",
                locator.owner().as_str(),
                locator.repository().as_str()
            ),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoriesRepository {
    pub(crate) discussion_categories: Connection<CategoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryNode {
    pub(crate) id: String,
    pub(crate) name: String,
}

impl From<CategoryNode> for Category {
    fn from(value: CategoryNode) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DiscussionsRepository {
    pub(crate) discussions: Connection<DiscussionNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscussionNode {
    number: u64,
    title: String,
    created_at: chrono::DateTime<chrono::Utc>,
    url: String,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    category: Option<CategoryNode>,
    #[serde(default)]
    labels: Option<Connection<LabelNode>>,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelNode {
    name: String,
}

impl From<DiscussionNode> for DiscussionSummary {
    fn from(value: DiscussionNode) -> Self {
        Self {
            number: value.number,
            title: value.title,
            created_at: value.created_at,
            url: value.url,
            category: value.category.map(Category::from),
            state: Some(state_from_closed(value.closed).to_owned()),
            labels: value
                .labels
                .map(|labels| labels.nodes.into_iter().map(|label| label.name).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SingleDiscussionRepository<T> {
    pub(crate) discussion: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscussionDetailNode {
    number: u64,
    #[serde(default)]
    body: String,
    #[serde(default)]
    closed: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    url: String,
}

impl From<DiscussionDetailNode> for DiscussionDetail {
    fn from(value: DiscussionDetailNode) -> Self {
        Self {
            number: value.number,
            body: value.body,
            state: state_from_closed(value.closed).to_owned(),
            created_at: value.created_at,
            url: value.url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommentsNode {
    pub(crate) comments: Connection<CommentNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommentNode {
    #[serde(default)]
    body: String,
}

impl From<CommentNode> for Comment {
    fn from(value: CommentNode) -> Self {
        Self { body: value.body }
    }
}
