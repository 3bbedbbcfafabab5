//! Data models representing discussions, categories, and comments.
//!
//! Public types are the domain records handed to callers and serialised as
//! tool output. Types prefixed with `Api` are REST deserialisation targets that
//! convert into the domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discussion category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque platform identifier.
    pub id: String,
    /// Human-readable category name.
    pub name: String,
}

/// Discussion as returned by listing operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionSummary {
    /// Discussion number.
    pub number: u64,
    /// Discussion title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// HTML URL for displaying to a user.
    pub url: String,
    /// Category the discussion belongs to, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// State (`open` or `closed`), when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Label names attached to the discussion.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl DiscussionSummary {
    /// Returns true when the discussion carries the given label.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|candidate| candidate == label)
    }
}

/// Single discussion with its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDetail {
    /// Discussion number.
    pub number: u64,
    /// Markdown body.
    pub body: String,
    /// State (`open` or `closed`).
    pub state: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// HTML URL for displaying to a user.
    pub url: String,
}

/// Discussion comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Markdown body.
    pub body: String,
}

/// Maps the GraphQL `closed` flag onto the REST state vocabulary.
pub(crate) const fn state_from_closed(closed: bool) -> &'static str {
    if closed { "closed" } else { "open" }
}

/// REST representation of a discussion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiDiscussion {
    /// Discussion number.
    pub number: u64,
    /// Discussion title.
    #[serde(default)]
    pub title: Option<String>,
    /// State (`open` or `closed`).
    #[serde(default)]
    pub state: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// HTML URL.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Labels attached to the discussion.
    #[serde(default)]
    pub labels: Vec<ApiLabel>,
    /// Category, when present.
    #[serde(default)]
    pub category: Option<ApiCategory>,
}

/// REST label payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiLabel {
    /// Label name.
    #[serde(default)]
    pub name: Option<String>,
}

/// REST category payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiCategory {
    /// Numeric REST identifier.
    #[serde(default)]
    pub id: Option<u64>,
    /// GraphQL node identifier.
    #[serde(default)]
    pub node_id: Option<String>,
    /// Category name.
    pub name: String,
}

impl From<ApiCategory> for Category {
    fn from(value: ApiCategory) -> Self {
        let id = value
            .node_id
            .or_else(|| value.id.map(|id| id.to_string()))
            .unwrap_or_default();
        Self {
            id,
            name: value.name,
        }
    }
}

impl From<ApiDiscussion> for DiscussionSummary {
    fn from(value: ApiDiscussion) -> Self {
        Self {
            number: value.number,
            title: value.title.unwrap_or_default(),
            created_at: value.created_at,
            url: value.html_url.unwrap_or_default(),
            category: value.category.map(Category::from),
            state: value.state,
            labels: value.labels.into_iter().filter_map(|label| label.name).collect(),
        }
    }
}
