//! Tool argument decoding.
//!
//! Arguments arrive as a JSON object with camelCase keys. They are decoded
//! into plain structs first, then converted into the typed parameters the
//! discussion engine consumes. Empty strings are treated as absent.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::github::error::DiscussionError;
use crate::github::filter::{DiscussionState, parse_since};
use crate::github::locator::{DiscussionNumber, RepositoryLocator};
use crate::github::pagination::PaginationRequest;
use crate::github::params::{ListDiscussionsParams, SortDirection, SortField};

/// Decodes a JSON argument object into an argument struct.
///
/// A JSON `null` is treated as an empty object.
///
/// # Errors
///
/// Returns [`DiscussionError::InvalidArgument`] when the value has the wrong
/// shape or a field has the wrong type.
pub fn decode_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, DiscussionError> {
    let object = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(object).map_err(|error| DiscussionError::invalid_argument(error.to_string()))
}

/// Arguments of `list_discussions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDiscussionsArgs {
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Category name.
    pub category: Option<String>,
    /// ISO 8601 lower bound on creation time.
    pub since: Option<String>,
    /// Sort field (`CREATED_AT` or `UPDATED_AT`).
    pub sort: Option<String>,
    /// Sort direction (`ASC` or `DESC`).
    pub direction: Option<String>,
    /// Number of discussions from the start of the window.
    pub first: Option<u32>,
    /// Number of discussions from the end of the window.
    pub last: Option<u32>,
    /// Forward cursor.
    pub after: Option<String>,
    /// Backward cursor.
    pub before: Option<String>,
    /// Restrict to answered or unanswered discussions.
    pub answered: Option<bool>,
    /// State filter (`open`, `closed`, or `all`).
    pub state: Option<String>,
    /// Labels every discussion must carry.
    pub labels: Option<Vec<String>>,
    /// Offset page number, starting at 1.
    pub page: Option<u32>,
    /// Offset page size.
    pub per_page: Option<u32>,
}

impl ListDiscussionsArgs {
    /// Resolves the repository this listing targets.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::MissingParameter`] when owner or repo is
    /// absent.
    pub fn locator(&self) -> Result<RepositoryLocator, DiscussionError> {
        repository_locator(self.owner.as_deref(), self.repo.as_deref())
    }

    /// Converts the raw arguments into typed listing parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::InvalidTimestamp`] for an unparseable
    /// `since` and [`DiscussionError::InvalidArgument`] for unknown sort,
    /// direction, or state values.
    pub fn into_params(self) -> Result<ListDiscussionsParams, DiscussionError> {
        let since = present(self.since).as_deref().map(parse_since).transpose()?;
        let sort = present(self.sort)
            .as_deref()
            .map(str::parse::<SortField>)
            .transpose()?;
        let direction = present(self.direction)
            .as_deref()
            .map(str::parse::<SortDirection>)
            .transpose()?;
        let state = present(self.state)
            .as_deref()
            .map(str::parse::<DiscussionState>)
            .transpose()?;
        let labels = self
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter(|label| !label.is_empty())
            .collect();

        Ok(ListDiscussionsParams {
            category: present(self.category),
            sort,
            direction,
            answered: self.answered,
            pagination: PaginationRequest {
                first: self.first,
                last: self.last,
                after: present(self.after),
                before: present(self.before),
            },
            since,
            state,
            labels,
            page: self.page,
            per_page: self.per_page,
        })
    }
}

/// Arguments of `get_discussion` and `get_discussion_comments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscussionArgs {
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Discussion number.
    pub discussion_number: Option<u64>,
}

impl DiscussionArgs {
    /// Resolves the repository and discussion number.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::MissingParameter`] for absent values and
    /// [`DiscussionError::InvalidDiscussionNumber`] for zero.
    pub fn target(&self) -> Result<(RepositoryLocator, DiscussionNumber), DiscussionError> {
        let locator = repository_locator(self.owner.as_deref(), self.repo.as_deref())?;
        let number = self
            .discussion_number
            .ok_or_else(|| missing("discussionNumber"))?;
        Ok((locator, DiscussionNumber::new(number)?))
    }
}

/// Arguments of `list_discussion_categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryArgs {
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Number of categories from the start of the window.
    pub first: Option<u32>,
    /// Number of categories from the end of the window.
    pub last: Option<u32>,
    /// Forward cursor.
    pub after: Option<String>,
    /// Backward cursor.
    pub before: Option<String>,
}

impl CategoryArgs {
    /// Resolves the repository whose categories are listed.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::MissingParameter`] when owner or repo is
    /// absent.
    pub fn locator(&self) -> Result<RepositoryLocator, DiscussionError> {
        repository_locator(self.owner.as_deref(), self.repo.as_deref())
    }

    /// Returns the requested cursor window.
    #[must_use]
    pub fn pagination(&self) -> PaginationRequest {
        PaginationRequest {
            first: self.first,
            last: self.last,
            after: present(self.after.clone()),
            before: present(self.before.clone()),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

fn missing(name: &str) -> DiscussionError {
    DiscussionError::MissingParameter {
        name: name.to_owned(),
    }
}

fn repository_locator(
    owner: Option<&str>,
    repo: Option<&str>,
) -> Result<RepositoryLocator, DiscussionError> {
    let owner_name = owner
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing("owner"))?;
    let repo_name = repo
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing("repo"))?;
    RepositoryLocator::from_owner_repo(owner_name, repo_name)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    use super::{CategoryArgs, DiscussionArgs, ListDiscussionsArgs, decode_arguments};
    use crate::github::error::DiscussionError;
    use crate::github::filter::DiscussionState;
    use crate::github::params::{SortDirection, SortField};

    #[rstest]
    fn decodes_camel_case_listing_arguments() {
        let args: ListDiscussionsArgs = decode_arguments(json!({
            "owner": "octo",
            "repo": "hello",
            "since": "2023-01-15",
            "sort": "UPDATED_AT",
            "direction": "ASC",
            "state": "Closed",
            "labels": ["bug", ""],
            "perPage": 10
        }))
        .expect("arguments should decode");

        let locator = args.locator().expect("locator should resolve");
        let params = args.into_params().expect("params should convert");

        assert_eq!(locator.owner().as_str(), "octo");
        assert_eq!(
            params.since,
            Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).single()
        );
        assert_eq!(params.sort, Some(SortField::Updated));
        assert_eq!(params.direction, Some(SortDirection::Asc));
        assert_eq!(params.state, Some(DiscussionState::Closed));
        assert_eq!(params.labels, vec!["bug".to_owned()]);
        assert_eq!(params.per_page, Some(10));
    }

    #[rstest]
    fn empty_strings_are_absent() {
        let args: ListDiscussionsArgs = decode_arguments(json!({
            "owner": "octo",
            "repo": "hello",
            "category": "",
            "since": "",
            "after": ""
        }))
        .expect("arguments should decode");

        let params = args.into_params().expect("params should convert");

        assert!(params.category.is_none());
        assert!(params.since.is_none());
        assert!(params.pagination.after.is_none());
    }

    #[rstest]
    #[case::no_owner(json!({ "repo": "hello" }), "owner")]
    #[case::empty_owner(json!({ "owner": "", "repo": "hello" }), "owner")]
    #[case::no_repo(json!({ "owner": "octo" }), "repo")]
    fn reports_missing_repository_coordinates(
        #[case] arguments: serde_json::Value,
        #[case] expected: &str,
    ) {
        let args: ListDiscussionsArgs = decode_arguments(arguments).expect("arguments should decode");

        assert_eq!(
            args.locator(),
            Err(DiscussionError::MissingParameter {
                name: expected.to_owned()
            })
        );
    }

    #[rstest]
    fn rejects_wrongly_typed_fields() {
        let result = decode_arguments::<ListDiscussionsArgs>(json!({ "first": "ten" }));

        assert!(
            matches!(result, Err(DiscussionError::InvalidArgument { .. })),
            "expected InvalidArgument, got {result:?}"
        );
    }

    #[rstest]
    fn rejects_malformed_since() {
        let args = ListDiscussionsArgs {
            since: Some("yesterday".to_owned()),
            ..ListDiscussionsArgs::default()
        };

        assert_eq!(
            args.into_params(),
            Err(DiscussionError::InvalidTimestamp {
                value: "yesterday".to_owned()
            })
        );
    }

    #[rstest]
    #[case::missing(json!({ "owner": "o", "repo": "r" }), Err(DiscussionError::MissingParameter { name: "discussionNumber".to_owned() }))]
    #[case::zero(json!({ "owner": "o", "repo": "r", "discussionNumber": 0 }), Err(DiscussionError::InvalidDiscussionNumber))]
    #[case::valid(json!({ "owner": "o", "repo": "r", "discussionNumber": 7 }), Ok(7))]
    fn resolves_discussion_number(
        #[case] arguments: serde_json::Value,
        #[case] expected: Result<u64, DiscussionError>,
    ) {
        let args: DiscussionArgs = decode_arguments(arguments).expect("arguments should decode");

        let number = args.target().map(|(_, number)| number.get());

        assert_eq!(number, expected);
    }

    #[rstest]
    fn null_arguments_decode_as_empty() {
        let args: CategoryArgs =
            decode_arguments(serde_json::Value::Null).expect("null should decode");

        assert_eq!(args, CategoryArgs::default());
        assert!(!args.pagination().is_specified());
    }
}
