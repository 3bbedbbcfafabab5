//! Typed parameters for discussion listing operations.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::error::DiscussionError;
use super::filter::{DiscussionState, FilterSet};
use super::pagination::{OffsetPage, PaginationRequest};

/// Field used to order discussion listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Order by creation time.
    #[default]
    Created,
    /// Order by last update time.
    Updated,
}

impl SortField {
    /// Returns the GraphQL enum value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED_AT",
            Self::Updated => "UPDATED_AT",
        }
    }
}

impl FromStr for SortField {
    type Err = DiscussionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED_AT" | "CREATED" => Ok(Self::Created),
            "UPDATED_AT" | "UPDATED" => Ok(Self::Updated),
            _ => Err(DiscussionError::invalid_argument(format!(
                "sort must be one of CREATED_AT, UPDATED_AT (got '{value}')"
            ))),
        }
    }
}

/// Ordering direction for discussion listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the GraphQL enum value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DiscussionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(DiscussionError::invalid_argument(format!(
                "direction must be one of ASC, DESC (got '{value}')"
            ))),
        }
    }
}

/// How a listing request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// One GraphQL query with cursor pagination.
    Cursor,
    /// REST offset pagination, aggregated when client-side filters apply.
    Offset(OffsetPage),
}

/// Parameters for listing discussions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDiscussionsParams {
    /// Category name to filter by.
    pub category: Option<String>,
    /// Ordering field.
    pub sort: Option<SortField>,
    /// Ordering direction.
    pub direction: Option<SortDirection>,
    /// Answered filter; `None` keeps both answered and unanswered.
    pub answered: Option<bool>,
    /// Cursor pagination.
    pub pagination: PaginationRequest,
    /// Keep discussions created strictly after this instant.
    pub since: Option<DateTime<Utc>>,
    /// State filter.
    pub state: Option<DiscussionState>,
    /// Labels that must all be present.
    pub labels: Vec<String>,
    /// Offset page number (1-based).
    pub page: Option<u32>,
    /// Offset page size.
    pub per_page: Option<u32>,
}

impl ListDiscussionsParams {
    /// Selects the listing mode and checks that cursor and offset arguments
    /// are not mixed.
    ///
    /// `since` on its own needs the whole discussion set and is served by
    /// offset mode; alongside cursor arguments it filters the cursor page.
    /// Cursor pagination is validated first so its messages take precedence.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::InvalidPagination`] for contradictory
    /// pagination and [`DiscussionError::InvalidArgument`] when cursor-only
    /// arguments are combined with offset-only ones.
    pub fn mode(&self) -> Result<ListingMode, DiscussionError> {
        self.pagination.validate()?;

        let cursor = self.uses_cursor_arguments();
        if self.uses_offset_arguments() {
            if cursor {
                return Err(DiscussionError::invalid_argument(
                    "cursor pagination arguments cannot be combined with page, perPage, state or labels",
                ));
            }
        } else if cursor || self.since.is_none() {
            return Ok(ListingMode::Cursor);
        }
        Ok(ListingMode::Offset(OffsetPage::new(self.page, self.per_page)?))
    }

    /// Returns the client-side filters requested.
    #[must_use]
    pub fn filters(&self) -> FilterSet {
        FilterSet {
            since: self.since,
            state: self.state,
            labels: self.labels.clone(),
        }
    }

    /// Returns the requested ordering, defaulting whichever half is missing.
    #[must_use]
    pub fn order(&self) -> Option<(SortField, SortDirection)> {
        if self.sort.is_none() && self.direction.is_none() {
            return None;
        }
        Some((self.sort.unwrap_or_default(), self.direction.unwrap_or_default()))
    }

    fn uses_offset_arguments(&self) -> bool {
        self.page.is_some()
            || self.per_page.is_some()
            || self.state.is_some()
            || !self.labels.is_empty()
    }

    fn uses_cursor_arguments(&self) -> bool {
        self.pagination.is_specified()
            || self.category.is_some()
            || self.sort.is_some()
            || self.direction.is_some()
            || self.answered.is_some()
    }
}
