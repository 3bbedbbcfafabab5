//! Client-side filtering applied after discussions are fetched.
//!
//! The listing transports filter less than the tools promise, so creation
//! date, state, and label filters run locally. Every predicate is pure and the
//! pipeline keeps the relative order of surviving items, which makes
//! [`FilterSet::apply`] idempotent.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::error::DiscussionError;
use super::models::DiscussionSummary;

/// Requested discussion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscussionState {
    /// Only open discussions.
    Open,
    /// Only closed discussions.
    Closed,
    /// All discussions regardless of state.
    #[default]
    All,
}

impl DiscussionState {
    /// Returns the API value for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }

    const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for DiscussionState {
    type Err = DiscussionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" | "" => Ok(Self::All),
            other => Err(DiscussionError::invalid_argument(format!(
                "state must be one of open, closed, all (got '{other}')"
            ))),
        }
    }
}

/// Parses an ISO 8601 timestamp in full date-time or plain-date form.
///
/// Accepted forms are RFC 3339 (`2023-01-15T00:00:00Z`), a date-time without
/// offset (`2023-01-15T00:00:00`, read as UTC), and a plain date
/// (`2023-01-15`, read as midnight UTC).
///
/// # Errors
///
/// Returns [`DiscussionError::InvalidTimestamp`] when no form matches.
pub fn parse_since(value: &str) -> Result<DateTime<Utc>, DiscussionError> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| DiscussionError::InvalidTimestamp {
            value: value.to_owned(),
        })
}

/// Filters combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Keep discussions created strictly after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Keep discussions in this state.
    pub state: Option<DiscussionState>,
    /// Keep discussions carrying every one of these labels.
    pub labels: Vec<String>,
}

impl FilterSet {
    /// Returns true when no predicate would exclude anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.since.is_none()
            && self.state.is_none_or(DiscussionState::is_all)
            && self.labels.is_empty()
    }

    /// Returns the order-preserving subsequence of `items` that passes every
    /// predicate.
    #[must_use]
    pub fn apply(&self, items: Vec<DiscussionSummary>) -> Vec<DiscussionSummary> {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .collect()
    }

    /// Evaluates all predicates for one item in since, state, labels order.
    #[must_use]
    pub fn matches(&self, item: &DiscussionSummary) -> bool {
        self.matches_since(item) && self.matches_state(item) && self.matches_labels(item)
    }

    fn matches_since(&self, item: &DiscussionSummary) -> bool {
        self.since.is_none_or(|threshold| item.created_at > threshold)
    }

    fn matches_state(&self, item: &DiscussionSummary) -> bool {
        match self.state {
            None | Some(DiscussionState::All) => true,
            Some(wanted) => item
                .state
                .as_deref()
                .is_some_and(|state| state.eq_ignore_ascii_case(wanted.as_str())),
        }
    }

    fn matches_labels(&self, item: &DiscussionSummary) -> bool {
        self.labels.iter().all(|label| item.has_label(label))
    }
}
