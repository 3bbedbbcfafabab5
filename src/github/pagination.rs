//! Pagination shapes accepted by the discussion tools.
//!
//! Two contracts coexist. Cursor pagination (`first`/`last` with
//! `after`/`before`) maps onto GraphQL connections and is checked by
//! [`PaginationRequest::validate`] before any network access. Offset
//! pagination (`page`/`per_page`) maps onto the REST endpoint and is also used
//! to slice client-side filtered results.

use super::error::DiscussionError;

/// Largest page the platform serves for either contract.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default REST page size.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Cursor-based pagination request.
///
/// # Example
///
/// ```
/// use palaver::PaginationRequest;
///
/// let request = PaginationRequest {
///     first: Some(10),
///     last: Some(5),
///     ..PaginationRequest::default()
/// };
/// let error = request.validate().expect_err("first and last conflict");
/// assert_eq!(error.to_string(), "only one of 'first' or 'last' may be specified");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationRequest {
    /// Number of items to take from the start of the window.
    pub first: Option<u32>,
    /// Number of items to take from the end of the window.
    pub last: Option<u32>,
    /// Forward cursor.
    pub after: Option<String>,
    /// Backward cursor.
    pub before: Option<String>,
}

impl PaginationRequest {
    /// Rejects contradictory pagination shapes.
    ///
    /// Rules are checked in a fixed order and the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::InvalidPagination`] describing the first
    /// violated rule.
    pub fn validate(&self) -> Result<(), DiscussionError> {
        if self.first.is_some() && self.last.is_some() {
            return Err(DiscussionError::pagination(
                "only one of 'first' or 'last' may be specified",
            ));
        }
        if self.after.is_some() && self.before.is_some() {
            return Err(DiscussionError::pagination(
                "only one of 'after' or 'before' may be specified",
            ));
        }
        if self.after.is_some() && self.last.is_some() {
            return Err(DiscussionError::pagination(
                "'after' cannot be used with 'last'; use 'before' instead",
            ));
        }
        if self.before.is_some() && self.first.is_some() {
            return Err(DiscussionError::pagination(
                "'before' cannot be used with 'first'; use 'after' instead",
            ));
        }
        check_count("first", self.first)?;
        check_count("last", self.last)
    }

    /// Returns true when any cursor pagination field is set.
    #[must_use]
    pub const fn is_specified(&self) -> bool {
        self.first.is_some() || self.last.is_some() || self.after.is_some() || self.before.is_some()
    }

    /// Returns a copy with `first` set to `default_first` when neither count
    /// was requested.
    #[must_use]
    pub fn with_default_first(&self, default_first: u32) -> Self {
        let mut resolved = self.clone();
        if resolved.first.is_none() && resolved.last.is_none() {
            resolved.first = Some(default_first);
        }
        resolved
    }
}

fn check_count(name: &str, count: Option<u32>) -> Result<(), DiscussionError> {
    match count {
        Some(value) if value == 0 || value > MAX_PAGE_SIZE => Err(DiscussionError::pagination(
            format!("'{name}' must be between 1 and {MAX_PAGE_SIZE}"),
        )),
        _ => Ok(()),
    }
}

/// Offset pagination over a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPage {
    page: u32,
    per_page: u32,
}

impl OffsetPage {
    /// Creates an offset page. Missing or zero values fall back to page 1 and
    /// 30 items per page.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::InvalidPagination`] when `per_page` exceeds
    /// 100.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, DiscussionError> {
        let resolved_page = page.filter(|value| *value > 0).unwrap_or(1);
        let resolved_per_page = per_page
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_PER_PAGE);

        if resolved_per_page > MAX_PAGE_SIZE {
            return Err(DiscussionError::pagination(format!(
                "perPage must not exceed {MAX_PAGE_SIZE}"
            )));
        }

        Ok(Self {
            page: resolved_page,
            per_page: resolved_per_page,
        })
    }

    /// Returns the page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Takes this page's window out of a fully materialised result.
    ///
    /// A start offset beyond the end yields an empty result.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let per_page = usize::try_from(self.per_page).unwrap_or(usize::MAX);
        let skipped_pages = usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX);
        let start = skipped_pages.saturating_mul(per_page);

        items.into_iter().skip(start).take(per_page).collect()
    }
}

impl Default for OffsetPage {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
