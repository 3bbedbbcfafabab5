//! Category name resolution.
//!
//! Discussion listing filters by opaque category identifier while callers
//! know categories by name, so the full category set is paged through and
//! collected into a name to identifier map.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use super::error::DiscussionError;
use super::gateway::QueryExecutor;
use super::locator::RepositoryLocator;
use super::pagination::{MAX_PAGE_SIZE, PaginationRequest};
use super::queries::{CategoriesRepository, RepositoryData, categories_request, decode};

/// Collects every discussion category of a repository keyed by name.
///
/// Pages of 100 are requested until the platform reports no further page, so
/// `N` categories cost `ceil(N / 100)` round trips (one when there are none).
/// When two categories share a name the one seen last wins.
///
/// # Errors
///
/// Returns the first transport error unchanged, discarding anything already
/// collected, and [`DiscussionError::Cancelled`] when `cancel` fires between
/// round trips.
pub async fn resolve_categories<Executor>(
    executor: &Executor,
    locator: &RepositoryLocator,
    cancel: &CancellationToken,
) -> Result<HashMap<String, String>, DiscussionError>
where
    Executor: QueryExecutor + ?Sized,
{
    let mut mapping = HashMap::new();
    let mut cursor: Option<String> = None;

    loop {
        if cancel.is_cancelled() {
            return Err(DiscussionError::Cancelled);
        }

        let request = categories_request(
            locator,
            &PaginationRequest {
                first: Some(MAX_PAGE_SIZE),
                after: cursor.take(),
                ..PaginationRequest::default()
            },
        );
        let data = executor.execute(&request).await?;
        let page = decode::<RepositoryData<CategoriesRepository>>("list discussion categories", data)?
            .require(locator)?
            .discussion_categories;

        tracing::debug!(
            "resolved {count} discussion categories for {owner}/{repo}",
            count = page.nodes.len(),
            owner = locator.owner().as_str(),
            repo = locator.repository().as_str()
        );
        mapping.extend(page.nodes.into_iter().map(|node| (node.name, node.id)));

        if !page.page_info.has_next_page {
            return Ok(mapping);
        }
        cursor = Some(page.page_info.end_cursor.ok_or_else(|| DiscussionError::Api {
            message: "category page reported more results without an end cursor".to_owned(),
        })?);
    }
}
