//! High-level discussion facade used by the tool layer.
//!
//! `DiscussionIntake` composes the pieces of the engine: it validates the
//! requested pagination, resolves category names, issues the single listing
//! query for cursor requests, and aggregates REST pages when client-side
//! filters have to see the whole discussion set.

use tokio_util::sync::CancellationToken;

use super::categories::resolve_categories;
use super::error::DiscussionError;
use super::filter::FilterSet;
use super::gateway::{QueryExecutor, ResourceFetcher};
use super::locator::{DiscussionNumber, RepositoryLocator};
use super::models::{Category, Comment, DiscussionDetail, DiscussionSummary};
use super::pagination::{DEFAULT_PER_PAGE, MAX_PAGE_SIZE, OffsetPage, PaginationRequest};
use super::params::{ListDiscussionsParams, ListingMode};
use super::queries::{
    CategoriesRepository, CommentsNode, DiscussionDetailNode, DiscussionListQuery,
    DiscussionsRepository, RepositoryData, SingleDiscussionRepository, categories_request,
    comments_request, decode, discussion_request,
};

/// Aggregates discussion operations over injected collaborators.
pub struct DiscussionIntake<'client, Executor, Fetcher>
where
    Executor: QueryExecutor,
    Fetcher: ResourceFetcher,
{
    executor: &'client Executor,
    fetcher: &'client Fetcher,
}

impl<'client, Executor, Fetcher> DiscussionIntake<'client, Executor, Fetcher>
where
    Executor: QueryExecutor,
    Fetcher: ResourceFetcher,
{
    /// Create a new facade using the provided collaborators.
    #[must_use]
    pub const fn new(executor: &'client Executor, fetcher: &'client Fetcher) -> Self {
        Self { executor, fetcher }
    }

    /// List discussions, choosing cursor or offset mode from the parameters.
    ///
    /// # Errors
    ///
    /// Validation failures are returned before any network access. Transport
    /// failures, unknown categories, and cancellation abort the whole
    /// operation without partial results.
    pub async fn list_discussions(
        &self,
        locator: &RepositoryLocator,
        params: &ListDiscussionsParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<DiscussionSummary>, DiscussionError> {
        match params.mode()? {
            ListingMode::Cursor => self.query_discussions(locator, params, cancel).await,
            ListingMode::Offset(page) => {
                let filters = params.filters();
                if filters.is_empty() {
                    self.fetch_single_page(locator, page).await
                } else {
                    self.list_all_filtered(locator, &filters, page, cancel).await
                }
            }
        }
    }

    /// Issue exactly one discussion-listing query, then apply `since`.
    async fn query_discussions(
        &self,
        locator: &RepositoryLocator,
        params: &ListDiscussionsParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<DiscussionSummary>, DiscussionError> {
        let category_id = match params.category.as_deref() {
            Some(name) => Some(self.category_id(locator, name, cancel).await?),
            None => None,
        };
        if cancel.is_cancelled() {
            return Err(DiscussionError::Cancelled);
        }

        let request = DiscussionListQuery {
            pagination: params.pagination.with_default_first(DEFAULT_PER_PAGE),
            category_id: category_id.as_deref(),
            order: params.order(),
            answered: params.answered,
        }
        .into_request(locator);

        let data = self.executor.execute(&request).await?;
        let connection = decode::<RepositoryData<DiscussionsRepository>>("list discussions", data)?
            .require(locator)?
            .discussions;
        let items: Vec<DiscussionSummary> = connection
            .nodes
            .into_iter()
            .map(DiscussionSummary::from)
            .collect();

        let since_only = FilterSet {
            since: params.since,
            ..FilterSet::default()
        };
        Ok(since_only.apply(items))
    }

    async fn category_id(
        &self,
        locator: &RepositoryLocator,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<String, DiscussionError> {
        let mut mapping = resolve_categories(self.executor, locator, cancel).await?;
        mapping
            .remove(name)
            .ok_or_else(|| DiscussionError::CategoryNotFound {
                name: name.to_owned(),
            })
    }

    async fn fetch_single_page(
        &self,
        locator: &RepositoryLocator,
        page: OffsetPage,
    ) -> Result<Vec<DiscussionSummary>, DiscussionError> {
        let items = self
            .fetcher
            .fetch_page(locator, page.page(), page.per_page())
            .await?;
        Ok(items.into_iter().map(DiscussionSummary::from).collect())
    }

    /// Fetch every REST page, filter the whole set, then slice `page` out of
    /// the filtered result.
    ///
    /// Pages of 100 are requested from page 1 until an empty page comes back.
    ///
    /// # Errors
    ///
    /// Returns the first transport error, or [`DiscussionError::Cancelled`]
    /// when `cancel` fires between page fetches. No partial data is returned.
    pub async fn list_all_filtered(
        &self,
        locator: &RepositoryLocator,
        filters: &FilterSet,
        page: OffsetPage,
        cancel: &CancellationToken,
    ) -> Result<Vec<DiscussionSummary>, DiscussionError> {
        let mut collected: Vec<DiscussionSummary> = Vec::new();
        let mut current_page = 1_u32;

        loop {
            if cancel.is_cancelled() {
                return Err(DiscussionError::Cancelled);
            }

            let batch = self
                .fetcher
                .fetch_page(locator, current_page, MAX_PAGE_SIZE)
                .await?;
            tracing::debug!(
                "fetched {count} discussions from page {current_page}",
                count = batch.len()
            );
            if batch.is_empty() {
                break;
            }

            collected.extend(batch.into_iter().map(DiscussionSummary::from));
            current_page = current_page.saturating_add(1);
        }

        let filtered = filters.apply(collected);
        Ok(page.slice(filtered))
    }

    /// Load one discussion with its body.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged and [`DiscussionError::Api`] when
    /// the discussion does not exist.
    pub async fn get_discussion(
        &self,
        locator: &RepositoryLocator,
        number: DiscussionNumber,
    ) -> Result<DiscussionDetail, DiscussionError> {
        let data = self
            .executor
            .execute(&discussion_request(locator, number))
            .await?;
        decode::<RepositoryData<SingleDiscussionRepository<DiscussionDetailNode>>>(
            "get discussion",
            data,
        )?
        .require(locator)?
        .discussion
        .map(DiscussionDetail::from)
        .ok_or_else(|| discussion_not_found(number))
    }

    /// Load the first 100 comments of a discussion.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged and [`DiscussionError::Api`] when
    /// the discussion does not exist.
    pub async fn get_discussion_comments(
        &self,
        locator: &RepositoryLocator,
        number: DiscussionNumber,
    ) -> Result<Vec<Comment>, DiscussionError> {
        let data = self
            .executor
            .execute(&comments_request(locator, number))
            .await?;
        let discussion = decode::<RepositoryData<SingleDiscussionRepository<CommentsNode>>>(
            "get discussion comments",
            data,
        )?
        .require(locator)?
        .discussion
        .ok_or_else(|| discussion_not_found(number))?;

        Ok(discussion
            .comments
            .nodes
            .into_iter()
            .map(Comment::from)
            .collect())
    }

    /// List one page of discussion categories.
    ///
    /// Without an explicit count the first 100 categories are returned.
    ///
    /// # Errors
    ///
    /// Returns pagination validation errors before any network access and
    /// transport errors unchanged.
    pub async fn list_discussion_categories(
        &self,
        locator: &RepositoryLocator,
        pagination: &PaginationRequest,
    ) -> Result<Vec<Category>, DiscussionError> {
        pagination.validate()?;
        let request = categories_request(locator, &pagination.with_default_first(MAX_PAGE_SIZE));

        let data = self.executor.execute(&request).await?;
        let connection =
            decode::<RepositoryData<CategoriesRepository>>("list discussion categories", data)?
                .require(locator)?
                .discussion_categories;

        Ok(connection.nodes.into_iter().map(Category::from).collect())
    }
}

fn discussion_not_found(number: DiscussionNumber) -> DiscussionError {
    DiscussionError::Api {
        message: format!("discussion #{} not found", number.get()),
    }
}
