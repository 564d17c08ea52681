use std::sync::Arc;

use super::filter::ListFilter;
use super::query::ListQuery;
use super::source::ListDataSource;
use super::state::ListState;
use crate::error::ApiError;
use crate::models::ListResponse;
use crate::types::SortDirection;

/// A fetch the controller asked for. Only the most recently issued ticket
/// may change list state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Drives one entity list: turns user actions into queries, fetches pages
/// through its data source and applies the results to its [`ListState`].
pub struct ListController<S: ListDataSource, F: ListFilter> {
    source: Arc<S>,
    state: ListState<S::Record, F>,
    query: ListQuery,
    latest: u64,
}

impl<S: ListDataSource, F: ListFilter> ListController<S, F> {
    pub fn new(source: S, query: ListQuery) -> Self {
        Self::with_shared_source(Arc::new(source), query)
    }

    pub fn with_shared_source(source: Arc<S>, query: ListQuery) -> Self {
        let mut state = ListState::new(query.page_size);
        state.set_filter(F::from_query(&query));

        Self {
            source,
            state,
            query,
            latest: 0,
        }
    }

    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    pub fn state(&self) -> &ListState<S::Record, F> {
        &self.state
    }

    /// Row selection and other synchronous state changes
    pub fn state_mut(&mut self) -> &mut ListState<S::Record, F> {
        &mut self.state
    }

    /// Latest requested query (what the URL would show)
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn issue(&mut self, query: ListQuery) -> FetchTicket {
        self.latest += 1;
        self.query = query.clone();
        FetchTicket {
            seq: self.latest,
            query,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Apply a fetch result. Returns `Ok(false)` when the ticket was
    /// superseded; errors from the current ticket are returned as-is and
    /// leave the state untouched. On success the filter is re-read from the
    /// fetched query, so it always matches the URL the rows came from.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListResponse<S::Record>, ApiError>,
    ) -> Result<bool, ApiError> {
        if !self.is_current(&ticket) {
            tracing::debug!("Discarding stale list fetch #{} (latest #{})", ticket.seq, self.latest);
            return Ok(false);
        }

        let page = result?;
        let filter = F::from_query(&ticket.query);
        if &filter != self.state.filter() {
            self.state.set_filter(filter);
        }
        self.state.set_pagination(&page.meta);
        self.state.set_records(page.data);
        if self.state.is_initial_loading() {
            self.state.set_initial_loading(false);
        }
        Ok(true)
    }

    pub async fn load(&mut self, query: ListQuery) -> Result<bool, ApiError> {
        let ticket = self.issue(query);
        let result = self.source.fetch_page(ticket.query()).await;
        self.apply(ticket, result)
    }

    /// Re-fetch the current query and drop the selection
    pub async fn refresh(&mut self) -> Result<bool, ApiError> {
        let applied = self.load(self.query.clone()).await?;
        if applied {
            self.state.clear_selection();
        }
        Ok(applied)
    }

    pub async fn paginate(&mut self, page_index: u32) -> Result<bool, ApiError> {
        let query = self.query.with_page(page_index);
        self.load(query).await
    }

    pub async fn resize(&mut self, page_size: u32) -> Result<bool, ApiError> {
        let query = self.query.with_page_size(page_size);
        self.load(query).await
    }

    pub async fn sort(&mut self, key: &str, direction: SortDirection) -> Result<bool, ApiError> {
        let query = self.query.with_sort(key, direction);
        self.load(query).await
    }

    pub async fn search(&mut self, term: &str) -> Result<bool, ApiError> {
        let query = self.query.with_search(term);
        self.load(query).await
    }

    /// Rewrite the query from `filter` and fetch. The page index is kept as
    /// it was; the new filter lands in state only once its page does.
    pub async fn submit_filter(&mut self, filter: F) -> Result<bool, ApiError> {
        let query = filter.apply_to(&self.query);
        self.load(query).await
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.state.selected().ids()
    }
}
