use std::sync::Arc;

use async_trait::async_trait;

use super::query::ListQuery;
use crate::error::ApiError;
use crate::models::ListResponse;
use crate::types::Entity;

/// Where a list controller gets its pages from. Entity services implement
/// this against the backend; tests plug in stubs.
#[async_trait]
pub trait ListDataSource: Send + Sync {
    type Record: Entity;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Self::Record>, ApiError>;
}

#[async_trait]
impl<S: ListDataSource + ?Sized> ListDataSource for Arc<S> {
    type Record = S::Record;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Self::Record>, ApiError> {
        (**self).fetch_page(query).await
    }
}
