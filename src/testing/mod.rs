use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{status_text, ApiError};
use crate::list::{ListDataSource, ListQuery};
use crate::models::{ListResponse, PageMeta};
use crate::types::Entity;

/// Minimal record for list tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub name: String,
}

impl Entity for Row {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn row(id: &str) -> Row {
    Row {
        id: id.to_string(),
        name: format!("row {}", id),
    }
}

/// A single page response with `total` equal to the rows given
pub fn page_of(rows: Vec<Row>, page: u32) -> ListResponse<Row> {
    let total = rows.len() as u64;
    ListResponse::new(
        rows,
        PageMeta {
            total,
            page,
            limit: 10,
            total_pages: 1,
        },
    )
}

/// In-memory data source that pages a fixed row set and records every
/// query it was asked for
pub struct StubSource {
    rows: Vec<Row>,
    fail_with: Option<u16>,
    seen: Mutex<Vec<ListQuery>>,
}

impl StubSource {
    pub fn with_rows(count: usize) -> Self {
        Self {
            rows: (1..=count).map(|i| row(&format!("r{}", i))).collect(),
            fail_with: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::with_rows(0)
        }
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.seen.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ListDataSource for StubSource {
    type Record = Row;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Row>, ApiError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(query.clone());
        }
        if let Some(status) = self.fail_with {
            return Err(ApiError::from_response_body(
                status,
                status_text(status),
                serde_json::json!({"message": status_text(status)}),
            ));
        }

        let size = query.page_size.max(1) as usize;
        let start = (query.page_index.max(1) as usize - 1) * size;
        let data: Vec<Row> = self.rows.iter().skip(start).take(size).cloned().collect();
        let total = self.rows.len() as u64;

        Ok(ListResponse::new(
            data,
            PageMeta {
                total,
                page: query.page_index,
                limit: query.page_size,
                total_pages: total.div_ceil(size as u64) as u32,
            },
        ))
    }
}
