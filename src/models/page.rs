use serde::{Deserialize, Serialize};

/// Pagination block returned with every list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// `{data: [...], meta: {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self { data, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_list_shape() {
        let body = json!({
            "data": [{"id": "a"}, {"id": "b"}],
            "meta": {"total": 25, "page": 1, "limit": 10, "totalPages": 3}
        });
        let page: ListResponse<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.total, 25);
    }
}
