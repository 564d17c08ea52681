use crate::api::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{DashboardOverview, RegionSearchResult};

#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn overview(&self) -> Result<DashboardOverview, ApiError> {
        self.client
            .get("/superadmin/dashboard/overview", RequestOptions::new())
            .await
    }
}

/// Region lookup used by company and employee address fields
#[derive(Clone)]
pub struct RegionService {
    client: ApiClient,
}

impl RegionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<RegionSearchResult>, ApiError> {
        self.client
            .get(
                "/regions/search",
                RequestOptions::new().query([("q", term.to_string()), ("limit", limit.to_string())]),
            )
            .await
    }
}
