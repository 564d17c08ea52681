use async_trait::async_trait;
use serde_json::{json, Value};

use super::resource_path;
use crate::api::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::list::{ListDataSource, ListQuery};
use crate::models::{ListResponse, Staff, StaffInput};

const STAFF: &str = "/superadmin/staff";

#[derive(Clone)]
pub struct StaffService {
    client: ApiClient,
}

impl StaffService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse<Staff>, ApiError> {
        self.client
            .get(STAFF, RequestOptions::new().query(query.to_api_params()))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Staff, ApiError> {
        self.client
            .get(&resource_path(STAFF, id), RequestOptions::new())
            .await
    }

    pub async fn create(&self, input: StaffInput) -> Result<Staff, ApiError> {
        self.client
            .post(STAFF, input.into_form(), RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, input: StaffInput) -> Result<Staff, ApiError> {
        self.client
            .patch(&resource_path(STAFF, id), input.into_form(), RequestOptions::new())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<Value>(&resource_path(STAFF, id), RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn bulk_delete(&self, ids: &[String]) -> Result<Value, ApiError> {
        let path = format!("{}/bulk-delete", STAFF);
        self.client
            .post(&path, json!({ "ids": ids }), RequestOptions::new())
            .await
    }
}

#[async_trait]
impl ListDataSource for StaffService {
    type Record = Staff;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Staff>, ApiError> {
        self.list(query).await
    }
}
