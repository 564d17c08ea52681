use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::resource_path;
use crate::api::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::list::{ListDataSource, ListQuery};
use crate::models::{Employee, EmployeeInput, ListResponse};

const EMPLOYEES: &str = "/company/employees";

/// Company-scoped employee records
#[derive(Clone)]
pub struct EmployeeService {
    client: ApiClient,
}

impl EmployeeService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse<Employee>, ApiError> {
        self.client
            .get(EMPLOYEES, RequestOptions::new().query(query.to_api_params()))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Employee, ApiError> {
        self.client
            .get(&resource_path(EMPLOYEES, id), RequestOptions::new())
            .await
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, ApiError> {
        self.client
            .post(EMPLOYEES, input.into_create_form(Utc::now()), RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, input: EmployeeInput) -> Result<Employee, ApiError> {
        self.client
            .patch(&resource_path(EMPLOYEES, id), input.into_update_form(), RequestOptions::new())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<Value>(&resource_path(EMPLOYEES, id), RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn bulk_delete(&self, ids: &[String]) -> Result<Value, ApiError> {
        let path = format!("{}/bulk-delete", EMPLOYEES);
        self.client
            .post(&path, json!({ "ids": ids }), RequestOptions::new())
            .await
    }
}

#[async_trait]
impl ListDataSource for EmployeeService {
    type Record = Employee;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Employee>, ApiError> {
        self.list(query).await
    }
}
