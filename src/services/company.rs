use async_trait::async_trait;
use serde_json::Value;

use super::resource_path;
use crate::api::{ApiClient, RequestBody, RequestOptions};
use crate::error::ApiError;
use crate::list::{ListDataSource, ListQuery};
use crate::models::{
    Company, CompanyDetail, CompanySubscription, CompanyUser, CreateCompany, CreateCompanyUser,
    CreateSubscription, ListResponse, UpdateCompany,
};

const COMPANIES: &str = "/superadmin/companies";
const SUBSCRIPTIONS: &str = "/superadmin/subscriptions";

/// Superadmin company management
#[derive(Clone)]
pub struct CompanyService {
    client: ApiClient,
}

impl CompanyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse<Company>, ApiError> {
        self.client
            .get(COMPANIES, RequestOptions::new().query(query.to_api_params()))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<CompanyDetail, ApiError> {
        self.client
            .get(&resource_path(COMPANIES, id), RequestOptions::new())
            .await
    }

    /// Multipart create; the logo is attached when present
    pub async fn create(&self, company: CreateCompany) -> Result<Company, ApiError> {
        self.client
            .post(COMPANIES, company.into_form(), RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, changes: UpdateCompany) -> Result<Company, ApiError> {
        self.client
            .patch(&resource_path(COMPANIES, id), changes.into_form(), RequestOptions::new())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<Value>(&resource_path(COMPANIES, id), RequestOptions::new())
            .await?;
        Ok(())
    }

    pub async fn users(&self, company_id: &str, page: u32, limit: u32) -> Result<ListResponse<CompanyUser>, ApiError> {
        let path = format!("{}/users", resource_path(COMPANIES, company_id));
        self.client
            .get(&path, RequestOptions::new().query([("page", page), ("limit", limit)]))
            .await
    }

    pub async fn add_user(&self, company_id: &str, user: &CreateCompanyUser) -> Result<CompanyUser, ApiError> {
        let path = format!("{}/users", resource_path(COMPANIES, company_id));
        self.client
            .post(&path, RequestBody::json(user)?, RequestOptions::new())
            .await
    }

    pub async fn subscription(&self, company_id: &str) -> Result<CompanySubscription, ApiError> {
        let path = resource_path(&format!("{}/company", SUBSCRIPTIONS), company_id);
        self.client.get(&path, RequestOptions::new()).await
    }

    pub async fn subscribe(&self, subscription: &CreateSubscription) -> Result<Value, ApiError> {
        self.client
            .post(SUBSCRIPTIONS, RequestBody::json(subscription)?, RequestOptions::new())
            .await
    }
}

#[async_trait]
impl ListDataSource for CompanyService {
    type Record = Company;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResponse<Company>, ApiError> {
        self.list(query).await
    }
}
