use serde_json::Value;

use super::resource_path;
use crate::api::{ApiClient, RequestBody, RequestOptions};
use crate::error::ApiError;
use crate::models::{PricingPlan, PricingPlanInput};

const PLANS: &str = "/superadmin/pricing-plans";

#[derive(Clone)]
pub struct PricingPlanService {
    client: ApiClient,
}

impl PricingPlanService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Active plans only unless `include_inactive` is set
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<PricingPlan>, ApiError> {
        let mut options = RequestOptions::new();
        if include_inactive {
            options = options.query([("includeInactive", true)]);
        }
        self.client.get(PLANS, options).await
    }

    pub async fn get(&self, id: &str) -> Result<PricingPlan, ApiError> {
        self.client
            .get(&resource_path(PLANS, id), RequestOptions::new())
            .await
    }

    pub async fn create(&self, plan: &PricingPlanInput) -> Result<PricingPlan, ApiError> {
        self.client
            .post(PLANS, RequestBody::json(plan)?, RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, changes: &PricingPlanInput) -> Result<PricingPlan, ApiError> {
        self.client
            .patch(&resource_path(PLANS, id), RequestBody::json(changes)?, RequestOptions::new())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<Value>(&resource_path(PLANS, id), RequestOptions::new())
            .await?;
        Ok(())
    }
}
