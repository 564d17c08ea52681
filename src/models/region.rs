use serde::{Deserialize, Serialize};

use crate::types::Entity;

/// Administrative region attached to companies and employees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub parent: Option<Box<Region>>,
}

/// One hit from `/regions/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSearchResult {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
}

impl Entity for RegionSearchResult {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.full_name.clone()
    }
}
