use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::company::UserRole;
use crate::api::body::{FileUpload, MultipartForm};
use crate::types::Entity;

/// Superadmin back-office user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Staff {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaffInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub avatar: Option<FileUpload>,
}

impl StaffInput {
    /// Only fields that are set are sent, for both create and update
    pub fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .text_opt("email", self.email)
            .text_opt("firstName", self.first_name)
            .text_opt("lastName", self.last_name)
            .text_opt("phone", self.phone)
            .text_opt("country", self.country)
            .text_opt("address", self.address)
            .text_opt("city", self.city)
            .text_opt("postalCode", self.postal_code)
            .file_opt("avatar", self.avatar)
    }
}
