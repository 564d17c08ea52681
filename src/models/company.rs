use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::region::Region;
use super::subscription::Subscription;
use crate::api::body::{FileUpload, MultipartForm};
use crate::types::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyStatus {
    Trial,
    Active,
    Inactive,
    Suspended,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Trial => "TRIAL",
            CompanyStatus::Active => "ACTIVE",
            CompanyStatus::Inactive => "INACTIVE",
            CompanyStatus::Suspended => "SUSPENDED",
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompanyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRIAL" => Ok(CompanyStatus::Trial),
            "ACTIVE" => Ok(CompanyStatus::Active),
            "INACTIVE" => Ok(CompanyStatus::Inactive),
            "SUSPENDED" => Ok(CompanyStatus::Suspended),
            other => Err(format!("unknown company status '{}'", other)),
        }
    }
}

/// Related-record counters the backend attaches as `_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompanyCount {
    pub users: u64,
    pub employees: u64,
    pub projects: u64,
    pub procurements: u64,
    pub invoices: u64,
    pub expenses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub status: String,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(rename = "_count", default)]
    pub count: Option<CompanyCount>,
}

impl Entity for Company {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Company with its users, as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    #[serde(default)]
    pub users: Vec<CompanyUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUser {
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
    pub company_id: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
}

impl Entity for CompanyUser {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// New company. Sent as multipart so a logo can ride along.
#[derive(Debug, Clone)]
pub struct CreateCompany {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub region_id: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub website: Option<String>,
    pub status: CompanyStatus,
    pub logo: Option<FileUpload>,
}

impl CreateCompany {
    pub fn new(name: impl Into<String>, status: CompanyStatus) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            region_id: None,
            address: None,
            postal_code: None,
            latitude: None,
            longitude: None,
            website: None,
            status,
            logo: None,
        }
    }

    pub fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .text("name", self.name)
            .text_opt("email", self.email.filter(|s| !s.is_empty()))
            .text_opt("phone", self.phone.filter(|s| !s.is_empty()))
            .text_opt("regionId", self.region_id.filter(|s| !s.is_empty()))
            .text_opt("address", self.address.filter(|s| !s.is_empty()))
            .text_opt("postalCode", self.postal_code.filter(|s| !s.is_empty()))
            .text_opt("latitude", self.latitude)
            .text_opt("longitude", self.longitude)
            .text_opt("website", self.website.filter(|s| !s.is_empty()))
            .text("status", self.status)
            .file_opt("logo", self.logo)
    }
}

/// Partial company update; only present fields are sent
#[derive(Debug, Clone, Default)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub region_id: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub website: Option<String>,
    pub status: Option<CompanyStatus>,
    pub logo: Option<FileUpload>,
}

impl UpdateCompany {
    pub fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .text_opt("name", self.name)
            .text_opt("email", self.email)
            .text_opt("phone", self.phone)
            .text_opt("regionId", self.region_id)
            .text_opt("address", self.address)
            .text_opt("postalCode", self.postal_code)
            .text_opt("latitude", self.latitude)
            .text_opt("longitude", self.longitude)
            .text_opt("website", self.website)
            .text_opt("status", self.status)
            .file_opt("logo", self.logo)
    }
}

/// New login for an existing company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// `admin`, `manager` or `staff`
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_company_with_counts() {
        let body = json!({
            "id": "c1",
            "name": "Acme",
            "email": "ops@acme.test",
            "status": "ACTIVE",
            "createdAt": "2025-03-01T10:00:00.000Z",
            "_count": {"users": 4, "employees": 12}
        });
        let company: Company = serde_json::from_value(body).unwrap();
        assert_eq!(company.label(), "Acme");
        assert_eq!(company.count.unwrap().employees, 12);
        assert!(company.created_at.is_some());
    }

    #[test]
    fn detail_flattens_company_fields() {
        let body = json!({
            "id": "c1",
            "name": "Acme",
            "status": "TRIAL",
            "users": [{"id": "u1", "email": "a@acme.test", "firstName": "A", "lastName": "B"}]
        });
        let detail: CompanyDetail = serde_json::from_value(body).unwrap();
        assert_eq!(detail.company.id, "c1");
        assert_eq!(detail.users[0].label(), "A B");
    }

    #[test]
    fn create_form_skips_blank_optionals() {
        let mut create = CreateCompany::new("Acme", CompanyStatus::Active);
        create.email = Some(String::new());
        create.latitude = Some(-6.2);
        create.logo = Some(FileUpload::new("logo.png", "image/png", vec![1, 2, 3]));

        let form = create.into_form();
        assert_eq!(form.get_text("name"), Some("Acme"));
        assert_eq!(form.get_text("status"), Some("ACTIVE"));
        assert_eq!(form.get_text("latitude"), Some("-6.2"));
        assert!(!form.has_field("email"));
        assert!(form.has_field("logo"));
    }

    #[test]
    fn update_form_sends_only_present_fields() {
        let update = UpdateCompany {
            status: Some(CompanyStatus::Suspended),
            ..Default::default()
        };
        let form = update.into_form();
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.get_text("status"), Some("SUSPENDED"));
    }

    #[test]
    fn status_parses_any_case() {
        assert_eq!("trial".parse::<CompanyStatus>().unwrap(), CompanyStatus::Trial);
        assert!("closed".parse::<CompanyStatus>().is_err());
    }
}
