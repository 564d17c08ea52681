use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::company::UserRole;
use super::region::Region;
use crate::api::body::{FileUpload, MultipartForm};
use crate::types::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompany {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    #[serde(default)]
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub salary: Option<Decimal>,
    pub status: String,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub company: Option<EmployeeCompany>,
}

impl Entity for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employee fields for create and update. Create fills backend-required
/// fields with the console's defaults; update sends only what is set.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub employee_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<Decimal>,
    pub join_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub region_id: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub photo: Option<FileUpload>,
    pub avatar: Option<FileUpload>,
}

impl EmployeeInput {
    pub fn into_create_form(self, now: DateTime<Utc>) -> MultipartForm {
        let code = self
            .employee_code
            .unwrap_or_else(|| format!("EMP{}", now.timestamp_millis()));

        MultipartForm::new()
            .text("employeeCode", code)
            .text("firstName", self.first_name.unwrap_or_default())
            .text("lastName", self.last_name.unwrap_or_default())
            .text("email", self.email.unwrap_or_default())
            .text_opt("phone", self.phone)
            .text("position", self.position.unwrap_or_else(|| "Staff".to_string()))
            .text("department", self.department.unwrap_or_else(|| "General".to_string()))
            .text("salary", self.salary.unwrap_or_default())
            .text("joinDate", self.join_date.unwrap_or(now).to_rfc3339())
            .text("status", self.status.unwrap_or_else(|| "ACTIVE".to_string()))
            .text_opt("regionId", self.region_id)
            .text_opt("address", self.address)
            .text_opt("postalCode", self.postal_code)
            .file_opt("photo", self.photo)
            .file_opt("avatar", self.avatar)
    }

    pub fn into_update_form(self) -> MultipartForm {
        MultipartForm::new()
            .text_opt("employeeCode", self.employee_code)
            .text_opt("firstName", self.first_name)
            .text_opt("lastName", self.last_name)
            .text_opt("email", self.email)
            .text_opt("phone", self.phone)
            .text_opt("position", self.position)
            .text_opt("department", self.department)
            .text_opt("salary", self.salary)
            .text_opt("joinDate", self.join_date.map(|d| d.to_rfc3339()))
            .text_opt("status", self.status)
            .text_opt("regionId", self.region_id)
            .text_opt("address", self.address)
            .text_opt("postalCode", self.postal_code)
            .file_opt("photo", self.photo)
            .file_opt("avatar", self.avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn create_form_fills_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let input = EmployeeInput {
            first_name: Some("Sam".into()),
            last_name: Some("Hart".into()),
            email: Some("sam@acme.test".into()),
            ..Default::default()
        };

        let form = input.into_create_form(now);
        assert_eq!(form.get_text("employeeCode"), Some(format!("EMP{}", now.timestamp_millis()).as_str()));
        assert_eq!(form.get_text("position"), Some("Staff"));
        assert_eq!(form.get_text("department"), Some("General"));
        assert_eq!(form.get_text("salary"), Some("0"));
        assert_eq!(form.get_text("status"), Some("ACTIVE"));
        assert!(!form.has_field("photo"));
    }

    #[test]
    fn update_form_is_partial() {
        let input = EmployeeInput {
            department: Some("Finance".into()),
            photo: Some(FileUpload::new("me.jpg", "image/jpeg", vec![0xff])),
            ..Default::default()
        };
        let form = input.into_update_form();
        assert_eq!(form.fields().len(), 2);
        assert_eq!(form.get_text("department"), Some("Finance"));
        assert!(form.has_field("photo"));
    }

    #[test]
    fn decodes_numeric_salary() {
        let body = serde_json::json!({
            "id": "e1", "firstName": "Sam", "lastName": "Hart",
            "email": "sam@acme.test", "status": "ACTIVE", "salary": 4500.5
        });
        let employee: Employee = serde_json::from_value(body).unwrap();
        assert_eq!(employee.salary, Some(Decimal::new(45005, 1)));
    }
}
