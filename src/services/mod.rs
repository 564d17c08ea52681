pub mod auth;
pub mod company;
pub mod dashboard;
pub mod employee;
pub mod pricing_plan;
pub mod staff;

pub use auth::{friendly_error, AuthService, UserService};
pub use company::CompanyService;
pub use dashboard::{DashboardService, RegionService};
pub use employee::EmployeeService;
pub use pricing_plan::PricingPlanService;
pub use staff::StaffService;

/// `base/id`; slashes inside the id are percent-encoded
pub(crate) fn resource_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, id.trim().replace('/', "%2F"))
}
