pub mod company;
pub mod dashboard;
pub mod employee;
pub mod page;
pub mod pricing_plan;
pub mod region;
pub mod staff;
pub mod subscription;
pub mod user;

pub use company::{Company, CompanyDetail, CompanyStatus, CompanyUser, CreateCompany, CreateCompanyUser, UpdateCompany};
pub use dashboard::DashboardOverview;
pub use employee::{Employee, EmployeeInput};
pub use page::{ListResponse, PageMeta};
pub use pricing_plan::{PricingPlan, PricingPlanInput};
pub use region::{Region, RegionSearchResult};
pub use staff::{Staff, StaffInput};
pub use subscription::{BillingPeriod, CompanySubscription, CreateSubscription, Subscription};
pub use user::{CreateUser, LoginRequest, LoginResponse, LoginUser, RegisteredUser};
