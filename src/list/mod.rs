pub mod controller;
pub mod filter;
pub mod query;
pub mod source;
pub mod state;

pub use controller::{FetchTicket, ListController};
pub use filter::{CompanyFilter, EmployeeFilter, ListFilter, RoleStatusFilter, StaffFilter};
pub use query::{ListQuery, Sort};
pub use source::ListDataSource;
pub use state::{ListState, Pagination, Selection};
