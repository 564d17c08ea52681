use std::fmt::Debug;

use super::query::{param, ListQuery};

/// Filter value of one entity list.
///
/// A filter is replaced wholesale on submission (no merge). Writing it into
/// a query overwrites every parameter it owns; empty values remove them.
pub trait ListFilter: Clone + Default + PartialEq + Debug + Send + Sync + 'static {
    fn from_query(query: &ListQuery) -> Self;

    fn apply_to(&self, query: &ListQuery) -> ListQuery;
}

/// Companies: status plus free-text search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub status: String,
    pub search: String,
}

impl ListFilter for CompanyFilter {
    fn from_query(query: &ListQuery) -> Self {
        Self {
            status: query.filter(param::STATUS).unwrap_or_default().to_string(),
            search: query.search.clone().unwrap_or_default(),
        }
    }

    fn apply_to(&self, query: &ListQuery) -> ListQuery {
        query.append([(param::STATUS, self.status.as_str()), (param::QUERY, self.search.as_str())])
    }
}

/// Employees and staff: role and status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleStatusFilter {
    pub role: String,
    pub status: String,
}

pub type EmployeeFilter = RoleStatusFilter;
pub type StaffFilter = RoleStatusFilter;

impl ListFilter for RoleStatusFilter {
    fn from_query(query: &ListQuery) -> Self {
        Self {
            role: query.filter(param::ROLE).unwrap_or_default().to_string(),
            status: query.filter(param::STATUS).unwrap_or_default().to_string(),
        }
    }

    fn apply_to(&self, query: &ListQuery) -> ListQuery {
        query.append([(param::ROLE, self.role.as_str()), (param::STATUS, self.status.as_str())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_filter_round_trips_through_query() {
        let query = ListQuery::from_query_string("status=TRIAL&query=acme&pageIndex=2");
        let filter = CompanyFilter::from_query(&query);
        assert_eq!(
            filter,
            CompanyFilter {
                status: "TRIAL".into(),
                search: "acme".into()
            }
        );
    }

    #[test]
    fn applying_a_filter_replaces_owned_params_only() {
        let query = ListQuery::from_query_string("status=ACTIVE&pageIndex=3");
        let filter = CompanyFilter {
            status: String::new(),
            search: "acme".into(),
        };

        let next = filter.apply_to(&query);
        assert_eq!(next.filter("status"), None);
        assert_eq!(next.search.as_deref(), Some("acme"));
        assert_eq!(next.page_index, 3);
    }

    #[test]
    fn role_status_filter_writes_both_keys() {
        let filter = EmployeeFilter {
            role: "manager".into(),
            status: "ACTIVE".into(),
        };
        let next = filter.apply_to(&ListQuery::new());
        assert_eq!(next.filter("role"), Some("manager"));
        assert_eq!(next.filter("status"), Some("ACTIVE"));
    }
}
