pub mod auth;
pub mod company;
pub mod dashboard;
pub mod employee;
pub mod plan;
pub mod region;
pub mod staff;

use clap::Args;

use crate::list::{ListController, ListDataSource, ListFilter, ListQuery, RoleStatusFilter};
use crate::types::{Entity, SortDirection};

/// Paging and sorting flags shared by every `list` command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<u32>,

    #[arg(long, help = "Records per page")]
    pub limit: Option<u32>,

    #[arg(long, help = "Free-text search")]
    pub search: Option<String>,

    #[arg(long, help = "Column to sort by")]
    pub sort: Option<String>,

    #[arg(long, requires = "sort", help = "Sort direction: asc or desc")]
    pub order: Option<String>,

    #[arg(long, help = "Start from list URL parameters, e.g. 'pageIndex=2&status=ACTIVE'")]
    pub url: Option<String>,
}

impl ListArgs {
    pub fn to_query(&self) -> anyhow::Result<ListQuery> {
        let mut query = ListQuery::from_query_string(self.url.as_deref().unwrap_or(""));

        if let Some(limit) = self.limit {
            query = query.with_page_size(limit);
        }
        if let Some(page) = self.page {
            query = query.with_page(page);
        }
        if let Some(term) = &self.search {
            query = query.with_search(term);
        }
        if let Some(key) = &self.sort {
            let direction = match self.order.as_deref() {
                Some(order) => SortDirection::parse(order)
                    .ok_or_else(|| anyhow::anyhow!("Invalid sort order '{}', expected asc or desc", order))?,
                None => SortDirection::Asc,
            };
            query = query.with_sort(key, direction);
        }
        Ok(query)
    }
}

/// `--role` / `--status` flags for employee and staff lists
#[derive(Args, Debug, Clone, Default)]
pub struct RoleStatusArgs {
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl RoleStatusArgs {
    /// None when neither flag is given; otherwise the flags override the
    /// filter already carried by the query.
    pub fn to_filter(&self, query: &ListQuery) -> Option<RoleStatusFilter> {
        if self.role.is_none() && self.status.is_none() {
            return None;
        }
        let current = RoleStatusFilter::from_query(query);
        Some(RoleStatusFilter {
            role: self.role.clone().unwrap_or(current.role),
            status: self.status.clone().unwrap_or(current.status),
        })
    }
}

/// Load the first page of a list. A filter, when given, is submitted over
/// the query so its parameters win.
pub async fn load_list<S, F>(source: S, query: ListQuery, filter: Option<F>) -> anyhow::Result<ListController<S, F>>
where
    S: ListDataSource,
    F: ListFilter,
{
    let mut controller = ListController::new(source, query.clone());
    match filter {
        Some(filter) => controller.submit_filter(filter).await?,
        None => controller.load(query).await?,
    };
    Ok(controller)
}

/// Check rows on the loaded page by id (or all of them) and return the
/// resulting selection. Ids that are not on the page are reported and
/// skipped.
pub fn select_rows<S, F>(controller: &mut ListController<S, F>, ids: &[String], all: bool) -> Vec<String>
where
    S: ListDataSource,
    F: ListFilter,
{
    let records = controller.state().records().to_vec();

    if all {
        controller.state_mut().set_all_selected(records);
    } else {
        for id in ids {
            match records.iter().find(|r| r.id() == id.as_str()) {
                Some(record) => controller.state_mut().toggle_selection(true, record.clone()),
                None => eprintln!("Skipping {}: not on the loaded page", id),
            }
        }
    }

    controller.selected_ids()
}
