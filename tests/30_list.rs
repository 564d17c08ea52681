mod common;

use anyhow::Result;
use axum::http::Method;
use saas_console::list::{CompanyFilter, EmployeeFilter, ListController, ListQuery};
use saas_console::services::{CompanyService, EmployeeService};
use saas_console::types::{Entity, SortDirection};
use serde_json::json;

#[tokio::test]
async fn third_page_requests_offset_and_shows_returned_rows() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    let rows: Vec<_> = (21..=25)
        .map(|n| common::company(&format!("c{}", n), &format!("Company {}", n)))
        .collect();
    backend.json(Method::GET, "/superadmin/companies", 200, common::page(rows, 25, 3, 10));

    let wired = common::wired_client(&backend, "tok");
    let mut list: ListController<CompanyService, CompanyFilter> =
        ListController::new(CompanyService::new(wired.client), ListQuery::new().with_page_size(10));

    assert!(list.state().is_initial_loading());
    assert!(list.paginate(3).await?);

    let req = backend.last_request();
    assert_eq!(req.query_param("page"), Some("3"));
    assert_eq!(req.query_param("limit"), Some("10"));

    let ids: Vec<&str> = list.state().records().iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["c21", "c22", "c23", "c24", "c25"]);
    assert_eq!(list.state().pagination().total, 25);
    assert_eq!(list.state().pagination().page_index, 3);
    assert!(!list.state().is_initial_loading());
    Ok(())
}

#[tokio::test]
async fn submitted_filter_reaches_the_backend() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::GET,
        "/superadmin/companies",
        200,
        common::page(vec![common::company("c1", "Acme")], 1, 1, 10),
    );

    let mut list: ListController<CompanyService, CompanyFilter> =
        ListController::new(CompanyService::new(backend.client()), ListQuery::new());
    list.submit_filter(CompanyFilter {
        status: "ACTIVE".into(),
        search: "acme".into(),
    })
    .await?;

    let req = backend.last_request();
    assert_eq!(req.query_param("status"), Some("ACTIVE"));
    assert_eq!(req.query_param("search"), Some("acme"));
    assert_eq!(list.state().filter().status, "ACTIVE");
    assert_eq!(list.query().to_query_string(), "pageIndex=1&pageSize=10&query=acme&status=ACTIVE");
    Ok(())
}

#[tokio::test]
async fn sort_is_sent_as_sort_by_and_order() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::GET, "/company/employees", 200, common::page(vec![], 0, 1, 10));

    let mut list: ListController<EmployeeService, EmployeeFilter> =
        ListController::new(EmployeeService::new(backend.client()), ListQuery::new());
    list.sort("joinDate", SortDirection::Desc).await?;

    let req = backend.last_request();
    assert_eq!(req.query_param("sortBy"), Some("joinDate"));
    assert_eq!(req.query_param("order"), Some("desc"));
    Ok(())
}

#[tokio::test]
async fn failed_fetch_keeps_previous_page() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::GET,
        "/superadmin/companies",
        200,
        common::page(vec![common::company("c1", "Acme")], 1, 1, 10),
    );

    let mut list: ListController<CompanyService, CompanyFilter> =
        ListController::new(CompanyService::new(backend.client()), ListQuery::new());
    list.load(ListQuery::new()).await?;

    backend.json(
        Method::GET,
        "/superadmin/companies",
        500,
        json!({"message": "Internal server error", "statusCode": 500}),
    );
    let err = list.paginate(2).await.unwrap_err();

    assert!(err.is_server_error());
    assert_eq!(list.state().records().len(), 1);
    assert_eq!(list.state().pagination().page_index, 1);
    Ok(())
}
