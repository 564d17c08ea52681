mod common;

use anyhow::Result;
use axum::http::Method;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use saas_console::api::FileUpload;
use saas_console::models::{
    BillingPeriod, CompanyStatus, CreateCompany, CreateSubscription, EmployeeInput, PricingPlanInput, UpdateCompany,
};
use saas_console::services::{CompanyService, EmployeeService, PricingPlanService, RegionService, StaffService};
use serde_json::json;

#[tokio::test]
async fn company_create_is_multipart_with_logo() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::POST, "/superadmin/companies", 201, common::company("c9", "Acme"));
    let wired = common::wired_client(&backend, "tok");

    let mut create = CreateCompany::new("Acme", CompanyStatus::Trial);
    create.email = Some("ops@acme.test".into());
    create.logo = Some(FileUpload::new("logo.png", "image/png", vec![0x89, b'P', b'N', b'G']));

    let company = CompanyService::new(wired.client).create(create).await?;
    assert_eq!(company.id, "c9");

    let req = backend.last_request();
    let content_type = req.header("content-type").unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"), "got {}", content_type);
    assert_eq!(req.header("authorization"), Some("Bearer tok"));

    let body = req.body_text();
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("Acme"));
    assert!(body.contains("TRIAL"));
    assert!(body.contains("filename=\"logo.png\""));
    assert!(body.contains("image/png"));
    Ok(())
}

#[tokio::test]
async fn company_update_patches_only_given_fields() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::PATCH, "/superadmin/companies/c1", 200, common::company("c1", "Acme"));

    let update = UpdateCompany {
        status: Some(CompanyStatus::Suspended),
        ..Default::default()
    };
    CompanyService::new(backend.client()).update("c1", update).await?;

    let body = backend.last_request().body_text();
    assert!(body.contains("SUSPENDED"));
    assert!(!body.contains("name=\"name\""));
    Ok(())
}

#[tokio::test]
async fn company_detail_includes_users() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    let mut detail = common::company("c1", "Acme");
    detail["users"] = json!([
        {"id": "u1", "email": "a@acme.test", "firstName": "Ann", "lastName": "Lee", "isActive": true}
    ]);
    backend.json(Method::GET, "/superadmin/companies/c1", 200, detail);

    let company = CompanyService::new(backend.client()).get("c1").await?;
    assert_eq!(company.company.name, "Acme");
    assert_eq!(company.users.len(), 1);
    assert!(company.users[0].is_active);
    Ok(())
}

#[tokio::test]
async fn subscribe_posts_plan_and_period() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::POST, "/superadmin/subscriptions", 201, json!({"id": "s1"}));

    CompanyService::new(backend.client())
        .subscribe(&CreateSubscription {
            plan_id: "p1".into(),
            company_id: "c1".into(),
            billing_period: BillingPeriod::Yearly,
            auto_renew: false,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        })
        .await?;

    assert_eq!(
        backend.last_request().json(),
        json!({
            "planId": "p1",
            "companyId": "c1",
            "billingPeriod": "YEARLY",
            "autoRenew": false,
            "startDate": "2026-02-01"
        })
    );
    Ok(())
}

#[tokio::test]
async fn company_subscription_may_be_empty() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::GET,
        "/superadmin/subscriptions/company/c1",
        200,
        json!({"company": {"id": "c1", "name": "Acme", "subscriptionId": null}, "subscription": null}),
    );

    let result = CompanyService::new(backend.client()).subscription("c1").await?;
    assert!(result.subscription.is_none());
    Ok(())
}

#[tokio::test]
async fn subscription_lookup_escapes_company_id() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::GET,
        "/superadmin/subscriptions/company/a%2Fb",
        200,
        json!({"company": {"id": "a/b", "name": "Acme", "subscriptionId": null}, "subscription": null}),
    );

    CompanyService::new(backend.client()).subscription("a/b").await?;
    assert_eq!(backend.last_request().path, "/superadmin/subscriptions/company/a%2Fb");
    Ok(())
}

#[tokio::test]
async fn employee_create_fills_defaults() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::POST,
        "/company/employees",
        201,
        json!({
            "id": "e1", "employeeCode": "EMP1", "firstName": "Budi", "lastName": "Santoso",
            "email": "budi@example.test", "status": "ACTIVE", "salary": 0.0
        }),
    );

    let input = EmployeeInput {
        first_name: Some("Budi".into()),
        last_name: Some("Santoso".into()),
        email: Some("budi@example.test".into()),
        ..Default::default()
    };
    let employee = EmployeeService::new(backend.client()).create(input).await?;
    assert_eq!(employee.salary, Some(Decimal::ZERO));

    let body = backend.last_request().body_text();
    for field in ["employeeCode", "position", "department", "salary", "joinDate", "status"] {
        assert!(body.contains(&format!("name=\"{}\"", field)), "missing {}", field);
    }
    assert!(body.contains("Staff"));
    assert!(body.contains("General"));
    Ok(())
}

#[tokio::test]
async fn bulk_delete_sends_selected_ids() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::POST, "/company/employees/bulk-delete", 200, json!({"count": 2}));
    backend.json(Method::POST, "/superadmin/staff/bulk-delete", 200, json!({"count": 1}));

    let ids = vec!["e1".to_string(), "e2".to_string()];
    let result = EmployeeService::new(backend.client()).bulk_delete(&ids).await?;
    assert_eq!(result["count"], 2);
    assert_eq!(backend.last_request().json(), json!({"ids": ["e1", "e2"]}));

    StaffService::new(backend.client()).bulk_delete(&["s1".to_string()]).await?;
    assert_eq!(backend.last_request().path, "/superadmin/staff/bulk-delete");
    Ok(())
}

#[tokio::test]
async fn ids_are_escaped_into_one_path_segment() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::DELETE, "/superadmin/staff/a%2Fb", 200, json!({}));

    StaffService::new(backend.client()).delete(" a/b ").await?;
    assert_eq!(backend.last_request().method, Method::DELETE);
    assert_eq!(backend.last_request().path, "/superadmin/staff/a%2Fb");
    Ok(())
}

#[tokio::test]
async fn plans_list_asks_for_inactive_only_when_requested() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::GET,
        "/superadmin/pricing-plans",
        200,
        json!([{"id": "p1", "name": "Starter", "price": 9.99, "billingPeriod": "MONTHLY", "isActive": true}]),
    );
    let plans = PricingPlanService::new(backend.client());

    let active = plans.list(false).await?;
    assert_eq!(active[0].price, Decimal::new(999, 2));
    assert_eq!(backend.last_request().query_param("includeInactive"), None);

    plans.list(true).await?;
    assert_eq!(backend.last_request().query_param("includeInactive"), Some("true"));
    Ok(())
}

#[tokio::test]
async fn plan_update_sends_partial_json() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::PATCH,
        "/superadmin/pricing-plans/p1",
        200,
        json!({"id": "p1", "name": "Starter", "price": 12.5, "billingPeriod": "MONTHLY", "isActive": false}),
    );

    let changes = PricingPlanInput {
        price: Some(Decimal::new(125, 1)),
        is_active: Some(false),
        ..Default::default()
    };
    PricingPlanService::new(backend.client()).update("p1", &changes).await?;

    assert_eq!(backend.last_request().json(), json!({"price": 12.5, "isActive": false}));
    Ok(())
}

#[tokio::test]
async fn region_search_sends_term_and_limit() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.json(
        Method::GET,
        "/regions/search",
        200,
        json!([{
            "id": "r1", "fullName": "Coblong, Bandung, Jawa Barat", "postalCode": "40132",
            "village": "Dago", "district": "Coblong", "city": "Bandung", "province": "Jawa Barat"
        }]),
    );

    let hits = RegionService::new(backend.client()).search("dago", 5).await?;
    assert_eq!(hits[0].city, "Bandung");

    let req = backend.last_request();
    assert_eq!(req.query_param("q"), Some("dago"));
    assert_eq!(req.query_param("limit"), Some("5"));
    Ok(())
}
