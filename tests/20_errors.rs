mod common;

use anyhow::Result;
use axum::http::Method;
use saas_console::api::RequestOptions;
use saas_console::error::{ApiError, ErrorKind, ErrorMessage};
use saas_console::services::friendly_error;
use serde_json::{json, Value};

async fn fail(status: u16, body: Value) -> Result<ApiError> {
    let backend = common::MockBackend::start().await?;
    backend.json(Method::GET, "/superadmin/companies/c1", status, body);
    let err = backend
        .client()
        .get::<Value>("/superadmin/companies/c1", RequestOptions::new())
        .await
        .unwrap_err();
    Ok(err)
}

#[tokio::test]
async fn not_found_gets_default_error_name() -> Result<()> {
    let err = fail(404, json!({"message": "Not found"})).await?;

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.status_code, Some(404));
    assert_eq!(err.error, "NotFoundError");
    assert_eq!(err.message, ErrorMessage::Single("Not found".into()));
    assert_eq!(err.data, Some(json!({"message": "Not found"})));
    Ok(())
}

#[tokio::test]
async fn validation_list_is_kept_and_formatted() -> Result<()> {
    let err = fail(
        400,
        json!({
            "message": ["email must be an email", "name should not be empty"],
            "error": "Bad Request",
            "statusCode": 400
        }),
    )
    .await?;

    assert!(err.is_validation_error());
    assert_eq!(err.error, "Bad Request");
    assert!(matches!(&err.message, ErrorMessage::Many(list) if list.len() == 2));
    assert_eq!(
        err.user_message(),
        "Please enter a valid email address. Name is required"
    );
    Ok(())
}

#[tokio::test]
async fn forbidden_and_server_errors_are_classified() -> Result<()> {
    let forbidden = fail(403, json!({"message": "Forbidden resource"})).await?;
    assert_eq!(forbidden.kind, ErrorKind::Forbidden);
    assert!(forbidden.is_auth_error());

    let server = fail(500, json!({"message": "boom"})).await?;
    assert!(server.is_server_error());
    assert_eq!(server.error, "ServerError");
    Ok(())
}

#[tokio::test]
async fn message_falls_back_to_status_text() -> Result<()> {
    let err = fail(422, json!({"detail": "nope"})).await?;
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, ErrorMessage::Single("Unprocessable Entity".into()));
    Ok(())
}

#[tokio::test]
async fn non_json_failure_is_a_request_error() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.raw(Method::GET, "/superadmin/staff", 502, "text/html", "<h1>Bad gateway</h1>");

    let err = backend
        .client()
        .get::<Value>("/superadmin/staff", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.error, "RequestError");
    assert_eq!(err.status_code, Some(502));
    assert_eq!(err.user_message(), "HTTP 502: Bad Gateway");
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_unknown() -> Result<()> {
    let backend = common::MockBackend::start().await?;
    backend.raw(Method::GET, "/superadmin/staff", 200, "application/json", "{not json");

    let err = backend
        .client()
        .get::<Value>("/superadmin/staff", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> Result<()> {
    let client = saas_console::api::ApiClient::new(common::unreachable_base_url());

    let err = client
        .get::<Value>("/superadmin/companies", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status_code, None);
    assert_eq!(
        friendly_error(err).user_message(),
        "Network error. Please check your connection."
    );
    Ok(())
}
