use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use server::{
    config::AppConfig,
    http::{AppState, build_router},
};
use tower::util::ServiceExt;

pub async fn test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    // A single connection keeps the whole test on one in-memory database.
    options.max_connections(1);
    let pool = Database::connect(options).await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    build_router(AppState {
        pool,
        config: Arc::new(AppConfig::default()),
    })
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

pub fn text_body(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Creates an employee and returns its assigned id.
pub async fn create_employee(
    app: &Router,
    first_name: &str,
    position: &str,
    report_ids: &[&str],
) -> String {
    let reports: Vec<Value> = report_ids
        .iter()
        .map(|id| serde_json::json!({ "employeeId": id }))
        .collect();
    let (status, body) = send(
        app,
        "POST",
        "/api/employee",
        Some(serde_json::json!({
            "firstName": first_name,
            "lastName": "Example",
            "position": position,
            "department": "Engineering",
            "directReports": reports,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json_body(&body)["employeeId"].as_str().unwrap().to_string()
}
