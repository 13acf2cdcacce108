use std::net::SocketAddr;

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// Starts an in-process stand-in for the tenant content API and returns its
/// base address. Each route answers with one canned payload shape.
pub async fn spawn_tenant_api() -> SocketAddr {
    let app = Router::new()
        .route("/site", get(site_rows))
        .route("/expired", get(expired_rows))
        .route("/empty", get(empty_rows))
        .route("/empty-silent", get(|| async { Json(json!({ "status_code": 200 })) }))
        .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/garbage", get(|| async { "<html>not json</html>" }))
        .route("/unknown-table", get(unknown_table));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server runs");
    });
    addr
}

pub fn query_param(uri: &Uri, key: &str) -> String {
    uri.query()
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}

async fn site_rows(uri: Uri) -> Response {
    let domain = query_param(&uri, "domain");
    let template = query_param(&uri, "template");
    Json(json!({
        "status_code": 200,
        "message": "ok",
        "data": [
            {"school": {
                "name": format!("School at {domain}"),
                "template_id": template,
                "is_active": true,
                "payment_url": "https://pay.example.in/school"
            }},
            {"identity": {"motto": "Rise and shine"}},
            {"events": {"title": "Sports day", "is_active": true, "display_order": 1}}
        ]
    }))
    .into_response()
}

async fn expired_rows() -> Response {
    Json(json!({
        "status_code": 200,
        "message": "ok",
        "data": [
            {"school": {
                "name": "Lapsed School",
                "is_active": true,
                "expiration_date": "2020-01-01",
                "grace_period_days": "15"
            }}
        ]
    }))
    .into_response()
}

async fn empty_rows() -> Response {
    Json(json!({
        "status_code": 200,
        "message": "School has not published any content",
        "data": []
    }))
    .into_response()
}

async fn unknown_table() -> Response {
    Json(json!({
        "status_code": 200,
        "message": "ok",
        "data": [{"canteen_menu": {"dish": "idli"}}]
    }))
    .into_response()
}
