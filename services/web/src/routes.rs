use crate::infra::{request_host, AppState, ResolveReport};
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use schoolsite::templates::RenderedPage;
use serde::Deserialize;
use serde_json::json;

pub(crate) fn with_site_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(marketing_home))
        .route("/demo/:template_id", get(template_home))
        .route("/demo/:template_id/*rest", get(template_page))
        .route("/tenant", get(unregistered_home))
        .route("/tenant/*rest", get(unregistered_page))
        .route("/api/health", get(healthcheck))
        .route("/api/ready", get(readiness_endpoint))
        .route("/api/metrics", get(metrics_endpoint))
        .route("/api/v1/resolve", get(resolve_endpoint))
        .layer(Extension(state))
}

fn page_path(rest: &str) -> String {
    format!("/{}", rest.trim_start_matches('/'))
}

pub(crate) async fn marketing_home(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> RenderedPage {
    state.site.render_marketing(&request_host(&headers, &uri))
}

pub(crate) async fn template_home(
    Extension(state): Extension<AppState>,
    Path(template_id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> RenderedPage {
    let host = request_host(&headers, &uri);
    state
        .site
        .render_template_route(&host, &template_id, "/", Utc::now())
        .await
}

pub(crate) async fn template_page(
    Extension(state): Extension<AppState>,
    Path((template_id, rest)): Path<(String, String)>,
    headers: HeaderMap,
    uri: Uri,
) -> RenderedPage {
    let host = request_host(&headers, &uri);
    state
        .site
        .render_template_route(&host, &template_id, &page_path(&rest), Utc::now())
        .await
}

pub(crate) async fn unregistered_home(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> RenderedPage {
    let host = request_host(&headers, &uri);
    state.site.render_unregistered(&host, "/", Utc::now()).await
}

pub(crate) async fn unregistered_page(
    Extension(state): Extension<AppState>,
    Path(rest): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> RenderedPage {
    let host = request_host(&headers, &uri);
    state
        .site
        .render_unregistered(&host, &page_path(&rest), Utc::now())
        .await
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveQuery {
    #[serde(default)]
    pub(crate) host: Option<String>,
    #[serde(default)]
    pub(crate) path: Option<String>,
}

/// Routing decision for `host` (defaults to the caller's own host).
pub(crate) async fn resolve_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ResolveQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Json<ResolveReport> {
    let host = query
        .host
        .filter(|host| !host.trim().is_empty())
        .unwrap_or_else(|| request_host(&headers, &uri));
    let path = query.path.unwrap_or_else(|| "/".to_string());
    Json(ResolveReport::new(&state.site, &host, &path))
}
