use axum::http::{header, HeaderMap, Uri};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use schoolsite::edge::{EdgeRouter, RouteDecision};
use schoolsite::service::SiteService;
use schoolsite::sites::RoutingDecision;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) site: Arc<SiteService>,
    pub(crate) edge: Arc<EdgeRouter>,
}

impl AppState {
    pub(crate) fn new(site: SiteService, metrics: PrometheusHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            edge: Arc::new(site.edge_router()),
            site: Arc::new(site),
        }
    }
}

/// Host the client asked for: the `Host` header, or the URI authority for
/// absolute-form requests.
pub(crate) fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
        .to_string()
}

/// How a host is classified and what the edge does with one path on it.
#[derive(Debug, Serialize)]
pub(crate) struct ResolveReport {
    pub(crate) host: String,
    pub(crate) path: String,
    pub(crate) routing: RoutingDecision,
    pub(crate) edge: RouteDecision,
}

impl ResolveReport {
    pub(crate) fn new(site: &SiteService, host: &str, path: &str) -> Self {
        Self {
            host: host.to_string(),
            path: path.to_string(),
            routing: site.resolve(host),
            edge: site.edge_router().route(path, host),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
