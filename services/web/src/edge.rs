use crate::infra::{request_host, AppState};
use axum::extract::{Request, State};
use axum::http::uri::PathAndQuery;
use axum::http::Uri;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Router;
use schoolsite::edge::RouteDecision;
use tower::Layer;
use tracing::{debug, warn};

/// Wraps `routes` so the edge decision runs before routing. `Router::layer`
/// middleware only sees a request after its route has matched.
pub(crate) fn with_edge_routing(routes: Router, state: AppState) -> Router {
    let edge = middleware::from_fn_with_state(state, apply_edge_routing).layer(routes);
    Router::new().fallback_service(edge)
}

pub(crate) async fn apply_edge_routing(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let host = request_host(request.headers(), request.uri());
    let path = request.uri().path().to_string();

    match state.edge.route(&path, &host) {
        RouteDecision::PassThrough => next.run(request).await,
        RouteDecision::Redirect { location } => {
            debug!(%host, %path, %location, "preview not allowed on host, redirecting");
            Redirect::temporary(&location).into_response()
        }
        RouteDecision::Rewrite { path: target } => {
            match rewritten_uri(request.uri(), &target) {
                Some(uri) => {
                    debug!(%host, from = %path, to = %target, "rewriting request");
                    *request.uri_mut() = uri;
                }
                None => warn!(%host, to = %target, "rewrite target is not a valid URI"),
            }
            next.run(request).await
        }
    }
}

/// Swaps the path and keeps the query string.
fn rewritten_uri(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
