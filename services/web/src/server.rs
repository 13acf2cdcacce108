use crate::cli::ServeArgs;
use crate::edge::with_edge_routing;
use crate::infra::AppState;
use crate::routes::with_site_routes;
use axum_prometheus::PrometheusMetricLayer;
use schoolsite::config::AppConfig;
use schoolsite::error::AppError;
use schoolsite::service::SiteService;
use schoolsite::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let site = SiteService::from_config(&config)?;
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(site, prometheus_handle);
    let readiness_flag = app_state.readiness.clone();

    let routes = with_site_routes(app_state.clone()).layer(prometheus_layer);
    let app = with_edge_routing(routes, app_state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        marketing_domain = %config.sites.marketing_domain,
        "school site service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
