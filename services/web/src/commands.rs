use crate::infra::ResolveReport;
use axum::http::StatusCode;
use chrono::{NaiveDate, TimeZone, Utc};
use clap::Args;
use schoolsite::config::AppConfig;
use schoolsite::error::AppError;
use schoolsite::service::SiteService;
use schoolsite::templates::{render_site, TemplateRegistry};
use schoolsite::tenant::{
    build_from_fixture, check_subscription, check_subscription_now, TenantFixture, TenantState,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// Hostname as it would arrive in the Host header (port included)
    pub(crate) host: String,
    /// Request path to run through the edge router
    #[arg(long, default_value = "/")]
    pub(crate) path: String,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Template slug, e.g. template_classic
    pub(crate) template: String,
    /// School fixture JSON (defaults to the bundled demo school)
    #[arg(long)]
    pub(crate) fixture: Option<PathBuf>,
    /// Evaluate the subscription as of this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let site = SiteService::from_config(&config)?;
    let report = ResolveReport::new(&site, &args.host, &args.path);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Routing report unavailable: {err}"),
    }
    Ok(())
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let PreviewArgs {
        template,
        fixture,
        today,
    } = args;

    let fixture = TenantFixture::load(fixture.as_deref())?;
    let model = build_from_fixture(&fixture);
    let as_of = today
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight));
    let (now, subscription) = match as_of {
        Some(now) => (now, check_subscription(&model, now)),
        None => (Utc::now(), check_subscription_now(&model)),
    };
    eprintln!(
        "Subscription as of {}: {:?} (access {})",
        now.date_naive(),
        subscription.status,
        if subscription.is_access_allowed { "allowed" } else { "denied" }
    );

    let registry = TemplateRegistry::standard();
    let state = TenantState::loaded(model);
    let page = render_site(&registry, &template, &state, "/", now);

    if page.status != StatusCode::OK {
        eprintln!("{} (HTTP {})", page.title, page.status.as_u16());
    }
    println!("{}", page.html);
    Ok(())
}
