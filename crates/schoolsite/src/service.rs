use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::edge::EdgeRouter;
use crate::error::AppError;
use crate::sites::{DomainRegistry, DomainResolver, HostPolicy, RoutingDecision, RoutingMode, SchoolDirectory};
use crate::templates::{notices, render_marketing_home, render_site, RenderedPage, TemplateRegistry};
use crate::tenant::{build_from_fixture, TenantFetcher, TenantFixture, TenantState, TenantViewModel};

/// Composes host resolution, tenant fetching, and template rendering for the
/// three application trees: marketing, tenant sites, and unconfigured domains.
#[derive(Debug, Clone)]
pub struct SiteService {
    resolver: DomainResolver,
    hosts: HostPolicy,
    directory: Arc<SchoolDirectory>,
    fetcher: TenantFetcher,
    templates: Arc<TemplateRegistry>,
    preview_model: Arc<TenantViewModel>,
}

impl SiteService {
    pub fn new(
        resolver: DomainResolver,
        hosts: HostPolicy,
        directory: Arc<SchoolDirectory>,
        fetcher: TenantFetcher,
        templates: Arc<TemplateRegistry>,
        preview_fixture: &TenantFixture,
    ) -> Self {
        Self {
            resolver,
            hosts,
            directory,
            fetcher,
            templates,
            preview_model: Arc::new(build_from_fixture(preview_fixture)),
        }
    }

    /// Loads the registry, directory, and preview fixture named by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let hosts = HostPolicy::from_config(&config.sites);
        let registry = DomainRegistry::load(&config.sites)?;
        let directory = SchoolDirectory::load(&config.sites)?;
        let fixture = TenantFixture::load(config.sites.demo_fixture_path.as_deref())?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("schoolsite/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            domains = registry.len(),
            directory = directory.len(),
            tenant_api = config.tenant_api.base_url.is_some(),
            "site tables loaded"
        );

        Ok(Self::new(
            DomainResolver::new(Arc::new(registry)),
            hosts.clone(),
            Arc::new(directory),
            TenantFetcher::new(client, &config.tenant_api, hosts),
            Arc::new(TemplateRegistry::standard()),
            &fixture,
        ))
    }

    pub fn edge_router(&self) -> EdgeRouter {
        EdgeRouter::new(self.resolver.clone(), self.hosts.clone())
    }

    pub fn resolve(&self, host: &str) -> RoutingDecision {
        self.resolver.resolve(host)
    }

    pub fn render_marketing(&self, host: &str) -> RenderedPage {
        render_marketing_home(&self.templates, self.hosts.allows_preview(host))
    }

    /// `/demo/{template}`: a tenant's live site when the host is a registered
    /// tenant, otherwise the template preview with demo content.
    pub async fn render_template_route(
        &self,
        host: &str,
        template_id: &str,
        path: &str,
        now: DateTime<Utc>,
    ) -> RenderedPage {
        let decision = self.resolver.resolve(host);
        if decision.mode == RoutingMode::Tenant {
            return self.render_tenant(&decision.domain, template_id, path, now).await;
        }
        debug!(host, template_id, "serving template preview");
        self.render_preview(template_id, path, now)
    }

    /// `/tenant`: hosts missing from the registry. A school found in the local
    /// directory is served live; anything else gets the not-configured notice.
    pub async fn render_unregistered(&self, host: &str, path: &str, now: DateTime<Utc>) -> RenderedPage {
        match self.directory.lookup(host) {
            Some(entry) => {
                let (domain, template_id) = (entry.domain.clone(), entry.template_id.clone());
                self.render_tenant(&domain, &template_id, path, now).await
            }
            None => {
                debug!(host, "no site configured for host");
                notices::not_configured(host)
            }
        }
    }

    pub fn render_preview(&self, template_id: &str, path: &str, now: DateTime<Utc>) -> RenderedPage {
        let state = TenantState::loaded(self.preview_model.as_ref().clone());
        render_site(&self.templates, template_id, &state, path, now)
    }

    async fn render_tenant(
        &self,
        domain: &str,
        template_id: &str,
        path: &str,
        now: DateTime<Utc>,
    ) -> RenderedPage {
        let result = self.fetcher.fetch_tenant_data(domain, template_id).await;
        let state = TenantState::from_fetch(result);
        render_site(&self.templates, template_id, &state, path, now)
    }
}
