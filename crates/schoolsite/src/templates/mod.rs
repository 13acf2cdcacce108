//! Template registry and the render entry point for tenant sites.
//!
//! Templates only produce semantic HTML; styling lives with the static assets.

mod classic;
mod html;
mod marketing;
mod modern;
pub mod notices;
mod premium;
mod sections;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

use crate::tenant::{
    check_subscription, SubscriptionCheckResult, SubscriptionStatus, TenantState, TenantStatus,
    TenantViewModel,
};

pub use classic::ClassicTemplate;
pub use html::escape_html;
pub use marketing::render_marketing_home;
pub use modern::ModernTemplate;
pub use premium::PremiumTemplate;
pub use sections::visible;

/// A full HTML document plus the status it should be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub status: StatusCode,
    pub title: String,
    pub html: String,
}

impl RenderedPage {
    pub fn content_type(&self) -> mime::Mime {
        mime::TEXT_HTML_UTF_8
    }
}

impl IntoResponse for RenderedPage {
    fn into_response(self) -> Response {
        let content_type = self.content_type().to_string();
        (self.status, [(header::CONTENT_TYPE, content_type)], self.html).into_response()
    }
}

/// Everything a template may read while rendering one tenant page.
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    pub model: &'a TenantViewModel,
    pub subscription: SubscriptionCheckResult,
    pub path: &'a str,
}

pub trait SiteTemplate: Debug + Send + Sync {
    fn slug(&self) -> &'static str;
    fn name(&self) -> &'static str;
    /// Body markup for the page; the registry wraps it in the document shell.
    fn render(&self, site: &SiteContext<'_>) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<&'static str, Arc<dyn SiteTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classic, modern and premium layouts.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ClassicTemplate));
        registry.register(Arc::new(ModernTemplate));
        registry.register(Arc::new(PremiumTemplate));
        registry
    }

    /// Adds or replaces the template under its slug.
    pub fn register(&mut self, template: Arc<dyn SiteTemplate>) {
        self.templates.insert(template.slug(), template);
    }

    pub fn get(&self, slug: &str) -> Option<&Arc<dyn SiteTemplate>> {
        self.templates.get(slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.keys().copied()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.templates.contains_key(slug)
    }
}

/// Renders a tenant page: state notices first, then the subscription gate,
/// then the template.
pub fn render_site(
    registry: &TemplateRegistry,
    template_id: &str,
    state: &TenantState,
    path: &str,
    now: DateTime<Utc>,
) -> RenderedPage {
    let Some(template) = registry.get(template_id) else {
        return notices::unknown_template(template_id);
    };

    let model = match (state.status, state.data.as_ref()) {
        (TenantStatus::Success, Some(model)) => model,
        (TenantStatus::Error, _) => return notices::fetch_failed(&state.message),
        (TenantStatus::Empty, _) | (TenantStatus::Success, None) => {
            return notices::not_set_up(&state.message)
        }
        (TenantStatus::Idle, _) => return notices::loading(),
    };

    let subscription = check_subscription(model, now);
    if !subscription.is_access_allowed {
        return match subscription.status {
            SubscriptionStatus::Inactive => notices::subscription_inactive(&model.school),
            _ => notices::subscription_expired(&model.school),
        };
    }

    let site = SiteContext {
        model,
        subscription,
        path,
    };
    let mut body = String::new();
    if let Some(days) = subscription.days_remaining {
        body.push_str(&sections::grace_banner(&model.school, days));
    }
    body.push_str(&template.render(&site));

    let title = if model.school.name.is_empty() {
        template.name().to_string()
    } else {
        model.school.name.clone()
    };

    RenderedPage {
        status: StatusCode::OK,
        html: html::document(&title, template.slug(), &body),
        title,
    }
}
