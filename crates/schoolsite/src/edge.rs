//! Per-request routing decision made before the application router runs.
//!
//! The decision is a plain value; the web service applies it by rewriting the
//! request URI (invisible to the client) or answering with a redirect.

use serde::Serialize;

use crate::sites::{DomainResolver, HostPolicy, RoutingMode};

pub const PREVIEW_PREFIX: &str = "/demo";
pub const TENANT_FALLBACK_PREFIX: &str = "/tenant";
const BYPASS_PREFIXES: &[&str] = &["/_next", "/api", "/icons", "/favicon"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouteDecision {
    PassThrough,
    Redirect { location: String },
    Rewrite { path: String },
}

#[derive(Debug, Clone)]
pub struct EdgeRouter {
    resolver: DomainResolver,
    hosts: HostPolicy,
}

impl EdgeRouter {
    pub fn new(resolver: DomainResolver, hosts: HostPolicy) -> Self {
        Self { resolver, hosts }
    }

    pub fn route(&self, path: &str, host: &str) -> RouteDecision {
        if has_prefix(path, PREVIEW_PREFIX) {
            return if self.hosts.allows_preview(host) {
                RouteDecision::PassThrough
            } else {
                RouteDecision::Redirect {
                    location: "/".to_string(),
                }
            };
        }

        if is_bypassed(path) {
            return RouteDecision::PassThrough;
        }

        let decision = self.resolver.resolve(host);
        match (decision.mode, decision.template_id) {
            (RoutingMode::Marketing, _) => RouteDecision::PassThrough,
            (RoutingMode::Tenant, Some(template_id)) => RouteDecision::Rewrite {
                path: prefixed(&format!("{PREVIEW_PREFIX}/{template_id}"), path),
            },
            (RoutingMode::Tenant, None) | (RoutingMode::Unknown, _) => RouteDecision::Rewrite {
                path: prefixed(TENANT_FALLBACK_PREFIX, path),
            },
        }
    }
}

/// Matches `prefix` as a whole path segment: `/api` and `/api/x`, not `/apiary`.
fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn is_bypassed(path: &str) -> bool {
    path.contains('.') || BYPASS_PREFIXES.iter().any(|prefix| has_prefix(path, prefix))
}

fn prefixed(prefix: &str, path: &str) -> String {
    match path {
        "" | "/" => prefix.to_string(),
        _ if path.starts_with('/') => format!("{prefix}{path}"),
        _ => format!("{prefix}/{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{DomainRecord, DomainRegistry};
    use std::sync::Arc;

    fn router() -> EdgeRouter {
        let registry = DomainRegistry::new([
            DomainRecord::owner("schoolsites.in"),
            DomainRecord::owner("localhost:3000"),
            DomainRecord::tenant("crescentthoothukujdi.in", "template_classic"),
        ])
        .expect("registry builds");
        EdgeRouter::new(
            DomainResolver::new(Arc::new(registry)),
            HostPolicy::new("schoolsites.in", ["localhost", "127.0.0.1"]),
        )
    }

    fn rewrite(path: &str) -> RouteDecision {
        RouteDecision::Rewrite {
            path: path.to_string(),
        }
    }

    #[test]
    fn preview_routes_only_on_allowed_hosts() {
        let router = router();
        assert_eq!(
            router.route("/demo/template_modern", "localhost:3000"),
            RouteDecision::PassThrough
        );
        assert_eq!(router.route("/demo", "127.0.0.1:8080"), RouteDecision::PassThrough);
        for host in ["schoolsites.in", "crescentthoothukujdi.in", "unknown.example"] {
            assert_eq!(
                router.route("/demo/template_modern/about", host),
                RouteDecision::Redirect {
                    location: "/".to_string()
                }
            );
        }
    }

    #[test]
    fn preview_check_precedes_asset_bypass() {
        assert_eq!(
            router().route("/demo/template_classic/logo.png", "crescentthoothukujdi.in"),
            RouteDecision::Redirect {
                location: "/".to_string()
            }
        );
    }

    #[test]
    fn framework_api_and_asset_paths_bypass() {
        let router = router();
        for path in ["/_next/static/chunk.js", "/api/health", "/icons/logo", "/favicon.ico", "/robots.txt"] {
            assert_eq!(
                router.route(path, "crescentthoothukujdi.in"),
                RouteDecision::PassThrough,
                "{path}"
            );
        }
        assert_eq!(
            router.route("/apiary", "crescentthoothukujdi.in"),
            rewrite("/demo/template_classic/apiary")
        );
    }

    #[test]
    fn marketing_hosts_pass_through() {
        let router = router();
        assert_eq!(router.route("/pricing", "www.schoolsites.in"), RouteDecision::PassThrough);
        assert_eq!(router.route("/", "localhost:3000"), RouteDecision::PassThrough);
    }

    #[test]
    fn tenant_hosts_rewrite_into_their_template() {
        let router = router();
        assert_eq!(
            router.route("/about/staff", "crescentthoothukujdi.in"),
            rewrite("/demo/template_classic/about/staff")
        );
        assert_eq!(
            router.route("/", "www.crescentthoothukujdi.in"),
            rewrite("/demo/template_classic")
        );
    }

    #[test]
    fn unknown_hosts_rewrite_to_tenant_fallback() {
        let router = router();
        assert_eq!(router.route("/", "new-school.example"), rewrite("/tenant"));
        assert_eq!(
            router.route("/admissions", "new-school.example"),
            rewrite("/tenant/admissions")
        );
    }
}
