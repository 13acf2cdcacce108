use std::sync::Arc;

use serde::Serialize;

use super::registry::{DomainRegistry, SiteKind};

/// Which application tree a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    Marketing,
    Tenant,
    Unknown,
}

/// Outcome of resolving a hostname. `Tenant` always carries a template id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    pub mode: RoutingMode,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// Lower-cases and removes one leading `www.`. The port is kept, registry keys
/// include it for local development hosts.
pub fn normalize_hostname(hostname: &str) -> String {
    let lowered = hostname.trim().to_ascii_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

pub fn resolve_domain(registry: &DomainRegistry, hostname: &str) -> RoutingDecision {
    let domain = normalize_hostname(hostname);
    match registry.get(&domain) {
        Some(record) if record.kind == SiteKind::Owner => RoutingDecision {
            mode: RoutingMode::Marketing,
            domain,
            template_id: None,
        },
        Some(record) => RoutingDecision {
            mode: RoutingMode::Tenant,
            template_id: Some(record.template_id.clone()),
            domain,
        },
        None => RoutingDecision {
            mode: RoutingMode::Unknown,
            domain,
            template_id: None,
        },
    }
}

/// Resolver bound to the registry injected at startup.
#[derive(Debug, Clone)]
pub struct DomainResolver {
    registry: Arc<DomainRegistry>,
}

impl DomainResolver {
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, hostname: &str) -> RoutingDecision {
        resolve_domain(&self.registry, hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::DomainRecord;

    fn resolver() -> DomainResolver {
        let registry = DomainRegistry::new([
            DomainRecord::owner("schoolsites.in"),
            DomainRecord::owner("localhost:3000"),
            DomainRecord::tenant("crescentthoothukujdi.in", "template_classic"),
            DomainRecord::tenant("greenvalley.edu.in", "template_premium"),
        ])
        .expect("registry builds");
        DomainResolver::new(Arc::new(registry))
    }

    #[test]
    fn owner_records_resolve_to_marketing() {
        let decision = resolver().resolve("schoolsites.in");
        assert_eq!(decision.mode, RoutingMode::Marketing);
        assert!(decision.template_id.is_none());
        assert_eq!(resolver().resolve("localhost:3000").mode, RoutingMode::Marketing);
    }

    #[test]
    fn tenant_records_carry_template() {
        let decision = resolver().resolve("GreenValley.edu.in");
        assert_eq!(decision.mode, RoutingMode::Tenant);
        assert_eq!(decision.domain, "greenvalley.edu.in");
        assert_eq!(decision.template_id.as_deref(), Some("template_premium"));
    }

    #[test]
    fn www_prefix_is_ignored() {
        let resolver = resolver();
        for host in ["crescentthoothukujdi.in", "schoolsites.in", "nowhere.example", ""] {
            assert_eq!(resolver.resolve(&format!("www.{host}")), resolver.resolve(host));
        }
        assert_eq!(
            resolver.resolve("WWW.Crescentthoothukujdi.IN"),
            resolver.resolve("crescentthoothukujdi.in")
        );
    }

    #[test]
    fn www_registry_entries_match_both_host_forms() {
        let registry = DomainRegistry::new([DomainRecord::tenant("www.school.in", "template_modern")])
            .expect("registry builds");
        let resolver = DomainResolver::new(Arc::new(registry));
        for host in ["www.school.in", "school.in"] {
            let decision = resolver.resolve(host);
            assert_eq!(decision.mode, RoutingMode::Tenant, "{host}");
            assert_eq!(decision.template_id.as_deref(), Some("template_modern"));
        }
    }

    #[test]
    fn lookup_is_exact() {
        let resolver = resolver();
        for host in [
            "blog.crescentthoothukujdi.in",
            "crescentthoothukujdi.in.evil.test",
            "localhost",
            "localhost:3001",
        ] {
            let decision = resolver.resolve(host);
            assert_eq!(decision.mode, RoutingMode::Unknown, "{host}");
            assert!(decision.template_id.is_none());
        }
    }
}
