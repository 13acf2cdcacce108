use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::resolver::normalize_hostname;
use super::{read_json_file, RegistryError};
use crate::config::SitesConfig;

/// Whether a registered hostname serves the platform's own site or a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    Owner,
    Tenant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    pub template_id: String,
    #[serde(rename = "type")]
    pub kind: SiteKind,
}

impl DomainRecord {
    pub fn owner(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            template_id: "marketing".to_string(),
            kind: SiteKind::Owner,
        }
    }

    pub fn tenant(domain: &str, template_id: &str) -> Self {
        Self {
            domain: domain.to_string(),
            template_id: template_id.to_string(),
            kind: SiteKind::Tenant,
        }
    }
}

/// Read-only hostname table, keyed by exact lower-case host (port included).
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    records: HashMap<String, DomainRecord>,
}

impl DomainRegistry {
    /// Builds the table. When a domain repeats, the first record is kept.
    pub fn new<I>(records: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = DomainRecord>,
    {
        let mut table = HashMap::new();
        for mut record in records {
            record.domain = normalize_hostname(&record.domain);
            if record.domain.is_empty() {
                return Err(RegistryError::EmptyDomain);
            }
            if record.kind == SiteKind::Tenant && record.template_id.trim().is_empty() {
                return Err(RegistryError::MissingTemplate {
                    domain: record.domain,
                });
            }
            if table.contains_key(&record.domain) {
                warn!(domain = %record.domain, "duplicate domain in site registry ignored");
                continue;
            }
            table.insert(record.domain.clone(), record);
        }
        Ok(Self { records: table })
    }

    /// Hostnames known to every deployment.
    pub fn builtin(marketing_domain: &str) -> Self {
        let records = [
            DomainRecord::owner(marketing_domain),
            DomainRecord::owner("localhost:3000"),
            DomainRecord::owner("127.0.0.1:3000"),
            DomainRecord::tenant("crescentthoothukujdi.in", "template_classic"),
        ];
        let table = records
            .into_iter()
            .map(|mut record| {
                record.domain = normalize_hostname(&record.domain);
                (record.domain.clone(), record)
            })
            .collect();
        Self { records: table }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RegistryError> {
        let records: Vec<DomainRecord> = serde_json::from_str(raw)?;
        Self::new(records)
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let records: Vec<DomainRecord> = read_json_file(path)?;
        Self::new(records)
    }

    /// Uses the configured registry file, falling back to the built-in table.
    pub fn load(config: &SitesConfig) -> Result<Self, RegistryError> {
        match &config.domain_registry_path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::builtin(&config.marketing_domain)),
        }
    }

    pub fn get(&self, host: &str) -> Option<&DomainRecord> {
        self.records.get(host)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registers_marketing_and_demo_tenant() {
        let registry = DomainRegistry::builtin("SchoolSites.in");
        assert_eq!(
            registry.get("schoolsites.in").map(|record| record.kind),
            Some(SiteKind::Owner)
        );
        let tenant = registry
            .get("crescentthoothukujdi.in")
            .expect("demo tenant registered");
        assert_eq!(tenant.template_id, "template_classic");
        assert_eq!(tenant.kind, SiteKind::Tenant);
    }

    #[test]
    fn parses_json_records_and_keeps_first_duplicate() {
        let registry = DomainRegistry::from_json_str(
            r#"[
                {"domain": "Alpha.School", "template_id": "template_modern", "type": "tenant"},
                {"domain": "alpha.school", "template_id": "template_premium", "type": "tenant"},
                {"domain": "platform.test", "template_id": "", "type": "owner"}
            ]"#,
        )
        .expect("registry parses");

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("alpha.school").map(|r| r.template_id.as_str()),
            Some("template_modern")
        );
        assert_eq!(
            registry.get("platform.test").map(|r| r.kind),
            Some(SiteKind::Owner)
        );
    }

    #[test]
    fn tenant_without_template_is_rejected() {
        let err = DomainRegistry::new([DomainRecord::tenant("beta.school", " ")])
            .expect_err("template id required");
        assert!(matches!(err, RegistryError::MissingTemplate { .. }));
    }

    #[test]
    fn www_records_are_stored_under_the_bare_host() {
        let registry = DomainRegistry::new([DomainRecord::tenant(" WWW.School.in ", "template_modern")])
            .expect("registry builds");
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("school.in").map(|record| record.template_id.as_str()),
            Some("template_modern")
        );
        assert!(registry.get("www.school.in").is_none());
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = DomainRegistry::from_json_str(
            r#"[{"domain": "x.school", "template_id": "t", "type": "partner"}]"#,
        )
        .expect_err("closed set of kinds");
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
