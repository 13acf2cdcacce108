//! Host classification and the registries that map hostnames to sites.

pub mod directory;
pub mod hosts;
pub mod registry;
pub mod resolver;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub use directory::{DirectoryEntry, SchoolDirectory};
pub use hosts::{normalize_host, HostPolicy};
pub use registry::{DomainRecord, DomainRegistry, SiteKind};
pub use resolver::{normalize_hostname, resolve_domain, DomainResolver, RoutingDecision, RoutingMode};

/// Failure to load one of the startup site tables.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid site table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("site entry has an empty domain")]
    EmptyDomain,
    #[error("tenant domain '{domain}' has no template id")]
    MissingTemplate { domain: String },
}

fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, RegistryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
