use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::resolver::normalize_hostname;
use super::{read_json_file, RegistryError};
use crate::config::SitesConfig;

/// A school registered locally but not (yet) in the domain registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub domain: String,
    pub template_id: String,
    #[serde(default)]
    pub school_name: String,
}

/// Secondary lookup consulted for hosts the domain registry does not know.
#[derive(Debug, Clone, Default)]
pub struct SchoolDirectory {
    entries: HashMap<String, DirectoryEntry>,
}

impl SchoolDirectory {
    pub fn new<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = DirectoryEntry>,
    {
        let mut table = HashMap::new();
        for mut entry in entries {
            entry.domain = normalize_hostname(&entry.domain);
            if entry.domain.is_empty() {
                return Err(RegistryError::EmptyDomain);
            }
            if entry.template_id.trim().is_empty() {
                return Err(RegistryError::MissingTemplate {
                    domain: entry.domain,
                });
            }
            table.entry(entry.domain.clone()).or_insert(entry);
        }
        Ok(Self { entries: table })
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let entries: Vec<DirectoryEntry> = read_json_file(path)?;
        Self::new(entries)
    }

    pub fn load(config: &SitesConfig) -> Result<Self, RegistryError> {
        match &config.school_directory_path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn lookup(&self, host: &str) -> Option<&DirectoryEntry> {
        self.entries.get(&normalize_hostname(host))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_exact_host_only() {
        let directory = SchoolDirectory::new([DirectoryEntry {
            domain: "St-Marys.School".to_string(),
            template_id: "template_modern".to_string(),
            school_name: "St. Mary's".to_string(),
        }])
        .expect("directory builds");

        assert_eq!(
            directory
                .lookup("www.st-marys.school")
                .map(|entry| entry.template_id.as_str()),
            Some("template_modern")
        );
        assert!(directory.lookup("portal.st-marys.school").is_none());
        assert!(directory.lookup("st-marys.school:8080").is_none());
    }

    #[test]
    fn default_directory_is_empty() {
        let directory = SchoolDirectory::load(&SitesConfig::default()).expect("loads");
        assert!(directory.is_empty());
    }
}
