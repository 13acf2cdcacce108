use crate::config::SitesConfig;

/// Canonical host form used for classification: trimmed, lower-cased, port
/// removed, one leading `www.` removed.
pub fn normalize_host(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    let without_port = strip_port(&lowered);
    without_port
        .strip_prefix("www.")
        .unwrap_or(without_port)
        .to_string()
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // Bracketed IPv6 literal, keep the brackets.
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Single source of truth for which hosts are reserved for the platform itself
/// and which may reach the template preview routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPolicy {
    marketing_domain: String,
    preview_hosts: Vec<String>,
}

impl HostPolicy {
    pub fn new<I, S>(marketing_domain: &str, preview_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            marketing_domain: normalize_host(marketing_domain),
            preview_hosts: preview_hosts
                .into_iter()
                .map(|host| normalize_host(host.as_ref()))
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &SitesConfig) -> Self {
        Self::new(&config.marketing_domain, &config.preview_hosts)
    }

    /// Hosts that never belong to a tenant and must not reach the tenant API.
    pub fn is_reserved(&self, host: &str) -> bool {
        let host = normalize_host(host);
        host == "localhost" || host == self.marketing_domain
    }

    /// Whether the template preview routes may be served for this host.
    pub fn allows_preview(&self, host: &str) -> bool {
        let host = normalize_host(host);
        self.preview_hosts.iter().any(|allowed| *allowed == host)
    }
}
