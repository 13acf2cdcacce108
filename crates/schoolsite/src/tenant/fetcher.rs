use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::rows::RowSet;
use crate::config::TenantApiConfig;
use crate::sites::HostPolicy;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No content has been configured for this site yet.";
const UNKNOWN_NETWORK_ERROR: &str = "unknown network error";

/// Why a tenant fetch produced no data. An empty payload is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("tenant API base URL is not configured")]
    Configuration,
    #[error("refusing to fetch tenant data for non-tenant host '{domain}'")]
    GuardViolation { domain: String },
    #[error("tenant API responded with HTTP {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("{0}")]
    Transport(String),
    #[error("malformed tenant payload: {0}")]
    Payload(String),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport(UNKNOWN_NETWORK_ERROR.to_string())
        } else {
            Self::Transport(message)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TenantFetchResult {
    Success { data: RowSet },
    Empty { message: String },
    Error { error: FetchError },
}

impl TenantFetchResult {
    pub fn status_label(&self) -> &'static str {
        match self {
            TenantFetchResult::Success { .. } => "success",
            TenantFetchResult::Empty { .. } => "empty",
            TenantFetchResult::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TenantApiEnvelope {
    #[serde(default)]
    status_code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<Map<String, Value>>>,
}

/// Client for the external tenant content API. Every call goes to the network.
#[derive(Debug, Clone)]
pub struct TenantFetcher {
    client: reqwest::Client,
    base_url: Option<String>,
    hosts: HostPolicy,
}

impl TenantFetcher {
    pub fn new(client: reqwest::Client, config: &TenantApiConfig, hosts: HostPolicy) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            hosts,
        }
    }

    pub async fn fetch_tenant_data(&self, domain: &str, template_id: &str) -> TenantFetchResult {
        let Some(base_url) = self.base_url.as_deref() else {
            warn!(domain, "tenant fetch skipped: TENANT_API_BASE_URL is not set");
            return TenantFetchResult::Error {
                error: FetchError::Configuration,
            };
        };

        if self.hosts.is_reserved(domain) {
            warn!(domain, "tenant fetch refused for reserved host");
            return TenantFetchResult::Error {
                error: FetchError::GuardViolation {
                    domain: domain.to_string(),
                },
            };
        }

        let result = match self.request(base_url, domain, template_id).await {
            Ok(result) => result,
            Err(error) => TenantFetchResult::Error { error },
        };

        match &result {
            TenantFetchResult::Error { error } => {
                warn!(domain, template_id, %error, "tenant fetch failed");
            }
            other => {
                info!(domain, template_id, outcome = other.status_label(), "tenant fetch completed");
            }
        }
        result
    }

    async fn request(
        &self,
        base_url: &str,
        domain: &str,
        template_id: &str,
    ) -> Result<TenantFetchResult, FetchError> {
        let response = self
            .client
            .get(base_url)
            .query(&[("domain", domain), ("template", template_id)])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let envelope: TenantApiEnvelope = response
            .json()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;

        let groups = envelope.data.unwrap_or_default();
        if groups.is_empty() {
            let message = envelope
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string());
            tracing::debug!(domain, status_code = ?envelope.status_code, "tenant payload empty");
            return Ok(TenantFetchResult::Empty { message });
        }

        let rows =
            RowSet::from_groups(groups).map_err(|err| FetchError::Payload(err.to_string()))?;
        Ok(TenantFetchResult::Success { data: rows })
    }
}
