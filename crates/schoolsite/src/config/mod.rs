use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

pub const DEFAULT_MARKETING_DOMAIN: &str = "schoolsites.in";
pub const DEFAULT_PREVIEW_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub tenant_api: TenantApiConfig,
    pub sites: SitesConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        // Absence is reported per fetch, not at startup.
        let base_url = non_empty_var("TENANT_API_BASE_URL");

        let marketing_domain = non_empty_var("APP_MARKETING_DOMAIN")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_MARKETING_DOMAIN.to_string());

        let preview_hosts = match non_empty_var("APP_PREVIEW_HOSTS") {
            Some(raw) => raw
                .split(',')
                .map(|host| host.trim().to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
            None => DEFAULT_PREVIEW_HOSTS
                .iter()
                .map(|host| host.to_string())
                .collect(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            tenant_api: TenantApiConfig { base_url },
            sites: SitesConfig {
                marketing_domain,
                preview_hosts,
                domain_registry_path: non_empty_var("APP_DOMAIN_REGISTRY").map(PathBuf::from),
                school_directory_path: non_empty_var("APP_SCHOOL_DIRECTORY").map(PathBuf::from),
                demo_fixture_path: non_empty_var("APP_DEMO_FIXTURE").map(PathBuf::from),
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the external tenant content API.
#[derive(Debug, Clone, Default)]
pub struct TenantApiConfig {
    pub base_url: Option<String>,
}

/// Host classification inputs and the optional data files loaded at startup.
#[derive(Debug, Clone)]
pub struct SitesConfig {
    pub marketing_domain: String,
    pub preview_hosts: Vec<String>,
    pub domain_registry_path: Option<PathBuf>,
    pub school_directory_path: Option<PathBuf>,
    pub demo_fixture_path: Option<PathBuf>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            marketing_domain: DEFAULT_MARKETING_DOMAIN.to_string(),
            preview_hosts: DEFAULT_PREVIEW_HOSTS
                .iter()
                .map(|host| host.to_string())
                .collect(),
            domain_registry_path: None,
            school_directory_path: None,
            demo_fixture_path: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "TENANT_API_BASE_URL",
            "APP_MARKETING_DOMAIN",
            "APP_PREVIEW_HOSTS",
            "APP_DOMAIN_REGISTRY",
            "APP_SCHOOL_DIRECTORY",
            "APP_DEMO_FIXTURE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.tenant_api.base_url.is_none());
        assert_eq!(config.sites.marketing_domain, DEFAULT_MARKETING_DOMAIN);
        assert_eq!(config.sites.preview_hosts, vec!["localhost", "127.0.0.1"]);
        assert!(config.sites.domain_registry_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn preview_hosts_and_api_base_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PREVIEW_HOSTS", " Staging.SchoolSites.in , ,localhost");
        env::set_var("TENANT_API_BASE_URL", "https://api.example.test/site");
        env::set_var("APP_MARKETING_DOMAIN", "Schools.Example");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.sites.preview_hosts,
            vec!["staging.schoolsites.in", "localhost"]
        );
        assert_eq!(
            config.tenant_api.base_url.as_deref(),
            Some("https://api.example.test/site")
        );
        assert_eq!(config.sites.marketing_domain, "schools.example");
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");
        let err = AppConfig::load().expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }
}
