use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log level/filter '{}'", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "unable to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig, environment: AppEnvironment) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.log_level)?,
    };

    let format = LogFormat::for_environment(environment);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(format.target)
        .compact()
        .with_ansi(format.ansi)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// Output switches for the fmt layer. Logs are plain text in every environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogFormat {
    target: bool,
    ansi: bool,
}

impl LogFormat {
    fn for_environment(environment: AppEnvironment) -> Self {
        Self {
            target: environment != AppEnvironment::Production,
            ansi: false,
        }
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|source| TelemetryError::EnvFilter {
        value: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let err = build_filter("schoolsite=[").expect_err("filter must not parse");
        assert!(err.to_string().contains("schoolsite=["));
    }

    #[test]
    fn log_output_never_uses_ansi() {
        for environment in [
            AppEnvironment::Development,
            AppEnvironment::Test,
            AppEnvironment::Production,
        ] {
            assert!(!LogFormat::for_environment(environment).ansi, "{environment:?}");
        }
        assert!(!LogFormat::for_environment(AppEnvironment::Production).target);
        assert!(LogFormat::for_environment(AppEnvironment::Development).target);
    }

    #[test]
    fn accepts_directive_lists() {
        assert!(build_filter("info,schoolsite::tenant=debug").is_ok());
    }
}
