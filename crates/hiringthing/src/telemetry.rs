use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const RUST_LOG: &str = "RUST_LOG";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directives}' from {origin}")]
    InvalidFilter {
        origin: &'static str,
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs a compact stderr subscriber so stdout stays free for command output.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(RUST_LOG)
        .ok()
        .filter(|value| !value.trim().is_empty());
    let filter = log_filter(config, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// `RUST_LOG` overrides `APP_LOG_LEVEL`; a malformed value is reported rather than ignored.
fn log_filter(
    config: &TelemetryConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    let (origin, directives) = match rust_log {
        Some(value) => (RUST_LOG, value),
        None => ("APP_LOG_LEVEL", config.log_level.as_str()),
    };

    EnvFilter::try_new(directives).map_err(|source| TelemetryError::InvalidFilter {
        origin,
        directives: directives.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: log_level.to_string(),
        }
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        assert!(log_filter(&config("info,hiringthing=debug"), None).is_ok());

        let err = log_filter(&config("hiringthing=loud"), None).expect_err("invalid level");
        assert!(matches!(
            err,
            TelemetryError::InvalidFilter {
                origin: "APP_LOG_LEVEL",
                ..
            }
        ));
        assert!(err.to_string().contains("hiringthing=loud"));
    }

    #[test]
    fn rust_log_takes_precedence() {
        assert!(log_filter(&config("hiringthing=loud"), Some("warn")).is_ok());

        let err = log_filter(&config("info"), Some("hiringthing=loud")).expect_err("bad override");
        assert!(err.to_string().contains("from RUST_LOG"));
    }
}
