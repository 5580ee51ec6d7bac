use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::client::{is_dns_label, ClientConfig};

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

/// Tenant credentials for the HiringThing API. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub subdomain: String,
    pub api_key: String,
    pub api_password: String,
}

impl Credentials {
    pub fn new(
        subdomain: impl Into<String>,
        api_key: impl Into<String>,
        api_password: impl Into<String>,
    ) -> Self {
        Self {
            subdomain: subdomain.into(),
            api_key: api_key.into(),
            api_password: api_password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("subdomain", &self.subdomain)
            .field("api_key", &"<redacted>")
            .field("api_password", &"<redacted>")
            .finish()
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub hiringthing: HiringThingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            hiringthing: HiringThingConfig::from_env()?,
        })
    }
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

/// Remote API access settings.
#[derive(Debug, Clone)]
pub struct HiringThingConfig {
    pub credentials: Credentials,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl HiringThingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let credentials = Credentials::new(
            required_var("HIRINGTHING_SUBDOMAIN")?,
            required_var("HIRINGTHING_API_KEY")?,
            required_var("HIRINGTHING_API_PASSWORD")?,
        );

        let base_url = optional_var("HIRINGTHING_BASE_URL");
        match &base_url {
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                return Err(ConfigError::InvalidBaseUrl { value: url.clone() });
            }
            None if !is_dns_label(&credentials.subdomain) => {
                return Err(ConfigError::InvalidSubdomain {
                    value: credentials.subdomain.clone(),
                });
            }
            _ => {}
        }

        let timeout = match optional_var("HIRINGTHING_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout { value: raw }),
            },
            None => None,
        };

        Ok(Self {
            credentials,
            base_url,
            timeout,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            credentials: self.credentials.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::MissingVar { name })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar { name: &'static str },
    InvalidBaseUrl { value: String },
    InvalidSubdomain { value: String },
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar { name } => write!(f, "{name} must be set"),
            ConfigError::InvalidBaseUrl { value } => {
                write!(f, "HIRINGTHING_BASE_URL must be an http(s) url, got '{value}'")
            }
            ConfigError::InvalidSubdomain { value } => write!(
                f,
                "HIRINGTHING_SUBDOMAIN must be a single DNS label, got '{value}'"
            ),
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "HIRINGTHING_TIMEOUT_SECS must be a positive integer, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingVar { .. }
            | ConfigError::InvalidBaseUrl { .. }
            | ConfigError::InvalidSubdomain { .. }
            | ConfigError::InvalidTimeout { .. } => None,
        }
    }
}
