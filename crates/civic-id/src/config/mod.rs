use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::documents::EXPIRING_SOON_WINDOW_DAYS;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub wallet: WalletConfig,
    pub listing: ListingConfig,
    pub seed_dir: Option<PathBuf>,
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

        let window = positive_var("APP_EXPIRING_SOON_DAYS", EXPIRING_SOON_WINDOW_DAYS as usize)?;
        let expiring_soon_days =
            i64::try_from(window).map_err(|_| ConfigError::InvalidPositive {
                name: "APP_EXPIRING_SOON_DAYS",
                value: window.to_string(),
            })?;
        let default_page_size = positive_var("APP_PAGE_SIZE", 10)?;
        let max_page_size = positive_var("APP_MAX_PAGE_SIZE", 100)?;
        if default_page_size > max_page_size {
            return Err(ConfigError::PageSizeExceedsMax {
                default_page_size,
                max_page_size,
            });
        }

        let seed_dir = env::var("APP_SEED_DIR")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            wallet: WalletConfig { expiring_soon_days },
            listing: ListingConfig {
                default_page_size,
                max_page_size,
            },
            seed_dir,
        })
    }
}

fn positive_var(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ConfigError::InvalidPositive { name, value: raw }),
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

/// Document status derivation dials.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub expiring_soon_days: i64,
}

/// Page size bounds for listing endpoints.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPositive { name: &'static str, value: String },
    PageSizeExceedsMax {
        default_page_size: usize,
        max_page_size: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPositive { name, value } => {
                write!(f, "{name} must be a positive integer (found '{value}')")
            }
            ConfigError::PageSizeExceedsMax {
                default_page_size,
                max_page_size,
            } => write!(
                f,
                "APP_PAGE_SIZE ({default_page_size}) exceeds APP_MAX_PAGE_SIZE ({max_page_size})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPositive { .. }
            | ConfigError::PageSizeExceedsMax { .. } => None,
        }
    }
}
