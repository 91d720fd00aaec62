use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub policy: PolicyConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("LMS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("LMS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("LMS_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("LMS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let geofence_radius_m = env::var("LMS_GEOFENCE_RADIUS_M")
            .unwrap_or_else(|_| PolicyConfig::DEFAULT_GEOFENCE_RADIUS_M.to_string())
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidGeofenceRadius)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy: PolicyConfig { geofence_radius_m },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Submission-policy dials surfaced through the environment.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub geofence_radius_m: f64,
}

impl PolicyConfig {
    pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 25.0;
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidGeofenceRadius,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "LMS_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "LMS_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidGeofenceRadius => {
                write!(f, "LMS_GEOFENCE_RADIUS_M must be a number of meters")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidGeofenceRadius => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
