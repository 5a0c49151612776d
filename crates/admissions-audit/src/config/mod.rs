use crate::admissions::{ScoringPolicy, SelectionMode, DEFAULT_TOP_K};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

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
    pub audit: AuditConfig,
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

        let input_path = env::var("ADMISSIONS_INPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("applicants.csv"));
        let output_path = env::var("ADMISSIONS_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("results.csv"));

        let top_k = env::var("ADMISSIONS_TOP_K")
            .ok()
            .map(|raw| parse_top_k(&raw))
            .transpose()?;
        let cutoff = env::var("ADMISSIONS_CUTOFF")
            .ok()
            .map(|raw| parse_cutoff(&raw))
            .transpose()?;

        let scoring = match env::var("ADMISSIONS_POLICY_FILE") {
            Ok(path) => load_scoring_policy(path)?,
            Err(_) => ScoringPolicy::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            audit: AuditConfig {
                input_path,
                output_path,
                selection: SelectionMode::resolve(top_k, cutoff, DEFAULT_TOP_K),
                scoring,
            },
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

/// Inputs for a batch admissions run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub selection: SelectionMode,
    pub scoring: ScoringPolicy,
}

/// Negative values are rejected rather than read as "admit none".
pub fn parse_top_k(raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidTopK {
            value: raw.to_string(),
        })
}

pub fn parse_cutoff(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(cutoff) if cutoff.is_finite() => Ok(cutoff),
        _ => Err(ConfigError::InvalidCutoff {
            value: raw.to_string(),
        }),
    }
}

/// Reads a JSON weighting policy; omitted fields keep their defaults.
pub fn load_scoring_policy<P: AsRef<Path>>(path: P) -> Result<ScoringPolicy, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PolicyRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::PolicyParse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopK { value: String },
    InvalidCutoff { value: String },
    PolicyRead { path: PathBuf, source: std::io::Error },
    PolicyParse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopK { value } => {
                write!(f, "top-k must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidCutoff { value } => {
                write!(f, "cutoff must be a finite number, got '{value}'")
            }
            ConfigError::PolicyRead { path, .. } => {
                write!(f, "unable to read scoring policy {}", path.display())
            }
            ConfigError::PolicyParse { path, .. } => {
                write!(f, "scoring policy {} is not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidTopK { .. }
            | ConfigError::InvalidCutoff { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PolicyRead { source, .. } => Some(source),
            ConfigError::PolicyParse { source, .. } => Some(source),
        }
    }
}
