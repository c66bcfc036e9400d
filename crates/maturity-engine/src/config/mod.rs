use crate::assessment::gaps::DEFAULT_GAP_THRESHOLD;
use crate::assessment::responses::Score;
use std::collections::BTreeMap;
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

/// Top-level configuration for the assessment service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentConfig,
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
        let log_format = env::var("APP_LOG_FORMAT")
            .map(|value| LogFormat::from_str(&value))
            .unwrap_or(LogFormat::Compact);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            assessment: AssessmentConfig::from_env()?,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Prefix of the per-catalog benchmark overrides, e.g. `ASSESSMENT_BENCHMARK_CONTROL_TOWER=61.5`.
pub const BENCHMARK_ENV_PREFIX: &str = "ASSESSMENT_BENCHMARK_";

/// Engine knobs: the gap threshold, an optional extra catalog definition and benchmark overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentConfig {
    pub gap_threshold: u8,
    pub catalog_path: Option<PathBuf>,
    /// Benchmark averages keyed by catalog key (`control-tower`), applied over built-in values.
    pub benchmarks: BTreeMap<String, f64>,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            catalog_path: None,
            benchmarks: BTreeMap::new(),
        }
    }
}

impl AssessmentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let gap_threshold = match env::var("ASSESSMENT_GAP_THRESHOLD") {
            Ok(raw) => parse_gap_threshold(&raw)?,
            Err(_) => DEFAULT_GAP_THRESHOLD,
        };

        let catalog_path = env::var("ASSESSMENT_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let mut benchmarks = BTreeMap::new();
        let variables = env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        });
        for (variable, raw) in variables {
            if let Some(suffix) = variable.strip_prefix(BENCHMARK_ENV_PREFIX) {
                let average = parse_benchmark(&variable, &raw)?;
                benchmarks.insert(suffix.to_ascii_lowercase().replace('_', "-"), average);
            }
        }

        Ok(Self {
            gap_threshold,
            catalog_path,
            benchmarks,
        })
    }
}

fn parse_benchmark(variable: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (0.0..=100.0).contains(value))
        .ok_or_else(|| ConfigError::InvalidBenchmark {
            variable: variable.to_string(),
            value: raw.trim().to_string(),
        })
}

/// Parses a gap threshold, which must itself be a valid response score.
pub fn parse_gap_threshold(raw: &str) -> Result<u8, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| Score::try_from(value).ok())
        .map(Score::value)
        .ok_or_else(|| ConfigError::InvalidGapThreshold(raw.trim().to_string()))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidGapThreshold(String),
    InvalidBenchmark { variable: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidGapThreshold(value) => write!(
                f,
                "ASSESSMENT_GAP_THRESHOLD must be an integer between {} and {} (got '{}')",
                Score::MIN,
                Score::MAX,
                value
            ),
            ConfigError::InvalidBenchmark { variable, value } => write!(
                f,
                "{} must be a percentage between 0 and 100 (got '{}')",
                variable, value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidGapThreshold(_)
            | ConfigError::InvalidBenchmark { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
