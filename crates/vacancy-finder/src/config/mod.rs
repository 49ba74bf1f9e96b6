use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub storage: StorageConfig,
    pub source: SourceConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let store_path = env::var("VACANCY_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(StorageConfig::DEFAULT_PATH));

        let source = SourceConfig {
            base_url: env::var("HH_API_BASE_URL")
                .unwrap_or_else(|_| SourceConfig::DEFAULT_BASE_URL.to_string()),
            area: parse_var("HH_AREA", SourceConfig::DEFAULT_AREA)?,
            user_agent: env::var("HH_USER_AGENT")
                .unwrap_or_else(|_| SourceConfig::DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(parse_var(
                "HH_TIMEOUT_SECS",
                SourceConfig::DEFAULT_TIMEOUT_SECS,
            )?),
            per_page: parse_var("HH_PER_PAGE", SourceConfig::DEFAULT_PER_PAGE)?,
            pages: parse_var("HH_PAGES", SourceConfig::DEFAULT_PAGES)?,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { path: store_path },
            source,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Location of the JSON vacancy store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl StorageConfig {
    pub const DEFAULT_PATH: &'static str = "vacancies.json";
}

/// Settings for the hh.ru listing client.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub area: u32,
    pub user_agent: String,
    pub timeout: Duration,
    pub per_page: u32,
    pub pages: u32,
}

impl SourceConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.hh.ru";
    /// Region code for Russia.
    pub const DEFAULT_AREA: u32 = 113;
    pub const DEFAULT_USER_AGENT: &'static str = "hh-python-client/1.0";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_PER_PAGE: u32 = 20;
    pub const DEFAULT_PAGES: u32 = 1;
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            area: Self::DEFAULT_AREA,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            per_page: Self::DEFAULT_PER_PAGE,
            pages: Self::DEFAULT_PAGES,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
