use crate::adapters::http::FetchSettings;
use crate::adapters::mobidb::DEFAULT_REFERENCE_ENDPOINT;
use crate::adapters::rcsb::DEFAULT_SEQUENCE_ENDPOINT;
use crate::adapters::scoring::DEFAULT_SEED;
use crate::domain::model::Thresholds;
use crate::utils::error::{EwclError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_endpoint_template, validate_path, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub sequence_source: HttpSourceConfig,
    pub reference_source: ReferenceSourceConfig,
    pub scoring: ScoringConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "data/benchmarks.json".to_string(),
        }
    }
}

/// 上游 HTTP 來源的共用設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl HttpSourceConfig {
    pub fn endpoint_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.endpoint.as_deref().unwrap_or(default)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Some(Duration::from_secs(
                self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            )),
            retry_attempts: self.retry_attempts.unwrap_or(0),
            retry_delay: Duration::from_secs(self.retry_delay_seconds.unwrap_or(1)),
            headers: self.headers.clone().unwrap_or_default(),
        }
    }

    fn validate_as(&self, section: &str, default_endpoint: &str, placeholder: &str) -> Result<()> {
        validate_endpoint_template(
            &format!("{}.endpoint", section),
            self.endpoint_or(default_endpoint),
            placeholder,
        )?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number(&format!("{}.timeout_seconds", section), timeout, 1)?;
        }
        if let Some(retries) = self.retry_attempts {
            validate_range(&format!("{}.retry_attempts", section), retries, 0, 10)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSourceConfig {
    /// "mobidb" 或 "csv"
    pub r#type: String,
    #[serde(flatten)]
    pub http: HttpSourceConfig,
    pub csv_directory: Option<String>,
    pub csv_file_pattern: Option<String>,
}

impl Default for ReferenceSourceConfig {
    fn default() -> Self {
        Self {
            r#type: "mobidb".to_string(),
            http: HttpSourceConfig::default(),
            csv_directory: None,
            csv_file_pattern: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// "placeholder" 或 "remote"
    pub provider: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub seed: u64,
    pub precision: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            provider: "placeholder".to_string(),
            endpoint: None,
            timeout_seconds: None,
            seed: DEFAULT_SEED,
            precision: 4,
        }
    }
}

impl ScoringConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Some(Duration::from_secs(
                self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            )),
            ..FetchSettings::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_pearson: f64,
    pub max_rmse: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            min_pearson: thresholds.min_pearson,
            max_rmse: thresholds.max_rmse,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EwclError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EwclError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RCSB_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EwclError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| EwclError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                reason: format!("Cannot build socket address: {}", e),
            })
    }

    pub fn sequence_endpoint(&self) -> &str {
        self.sequence_source.endpoint_or(DEFAULT_SEQUENCE_ENDPOINT)
    }

    pub fn reference_endpoint(&self) -> &str {
        self.reference_source.http.endpoint_or(DEFAULT_REFERENCE_ENDPOINT)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_pearson: self.validation.min_pearson,
            max_rmse: self.validation.max_rmse,
        }
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.logging.format).unwrap_or_default()
    }

    pub fn validate_config(&self) -> Result<()> {
        self.socket_addr()?;
        validate_path("catalog.path", &self.catalog.path)?;

        self.sequence_source
            .validate_as("sequence_source", DEFAULT_SEQUENCE_ENDPOINT, "pdb_id")?;

        match self.reference_source.r#type.as_str() {
            "mobidb" => self.reference_source.http.validate_as(
                "reference_source",
                DEFAULT_REFERENCE_ENDPOINT,
                "disprot_id",
            )?,
            "csv" => {
                let directory = validate_required_field(
                    "reference_source.csv_directory",
                    &self.reference_source.csv_directory,
                )?;
                validate_path("reference_source.csv_directory", directory)?;
            }
            other => {
                return Err(EwclError::InvalidConfigValueError {
                    field: "reference_source.type".to_string(),
                    value: other.to_string(),
                    reason: "Supported types: mobidb, csv".to_string(),
                })
            }
        }

        match self.scoring.provider.as_str() {
            "placeholder" => {}
            "remote" => {
                let endpoint =
                    validate_required_field("scoring.endpoint", &self.scoring.endpoint)?;
                validate_url("scoring.endpoint", endpoint)?;
            }
            other => {
                return Err(EwclError::InvalidConfigValueError {
                    field: "scoring.provider".to_string(),
                    value: other.to_string(),
                    reason: "Supported providers: placeholder, remote".to_string(),
                })
            }
        }
        validate_range("scoring.precision", self.scoring.precision, 0, 12)?;

        validate_range("validation.min_pearson", self.validation.min_pearson, -1.0, 1.0)?;
        validate_range("validation.max_rmse", self.validation.max_rmse, 0.0, 1.0)?;

        if LogFormat::parse(&self.logging.format).is_none() {
            return Err(EwclError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: "Supported formats: compact, json".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
