use thiserror::Error;

#[derive(Error, Debug)]
pub enum EwclError {
    #[error("No benchmark found for PDB ID {pdb_id}")]
    BenchmarkNotFound { pdb_id: String },

    #[error("Could not fetch sequence for PDB ID {pdb_id}")]
    SequenceUnavailable { pdb_id: String, reason: String },

    #[error("Could not score sequence for PDB ID {pdb_id}")]
    ScoringUnavailable { pdb_id: String, reason: String },

    #[error("Could not fetch reference data for DisProt ID {disprot_id}")]
    ReferenceUnavailable { disprot_id: String, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream {url} responded with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Upstream,
    Configuration,
    Io,
    Data,
}

impl EwclError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EwclError::BenchmarkNotFound { .. } => ErrorCategory::NotFound,
            EwclError::SequenceUnavailable { .. }
            | EwclError::ScoringUnavailable { .. }
            | EwclError::ReferenceUnavailable { .. }
            | EwclError::ApiError(_)
            | EwclError::UpstreamStatus { .. } => ErrorCategory::Upstream,
            EwclError::MalformedResponse { .. }
            | EwclError::CsvError(_)
            | EwclError::SerializationError(_) => ErrorCategory::Data,
            EwclError::IoError(_) => ErrorCategory::Io,
            EwclError::ConfigError { .. }
            | EwclError::ConfigValidationError { .. }
            | EwclError::InvalidConfigValueError { .. }
            | EwclError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 上游失敗的原始原因，只用於日誌
    pub fn upstream_reason(&self) -> Option<&str> {
        match self {
            EwclError::SequenceUnavailable { reason, .. }
            | EwclError::ScoringUnavailable { reason, .. }
            | EwclError::ReferenceUnavailable { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotFound => "Run `ewcl-bench benchmarks` to list the known PDB IDs",
            ErrorCategory::Upstream => {
                "Check network access to the upstream service or raise timeout_seconds / retry_attempts"
            }
            ErrorCategory::Configuration => "Fix the configuration file and try again",
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::Data => "The input data is malformed; inspect the source file or response",
        }
    }
}

pub type Result<T> = std::result::Result<T, EwclError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_messages() {
        let err = EwclError::BenchmarkNotFound {
            pdb_id: "9zzz".to_string(),
        };
        assert_eq!(err.to_string(), "No benchmark found for PDB ID 9zzz");
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = EwclError::ReferenceUnavailable {
            disprot_id: "DP00070".to_string(),
            reason: "status 503".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not fetch reference data for DisProt ID DP00070"
        );
        assert_eq!(err.upstream_reason(), Some("status 503"));
    }
}
