use crate::adapters::csv_reference::CsvReferenceSource;
use crate::adapters::mobidb::MobiDbClient;
use crate::adapters::rcsb::RcsbClient;
use crate::adapters::scoring::{PlaceholderScorer, RemoteScorer};
use crate::app::server::AppState;
use crate::config::service_config::{ReferenceSourceConfig, ScoringConfig, ServiceConfig};
use crate::core::catalog::BenchmarkCatalog;
use crate::core::validation::ValidationPipeline;
use crate::domain::ports::{ReferenceSource, ScoringProvider, SequenceSource};
use crate::utils::error::{EwclError, Result};
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

pub fn build_scorer(config: &ScoringConfig) -> Result<Arc<dyn ScoringProvider>> {
    match config.provider.as_str() {
        "placeholder" => Ok(Arc::new(PlaceholderScorer::new(config.seed))),
        "remote" => {
            let endpoint = validate_required_field("scoring.endpoint", &config.endpoint)?;
            Ok(Arc::new(RemoteScorer::new(
                endpoint.clone(),
                config.seed,
                config.fetch_settings(),
            )))
        }
        other => Err(EwclError::ConfigError {
            message: format!("Unknown scoring provider: {}", other),
        }),
    }
}

pub fn build_reference_source(
    config: &ServiceConfig,
) -> Result<Arc<dyn ReferenceSource>> {
    let reference: &ReferenceSourceConfig = &config.reference_source;
    match reference.r#type.as_str() {
        "mobidb" => Ok(Arc::new(MobiDbClient::new(
            config.reference_endpoint(),
            reference.http.fetch_settings(),
        ))),
        "csv" => {
            let directory =
                validate_required_field("reference_source.csv_directory", &reference.csv_directory)?;
            Ok(Arc::new(CsvReferenceSource::new(
                directory.as_str(),
                reference.csv_file_pattern.clone(),
            )))
        }
        other => Err(EwclError::ConfigError {
            message: format!("Unknown reference source type: {}", other),
        }),
    }
}

/// 啟動時組裝一次，之後在請求之間共享
#[derive(Clone)]
pub struct AppContext {
    pub pipeline: Arc<ValidationPipeline>,
    pub scorer: Arc<dyn ScoringProvider>,
    pub precision: u32,
}

impl AppContext {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let catalog = Arc::new(BenchmarkCatalog::from_file(&config.catalog.path)?);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: &ServiceConfig, catalog: Arc<BenchmarkCatalog>) -> Result<Self> {
        let sequences: Arc<dyn SequenceSource> = Arc::new(RcsbClient::new(
            config.sequence_endpoint(),
            config.sequence_source.fetch_settings(),
        ));
        let references = build_reference_source(config)?;
        let scorer = build_scorer(&config.scoring)?;

        let pipeline = ValidationPipeline::new(catalog, sequences, references, scorer.clone());

        Ok(Self {
            pipeline: Arc::new(pipeline),
            scorer,
            precision: config.scoring.precision,
        })
    }

    pub fn state(&self) -> AppState {
        AppState {
            pipeline: self.pipeline.clone(),
            scorer: self.scorer.clone(),
            precision: self.precision,
        }
    }
}
