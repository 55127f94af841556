//! Benchmark validation: score a catalogued structure and compare it with
//! its reference disorder profile.
//!
//! Sequence fetch + scoring and the reference fetch have no data dependency
//! and run concurrently. Failures are reported in step order.

use crate::core::align::{align, length_mismatch};
use crate::core::catalog::BenchmarkCatalog;
use crate::core::stats::{pearson, rmse};
use crate::domain::model::{BenchmarkRecord, ValidationResult};
use crate::domain::ports::{ReferenceSource, ScoringProvider, SequenceSource};
use crate::utils::error::{EwclError, Result};
use std::sync::Arc;

pub struct ValidationPipeline {
    catalog: Arc<BenchmarkCatalog>,
    sequences: Arc<dyn SequenceSource>,
    references: Arc<dyn ReferenceSource>,
    scorer: Arc<dyn ScoringProvider>,
}

impl ValidationPipeline {
    pub fn new(
        catalog: Arc<BenchmarkCatalog>,
        sequences: Arc<dyn SequenceSource>,
        references: Arc<dyn ReferenceSource>,
        scorer: Arc<dyn ScoringProvider>,
    ) -> Self {
        Self {
            catalog,
            sequences,
            references,
            scorer,
        }
    }

    pub fn catalog(&self) -> &BenchmarkCatalog {
        &self.catalog
    }

    pub async fn validate(&self, pdb_id: &str) -> Result<ValidationResult> {
        let result = self.run(pdb_id).await;

        if let Err(e) = &result {
            match e.upstream_reason() {
                Some(reason) => tracing::warn!("⚠️ {}: {}", e, reason),
                None => tracing::warn!("⚠️ {}", e),
            }
        }

        result
    }

    async fn run(&self, pdb_id: &str) -> Result<ValidationResult> {
        let record = self
            .catalog
            .lookup(pdb_id)
            .ok_or_else(|| EwclError::BenchmarkNotFound {
                pdb_id: pdb_id.to_string(),
            })?;

        tracing::info!(
            "🔬 Validating {} ({}) against {} using {} scorer via {}",
            pdb_id,
            record.name,
            record.disprot,
            self.scorer.name(),
            self.references.describe()
        );

        let (scored, reference) = tokio::join!(
            self.score_entry(pdb_id),
            self.fetch_reference(record)
        );
        let scored = scored?;
        let reference = reference?;

        if let Some(mismatch) = length_mismatch(&scored, &reference) {
            tracing::warn!(
                "✂️ {}: {} scores vs {} reference values, comparing first {} and dropping {}",
                pdb_id,
                mismatch.left_len,
                mismatch.right_len,
                mismatch.common_len(),
                mismatch.dropped()
            );
        }

        let (our, reference) = align(&scored, &reference);
        let r = pearson(our, reference);
        let error = rmse(our, reference);

        tracing::info!(
            "✅ {}: r = {:.4}, rmse = {:.4} over {} residues",
            pdb_id,
            r,
            error,
            our.len()
        );

        Ok(ValidationResult {
            pdb_id: pdb_id.to_string(),
            disprot_id: record.disprot.clone(),
            name: record.name.clone(),
            r,
            rmse: error,
            our: our.to_vec(),
            reference: reference.to_vec(),
        })
    }

    async fn score_entry(&self, pdb_id: &str) -> Result<Vec<f64>> {
        let sequence = match self.sequences.try_fetch(pdb_id).await {
            Ok(sequence) if !sequence.is_empty() => sequence,
            Ok(_) => {
                return Err(EwclError::SequenceUnavailable {
                    pdb_id: pdb_id.to_string(),
                    reason: "empty sequence".to_string(),
                })
            }
            Err(e) => {
                return Err(EwclError::SequenceUnavailable {
                    pdb_id: pdb_id.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        self.scorer
            .score(&sequence)
            .await
            .map_err(|e| EwclError::ScoringUnavailable {
                pdb_id: pdb_id.to_string(),
                reason: e.to_string(),
            })
    }

    async fn fetch_reference(&self, record: &BenchmarkRecord) -> Result<Vec<f64>> {
        let disprot_id = record.disprot.as_str();
        match self.references.try_fetch_for(record).await {
            Ok(values) if !values.is_empty() => Ok(values),
            Ok(_) => Err(EwclError::ReferenceUnavailable {
                disprot_id: disprot_id.to_string(),
                reason: "no disorder values".to_string(),
            }),
            Err(e) => Err(EwclError::ReferenceUnavailable {
                disprot_id: disprot_id.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
