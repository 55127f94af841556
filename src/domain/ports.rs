use crate::domain::model::BenchmarkRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 結構資料庫：依 PDB ID 取得一級序列
#[async_trait]
pub trait SequenceSource: Send + Sync {
    async fn try_fetch(&self, pdb_id: &str) -> Result<String>;

    /// Best-effort variant: any failure becomes an empty sequence.
    async fn fetch(&self, pdb_id: &str) -> String {
        match self.try_fetch(pdb_id).await {
            Ok(sequence) => sequence,
            Err(e) => {
                tracing::warn!("Error fetching sequence for {}: {}", pdb_id, e);
                String::new()
            }
        }
    }
}

/// 參考無序度來源：依 accession ID 取得按殘基排序的數值
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn try_fetch(&self, accession_id: &str) -> Result<Vec<f64>>;

    async fn fetch(&self, accession_id: &str) -> Vec<f64> {
        match self.try_fetch(accession_id).await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Error fetching disorder data for {}: {}", accession_id, e);
                Vec::new()
            }
        }
    }

    /// Fetches the profile for a catalogued benchmark. Defaults to the
    /// DisProt accession; sources keyed by PDB ID override it.
    async fn try_fetch_for(&self, record: &BenchmarkRecord) -> Result<Vec<f64>> {
        self.try_fetch(&record.disprot).await
    }

    fn describe(&self) -> &str;
}

#[async_trait]
pub trait ScoringProvider: Send + Sync {
    /// One score per residue, same length as `sequence`.
    async fn score(&self, sequence: &str) -> Result<Vec<f64>>;

    fn name(&self) -> &str;
}
