use crate::domain::model::BenchmarkRecord;
use crate::utils::error::{EwclError, Result};
use std::path::Path;

/// 啟動時載入一次的基準清單，之後唯讀
#[derive(Debug, Clone, Default)]
pub struct BenchmarkCatalog {
    records: Vec<BenchmarkRecord>,
}

impl BenchmarkCatalog {
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self { records }
    }

    /// 從 JSON 檔案載入 `[{pdb_id, name, disprot}, ...]`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EwclError::ConfigError {
            message: format!("Cannot read benchmark list {}: {}", path.display(), e),
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            "📚 Loaded {} benchmarks from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<BenchmarkRecord> = serde_json::from_str(content)?;

        for (index, record) in records.iter().enumerate() {
            if record.pdb_id.trim().is_empty() || record.disprot.trim().is_empty() {
                return Err(EwclError::ConfigValidationError {
                    field: format!("benchmarks[{}]", index),
                    message: "pdb_id and disprot must not be empty".to_string(),
                });
            }
        }

        Ok(Self::new(records))
    }

    pub fn lookup(&self, pdb_id: &str) -> Option<&BenchmarkRecord> {
        self.records.iter().find(|record| record.matches(pdb_id))
    }

    pub fn list(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
