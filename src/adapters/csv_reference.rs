use crate::domain::model::BenchmarkRecord;
use crate::domain::ports::ReferenceSource;
use crate::utils::error::{EwclError, Result};
use async_trait::async_trait;
use std::io::Read;
use std::path::PathBuf;

/// Files are keyed by lower-cased PDB ID, e.g. `1xq8_disorder.csv`.
/// `{disprot_id}` is also accepted in custom patterns.
pub const DEFAULT_FILE_PATTERN: &str = "{pdb_id}_disorder.csv";

/// 本地 CSV 參考資料：`residue,S2` 兩欄，無序度 = 1 - S²
#[derive(Debug, Clone)]
pub struct CsvReferenceSource {
    directory: PathBuf,
    file_pattern: String,
}

impl CsvReferenceSource {
    pub fn new(directory: impl Into<PathBuf>, file_pattern: Option<String>) -> Self {
        Self {
            directory: directory.into(),
            file_pattern: file_pattern.unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string()),
        }
    }

    pub fn path_for(&self, pdb_id: &str, disprot_id: &str) -> PathBuf {
        let file_name = self
            .file_pattern
            .replace("{pdb_id}", &pdb_id.to_lowercase())
            .replace("{disprot_id}", &disprot_id.to_lowercase());
        self.directory.join(file_name)
    }

    async fn read_profile(&self, path: PathBuf) -> Result<Vec<f64>> {
        tracing::debug!("📂 Reading reference profile from {}", path.display());
        let bytes = tokio::fs::read(&path).await?;
        parse_order_parameters(bytes.as_slice())
    }
}

/// Parses order parameters and returns disorder values sorted by residue.
pub fn parse_order_parameters<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut residues = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = index + 2;

        let residue = record
            .get(0)
            .and_then(|field| field.parse::<f64>().ok())
            .ok_or_else(|| EwclError::MalformedResponse {
                message: format!("line {}: residue column is not numeric", line),
            })?;
        let order_parameter = record
            .get(1)
            .and_then(|field| field.parse::<f64>().ok())
            .ok_or_else(|| EwclError::MalformedResponse {
                message: format!("line {}: S2 column is not numeric", line),
            })?;

        residues.push((residue, 1.0 - order_parameter));
    }

    residues.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(residues.into_iter().map(|(_, disorder)| disorder).collect())
}

#[async_trait]
impl ReferenceSource for CsvReferenceSource {
    /// 沒有目錄紀錄時，兩個佔位符都用同一個 ID
    async fn try_fetch(&self, accession_id: &str) -> Result<Vec<f64>> {
        self.read_profile(self.path_for(accession_id, accession_id))
            .await
    }

    async fn try_fetch_for(&self, record: &BenchmarkRecord) -> Result<Vec<f64>> {
        self.read_profile(self.path_for(&record.pdb_id, &record.disprot))
            .await
    }

    fn describe(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_converts_order_parameters() {
        let content = "residue,s2\n2,0.75\n1,0.9\n3, 0.25 \n";
        let values = parse_order_parameters(content.as_bytes()).unwrap();

        assert_eq!(values.len(), 3);
        assert!((values[0] - 0.1).abs() < 1e-12);
        assert!((values[1] - 0.25).abs() < 1e-12);
        assert!((values[2] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_parse_rejects_non_numeric_rows() {
        let content = "residue,s2\n1,n/a\n";
        assert!(matches!(
            parse_order_parameters(content.as_bytes()),
            Err(EwclError::MalformedResponse { .. })
        ));
    }

    fn record() -> BenchmarkRecord {
        BenchmarkRecord {
            pdb_id: "1XQ8".to_string(),
            name: "Alpha-synuclein".to_string(),
            disprot: "DP00070".to_string(),
        }
    }

    #[test]
    fn test_path_for_fills_both_placeholders() {
        let source = CsvReferenceSource::new("/data/validation", None);
        assert_eq!(
            source.path_for("1XQ8", "DP00070"),
            PathBuf::from("/data/validation/1xq8_disorder.csv")
        );

        let source = CsvReferenceSource::new(
            "/data",
            Some("{disprot_id}/{pdb_id}.csv".to_string()),
        );
        assert_eq!(
            source.path_for("1XQ8", "DP00070"),
            PathBuf::from("/data/dp00070/1xq8.csv")
        );
    }

    #[tokio::test]
    async fn test_reads_file_keyed_by_pdb_id() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("1xq8_disorder.csv"),
            "residue,s2\n1,0.2\n2,0.6\n",
        )
        .unwrap();

        let source = CsvReferenceSource::new(temp_dir.path(), None);
        let values = source.try_fetch_for(&record()).await.unwrap();

        assert_eq!(values.len(), 2);
        assert!((values[0] - 0.8).abs() < 1e-12);
        assert!(source.fetch("2k4x").await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_pattern_keyed_by_disprot_id() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("dp00070_disorder.csv"),
            "residue,s2\n1,0.5\n",
        )
        .unwrap();

        let source = CsvReferenceSource::new(
            temp_dir.path(),
            Some("{disprot_id}_disorder.csv".to_string()),
        );

        assert_eq!(source.try_fetch_for(&record()).await.unwrap().len(), 1);
        assert_eq!(source.fetch("DP00070").await.len(), 1);
    }
}
