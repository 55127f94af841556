use serde::{Deserialize, Serialize};

/// 基準清單中的一筆：結構 ID、顯示名稱、DisProt 參考 ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub pdb_id: String,
    pub name: String,
    pub disprot: String,
}

impl BenchmarkRecord {
    pub fn matches(&self, pdb_id: &str) -> bool {
        self.pdb_id.eq_ignore_ascii_case(pdb_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_pearson: f64,
    pub max_rmse: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_pearson: 0.8,
            max_rmse: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub pdb_id: String,
    pub disprot_id: String,
    pub name: String,
    pub r: f64,
    pub rmse: f64,
    pub our: Vec<f64>,
    #[serde(rename = "ref")]
    pub reference: Vec<f64>,
}

impl ValidationResult {
    pub fn meets(&self, thresholds: &Thresholds) -> bool {
        self.r > thresholds.min_pearson && self.rmse < thresholds.max_rmse
    }

    pub fn compared_residues(&self) -> usize {
        self.our.len()
    }
}
