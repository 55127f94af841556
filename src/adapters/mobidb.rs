use crate::adapters::http::{render_endpoint, FetchSettings, JsonFetcher};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::{EwclError, Result};
use async_trait::async_trait;
use serde_json::Value;

pub const DEFAULT_REFERENCE_ENDPOINT: &str = "https://www.ebi.ac.uk/pdbe/api/mobidb/{disprot_id}";

/// MobiDB disorder annotations served through the PDBe API.
#[derive(Debug, Clone)]
pub struct MobiDbClient {
    fetcher: JsonFetcher,
    endpoint: String,
}

impl MobiDbClient {
    pub fn new(endpoint: impl Into<String>, settings: FetchSettings) -> Self {
        Self {
            fetcher: JsonFetcher::new(settings),
            endpoint: endpoint.into(),
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value> {
    value.get(key).ok_or_else(|| EwclError::MalformedResponse {
        message: format!("missing field {}.{}", path, key),
    })
}

/// 取第一組預測，依殘基編號排序後只回傳數值
pub fn parse_disorder_profile(data: &Value, accession_id: &str) -> Result<Vec<f64>> {
    let entry = field(data, accession_id, "$")?;
    let annotations = field(entry, "mobidb_annotations", accession_id)?;
    let disorder = field(annotations, "disorder", "mobidb_annotations")?;
    let predictions = field(disorder, "predictions", "disorder")?
        .as_array()
        .ok_or_else(|| EwclError::MalformedResponse {
            message: "disorder.predictions is not a list".to_string(),
        })?;

    let Some(first) = predictions.first() else {
        return Ok(Vec::new());
    };

    let profile = field(first, "data", "predictions[0]")?
        .as_array()
        .ok_or_else(|| EwclError::MalformedResponse {
            message: "predictions[0].data is not a list".to_string(),
        })?;

    let mut residues = Vec::with_capacity(profile.len());
    for (index, item) in profile.iter().enumerate() {
        let resi = item.get("resi").and_then(as_number);
        let value = item.get("value").and_then(as_number);
        match (resi, value) {
            (Some(resi), Some(value)) => residues.push((resi, value)),
            _ => {
                return Err(EwclError::MalformedResponse {
                    message: format!("predictions[0].data[{}] needs numeric resi and value", index),
                })
            }
        }
    }

    // 穩定排序，相同殘基編號保留原順序
    residues.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(residues.into_iter().map(|(_, value)| value).collect())
}

#[async_trait]
impl ReferenceSource for MobiDbClient {
    async fn try_fetch(&self, accession_id: &str) -> Result<Vec<f64>> {
        let url = render_endpoint(&self.endpoint, "disprot_id", accession_id);
        let data = self.fetcher.get_json(&url).await?;
        let profile = parse_disorder_profile(&data, accession_id)?;

        tracing::debug!("📈 {}: fetched {} reference values", accession_id, profile.len());
        Ok(profile)
    }

    fn describe(&self) -> &str {
        "mobidb"
    }
}
