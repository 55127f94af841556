use crate::adapters::http::{FetchSettings, JsonFetcher};
use crate::domain::ports::ScoringProvider;
use crate::utils::error::{EwclError, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

pub const DEFAULT_SEED: u64 = 42;

/// 0.1 + 0.8 * (i % 10) / 10 for every residue position.
pub fn placeholder_scores(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 0.1 + 0.8 * (i % 10) as f64 / 10.0)
        .collect()
}

/// Rounds through the exact decimal expansion of `value`, so near-tie
/// inputs round the same way as a correctly rounded decimal formatter.
pub fn round_to(value: f64, precision: u32) -> f64 {
    format!("{:.*}", precision as usize, value)
        .parse()
        .unwrap_or(value)
}

/// 1-based residue map, rounded for the HTTP boundary.
pub fn to_ai_map(scores: &[f64], precision: u32) -> Map<String, Value> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| ((i + 1).to_string(), json!(round_to(*score, precision))))
        .collect()
}

/// Reads an `ai_map` object back into residue order. Keys must cover
/// `1..=n` exactly; a gap would shift every later score.
pub fn parse_ai_map(data: &Value) -> Result<Vec<f64>> {
    let map = data
        .get("ai_map")
        .and_then(|m| m.as_object())
        .ok_or_else(|| EwclError::MalformedResponse {
            message: "response has no ai_map object".to_string(),
        })?;

    let mut residues = Vec::with_capacity(map.len());
    for (key, value) in map {
        let index: usize = key.parse().map_err(|_| EwclError::MalformedResponse {
            message: format!("ai_map key '{}' is not a residue index", key),
        })?;
        let score = value.as_f64().ok_or_else(|| EwclError::MalformedResponse {
            message: format!("ai_map['{}'] is not a number", key),
        })?;
        residues.push((index, score));
    }

    residues.sort_by_key(|(index, _)| *index);
    for (position, (index, _)) in residues.iter().enumerate() {
        if *index != position + 1 {
            return Err(EwclError::MalformedResponse {
                message: format!(
                    "ai_map keys must be 1..={} without gaps, found '{}' at position {}",
                    residues.len(),
                    index,
                    position + 1
                ),
            });
        }
    }
    Ok(residues.into_iter().map(|(_, score)| score).collect())
}

/// 確定性的替代模型，不消耗任何亂數
#[derive(Debug, Clone)]
pub struct PlaceholderScorer {
    seed: u64,
}

impl PlaceholderScorer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PlaceholderScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[async_trait]
impl ScoringProvider for PlaceholderScorer {
    async fn score(&self, sequence: &str) -> Result<Vec<f64>> {
        Ok(placeholder_scores(sequence.chars().count()))
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}

/// 呼叫外部 EWCL 推論服務
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    fetcher: JsonFetcher,
    endpoint: String,
    seed: u64,
}

impl RemoteScorer {
    pub fn new(endpoint: impl Into<String>, seed: u64, settings: FetchSettings) -> Self {
        Self {
            fetcher: JsonFetcher::new(settings),
            endpoint: endpoint.into(),
            seed,
        }
    }
}

#[async_trait]
impl ScoringProvider for RemoteScorer {
    async fn score(&self, sequence: &str) -> Result<Vec<f64>> {
        let body = json!({ "sequence": sequence, "seed": self.seed });
        let data = self.fetcher.post_json(&self.endpoint, &body).await?;
        let scores = parse_ai_map(&data)?;

        let expected = sequence.chars().count();
        if scores.len() != expected {
            return Err(EwclError::MalformedResponse {
                message: format!(
                    "remote model returned {} scores for {} residues",
                    scores.len(),
                    expected
                ),
            });
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
