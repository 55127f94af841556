use crate::adapters::http::{render_endpoint, FetchSettings, JsonFetcher};
use crate::domain::ports::SequenceSource;
use crate::utils::error::{EwclError, Result};
use async_trait::async_trait;

pub const DEFAULT_SEQUENCE_ENDPOINT: &str = "https://data.rcsb.org/rest/v1/core/entry/{pdb_id}";

/// RCSB 結構條目查詢，取第一個 entity 的單字母序列
#[derive(Debug, Clone)]
pub struct RcsbClient {
    fetcher: JsonFetcher,
    endpoint: String,
}

impl RcsbClient {
    pub fn new(endpoint: impl Into<String>, settings: FetchSettings) -> Self {
        Self {
            fetcher: JsonFetcher::new(settings),
            endpoint: endpoint.into(),
        }
    }

    pub fn entry_url(&self, pdb_id: &str) -> String {
        render_endpoint(&self.endpoint, "pdb_id", &pdb_id.to_lowercase())
    }
}

pub fn parse_entry_sequence(data: &serde_json::Value) -> Result<String> {
    let entity = data
        .get("entity")
        .and_then(|entities| entities.as_array())
        .and_then(|entities| entities.first())
        .ok_or_else(|| EwclError::MalformedResponse {
            message: "entry has no entity records".to_string(),
        })?;

    entity
        .get("pdbx_seq_one_letter_code")
        .and_then(|code| code.as_str())
        .map(|code| code.to_string())
        .ok_or_else(|| EwclError::MalformedResponse {
            message: "entity[0] has no pdbx_seq_one_letter_code".to_string(),
        })
}

#[async_trait]
impl SequenceSource for RcsbClient {
    async fn try_fetch(&self, pdb_id: &str) -> Result<String> {
        let url = self.entry_url(pdb_id);
        let data = self.fetcher.get_json(&url).await?;
        let sequence = parse_entry_sequence(&data)?;

        tracing::debug!("🧬 {}: fetched {} residues", pdb_id, sequence.chars().count());
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_entry_sequence_uses_first_entity() {
        let data = json!({
            "entity": [
                {"pdbx_seq_one_letter_code": "MDVFMKGLS"},
                {"pdbx_seq_one_letter_code": "GGGG"}
            ]
        });
        assert_eq!(parse_entry_sequence(&data).unwrap(), "MDVFMKGLS");
    }

    #[test]
    fn test_parse_entry_sequence_missing_fields() {
        assert!(parse_entry_sequence(&json!({})).is_err());
        assert!(parse_entry_sequence(&json!({"entity": []})).is_err());
        assert!(parse_entry_sequence(&json!({"entity": [{}]})).is_err());
    }

    #[tokio::test]
    async fn test_fetch_lowercases_entry_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/entry/1xq8");
            then.status(200)
                .json_body(json!({"entity": [{"pdbx_seq_one_letter_code": "MDVFMK"}]}));
        });

        let client = RcsbClient::new(server.url("/entry/{pdb_id}"), FetchSettings::default());
        let sequence = client.fetch("1XQ8").await;

        mock.assert();
        assert_eq!(sequence, "MDVFMK");
    }

    #[tokio::test]
    async fn test_fetch_degrades_to_empty_on_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/entry/1xq8");
            then.status(500);
        });

        let client = RcsbClient::new(server.url("/entry/{pdb_id}"), FetchSettings::default());

        assert!(client.try_fetch("1xq8").await.is_err());
        assert_eq!(client.fetch("1xq8").await, "");
    }
}
