use anyhow::Result;
use ewcl_bench::core::stats::{pearson, rmse};
use ewcl_bench::{AppContext, BenchmarkCatalog, EwclError, ServiceConfig};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

const BENCHMARKS: &str = r#"[
    {"pdb_id": "1XQ8", "name": "Alpha-synuclein", "disprot": "DP00070"},
    {"pdb_id": "2K4X", "name": "p53 C-terminal tail", "disprot": "DP00086"}
]"#;

fn catalog() -> Arc<BenchmarkCatalog> {
    Arc::new(BenchmarkCatalog::from_json_str(BENCHMARKS).unwrap())
}

fn config_for(server: &MockServer) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.sequence_source.endpoint = Some(server.url("/rest/v1/core/entry/{pdb_id}"));
    config.reference_source.http.endpoint = Some(server.url("/pdbe/api/mobidb/{disprot_id}"));
    config
}

fn mobidb_body(accession: &str, predictions: serde_json::Value) -> serde_json::Value {
    json!({
        accession: {
            "mobidb_annotations": {
                "disorder": { "predictions": predictions }
            }
        }
    })
}

#[tokio::test]
async fn test_validate_end_to_end_with_mock_upstreams() -> Result<()> {
    let server = MockServer::start();

    let sequence_mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/core/entry/1xq8");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"entity": [{"pdbx_seq_one_letter_code": "MDVFMKGLSKA"}]}));
    });

    // 8 residues in reverse order; the second prediction set must be ignored
    let first_set: Vec<serde_json::Value> = (1..=8)
        .rev()
        .map(|resi| json!({"resi": resi, "value": 0.05 * resi as f64}))
        .collect();
    let reference_mock = server.mock(|when, then| {
        when.method(GET).path("/pdbe/api/mobidb/DP00070");
        then.status(200).json_body(mobidb_body(
            "DP00070",
            json!([
                {"data": first_set},
                {"data": [{"resi": 1, "value": 0.99}]}
            ]),
        ));
    });

    let context = AppContext::with_catalog(&config_for(&server), catalog())?;
    let result = context.pipeline.validate("1XQ8").await?;

    sequence_mock.assert();
    reference_mock.assert();

    assert_eq!(result.pdb_id, "1XQ8");
    assert_eq!(result.disprot_id, "DP00070");
    assert_eq!(result.name, "Alpha-synuclein");
    assert_eq!(result.our.len(), 8);
    assert_eq!(result.reference.len(), 8);

    let expected_reference: Vec<f64> = (1..=8).map(|resi| 0.05 * resi as f64).collect();
    assert_eq!(result.reference, expected_reference);
    assert!((result.our[0] - 0.1).abs() < 1e-12);

    assert!((result.r - 1.0).abs() < 1e-9);
    assert_eq!(result.r, pearson(&result.our, &result.reference));
    assert_eq!(result.rmse, rmse(&result.our, &result.reference));

    Ok(())
}

#[tokio::test]
async fn test_unknown_benchmark_is_reported() -> Result<()> {
    let server = MockServer::start();
    let context = AppContext::with_catalog(&config_for(&server), catalog())?;

    let err = context.pipeline.validate("9ZZZ").await.unwrap_err();

    assert!(matches!(err, EwclError::BenchmarkNotFound { .. }));
    assert_eq!(err.to_string(), "No benchmark found for PDB ID 9ZZZ");
    Ok(())
}

#[tokio::test]
async fn test_sequence_upstream_failure() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/core/entry/1xq8");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/pdbe/api/mobidb/DP00070");
        then.status(200).json_body(mobidb_body(
            "DP00070",
            json!([{"data": [{"resi": 1, "value": 0.5}]}]),
        ));
    });

    let context = AppContext::with_catalog(&config_for(&server), catalog())?;
    let err = context.pipeline.validate("1xq8").await.unwrap_err();

    assert_eq!(err.to_string(), "Could not fetch sequence for PDB ID 1xq8");
    assert!(err.upstream_reason().unwrap().contains("500"));
    Ok(())
}

#[tokio::test]
async fn test_missing_sequence_field_is_unavailable() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/core/entry/2k4x");
        then.status(200).json_body(json!({"entity": [{}]}));
    });

    let context = AppContext::with_catalog(&config_for(&server), catalog())?;
    let err = context.pipeline.validate("2K4X").await.unwrap_err();

    assert_eq!(err.to_string(), "Could not fetch sequence for PDB ID 2K4X");
    Ok(())
}

#[tokio::test]
async fn test_empty_reference_predictions() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/core/entry/1xq8");
        then.status(200)
            .json_body(json!({"entity": [{"pdbx_seq_one_letter_code": "MDVFMK"}]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/pdbe/api/mobidb/DP00070");
        then.status(200).json_body(mobidb_body("DP00070", json!([])));
    });

    let context = AppContext::with_catalog(&config_for(&server), catalog())?;
    let err = context.pipeline.validate("1xq8").await.unwrap_err();

    assert!(matches!(err, EwclError::ReferenceUnavailable { .. }));
    assert_eq!(
        err.to_string(),
        "Could not fetch reference data for DisProt ID DP00070"
    );
    Ok(())
}

#[tokio::test]
async fn test_validate_with_csv_named_by_pdb_id() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("1xq8_disorder.csv"),
        "residue,s2\n1,0.9\n2,0.7\n3,0.5\n",
    )?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/core/entry/1xq8");
        then.status(200)
            .json_body(json!({"entity": [{"pdbx_seq_one_letter_code": "MDVFMKGLSK"}]}));
    });

    let mut config = config_for(&server);
    config.reference_source.r#type = "csv".to_string();
    config.reference_source.csv_directory = Some(temp_dir.path().to_string_lossy().to_string());

    let context = AppContext::with_catalog(&config, catalog())?;
    let result = context.pipeline.validate("1xq8").await?;

    assert_eq!(result.disprot_id, "DP00070");
    assert_eq!(result.reference.len(), 3);
    assert!((result.reference[0] - 0.1).abs() < 1e-12);
    assert!((result.reference[2] - 0.5).abs() < 1e-12);
    assert!((result.r - 1.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_validate_with_csv_named_by_disprot_pattern() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("dp00086_disorder.csv"),
        "residue,s2\n3,0.2\n1,0.9\n2,0.8\n4,0.1\n",
    )?;

    let server = MockServer::start();
    let sequence_mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/core/entry/2k4x");
        then.status(200)
            .json_body(json!({"entity": [{"pdbx_seq_one_letter_code": "SHLKSKKGQ"}]}));
    });

    let mut config = config_for(&server);
    config.reference_source.r#type = "csv".to_string();
    config.reference_source.csv_directory = Some(temp_dir.path().to_string_lossy().to_string());
    config.reference_source.csv_file_pattern = Some("{disprot_id}_disorder.csv".to_string());

    let context = AppContext::with_catalog(&config, catalog())?;
    let result = context.pipeline.validate("2k4x").await?;

    sequence_mock.assert();
    assert_eq!(result.disprot_id, "DP00086");
    assert_eq!(result.our.len(), 4);
    let expected = [0.1, 0.2, 0.8, 0.9];
    for (value, expected) in result.reference.iter().zip(expected.iter()) {
        assert!((value - expected).abs() < 1e-12);
    }
    // scores rise linearly; reference 0.1, 0.2, 0.8, 0.9 gives r = 1.5 / sqrt(2.5)
    assert!((result.r - 1.5 / 2.5_f64.sqrt()).abs() < 1e-9);
    Ok(())
}
