use clap::Parser;
use ewcl_bench::adapters::scoring::to_ai_map;
use ewcl_bench::app::{context::build_scorer, server};
use ewcl_bench::core::pdb::extract_sequence;
use ewcl_bench::domain::ports::ScoringProvider;
use ewcl_bench::utils::error::ErrorCategory;
use ewcl_bench::utils::{logger, validation::Validate};
use ewcl_bench::{AppContext, BenchmarkCatalog, Cli, Command, EwclError, ServiceConfig};

const EXIT_THRESHOLDS_NOT_MET: i32 = 4;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(cli.verbose, config.log_format());
    if cli.verbose {
        tracing::debug!("Service config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }

    let outcome = match &cli.command {
        Command::Serve { .. } => run_serve(&config).await,
        Command::Benchmarks => run_benchmarks(&config),
        Command::Validate { pdb_id, json } => run_validate(&config, pdb_id, *json).await,
        Command::Score { sequence, pdb } => run_score(&config, sequence.as_deref(), pdb.as_deref()).await,
    };

    if let Err(e) = outcome {
        fail(e);
    }
}

fn fail(e: EwclError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    if let Some(reason) = e.upstream_reason() {
        tracing::error!("   Upstream reason: {}", reason);
    }
    eprintln!("❌ {}", e);
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::Configuration | ErrorCategory::Io => 1,
        ErrorCategory::NotFound => 2,
        ErrorCategory::Upstream | ErrorCategory::Data => 3,
    };
    std::process::exit(exit_code);
}

async fn run_serve(config: &ServiceConfig) -> ewcl_bench::Result<()> {
    let addr = config.socket_addr()?;
    let context = AppContext::from_config(config)?;

    tracing::info!(
        "🚀 Starting EWCL service with {} scorer and {} benchmarks",
        context.scorer.name(),
        context.pipeline.catalog().len()
    );

    server::serve(addr, context.state()).await
}

fn run_benchmarks(config: &ServiceConfig) -> ewcl_bench::Result<()> {
    let catalog = BenchmarkCatalog::from_file(&config.catalog.path)?;

    println!("📋 {} benchmarks:", catalog.len());
    for record in catalog.list() {
        println!("  {:<8} {:<10} {}", record.pdb_id, record.disprot, record.name);
    }
    Ok(())
}

async fn run_validate(config: &ServiceConfig, pdb_id: &str, json: bool) -> ewcl_bench::Result<()> {
    let context = AppContext::from_config(config)?;
    let result = context.pipeline.validate(pdb_id).await?;
    let thresholds = config.thresholds();
    let passed = result.meets(&thresholds);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("🔬 {} ({}) vs {}", result.pdb_id, result.name, result.disprot_id);
        println!("  Residues compared: {}", result.compared_residues());
        println!("  Pearson r:         {:.4}", result.r);
        println!("  RMSE:              {:.4}", result.rmse);
        println!(
            "  Verdict:           {} (r > {}, rmse < {})",
            if passed { "✅ pass" } else { "❌ below thresholds" },
            thresholds.min_pearson,
            thresholds.max_rmse
        );
    }

    if !passed {
        std::process::exit(EXIT_THRESHOLDS_NOT_MET);
    }
    Ok(())
}

async fn run_score(
    config: &ServiceConfig,
    sequence: Option<&str>,
    pdb: Option<&str>,
) -> ewcl_bench::Result<()> {
    let sequence = match (sequence, pdb) {
        (Some(sequence), _) => sequence.to_string(),
        (None, Some(path)) => {
            let pdb_text = std::fs::read_to_string(path)?;
            let sequence = extract_sequence(&pdb_text);
            tracing::info!("🧬 Extracted {} residues from {}", sequence.chars().count(), path);
            sequence
        }
        (None, None) => {
            return Err(EwclError::MissingConfigError {
                field: "--sequence or --pdb".to_string(),
            })
        }
    };

    let scorer = build_scorer(&config.scoring)?;
    let scores = scorer.score(&sequence).await?;
    let body = serde_json::json!({ "ai_map": to_ai_map(&scores, config.scoring.precision) });

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
