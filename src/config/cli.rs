use crate::config::service_config::ServiceConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ewcl-bench")]
#[command(about = "EWCL disorder inference and benchmark validation service")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the benchmark list path
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// List the known benchmarks
    Benchmarks,

    /// Validate the scorer against one benchmark entry
    Validate {
        pdb_id: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a sequence and print the residue map
    Score {
        #[arg(long, conflicts_with = "pdb", required_unless_present = "pdb")]
        sequence: Option<String>,

        /// PDB file to extract the sequence from
        #[arg(long)]
        pdb: Option<String>,
    },
}

impl Cli {
    /// 載入配置檔（若有），再套用命令列覆蓋
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(catalog) = &self.catalog {
            config.catalog.path = catalog.clone();
        }

        if self.json_logs {
            config.logging.format = "json".to_string();
        }

        if let Command::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["ewcl-bench", "serve", "--port", "9001", "--json-logs"]);
        let config = cli.load_config().unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_score_requires_input() {
        assert!(Cli::try_parse_from(["ewcl-bench", "score"]).is_err());
        assert!(Cli::try_parse_from(["ewcl-bench", "score", "--sequence", "MKV"]).is_ok());
        assert!(Cli::try_parse_from([
            "ewcl-bench",
            "score",
            "--sequence",
            "MKV",
            "--pdb",
            "x.pdb"
        ])
        .is_err());
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from(["ewcl-bench", "validate", "1XQ8", "--json", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Validate { pdb_id, json } => {
                assert_eq!(pdb_id, "1XQ8");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
