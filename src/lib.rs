pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{Cli, Command};

pub use crate::app::context::AppContext;
pub use crate::config::ServiceConfig;
pub use crate::core::{catalog::BenchmarkCatalog, validation::ValidationPipeline};
pub use crate::utils::error::{EwclError, Result};
