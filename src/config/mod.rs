#[cfg(feature = "cli")]
pub mod cli;
pub mod service_config;

pub use service_config::ServiceConfig;
