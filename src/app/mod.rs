pub mod context;
pub mod server;
