// Adapters layer: concrete implementations for external systems (RCSB, MobiDB, local CSV, model service).

pub mod csv_reference;
pub mod http;
pub mod mobidb;
pub mod rcsb;
pub mod scoring;
