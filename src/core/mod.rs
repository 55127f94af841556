pub mod align;
pub mod catalog;
pub mod pdb;
pub mod stats;
pub mod validation;

pub use crate::domain::model::{BenchmarkRecord, Thresholds, ValidationResult};
pub use crate::domain::ports::{ReferenceSource, ScoringProvider, SequenceSource};
pub use crate::utils::error::Result;
