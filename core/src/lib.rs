//! Shared types for duplicate tab detection
//!
//! The host supplies [`TabRecord`]s and receives an [`AnalysisResult`]; the
//! error types are used by the configuration and integration layers only.

pub mod types;
pub mod errors;

pub use types::*;
pub use errors::*;
