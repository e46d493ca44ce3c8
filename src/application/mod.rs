//! Application layer - pipeline orchestration and error types

pub mod errors;
pub mod reporting;
