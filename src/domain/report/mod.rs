//! Unified report domain model
//!
//! The merged record combining code-quality and vulnerability metrics for
//! one project snapshot, plus the findings list and its SAST/SCA summary.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
