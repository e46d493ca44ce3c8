//! Domain layer - report entities and value objects

pub mod report;
