//! Infrastructure layer - upstream API clients and document rendering

pub mod api_clients;
pub mod render;
