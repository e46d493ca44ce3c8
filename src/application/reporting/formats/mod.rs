//! Output format implementations (HTML document, JSON dump)

pub mod html;
pub mod json;
