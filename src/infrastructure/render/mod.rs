//! Document rendering collaborators

pub mod chromium;

pub use chromium::ChromiumExporter;
