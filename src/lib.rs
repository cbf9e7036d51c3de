pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::InMemoryStore;
pub use config::ReportConfig;
pub use core::engine::RecordEngine;
pub use utils::error::{EngineError, Result};
