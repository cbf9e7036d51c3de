pub mod disciplines;
pub mod eligibility;
pub mod engine;
pub mod ranking;
pub mod records;
pub mod report;
pub mod season;
pub mod value;

pub use crate::domain::ports::{PerformanceSink, PerformanceStore, RosterStore};
pub use crate::utils::error::Result;
