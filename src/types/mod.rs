//! Type definitions for the screening pipeline

pub mod record;
pub mod report;

pub use record::{IntakeRecord, RawValue};
pub use report::ScreeningReport;
