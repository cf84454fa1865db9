//! Thyroid Screening Service Library
//!
//! Encodes patient-intake form data into fixed numeric feature vectors and
//! scores them with a pre-trained binary logistic regression classifier.

pub mod config;
pub mod encoder;
pub mod metrics;
pub mod model;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use encoder::FeatureEncoder;
pub use model::inference::ScreeningEngine;
pub use model::loader::ModelArtifact;
pub use model::scorer::LogisticScorer;
pub use types::{record::IntakeRecord, report::ScreeningReport};
