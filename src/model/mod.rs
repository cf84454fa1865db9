//! Model loading and inference components

pub mod inference;
pub mod loader;
pub mod scorer;

pub use inference::ScreeningEngine;
pub use loader::ModelArtifact;
pub use scorer::{LogisticScorer, Prediction};
