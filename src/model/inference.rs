//! Screening engine: the encode + score inference boundary

use crate::encoder::{EncodeError, FeatureEncoder};
use crate::model::loader::ModelArtifact;
use crate::model::scorer::{LengthMismatch, LogisticScorer, Prediction};
use crate::types::record::IntakeRecord;
use crate::types::report::ScreeningReport;
use anyhow::{ensure, Result};
use thiserror::Error;
use tracing::info;

/// Error raised while screening a record. A record either fully encodes
/// and scores or fails with one of these; there is no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Score(#[from] LengthMismatch),
}

/// Inference engine combining the feature encoder with a trained scorer.
///
/// Built once at startup from the model artifact and passed by reference
/// into request handling; it holds no mutable state, so concurrent
/// screenings need no coordination.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    encoder: FeatureEncoder,
    scorer: LogisticScorer,
}

impl ScreeningEngine {
    /// Build an engine from a loaded model artifact.
    ///
    /// Fails if the artifact's weight count disagrees with the encoder's
    /// feature count; a model trained on a different encoding cannot be
    /// served.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let encoder = FeatureEncoder::new();
        ensure!(
            artifact.weights.len() == encoder.feature_count(),
            "model artifact has {} weights but the encoder produces {} features",
            artifact.weights.len(),
            encoder.feature_count(),
        );

        let scorer = LogisticScorer::new(artifact.weights, artifact.bias);

        info!(
            features = encoder.feature_count(),
            "Screening engine initialized"
        );

        Ok(Self { encoder, scorer })
    }

    /// Screen a single intake record.
    pub fn screen_one(&self, record: &IntakeRecord) -> Result<Prediction, ScreenError> {
        let features = self.encoder.encode(record)?;
        Ok(self.scorer.predict_one(&features)?)
    }

    /// Screen a batch of records, one prediction per record in input order.
    pub fn screen(&self, records: &[IntakeRecord]) -> Result<Vec<Prediction>, ScreenError> {
        records.iter().map(|r| self.screen_one(r)).collect()
    }

    /// Screen a batch down to bare 0/1 class labels, in input order.
    pub fn screen_labels(&self, records: &[IntakeRecord]) -> Result<Vec<u8>, ScreenError> {
        Ok(self.screen(records)?.into_iter().map(|p| p.label).collect())
    }

    /// Screen a batch and wrap each prediction in a report.
    pub fn screen_to_reports(
        &self,
        records: &[IntakeRecord],
    ) -> Result<Vec<ScreeningReport>, ScreenError> {
        Ok(self
            .screen(records)?
            .into_iter()
            .map(|p| ScreeningReport::new(p.label, p.probability))
            .collect())
    }

    /// Number of features the engine encodes and scores per record.
    pub fn feature_count(&self) -> usize {
        self.encoder.feature_count()
    }
}
