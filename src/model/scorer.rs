//! Binary logistic regression scorer

use serde::Serialize;
use thiserror::Error;

/// Error raised when a feature vector does not line up with the weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("feature vector has {got} features but the model expects {expected}")]
pub struct LengthMismatch {
    pub expected: usize,
    pub got: usize,
}

/// Outcome of scoring one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted class label (0 or 1)
    pub label: u8,
    /// Sigmoid output the label was thresholded from
    pub probability: f64,
}

/// Pre-trained logistic regression model.
///
/// Holds the weight vector and bias produced by training; both are
/// immutable for the life of the scorer. Scoring is pure: the same vector
/// always yields the same prediction.
#[derive(Debug, Clone)]
pub struct LogisticScorer {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticScorer {
    /// Create a scorer from trained parameters.
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Number of features the model expects per vector.
    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }

    /// Compute the positive-class probability for one feature vector.
    pub fn probability(&self, features: &[f64]) -> Result<f64, LengthMismatch> {
        if features.len() != self.weights.len() {
            return Err(LengthMismatch {
                expected: self.weights.len(),
                got: features.len(),
            });
        }

        let z: f64 = features
            .iter()
            .zip(&self.weights)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias;

        Ok(sigmoid(z))
    }

    /// Score one feature vector into a 0/1 prediction.
    ///
    /// The threshold is closed at 0.5: a probability of exactly 0.5
    /// predicts class 1.
    pub fn predict_one(&self, features: &[f64]) -> Result<Prediction, LengthMismatch> {
        let probability = self.probability(features)?;
        let label = if probability >= 0.5 { 1 } else { 0 };
        Ok(Prediction { label, probability })
    }

    /// Score a batch of feature vectors, one prediction per vector in
    /// input order.
    pub fn predict(&self, vectors: &[Vec<f64>]) -> Result<Vec<Prediction>, LengthMismatch> {
        vectors.iter().map(|v| self.predict_one(v)).collect()
    }
}

/// Standard logistic sigmoid.
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
