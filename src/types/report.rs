//! Screening report returned per scored record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report produced for one screened intake record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// Unique report identifier
    pub screening_id: String,

    /// Predicted class label (0 = negative, 1 = positive)
    pub prediction: u8,

    /// Sigmoid output the label was thresholded from (0.0 - 1.0)
    pub probability: f64,

    /// Report generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl ScreeningReport {
    /// Create a new report for a prediction.
    pub fn new(prediction: u8, probability: f64) -> Self {
        Self {
            screening_id: uuid::Uuid::new_v4().to_string(),
            prediction,
            probability,
            timestamp: Utc::now(),
        }
    }
}
