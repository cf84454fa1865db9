//! Trained-model artifact loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Trained logistic regression parameters as exported by the training run.
///
/// `learning_rate` and `num_iterations` are provenance from training and
/// play no part in inference; they are kept so the artifact round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelArtifact {
    pub learning_rate: f64,
    pub num_iterations: u64,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl ModelArtifact {
    /// Load a model artifact from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))?;
        let artifact: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse model artifact {}", path.display()))?;

        info!(
            path = %path.display(),
            weights = artifact.weights.len(),
            bias = artifact.bias,
            "Model artifact loaded"
        );

        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_parses_json_export() {
        let json = r#"{
            "learningRate": 0.01,
            "numIterations": 1000,
            "weights": [0.1, -0.2, 0.3],
            "bias": -0.5
        }"#;

        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();

        assert_eq!(artifact.learning_rate, 0.01);
        assert_eq!(artifact.num_iterations, 1000);
        assert_eq!(artifact.weights, vec![0.1, -0.2, 0.3]);
        assert_eq!(artifact.bias, -0.5);
    }

    #[test]
    fn test_artifact_round_trips() {
        let artifact = ModelArtifact {
            learning_rate: 0.05,
            num_iterations: 500,
            weights: vec![1.0, 2.0],
            bias: 0.25,
        };

        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains("learningRate"));
        assert!(json.contains("numIterations"));

        let back: ModelArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back.weights, artifact.weights);
        assert_eq!(back.bias, artifact.bias);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ModelArtifact::load("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_malformed_artifact_is_an_error() {
        let result = serde_json::from_str::<ModelArtifact>(r#"{"weights": [1.0]}"#);
        assert!(result.is_err());
    }
}
