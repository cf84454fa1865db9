//! Feature encoding for thyroid screening model inference.
//!
//! This module turns raw intake records into the numeric feature vectors
//! the logistic regression model was trained on. The encoding rules and
//! the attribute order must match the training pipeline exactly.

use crate::types::record::{IntakeRecord, RawValue};
use thiserror::Error;

/// Number of features the model consumes per record.
pub const FEATURE_COUNT: usize = 27;

/// How a single attribute's raw value becomes a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingRule {
    /// "F" or "female" -> 1, anything else -> 0
    Sex,
    /// "other" -> 0, "SVI" -> 1, "SVHC" -> 2, anything else -> 3
    ReferralSource,
    /// "t"/"true" -> 1, "f"/"false"/"?" -> 0, otherwise parsed as a float
    BooleanLike,
}

/// Canonical attribute order, paired with each attribute's encoding rule.
///
/// The model's weight vector is indexed by this order. The `Result` label
/// field is deliberately not in this table.
pub const ATTRIBUTE_TABLE: [(&str, EncodingRule); FEATURE_COUNT] = [
    ("Age", EncodingRule::BooleanLike),
    ("Sex", EncodingRule::Sex),
    ("on thyroxine", EncodingRule::BooleanLike),
    ("query on thyroxine", EncodingRule::BooleanLike),
    ("on antithyroid medication", EncodingRule::BooleanLike),
    ("sick", EncodingRule::BooleanLike),
    ("pregnant", EncodingRule::BooleanLike),
    ("thyroid surgery", EncodingRule::BooleanLike),
    ("I131 treatment", EncodingRule::BooleanLike),
    ("lithium", EncodingRule::BooleanLike),
    ("goitre", EncodingRule::BooleanLike),
    ("tumor", EncodingRule::BooleanLike),
    ("hypopituitary", EncodingRule::BooleanLike),
    ("psych", EncodingRule::BooleanLike),
    ("TSH measured", EncodingRule::BooleanLike),
    ("TSH", EncodingRule::BooleanLike),
    ("T3 measured", EncodingRule::BooleanLike),
    ("T3", EncodingRule::BooleanLike),
    ("TT4 measured", EncodingRule::BooleanLike),
    ("TT4", EncodingRule::BooleanLike),
    ("T4U measured", EncodingRule::BooleanLike),
    ("T4U", EncodingRule::BooleanLike),
    ("FTI measured", EncodingRule::BooleanLike),
    ("FTI", EncodingRule::BooleanLike),
    ("TBG measured", EncodingRule::BooleanLike),
    ("TBG", EncodingRule::BooleanLike),
    ("referral source", EncodingRule::ReferralSource),
];

/// Name of the label field carried by training/evaluation data.
pub const LABEL_ATTRIBUTE: &str = "Result";

/// Error raised when a raw value matches no encoding rule and cannot be
/// parsed as a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("attribute `{attribute}` has unencodable value `{value}`")]
    Unencodable {
        attribute: &'static str,
        value: String,
    },
    #[error("label field `Result` is missing or not a 0/1 integer (got `{value}`)")]
    BadLabel { value: String },
}

/// Feature encoder that transforms intake records into model input features.
///
/// Matches the preprocessing done by the training pipeline: features are
/// emitted in the exact order of [`ATTRIBUTE_TABLE`], one per attribute,
/// with the `Result` label excluded. An attribute absent from the record
/// encodes as its unmeasured value instead of shortening the vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Create a new feature encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode one record into a feature vector of length [`FEATURE_COUNT`].
    pub fn encode(&self, record: &IntakeRecord) -> Result<Vec<f64>, EncodeError> {
        ATTRIBUTE_TABLE
            .iter()
            .map(|&(attribute, rule)| encode_attribute(attribute, rule, record.get(attribute)))
            .collect()
    }

    /// Encode a batch of records, one vector per record in input order.
    pub fn encode_batch(&self, records: &[IntakeRecord]) -> Result<Vec<Vec<f64>>, EncodeError> {
        records.iter().map(|r| self.encode(r)).collect()
    }

    /// Encode labeled records for offline evaluation.
    ///
    /// Each record must carry a `Result` field holding the 0/1 class label.
    /// The serving path never calls this; labels are only meaningful when
    /// replaying training or held-out data.
    pub fn encode_labeled(
        &self,
        records: &[IntakeRecord],
    ) -> Result<(Vec<Vec<f64>>, Vec<u8>), EncodeError> {
        let mut vectors = Vec::with_capacity(records.len());
        let mut labels = Vec::with_capacity(records.len());
        for record in records {
            vectors.push(self.encode(record)?);
            labels.push(extract_label(record)?);
        }
        Ok((vectors, labels))
    }

    /// Get the number of features produced per record.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get attribute names in canonical encoding order.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        ATTRIBUTE_TABLE.iter().map(|&(name, _)| name).collect()
    }
}

fn encode_attribute(
    attribute: &'static str,
    rule: EncodingRule,
    value: Option<&RawValue>,
) -> Result<f64, EncodeError> {
    match rule {
        EncodingRule::Sex => Ok(encode_sex(value)),
        EncodingRule::ReferralSource => Ok(encode_referral_source(value)),
        EncodingRule::BooleanLike => encode_boolean_like(attribute, value),
    }
}

fn encode_sex(value: Option<&RawValue>) -> f64 {
    match value {
        Some(RawValue::Text(s)) if s == "F" || s == "female" => 1.0,
        _ => 0.0,
    }
}

fn encode_referral_source(value: Option<&RawValue>) -> f64 {
    match value {
        Some(RawValue::Text(s)) => match s.as_str() {
            "other" => 0.0,
            "SVI" => 1.0,
            "SVHC" => 2.0,
            _ => 3.0,
        },
        // Unknown and missing both fall in the catch-all bucket.
        _ => 3.0,
    }
}

fn encode_boolean_like(
    attribute: &'static str,
    value: Option<&RawValue>,
) -> Result<f64, EncodeError> {
    match value {
        // Absent counts as the unmeasured marker, keeping the vector length fixed.
        None => Ok(0.0),
        Some(RawValue::Number(n)) => Ok(*n),
        Some(RawValue::Text(s)) => match s.as_str() {
            "t" | "true" => Ok(1.0),
            "f" | "false" | "?" => Ok(0.0),
            other => other.trim().parse::<f64>().map_err(|_| EncodeError::Unencodable {
                attribute,
                value: other.to_string(),
            }),
        },
    }
}

fn extract_label(record: &IntakeRecord) -> Result<u8, EncodeError> {
    let bad = |value: String| EncodeError::BadLabel { value };
    match record.get(LABEL_ATTRIBUTE) {
        Some(RawValue::Number(n)) if *n == 0.0 || *n == 1.0 => Ok(*n as u8),
        Some(RawValue::Number(n)) => Err(bad(n.to_string())),
        Some(RawValue::Text(s)) => match s.trim() {
            "0" => Ok(0),
            "1" => Ok(1),
            other => Err(bad(other.to_string())),
        },
        None => Err(bad("<missing>".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> IntakeRecord {
        let mut r = IntakeRecord::new();
        r.set("Age", 63.0);
        r.set("Sex", "F");
        for name in [
            "on thyroxine",
            "query on thyroxine",
            "on antithyroid medication",
            "sick",
            "pregnant",
            "thyroid surgery",
            "I131 treatment",
            "lithium",
            "goitre",
            "tumor",
            "hypopituitary",
            "psych",
        ] {
            r.set(name, "f");
        }
        r.set("TSH measured", "t");
        r.set("TSH", 0.03);
        r.set("T3 measured", "t");
        r.set("T3", 5.5);
        r.set("TT4 measured", "t");
        r.set("TT4", 199.0);
        r.set("T4U measured", "t");
        r.set("T4U", 1.05);
        r.set("FTI measured", "t");
        r.set("FTI", 190.0);
        r.set("TBG measured", "f");
        r.set("TBG", 0.0);
        r.set("referral source", "other");
        r
    }

    #[test]
    fn test_full_record_encodes_in_canonical_order() {
        let encoder = FeatureEncoder::new();
        let features = encoder.encode(&full_record()).unwrap();

        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 63.0); // Age
        assert_eq!(features[1], 1.0); // Sex = F
        assert_eq!(features[2], 0.0); // on thyroxine = f
        assert_eq!(features[14], 1.0); // TSH measured = t
        assert_eq!(features[15], 0.03); // TSH
        assert_eq!(features[19], 199.0); // TT4
        assert_eq!(features[26], 0.0); // referral source = other
    }

    #[test]
    fn test_sex_mapping() {
        let encoder = FeatureEncoder::new();
        let mut r = full_record();

        for (token, expected) in [("F", 1.0), ("female", 1.0), ("M", 0.0), ("male", 0.0)] {
            r.set("Sex", token);
            let features = encoder.encode(&r).unwrap();
            assert_eq!(features[1], expected, "Sex={token}");
        }

        // Case-sensitive: lowercase "f" is not the female token.
        r.set("Sex", "f");
        assert_eq!(encoder.encode(&r).unwrap()[1], 0.0);
    }

    #[test]
    fn test_referral_source_mapping() {
        let encoder = FeatureEncoder::new();
        let mut r = full_record();

        for (token, expected) in [
            ("other", 0.0),
            ("SVI", 1.0),
            ("SVHC", 2.0),
            ("unknown-token", 3.0),
            ("?", 3.0),
        ] {
            r.set("referral source", token);
            let features = encoder.encode(&r).unwrap();
            assert_eq!(features[26], expected, "referral source={token}");
        }

        // Missing referral source lands in the catch-all bucket too.
        r.0.remove("referral source");
        assert_eq!(encoder.encode(&r).unwrap()[26], 3.0);
    }

    #[test]
    fn test_boolean_token_mapping() {
        let encoder = FeatureEncoder::new();
        let mut r = full_record();

        for (token, expected) in [
            ("t", 1.0),
            ("true", 1.0),
            ("f", 0.0),
            ("false", 0.0),
            ("?", 0.0),
        ] {
            r.set("sick", token);
            let features = encoder.encode(&r).unwrap();
            assert_eq!(features[5], expected, "sick={token}");
        }
    }

    #[test]
    fn test_numeric_strings_parse() {
        let encoder = FeatureEncoder::new();
        let mut r = full_record();
        r.set("Age", "63");
        r.set("TSH", "0.03");

        let features = encoder.encode(&r).unwrap();
        assert_eq!(features[0], 63.0);
        assert_eq!(features[15], 0.03);
    }

    #[test]
    fn test_missing_attributes_encode_as_zero() {
        let encoder = FeatureEncoder::new();
        let features = encoder.encode(&IntakeRecord::new()).unwrap();

        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 0.0);
        // Every feature except the referral-source catch-all is zero.
        assert!(features[..26].iter().all(|&f| f == 0.0));
        assert_eq!(features[26], 3.0);
    }

    #[test]
    fn test_unencodable_value_names_the_attribute() {
        let encoder = FeatureEncoder::new();
        let mut r = full_record();
        r.set("TSH", "not-a-reading");

        let err = encoder.encode(&r).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Unencodable {
                attribute: "TSH",
                value: "not-a-reading".to_string(),
            }
        );
        assert!(err.to_string().contains("TSH"));
    }

    #[test]
    fn test_label_never_becomes_a_feature() {
        let encoder = FeatureEncoder::new();
        let mut r = full_record();
        let baseline = encoder.encode(&r).unwrap();

        r.set("Result", "1");
        let with_label = encoder.encode(&r).unwrap();

        assert_eq!(baseline, with_label);
        assert_eq!(with_label.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_encode_labeled_splits_vectors_and_labels() {
        let encoder = FeatureEncoder::new();
        let mut positive = full_record();
        positive.set("Result", "1");
        let mut negative = full_record();
        negative.set("Result", 0.0);

        let (vectors, labels) = encoder.encode_labeled(&[positive, negative]).unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].len(), FEATURE_COUNT);
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn test_encode_labeled_rejects_missing_label() {
        let encoder = FeatureEncoder::new();
        let err = encoder.encode_labeled(&[full_record()]).unwrap_err();
        assert!(matches!(err, EncodeError::BadLabel { .. }));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = FeatureEncoder::new();
        let r = full_record();
        assert_eq!(encoder.encode(&r).unwrap(), encoder.encode(&r).unwrap());
    }

    #[test]
    fn test_attribute_names_match_table() {
        let encoder = FeatureEncoder::new();
        let names = encoder.attribute_names();
        assert_eq!(names.len(), FEATURE_COUNT);
        assert_eq!(names[0], "Age");
        assert_eq!(names[26], "referral source");
        assert!(!names.contains(&LABEL_ATTRIBUTE));
    }
}
