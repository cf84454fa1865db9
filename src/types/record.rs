//! Raw intake record as submitted by the intake form or the JSON API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single raw attribute value from an intake form.
///
/// Form submissions always produce text; the JSON API may carry measured
/// values (age, hormone levels) as numbers directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// One subject's intake answers: an attribute-name to raw-value mapping.
///
/// The mapping's own iteration order carries no meaning; the encoder walks
/// attributes in its canonical order and looks each one up here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntakeRecord(pub HashMap<String, RawValue>);

impl IntakeRecord {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Look up a raw attribute value by name.
    pub fn get(&self, attribute: &str) -> Option<&RawValue> {
        self.0.get(attribute)
    }

    /// Insert an attribute value, replacing any previous one.
    pub fn set(&mut self, attribute: &str, value: impl Into<RawValue>) {
        self.0.insert(attribute.to_string(), value.into());
    }

    /// Build a record from urlencoded form fields.
    ///
    /// The intake form names two fields differently from the model's
    /// attribute set: `age` maps to `Age` and `gender` maps to `Sex`.
    /// Every other field name is already the attribute name. Fields the
    /// form left out stay absent and encode as unmeasured.
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let mut record = Self::new();
        for (field, value) in fields {
            let attribute = match field.as_str() {
                "age" => "Age",
                "gender" => "Sex",
                other => other,
            };
            record.set(attribute, value.as_str());
        }
        record
    }
}
