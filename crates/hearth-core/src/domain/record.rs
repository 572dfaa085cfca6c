use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Period;
use crate::ValidationError;

/// The mandatory field carrying a record's `MMM-YY` period label.
pub const PERIOD_FIELD: &str = "Month Year";

/// One monthly observation: an opaque bag of metric fields plus the period
/// label. Field names and values (numbers, currency-formatted strings) pass
/// through untouched; the core only ever reads [`PERIOD_FIELD`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord(Map<String, Value>);

impl MetricRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The raw period label, if present as a string field.
    pub fn period_label(&self) -> Option<&str> {
        self.0.get(PERIOD_FIELD).and_then(Value::as_str)
    }

    /// Decode this record's period. Failure means the record cannot be
    /// ordered or filtered; callers skip it rather than aborting.
    pub fn period(&self) -> Result<Period, ValidationError> {
        let label = self
            .period_label()
            .ok_or(ValidationError::MissingPeriodField {
                field: PERIOD_FIELD,
            })?;
        Period::parse(label)
    }
}

impl From<Map<String, Value>> for MetricRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
