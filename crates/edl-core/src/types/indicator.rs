use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name of the indicator value
pub const FIELD_VALUE: &str = "value";

/// Field name of the indicator type
pub const FIELD_INDICATOR_TYPE: &str = "indicator_type";

/// A single indicator as returned by the store.
///
/// Serializes as one flat JSON object: `value`, `indicator_type` and every
/// additional field the store attached (tags, score, expiration, ...), in
/// the order the store sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    /// The indicator itself (IP, domain, URL, hash)
    pub value: String,

    /// Indicator type as reported by the store (e.g. "IP", "Domain")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator_type: Option<String>,

    /// Any other fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl IndicatorRecord {
    /// Create a record with no extra fields
    #[must_use]
    pub fn new(value: impl Into<String>, indicator_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            indicator_type: Some(indicator_type.into()),
            fields: Map::new(),
        }
    }

    /// Attach an additional field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Names of all fields present on this record, in serialization order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(FIELD_VALUE)
            .chain(self.indicator_type.as_ref().map(|_| FIELD_INDICATOR_TYPE))
            .chain(self.fields.keys().map(String::as_str))
    }

    /// Render a field as plain text.
    ///
    /// Strings come back unquoted, other JSON values as compact JSON.
    /// Returns `None` for absent or `null` fields.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<String> {
        match name {
            FIELD_VALUE => Some(self.value.clone()),
            FIELD_INDICATOR_TYPE => self.indicator_type.clone(),
            _ => match self.fields.get(name)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_flat_record() {
        let raw = json!({
            "value": "1.2.3.4",
            "indicator_type": "IP",
            "score": 3,
            "sourceBrands": ["feed-a"]
        });
        let record: IndicatorRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.value, "1.2.3.4");
        assert_eq!(record.indicator_type.as_deref(), Some("IP"));
        assert_eq!(record.fields.len(), 2);
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_missing_type_round_trips() {
        let raw = json!({"value": "evil.example"});
        let record: IndicatorRecord = serde_json::from_value(raw.clone()).unwrap();
        assert!(record.indicator_type.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_field_names_order() {
        let record = IndicatorRecord::new("1.2.3.4", "IP")
            .with_field("score", 2)
            .with_field("expiration", "2026-01-01T00:00:00Z");
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["value", "indicator_type", "score", "expiration"]);
    }

    #[test]
    fn test_field_text() {
        let record = IndicatorRecord::new("1.2.3.4", "IP")
            .with_field("score", 2)
            .with_field("comment", Value::Null)
            .with_field("tags", json!(["a", "b"]));
        assert_eq!(record.field_text("value").as_deref(), Some("1.2.3.4"));
        assert_eq!(record.field_text("score").as_deref(), Some("2"));
        assert_eq!(record.field_text("tags").as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(record.field_text("comment"), None);
        assert_eq!(record.field_text("missing"), None);
    }
}
