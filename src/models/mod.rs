use serde::{Deserialize, Serialize};
use std::fmt;

/// A single untyped cell as returned by the listings table
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

/// Null renders as the empty string, never as a literal token.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

/// One listing row, columns kept in the order the datastore returned them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ListingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing an earlier value under the same name in place
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Display text for a column; absent or null yields ""
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }

    #[cfg(test)]
    fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// Inbound chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: String,
    pub user_input: String,
}

/// Reply handed back to the HTTP layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub bot_reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_render_empty() {
        let record = ListingRecord::new().with("title", FieldValue::Null);
        assert_eq!(record.text("title"), "");
        assert_eq!(record.text("nope"), "");
    }

    #[test]
    fn numbers_render_plainly() {
        assert_eq!(FieldValue::Int(4_500_000).to_string(), "4500000");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Float(3.0).to_string(), "3");
    }

    #[test]
    fn insert_keeps_column_order_and_replaces() {
        let mut record = ListingRecord::new()
            .with("id", "1")
            .with("title", "Byt")
            .with("city", "Praha");
        record.insert("title", "Dům");

        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["id", "title", "city"]);
        assert_eq!(record.text("title"), "Dům");
    }

    #[test]
    fn chat_request_tolerates_missing_session() {
        let req: ChatRequest = serde_json::from_str(r#"{"user_input":"ahoj"}"#).unwrap();
        assert_eq!(req.session_id, "");
        assert_eq!(req.user_input, "ahoj");
    }
}
