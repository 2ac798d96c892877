//! Loosely-typed attribute bag handed over by the dispatcher.

use serde_json::Value;

use crate::formatter::DisplayField;

pub type Attributes = serde_json::Map<String, Value>;

/// Lenient accessors over [`Attributes`]. Strings are trimmed and empty strings
/// count as missing; numbers and booleans are rendered as text.
pub trait AttributesExt {
    fn text(&self, key: &str) -> Option<String>;

    /// First present key wins.
    fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    fn count(&self, key: &str) -> Option<u64>;

    fn display_fields(&self, key: &str) -> Vec<DisplayField>;
}

impl AttributesExt for Attributes {
    fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn count(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn display_fields(&self, key: &str) -> Vec<DisplayField> {
        let Some(Value::Array(items)) = self.get(key) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| serde_json::from_value::<DisplayField>(item.clone()).ok())
            .collect()
    }
}
