use serde::{Deserialize, Serialize};
use serenity::model::Timestamp;

// Discord embed limits, in characters.
pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 4096;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FOOTER_LIMIT: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl DisplayField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }

    fn clamped(self) -> Self {
        Self {
            name: truncate_chars(&self.name, FIELD_NAME_LIMIT),
            value: truncate_chars(&self.value, FIELD_VALUE_LIMIT),
            inline: self.inline,
        }
    }
}

/// Rendered form of an event, ready to become a Discord embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPayload {
    title: String,
    description: String,
    color: u32,
    fields: Vec<DisplayField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<String>,
    timestamp: Timestamp,
}

impl DisplayPayload {
    /// Builds a payload, clamping every text part to Discord's limits.
    pub(crate) fn new(
        title: String,
        description: String,
        color: u32,
        fields: Vec<DisplayField>,
        footer: Option<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            title: truncate_chars(&title, TITLE_LIMIT),
            description: truncate_chars(&description, DESCRIPTION_LIMIT),
            color,
            fields: fields.into_iter().map(DisplayField::clamped).collect(),
            footer: footer.map(|f| truncate_chars(&f, FOOTER_LIMIT)),
            timestamp,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn fields(&self) -> &[DisplayField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&DisplayField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("🚚🚚🚚", 2), "🚚🚚");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn payload_clamps_long_description() {
        let payload = DisplayPayload::new(
            "t".into(),
            "x".repeat(DESCRIPTION_LIMIT + 50),
            0,
            vec![DisplayField::new("n", "v".repeat(FIELD_VALUE_LIMIT + 1), true)],
            None,
            Timestamp::now(),
        );
        assert_eq!(payload.description().chars().count(), DESCRIPTION_LIMIT);
        assert_eq!(payload.fields()[0].value.chars().count(), FIELD_VALUE_LIMIT);
    }
}
