//! Rich text fields.
//!
//! A rich text value arrives as an array of blocks, each with a block type,
//! its text, and styling spans. The shell only ever renders rich text as
//! plain text, so spans are kept for completeness but never interpreted.

use serde::{Deserialize, Deserializer, Serialize};

/// A single rich text block (paragraph, heading, list item, image...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextBlock {
    /// Block type, e.g. `paragraph` or `heading1`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Text content. Absent for images and embeds.
    #[serde(default)]
    pub text: Option<String>,

    /// Inline styling spans.
    #[serde(default)]
    pub spans: Vec<serde_json::Value>,
}

/// A rich text field. `null` and a missing field both decode to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText(Vec<RichTextBlock>);

impl RichText {
    /// Build a rich text value holding a single paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self(vec![RichTextBlock {
            kind: "paragraph".to_string(),
            text: Some(text.into()),
            spans: Vec::new(),
        }])
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[RichTextBlock] {
        &self.0
    }

    /// Whether the field carries any text at all.
    pub fn is_empty(&self) -> bool {
        self.0
            .iter()
            .all(|block| block.text.as_deref().is_none_or(str::is_empty))
    }

    /// Plain text of the field: block texts joined by a single space.
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let blocks = Option::<Vec<RichTextBlock>>::deserialize(deserializer)?;
        Ok(Self(blocks.unwrap_or_default()))
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::paragraph(text)
    }
}
