use serde::{Deserialize, Serialize};

/// A stored prompt.
///
/// `tags` is always kept in canonical form (see [`crate::tags::normalize`]):
/// sorted, deduplicated, comma-joined, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default, alias = "Name")]
    pub name: String,
    /// The prompt text. Serialized as `prompt`; older export files use
    /// capitalized keys (`ID`, `Name`, `Prompt`, `Tags`), accepted on read.
    #[serde(rename = "prompt", default, alias = "Prompt")]
    pub content: String,
    #[serde(default, alias = "Tags")]
    pub tags: String,
}

impl Prompt {
    pub fn new(id: i64, name: impl Into<String>, content: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
            tags: tags.into(),
        }
    }
}
