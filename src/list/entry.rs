//! A single saved text

use serde::{Deserialize, Serialize};

/// One entry in the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEntry {
    /// Text as typed, possibly carrying inline markup
    pub content: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl TextEntry {
    /// New, non-favorite entry
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_favorite: false,
        }
    }

    /// Flip the favorite flag and return the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let entry = TextEntry {
            content: "hi".into(),
            is_favorite: true,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"content":"hi","isFavorite":true}"#);
    }

    #[test]
    fn test_missing_favorite_defaults_false() {
        let entry: TextEntry = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert!(!entry.is_favorite);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut entry = TextEntry::new("x");
        assert!(entry.toggle_favorite());
        assert!(!entry.toggle_favorite());
    }
}
