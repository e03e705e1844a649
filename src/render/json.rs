//! JSON rendering of content blocks.

use crate::error::{Error, Result};
use crate::model::ContentBlock;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a block sequence to JSON.
pub fn to_json(blocks: &[ContentBlock], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(blocks),
        JsonFormat::Compact => serde_json::to_string(blocks),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StyleContext, TextRun};

    fn blocks() -> Vec<ContentBlock> {
        vec![
            ContentBlock::Text(TextRun::plain("Hello", StyleContext::new().with_bold())),
            ContentBlock::Image {
                url: "https://x/y.png".to_string(),
                width: Some(1),
                height: None,
            },
        ]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&blocks(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"text\""));
        assert!(json.contains("\"bold\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&blocks(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"type\":\"image\""));
    }

    #[test]
    fn test_json_round_trip() {
        let json = to_json(&blocks(), JsonFormat::Compact).unwrap();
        let back: Vec<ContentBlock> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blocks());
    }
}
