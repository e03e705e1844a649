//! Display-ready output blocks.

use super::{Alignment, ListOrdering, NoticeKind, StyleContext};
use serde::{Deserialize, Serialize};

/// Placeholder character reported for non-text inline content.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Inline content of a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text { text: String },

    /// Catalogued smile glyph
    Smile {
        name: String,
        asset: String,
        alt: String,
    },

    /// Jump-to-post glyph
    Snapback { post_id: u64 },

    /// Image flowing with the text
    Image {
        url: String,
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// A piece of inline content with its resolved style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The content
    pub content: Inline,

    /// Resolved style
    pub style: StyleContext,
}

impl Span {
    /// Create a text span.
    pub fn text(text: impl Into<String>, style: StyleContext) -> Self {
        Self {
            content: Inline::Text { text: text.into() },
            style,
        }
    }

    /// Text of this span, if it is a text span.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Inline::Text { text } => Some(text),
            _ => None,
        }
    }

    fn first_char(&self) -> Option<char> {
        match &self.content {
            Inline::Text { text } => text.chars().next(),
            _ => Some(OBJECT_REPLACEMENT),
        }
    }

    fn last_char(&self) -> Option<char> {
        match &self.content {
            Inline::Text { text } => text.chars().next_back(),
            _ => Some(OBJECT_REPLACEMENT),
        }
    }
}

/// A sequence of styled spans.
///
/// Text spans are never empty and adjacent text spans always differ in
/// style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl TextRun {
    /// Create an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a run holding one text span.
    pub fn plain(text: impl Into<String>, style: StyleContext) -> Self {
        let mut run = Self::new();
        run.push(Span::text(text, style));
        run
    }

    /// Append a span, merging it into the previous one when both are text
    /// with the same style.
    pub fn push(&mut self, span: Span) {
        if let Inline::Text { text } = &span.content {
            if text.is_empty() {
                return;
            }
            if let Some(Span {
                content: Inline::Text { text: last },
                style,
            }) = self.spans.last_mut()
            {
                if *style == span.style {
                    last.push_str(text);
                    return;
                }
            }
        }
        self.spans.push(span);
    }

    /// Append all spans of another run.
    pub fn append(&mut self, other: TextRun) {
        for span in other.spans {
            self.push(span);
        }
    }

    /// Check if the run has no content.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated text of all text spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().filter_map(Span::as_text).collect()
    }

    /// First character, glyphs reported as [`OBJECT_REPLACEMENT`].
    pub fn first_char(&self) -> Option<char> {
        self.spans.first().and_then(Span::first_char)
    }

    /// Last character, glyphs reported as [`OBJECT_REPLACEMENT`].
    pub fn last_char(&self) -> Option<char> {
        self.spans.last().and_then(Span::last_char)
    }

    /// Check if the run ends with a newline.
    pub fn ends_with_newline(&self) -> bool {
        self.last_char() == Some('\n')
    }

    /// Check if the run is exactly one space.
    pub fn is_single_space(&self) -> bool {
        self.spans.len() == 1 && self.spans[0].as_text() == Some(" ")
    }

    /// Remove leading newlines.
    pub fn trim_leading_newlines(&mut self) {
        while let Some(first) = self.spans.first_mut() {
            let Inline::Text { text } = &mut first.content else {
                return;
            };
            let trimmed = text.trim_start_matches('\n');
            if !trimmed.is_empty() {
                *text = trimmed.to_string();
                return;
            }
            self.spans.remove(0);
        }
    }

    /// Remove trailing newlines.
    pub fn trim_trailing_newlines(&mut self) {
        while let Some(last) = self.spans.last_mut() {
            let Inline::Text { text } = &mut last.content else {
                return;
            };
            let kept = text.trim_end_matches('\n').len();
            if kept > 0 {
                text.truncate(kept);
                return;
            }
            self.spans.pop();
        }
    }

    /// Rewrite the text of every text span, dropping spans left empty and
    /// re-merging neighbours.
    pub fn map_text<F>(self, mut f: F) -> TextRun
    where
        F: FnMut(&str) -> String,
    {
        let mut out = TextRun::new();
        for span in self.spans {
            match span.content {
                Inline::Text { text } => out.push(Span::text(f(&text), span.style)),
                _ => out.push(span),
            }
        }
        out
    }
}

/// Icon family for a file chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileIcon {
    Archive,
    Document,
    Audio,
    Video,
    Package,
    Generic,
}

/// A downloadable file attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentChip {
    /// Attachment id
    pub id: u64,

    /// Icon to show next to the name
    pub icon: FileIcon,

    /// File name styled as a link to the download URL
    pub name: TextRun,

    /// Download URL
    pub url: String,

    /// Human-readable size, e.g. "1.5 MB"
    pub size_label: String,

    /// Download counter caption, e.g. "Downloads: 12"
    pub caption: Option<String>,
}

/// Header of a quote block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteHeader {
    /// Free-form title
    Title(String),

    /// Structured citation
    Metadata {
        name: String,
        date: Option<String>,
        post_id: Option<u64>,
    },
}

/// A display-ready block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Styled text, possibly with inline glyphs and images
    Text(TextRun),

    /// Standalone image
    Image {
        url: String,
        width: Option<u32>,
        height: Option<u32>,
    },

    /// File attachment chip
    AttachmentChip(AttachmentChip),

    /// Aligned content
    Aligned {
        alignment: Alignment,
        blocks: Vec<ContentBlock>,
    },

    /// Collapsible spoiler
    Spoiler {
        title: Option<TextRun>,
        blocks: Vec<ContentBlock>,
    },

    /// Quotation
    Quote {
        header: Option<QuoteHeader>,
        /// Title header rendered with markup applied
        title: Option<TextRun>,
        blocks: Vec<ContentBlock>,
    },

    /// Code listing
    Code {
        title: Option<String>,
        blocks: Vec<ContentBlock>,
    },

    /// Content revealed above a reputation threshold
    Hidden {
        threshold: Option<u32>,
        blocks: Vec<ContentBlock>,
    },

    /// List with computed markers
    List {
        ordering: ListOrdering,
        blocks: Vec<ContentBlock>,
    },

    /// Staff notice
    Notice {
        kind: NoticeKind,
        blocks: Vec<ContentBlock>,
    },
}

impl ContentBlock {
    /// Nested blocks of a container block.
    pub fn children(&self) -> Option<&[ContentBlock]> {
        match self {
            ContentBlock::Aligned { blocks, .. }
            | ContentBlock::Spoiler { blocks, .. }
            | ContentBlock::Quote { blocks, .. }
            | ContentBlock::Code { blocks, .. }
            | ContentBlock::Hidden { blocks, .. }
            | ContentBlock::List { blocks, .. }
            | ContentBlock::Notice { blocks, .. } => Some(blocks),
            _ => None,
        }
    }

    /// Mutable access to nested blocks.
    pub fn children_mut(&mut self) -> Option<&mut Vec<ContentBlock>> {
        match self {
            ContentBlock::Aligned { blocks, .. }
            | ContentBlock::Spoiler { blocks, .. }
            | ContentBlock::Quote { blocks, .. }
            | ContentBlock::Code { blocks, .. }
            | ContentBlock::Hidden { blocks, .. }
            | ContentBlock::List { blocks, .. }
            | ContentBlock::Notice { blocks, .. } => Some(blocks),
            _ => None,
        }
    }

    /// Text run of a text block.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            ContentBlock::Text(run) => Some(run),
            _ => None,
        }
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentBlock::Text(_))
    }

    /// Check if this is an image or attachment chip.
    pub fn is_media(&self) -> bool {
        matches!(self, ContentBlock::Image { .. } | ContentBlock::AttachmentChip(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> StyleContext {
        StyleContext::new().with_bold()
    }

    #[test]
    fn test_push_merges_same_style() {
        let mut run = TextRun::new();
        run.push(Span::text("Hello ", StyleContext::new()));
        run.push(Span::text("world", StyleContext::new()));
        run.push(Span::text("!", bold()));
        assert_eq!(run.spans.len(), 2);
        assert_eq!(run.plain_text(), "Hello world!");
    }

    #[test]
    fn test_push_skips_empty_text() {
        let mut run = TextRun::new();
        run.push(Span::text("", StyleContext::new()));
        assert!(run.is_empty());
    }

    #[test]
    fn test_trim_newlines_across_spans() {
        let mut run = TextRun::new();
        run.push(Span::text("\n", StyleContext::new()));
        run.push(Span::text("\nabc\n", bold()));
        run.push(Span::text("\n\n", StyleContext::new()));
        run.trim_leading_newlines();
        run.trim_trailing_newlines();
        assert_eq!(run.plain_text(), "abc");
        assert_eq!(run.spans.len(), 1);
    }

    #[test]
    fn test_trim_stops_at_glyph() {
        let mut run = TextRun::new();
        run.push(Span {
            content: Inline::Snapback { post_id: 1 },
            style: StyleContext::new(),
        });
        run.push(Span::text("\n", StyleContext::new()));
        run.trim_leading_newlines();
        assert_eq!(run.first_char(), Some(OBJECT_REPLACEMENT));
        run.trim_trailing_newlines();
        assert_eq!(run.spans.len(), 1);
    }

    #[test]
    fn test_map_text_drops_emptied_spans() {
        let mut run = TextRun::new();
        run.push(Span::text("a", StyleContext::new()));
        run.push(Span::text("x", bold()));
        run.push(Span::text("b", StyleContext::new()));
        let run = run.map_text(|t| t.replace('x', ""));
        assert_eq!(run.spans.len(), 1);
        assert_eq!(run.plain_text(), "ab");
    }

    #[test]
    fn test_single_space() {
        assert!(TextRun::plain(" ", StyleContext::new()).is_single_space());
        assert!(!TextRun::plain("  ", StyleContext::new()).is_single_space());
    }

    #[test]
    fn test_block_serialization_is_tagged() {
        let block = ContentBlock::Text(TextRun::plain("hi", StyleContext::new()));
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.starts_with("{\"type\":\"text\""));
    }
}
