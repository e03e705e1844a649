//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{ContentBlock, Inline, TextRun};

/// Result of rendering one post: the blocks plus statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered blocks
    pub blocks: Vec<ContentBlock>,

    /// Content statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a result, computing statistics from the blocks.
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        let stats = RenderStats::from_blocks(&blocks);
        Self { blocks, stats }
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if nothing was rendered.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Statistics over a rendered block sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of text blocks
    pub text_block_count: u32,

    /// Number of images, standalone or inline
    pub image_count: u32,

    /// Number of file attachment chips
    pub attachment_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of spoilers
    pub spoiler_count: u32,

    /// Number of lists
    pub list_count: u32,

    /// Number of smile glyphs
    pub smile_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics over a block sequence, descending into containers.
    pub fn from_blocks(blocks: &[ContentBlock]) -> Self {
        let mut stats = Self::new();
        stats.add_blocks(blocks);
        stats
    }

    fn add_blocks(&mut self, blocks: &[ContentBlock]) {
        for block in blocks {
            match block {
                ContentBlock::Text(run) => {
                    self.text_block_count += 1;
                    self.add_run(run);
                }
                ContentBlock::Image { .. } => self.image_count += 1,
                ContentBlock::AttachmentChip(_) => self.attachment_count += 1,
                ContentBlock::Quote { .. } => self.quote_count += 1,
                ContentBlock::Spoiler { .. } => self.spoiler_count += 1,
                ContentBlock::List { .. } => self.list_count += 1,
                _ => {}
            }
            if let Some(children) = block.children() {
                self.add_blocks(children);
            }
        }
    }

    fn add_run(&mut self, run: &TextRun) {
        for span in &run.spans {
            match &span.content {
                Inline::Text { text } => self.count_text(text),
                Inline::Smile { .. } => self.smile_count += 1,
                Inline::Image { .. } => self.image_count += 1,
                Inline::Snapback { .. } => {}
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.text_block_count += other.text_block_count;
        self.image_count += other.image_count;
        self.attachment_count += other.attachment_count;
        self.quote_count += other.quote_count;
        self.spoiler_count += other.spoiler_count;
        self.list_count += other.list_count;
        self.smile_count += other.smile_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
