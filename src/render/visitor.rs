//! Visitor pattern for customizing text output.
//!
//! A visitor is consulted for every block (and every inline image) while
//! [`to_text_with_visitor`](super::to_text_with_visitor) walks the block
//! sequence, and may keep, replace or drop it.
//!
//! # Example
//!
//! ```
//! use unbb::render::visitor::{BlockVisitor, VisitorAction};
//! use unbb::model::AttachmentChip;
//!
//! struct HideFiles;
//!
//! impl BlockVisitor for HideFiles {
//!     fn visit_attachment(&mut self, _chip: &AttachmentChip) -> VisitorAction {
//!         VisitorAction::Replace("[file omitted]\n".to_string())
//!     }
//! }
//! ```

use crate::model::{AttachmentChip, ContentBlock, QuoteHeader, TextRun};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting content blocks during text rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait BlockVisitor: Send + Sync {
    /// Called before rendering a text block.
    fn visit_text(&mut self, run: &TextRun) -> VisitorAction {
        let _ = run;
        VisitorAction::Continue
    }

    /// Called before rendering an image, standalone or inline.
    fn visit_image(&mut self, url: &str, width: Option<u32>, height: Option<u32>) -> VisitorAction {
        let _ = (url, width, height);
        VisitorAction::Continue
    }

    /// Called before rendering a file attachment chip.
    fn visit_attachment(&mut self, chip: &AttachmentChip) -> VisitorAction {
        let _ = chip;
        VisitorAction::Continue
    }

    /// Called before rendering a spoiler.
    ///
    /// # Arguments
    /// * `title` - Rendered spoiler title, if any
    /// * `blocks` - Hidden content
    fn visit_spoiler(&mut self, title: Option<&TextRun>, blocks: &[ContentBlock]) -> VisitorAction {
        let _ = (title, blocks);
        VisitorAction::Continue
    }

    /// Called before rendering a quote.
    fn visit_quote(&mut self, header: Option<&QuoteHeader>, blocks: &[ContentBlock]) -> VisitorAction {
        let _ = (header, blocks);
        VisitorAction::Continue
    }

    /// Called before rendering a code block.
    fn visit_code(&mut self, title: Option<&str>, blocks: &[ContentBlock]) -> VisitorAction {
        let _ = (title, blocks);
        VisitorAction::Continue
    }

    /// Called before rendering a hidden block.
    fn visit_hidden(&mut self, threshold: Option<u32>, blocks: &[ContentBlock]) -> VisitorAction {
        let _ = (threshold, blocks);
        VisitorAction::Continue
    }

    /// Called when entering any container block.
    fn on_container_start(&mut self, block: &ContentBlock) {
        let _ = block;
    }

    /// Called when leaving any container block.
    fn on_container_end(&mut self, block: &ContentBlock) {
        let _ = block;
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl BlockVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl BlockVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _url: &str, _width: Option<u32>, _height: Option<u32>) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that renders spoilers as a one-line placeholder.
#[derive(Debug, Clone, Default)]
pub struct CollapseSpoilersVisitor;

impl BlockVisitor for CollapseSpoilersVisitor {
    fn visit_spoiler(&mut self, title: Option<&TextRun>, _blocks: &[ContentBlock]) -> VisitorAction {
        let label = title
            .map(TextRun::plain_text)
            .unwrap_or_else(|| "Spoiler".to_string());
        VisitorAction::Replace(format!("[{}]\n", label))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn BlockVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: BlockVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action<F>(&mut self, mut f: F) -> VisitorAction
    where
        F: FnMut(&mut dyn BlockVisitor) -> VisitorAction,
    {
        for visitor in &mut self.visitors {
            let action = f(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockVisitor for CompositeVisitor {
    fn visit_text(&mut self, run: &TextRun) -> VisitorAction {
        self.first_action(|v| v.visit_text(run))
    }

    fn visit_image(&mut self, url: &str, width: Option<u32>, height: Option<u32>) -> VisitorAction {
        self.first_action(|v| v.visit_image(url, width, height))
    }

    fn visit_attachment(&mut self, chip: &AttachmentChip) -> VisitorAction {
        self.first_action(|v| v.visit_attachment(chip))
    }

    fn visit_spoiler(&mut self, title: Option<&TextRun>, blocks: &[ContentBlock]) -> VisitorAction {
        self.first_action(|v| v.visit_spoiler(title, blocks))
    }

    fn visit_quote(&mut self, header: Option<&QuoteHeader>, blocks: &[ContentBlock]) -> VisitorAction {
        self.first_action(|v| v.visit_quote(header, blocks))
    }

    fn visit_code(&mut self, title: Option<&str>, blocks: &[ContentBlock]) -> VisitorAction {
        self.first_action(|v| v.visit_code(title, blocks))
    }

    fn visit_hidden(&mut self, threshold: Option<u32>, blocks: &[ContentBlock]) -> VisitorAction {
        self.first_action(|v| v.visit_hidden(threshold, blocks))
    }

    fn on_container_start(&mut self, block: &ContentBlock) {
        for visitor in &mut self.visitors {
            visitor.on_container_start(block);
        }
    }

    fn on_container_end(&mut self, block: &ContentBlock) {
        for visitor in &mut self.visitors {
            visitor.on_container_end(block);
        }
    }
}
