//! # unbb
//!
//! Forum markup rendering library for Rust.
//!
//! This library turns BBCode-style forum markup into display-ready content
//! blocks: styled text runs, images, attachment chips and structural
//! containers (quotes, spoilers, lists, code, hidden content, notices).
//!
//! ## Quick Start
//!
//! ```
//! use unbb::{render, ContentBlock, StyleContext};
//!
//! let blocks = render("[b]Hello[/b], world!", &[], &StyleContext::default());
//! assert_eq!(blocks.len(), 1);
//! assert!(matches!(blocks[0], ContentBlock::Text(_)));
//! ```
//!
//! ## Pipeline
//!
//! - **Tokenizer**: markup text into open/close/leaf/text tokens
//! - **Tree builder**: tokens into a tree, recovering from misnesting
//! - **Style renderer**: formatting tags folded into inherited styles
//! - **Normalizer**: leaves resolved, runs coalesced and trimmed, list
//!   markers and quote headers computed
//!
//! Rendering never fails: malformed markup degrades to literal text.

pub mod catalog;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Alignment, Attachment, AttachmentChip, AttachmentKind, Attachments, ContentBlock, FileIcon,
    Inline, ListOrdering, NoticeKind, QuoteHeader, Span, StyleContext, TextRun, ThemedColor,
    TypeSize,
};
pub use parser::ParseOptions;
pub use render::{
    CleanupOptions, CleanupPreset, JsonFormat, RenderOptions, RenderResult, RenderStats,
};

use rayon::prelude::*;
use std::path::Path;

/// Render markup into content blocks.
///
/// # Arguments
///
/// * `markup` - Forum markup text
/// * `attachments` - Attachments the post may reference
/// * `base` - Root style of the cascade
///
/// # Example
///
/// ```
/// use unbb::{render, Attachment, ContentBlock, StyleContext};
///
/// let files = [Attachment::file(7, "notes.txt", 2048, "https://example.com/7")];
/// let blocks = render("[attachment=7:notes]", &files, &StyleContext::default());
/// assert!(matches!(blocks[0], ContentBlock::AttachmentChip(_)));
/// ```
pub fn render(markup: &str, attachments: &[Attachment], base: &StyleContext) -> Vec<ContentBlock> {
    let table = Attachments::from(attachments);
    let options = RenderOptions::default().with_base_style(base.clone());
    render::run(markup, &table, &options)
}

/// Render markup with custom options.
///
/// # Example
///
/// ```
/// use unbb::{render_with_options, Attachments, CleanupPreset, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_cleanup_preset(CleanupPreset::Standard)
///     .with_utc_offset(180);
/// let blocks = render_with_options("[mergetime=0]", &Attachments::new(), &options);
/// assert_eq!(blocks.len(), 1);
/// ```
pub fn render_with_options(
    markup: &str,
    attachments: &Attachments,
    options: &RenderOptions,
) -> Vec<ContentBlock> {
    render::run(markup, attachments, options)
}

/// Render markup and collect statistics over the result.
pub fn render_with_stats(
    markup: &str,
    attachments: &Attachments,
    options: &RenderOptions,
) -> RenderResult {
    RenderResult::new(render::run(markup, attachments, options))
}

/// Render a markup file.
///
/// # Example
///
/// ```no_run
/// use unbb::{render_file, Attachments, RenderOptions};
///
/// let blocks = render_file("post.txt", &Attachments::new(), &RenderOptions::default())?;
/// # Ok::<(), unbb::Error>(())
/// ```
pub fn render_file<P: AsRef<Path>>(
    path: P,
    attachments: &Attachments,
    options: &RenderOptions,
) -> Result<Vec<ContentBlock>> {
    let markup = std::fs::read_to_string(path)?;
    Ok(render::run(&markup, attachments, options))
}

/// Load an attachment table from a JSON file.
pub fn load_attachments<P: AsRef<Path>>(path: P) -> Result<Attachments> {
    let json = std::fs::read_to_string(path)?;
    Attachments::from_json(&json)
}

/// Render a batch of posts sharing one attachment table.
///
/// Posts are rendered in parallel with Rayon unless `options.parallel` is
/// off. Output order matches input order.
pub fn render_many<S>(
    posts: &[S],
    attachments: &Attachments,
    options: &RenderOptions,
) -> Vec<Vec<ContentBlock>>
where
    S: AsRef<str> + Sync,
{
    if options.parallel {
        posts
            .par_iter()
            .map(|post| render::run(post.as_ref(), attachments, options))
            .collect()
    } else {
        posts
            .iter()
            .map(|post| render::run(post.as_ref(), attachments, options))
            .collect()
    }
}

/// Render markup on Tokio's blocking thread pool.
///
/// Keeps an async caller responsive while a large post is rendered.
#[cfg(feature = "async")]
pub async fn render_async(
    markup: String,
    attachments: Attachments,
    options: RenderOptions,
) -> Result<Vec<ContentBlock>> {
    tokio::task::spawn_blocking(move || render::run(&markup, &attachments, &options))
        .await
        .map_err(|e| Error::Other(format!("render task failed: {}", e)))
}

/// Builder for rendering posts with shared settings.
///
/// # Example
///
/// ```
/// use unbb::{Attachment, CleanupPreset, Unbb};
///
/// let text = Unbb::new()
///     .with_attachments([Attachment::image(1, "cat.png", "https://example.com/cat.png", 64, 64)])
///     .with_cleanup(CleanupPreset::Standard)
///     .render_text("[quote=\"Jane\"]Look: [attachment=1][/quote]");
/// assert!(text.contains("> Look: [image: https://example.com/cat.png]"));
/// ```
pub struct Unbb {
    attachments: Attachments,
    options: RenderOptions,
}

impl Unbb {
    /// Create a new Unbb builder.
    pub fn new() -> Self {
        Self {
            attachments: Attachments::new(),
            options: RenderOptions::default(),
        }
    }

    /// Set the attachment table.
    pub fn with_attachments<I>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Set the base style.
    pub fn with_base_style(mut self, style: StyleContext) -> Self {
        self.options = self.options.with_base_style(style);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options = self.options.with_cleanup_preset(preset);
        self
    }

    /// Set the date format for merge timestamps.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.options = self.options.with_date_format(format);
        self
    }

    /// Set the UTC offset for merge timestamps, in minutes.
    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.options = self.options.with_utc_offset(minutes);
        self
    }

    /// Set the maximum nesting depth of container tags.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        let parse = self.options.parse.clone().with_max_depth(depth);
        self.options = self.options.with_parse_options(parse);
        self
    }

    /// Disable parallel batch rendering.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The configured render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markup into blocks.
    pub fn render(&self, markup: &str) -> Vec<ContentBlock> {
        render::run(markup, &self.attachments, &self.options)
    }

    /// Render markup and collect statistics.
    pub fn render_with_stats(&self, markup: &str) -> RenderResult {
        RenderResult::new(self.render(markup))
    }

    /// Render a batch of posts.
    pub fn render_many<S: AsRef<str> + Sync>(&self, posts: &[S]) -> Vec<Vec<ContentBlock>> {
        render_many(posts, &self.attachments, &self.options)
    }

    /// Render a markup file.
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ContentBlock>> {
        render_file(path, &self.attachments, &self.options)
    }

    /// Render markup to display text.
    pub fn render_text(&self, markup: &str) -> String {
        render::to_text(&self.render(markup))
    }

    /// Render markup to JSON.
    pub fn render_json(&self, markup: &str, format: JsonFormat) -> Result<String> {
        render::to_json(&self.render(markup), format)
    }
}

impl Default for Unbb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Entry Point Tests ====================

    #[test]
    fn test_render_empty_input() {
        assert!(render("", &[], &StyleContext::default()).is_empty());
        assert!(render("\n\n\n", &[], &StyleContext::default()).is_empty());
    }

    #[test]
    fn test_render_uses_base_style() {
        let base = StyleContext::new().with_italic();
        let blocks = render("plain", &[], &base);
        let run = blocks[0].as_text().unwrap();
        assert!(run.spans[0].style.italic);
    }

    #[test]
    fn test_render_file_missing() {
        let result = render_file(
            "/nonexistent/post.txt",
            &Attachments::new(),
            &RenderOptions::default(),
        );
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_render_many_keeps_order() {
        let posts = ["one", "[b]two[/b]", "three"];
        let parallel = render_many(&posts, &Attachments::new(), &RenderOptions::default());
        let sequential =
            render_many(&posts, &Attachments::new(), &RenderOptions::default().sequential());
        assert_eq!(parallel, sequential);
        assert_eq!(render::plain_text(&parallel[1]), "two");
    }

    // ==================== Builder Pattern Tests ====================

    #[test]
    fn test_unbb_builder_default() {
        let builder = Unbb::default();
        assert!(builder.options().cleanup.is_none());
        assert!(builder.options().parallel);
    }

    #[test]
    fn test_unbb_builder_chained() {
        let builder = Unbb::new()
            .with_cleanup(CleanupPreset::Aggressive)
            .with_date_format("%Y")
            .with_utc_offset(60)
            .with_max_depth(8)
            .sequential();

        assert!(builder.options().cleanup.is_some());
        assert_eq!(builder.options().date_format, "%Y");
        assert_eq!(builder.options().utc_offset_minutes, 60);
        assert_eq!(builder.options().parse.max_depth, 8);
        assert!(!builder.options().parallel);
    }

    #[test]
    fn test_unbb_render_json() {
        let json = Unbb::new()
            .render_json("[i]x[/i]", JsonFormat::Compact)
            .unwrap();
        assert!(json.starts_with("[{\"type\":\"text\""));
    }

    #[test]
    fn test_unbb_render_with_stats() {
        let result = Unbb::new().render_with_stats("[list][*]one two[*]three[/list]");
        assert_eq!(result.stats.list_count, 1);
        assert_eq!(result.stats.word_count, 5);
    }
}
