//! Normalization of the styled tree into display blocks.
//!
//! Every sibling list is processed on its own:
//!
//! 1. leaves are resolved (attachments, timestamps, glyphs);
//! 2. each item is classified as inline, media, chip or block;
//! 3. a left-to-right scan accumulates inline content into a run, merging
//!    media that touches inline content and flushing on everything else;
//! 4. each flushed run is trimmed, gets its list markers and entity escapes
//!    substituted, and is emitted unless it ended up empty.

use std::fmt::Write as _;

use chrono::DateTime;

use super::attachment::{AttachmentResolver, Resolved};
use super::marker::ListScope;
use super::quote::parse_quote_attribute;
use super::{CleanupPipeline, RenderOptions};
use crate::model::{
    attribute_value, decode_brackets, Attachments, ContentBlock, Inline, Leaf, Span, StyleContext, StyledNode,
    Structure, TextRun,
};

/// A resolved sibling, classified for the coalescing scan.
#[derive(Debug)]
enum Item {
    /// Text and text-like glyphs
    Inline(TextRun),
    /// Image that may flow with adjacent text
    Media { inline: Span, block: ContentBlock },
    /// File chip, always standalone
    Chip(ContentBlock),
    /// Structural block
    Block(ContentBlock),
}

/// What follows a run being flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Media,
    Chip,
    Block,
    End,
}

/// Turns a styled tree into content blocks.
pub struct Normalizer<'a> {
    resolver: AttachmentResolver<'a>,
    options: &'a RenderOptions,
    cleanup: Option<CleanupPipeline>,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer over an attachment table.
    pub fn new(attachments: &'a Attachments, options: &'a RenderOptions) -> Self {
        Self {
            resolver: AttachmentResolver::new(attachments),
            options,
            cleanup: options.cleanup.clone().map(CleanupPipeline::new),
        }
    }

    /// Normalize a top-level sibling list.
    pub fn normalize(&self, nodes: Vec<StyledNode>) -> Vec<ContentBlock> {
        self.normalize_siblings(nodes, None)
    }

    fn normalize_siblings(
        &self,
        nodes: Vec<StyledNode>,
        scope: Option<&mut ListScope>,
    ) -> Vec<ContentBlock> {
        let items = self.resolve(nodes);
        self.coalesce(items, scope)
    }

    // ---- Resolution ----

    fn resolve(&self, nodes: Vec<StyledNode>) -> Vec<Item> {
        let mut items: Vec<Item> = Vec::with_capacity(nodes.len());
        for node in nodes {
            let item = match node {
                StyledNode::Text { text, style } => Item::Inline(TextRun::plain(text, style)),
                StyledNode::Leaf { leaf, style } => self.resolve_leaf(leaf, style),
                StyledNode::Structure {
                    kind,
                    attribute,
                    clause,
                    children,
                    ..
                } => match self.structure(kind, attribute, clause, children) {
                    Some(block) => Item::Block(block),
                    None => continue,
                },
            };

            match (items.last_mut(), item) {
                (Some(Item::Inline(last)), Item::Inline(run)) => last.append(run),
                (_, item) => items.push(item),
            }
        }
        items
    }

    fn resolve_leaf(&self, leaf: Leaf, style: StyleContext) -> Item {
        match leaf {
            Leaf::Snapback(post_id) => glyph(Inline::Snapback { post_id }, style),
            Leaf::Smile(smile) => glyph(
                Inline::Smile {
                    name: smile.name.to_string(),
                    asset: smile.asset.to_string(),
                    alt: smile.alt.to_string(),
                },
                style,
            ),
            Leaf::MergeTime(secs) => {
                let text = self.format_merge_time(secs).unwrap_or_else(|| {
                    log::warn!("cannot format merge time {}", secs);
                    format!("[mergetime={}]", secs)
                });
                Item::Inline(TextRun::plain(text, style))
            }
            Leaf::Image(url) => media(&url, None, None, style),
            Leaf::Attachment(token) => match self.resolver.resolve(&token, &style) {
                Resolved::Chip(chip) => Item::Chip(ContentBlock::AttachmentChip(chip)),
                Resolved::Image { url, width, height } => media(&url, width, height, style),
                Resolved::Missing(text) => Item::Inline(TextRun::plain(text, style)),
            },
        }
    }

    fn format_merge_time(&self, secs: i64) -> Option<String> {
        let utc = DateTime::from_timestamp(secs, 0)?;
        let local = utc.with_timezone(&self.options.utc_offset());
        let mut out = String::new();
        write!(out, "{}", local.format(&self.options.date_format)).ok()?;
        Some(out)
    }

    fn structure(
        &self,
        kind: Structure,
        attribute: Option<String>,
        clause: Option<TextRun>,
        children: Vec<StyledNode>,
    ) -> Option<ContentBlock> {
        let value = attribute
            .as_deref()
            .map(attribute_value)
            .filter(|v| !v.is_empty());

        let block = match kind {
            Structure::Align(alignment) => {
                let blocks = self.normalize_siblings(children, None);
                if blocks.is_empty() {
                    log::debug!("dropping empty {:?} block", alignment);
                    return None;
                }
                ContentBlock::Aligned { alignment, blocks }
            }
            Structure::Spoiler => ContentBlock::Spoiler {
                title: clause,
                blocks: self.normalize_siblings(children, None),
            },
            Structure::Quote => ContentBlock::Quote {
                header: parse_quote_attribute(attribute.as_deref()),
                title: clause,
                blocks: self.normalize_siblings(children, None),
            },
            Structure::Code => ContentBlock::Code {
                title: value.map(decode_brackets),
                blocks: self.normalize_siblings(children, None),
            },
            Structure::Hide => ContentBlock::Hidden {
                threshold: value.and_then(|v| v.parse().ok()),
                blocks: self.normalize_siblings(children, None),
            },
            Structure::List(ordering) => {
                let mut scope = ListScope::new(ordering);
                ContentBlock::List {
                    ordering,
                    blocks: self.normalize_siblings(children, Some(&mut scope)),
                }
            }
            Structure::Notice(kind) => ContentBlock::Notice {
                kind,
                blocks: self.normalize_siblings(children, None),
            },
        };
        Some(block)
    }

    // ---- Coalescing ----

    fn coalesce(&self, items: Vec<Item>, mut scope: Option<&mut ListScope>) -> Vec<ContentBlock> {
        let mut out = Vec::new();
        let mut run = TextRun::new();
        let mut items = items.into_iter().peekable();

        while let Some(item) = items.next() {
            match item {
                Item::Inline(inline) => run.append(inline),
                Item::Media { inline, block } => {
                    let left =
                        !run.is_empty() && !run.ends_with_newline() && !run.is_single_space();
                    let right = matches!(
                        items.peek(),
                        Some(Item::Inline(next))
                            if next.first_char() != Some('\n') && !next.is_single_space()
                    );
                    if left || right {
                        run.push(inline);
                    } else {
                        self.flush(&mut run, &mut out, Next::Media, scope.as_deref_mut());
                        out.push(block);
                    }
                }
                Item::Chip(block) => {
                    self.flush(&mut run, &mut out, Next::Chip, scope.as_deref_mut());
                    out.push(block);
                }
                Item::Block(block) => {
                    self.flush(&mut run, &mut out, Next::Block, scope.as_deref_mut());
                    out.push(block);
                }
            }
        }

        self.flush(&mut run, &mut out, Next::End, scope);
        out
    }

    fn flush(
        &self,
        run: &mut TextRun,
        out: &mut Vec<ContentBlock>,
        next: Next,
        scope: Option<&mut ListScope>,
    ) {
        if run.is_empty() {
            return;
        }

        let mut text = std::mem::take(run);
        if let Some(cleanup) = &self.cleanup {
            text = cleanup.process_run(text);
        }
        let ended_with_newline = text.ends_with_newline();

        if !out.last().is_some_and(ContentBlock::is_media) {
            text.trim_leading_newlines();
        }
        if matches!(next, Next::Block | Next::End) {
            text.trim_trailing_newlines();
        }

        if let Some(scope) = scope {
            text = scope.substitute(text);
        }
        text = decode_entities(text);

        if next == Next::Chip && !text.is_empty() && !ended_with_newline {
            let style = text
                .spans
                .last()
                .map(|span| span.style.clone())
                .unwrap_or_default();
            text.push(Span::text("\n", style));
        }

        if !text.is_empty() {
            out.push(ContentBlock::Text(text));
        }
    }
}

fn glyph(content: Inline, style: StyleContext) -> Item {
    let mut run = TextRun::new();
    run.push(Span { content, style });
    Item::Inline(run)
}

fn media(url: &str, width: Option<u32>, height: Option<u32>, style: StyleContext) -> Item {
    Item::Media {
        inline: Span {
            content: Resolved::image_inline(url, width, height),
            style,
        },
        block: Resolved::image_block(url, width, height),
    }
}

/// Decode the bracket escapes `&#91;` and `&#93;`.
fn decode_entities(run: TextRun) -> TextRun {
    run.map_text(decode_brackets)
}

/// Re-apply the newline trim policy to an already normalized sequence.
///
/// Text blocks lose leading newlines when they come first or follow a
/// structural block, and trailing newlines when they come last or precede
/// one. Text blocks left empty are dropped. Containers are processed
/// recursively.
pub fn retrim(blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
    let structural: Vec<bool> = blocks
        .iter()
        .map(|block| !block.is_text() && !block.is_media())
        .collect();
    let len = blocks.len();

    let mut out = Vec::with_capacity(len);
    for (i, mut block) in blocks.into_iter().enumerate() {
        if let ContentBlock::Text(run) = &mut block {
            if i == 0 || structural[i - 1] {
                run.trim_leading_newlines();
            }
            if i + 1 == len || structural[i + 1] {
                run.trim_trailing_newlines();
            }
            if run.is_empty() {
                continue;
            }
        } else if let Some(children) = block.children_mut() {
            *children = retrim(std::mem::take(children));
        }
        out.push(block);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attachment, FileIcon, ListOrdering, QuoteHeader};
    use crate::parser::parse;
    use crate::render::StyleRenderer;

    fn render_with(input: &str, attachments: &Attachments, options: &RenderOptions) -> Vec<ContentBlock> {
        let nodes = parse(input, &options.parse);
        let styled = StyleRenderer::new(options).render(&nodes, &options.base_style);
        Normalizer::new(attachments, options).normalize(styled)
    }

    fn render(input: &str) -> Vec<ContentBlock> {
        render_with(input, &Attachments::new(), &RenderOptions::default())
    }

    fn table() -> Attachments {
        [
            Attachment::file(1, "archive.zip", 2048, "https://example.com/a"),
            Attachment::image(2, "pic.png", "https://example.com/p", 10, 20),
        ]
        .into_iter()
        .collect()
    }

    fn text(block: &ContentBlock) -> String {
        block.as_text().map(TextRun::plain_text).unwrap_or_default()
    }

    // ==== Coalescing ====

    #[test]
    fn test_inline_content_merges() {
        let blocks = render("a [b]b[/b] [snapback=4] c");
        assert_eq!(blocks.len(), 1);
        let run = blocks[0].as_text().unwrap();
        assert_eq!(run.plain_text(), "a b  c");
        assert!(run
            .spans
            .iter()
            .any(|s| s.content == Inline::Snapback { post_id: 4 }));
    }

    #[test]
    fn test_image_between_text_is_inline() {
        let blocks = render("look [img]https://x/y.png[/img] here");
        assert_eq!(blocks.len(), 1);
        let run = blocks[0].as_text().unwrap();
        assert!(matches!(run.spans[1].content, Inline::Image { .. }));
    }

    #[test]
    fn test_image_on_own_line_is_block() {
        let blocks = render("before\n[img]https://x/y.png[/img]\nafter");
        assert_eq!(blocks.len(), 3);
        assert_eq!(text(&blocks[0]), "before\n");
        assert!(matches!(blocks[1], ContentBlock::Image { .. }));
        assert_eq!(text(&blocks[2]), "\nafter");
    }

    #[test]
    fn test_image_alone_is_block() {
        let blocks = render("[img]https://x/y.png[/img]");
        assert_eq!(
            blocks,
            vec![ContentBlock::Image {
                url: "https://x/y.png".to_string(),
                width: None,
                height: None,
            }]
        );
    }

    // ==== Trim ====

    #[test]
    fn test_trim_around_blocks() {
        let blocks = render("\n\nintro\n\n[quote]q[/quote]\n\noutro\n\n");
        assert_eq!(blocks.len(), 3);
        assert_eq!(text(&blocks[0]), "intro");
        assert_eq!(text(&blocks[2]), "outro");
    }

    #[test]
    fn test_whitespace_only_run_dropped() {
        let blocks = render("[quote]a[/quote]\n\n[quote]b[/quote]");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| !b.is_text()));
    }

    #[test]
    fn test_retrim_is_idempotent() {
        let blocks = render("x\n[img]https://x/y.png[/img]\n[center]\nc\n[/center]\n\ny\n");
        assert_eq!(retrim(blocks.clone()), blocks);
    }

    // ==== Leaves ====

    #[test]
    fn test_file_chip_standalone_with_delimiter() {
        let blocks = render_with("see [attachment=1:zip] now", &table(), &RenderOptions::default());
        assert_eq!(blocks.len(), 3);
        assert_eq!(text(&blocks[0]), "see \n");
        let ContentBlock::AttachmentChip(chip) = &blocks[1] else {
            panic!("expected chip");
        };
        assert_eq!(chip.icon, FileIcon::Archive);
        assert_eq!(chip.size_label, "2.0 KB");
        assert_eq!(text(&blocks[2]), " now");
    }

    #[test]
    fn test_image_attachment_sized() {
        let blocks = render_with("[attachment=2]", &table(), &RenderOptions::default());
        assert_eq!(
            blocks,
            vec![ContentBlock::Image {
                url: "https://example.com/p".to_string(),
                width: Some(10),
                height: Some(20),
            }]
        );
    }

    #[test]
    fn test_unknown_attachment_is_text() {
        let blocks = render_with("[attachment=999]", &table(), &RenderOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(text(&blocks[0]), "[attachment=999]");
    }

    #[test]
    fn test_merge_time_formatting() {
        let options = RenderOptions::new().with_utc_offset(180);
        let blocks = render_with("[b][mergetime=0][/b]", &Attachments::new(), &options);
        let run = blocks[0].as_text().unwrap();
        assert_eq!(run.plain_text(), "01.01.1970, 03:00");
        assert!(run.spans[0].style.bold);
    }

    #[test]
    fn test_merge_time_bad_format_falls_back() {
        let options = RenderOptions::new().with_date_format("%Q");
        let blocks = render_with("[mergetime=5]", &Attachments::new(), &options);
        assert_eq!(text(&blocks[0]), "[mergetime=5]");
    }

    // ==== Structure ====

    #[test]
    fn test_list_markers() {
        let blocks = render("[list=I][*]a[*]b[*]c[*]d[/list]");
        let ContentBlock::List { ordering, blocks } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(*ordering, ListOrdering::RomanUpper);
        assert_eq!(text(&blocks[0]), "I. a\nII. b\nIII. c\nIV. d");
    }

    #[test]
    fn test_marker_outside_list_is_text() {
        let blocks = render("[*]a");
        assert_eq!(text(&blocks[0]), "[*]a");
    }

    #[test]
    fn test_nested_list_has_own_counter() {
        let blocks = render("[list=1][*]a[list=1][*]x[*]y[/list][*]b[/list]");
        let ContentBlock::List { blocks, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(text(&blocks[0]), "1. a");
        let ContentBlock::List { blocks: inner, .. } = &blocks[1] else {
            panic!("expected nested list");
        };
        assert_eq!(text(&inner[0]), "1. x\n2. y");
        assert_eq!(text(&blocks[2]), "2. b");
    }

    #[test]
    fn test_escaped_marker_is_not_substituted() {
        let blocks = render("[list][*]a &#91;*&#93;[/list]");
        let ContentBlock::List { blocks, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(text(&blocks[0]), "\u{2022} a [*]");
    }

    #[test]
    fn test_empty_alignment_dropped() {
        let blocks = render("a[center][/center]b");
        assert_eq!(blocks.len(), 1);
        assert_eq!(text(&blocks[0]), "ab");
    }

    #[test]
    fn test_empty_spoiler_kept() {
        let blocks = render("[spoiler][/spoiler]");
        assert!(matches!(&blocks[0], ContentBlock::Spoiler { blocks, .. } if blocks.is_empty()));
    }

    #[test]
    fn test_quote_header_and_hide_threshold() {
        let blocks = render("[quote=\"Jane\"]x[/quote][hide=100]y[/hide][code=Rust]z[/code]");
        let ContentBlock::Quote { header, title, .. } = &blocks[0] else {
            panic!("expected quote");
        };
        assert_eq!(*header, Some(QuoteHeader::Title("Jane".to_string())));
        assert_eq!(title.as_ref().map(TextRun::plain_text).as_deref(), Some("Jane"));
        assert!(matches!(blocks[1], ContentBlock::Hidden { threshold: Some(100), .. }));
        assert!(matches!(&blocks[2], ContentBlock::Code { title: Some(t), .. } if t == "Rust"));
    }
}
