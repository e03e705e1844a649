//! Plain text rendering of content blocks.

use super::visitor::{BlockVisitor, DefaultVisitor, VisitorAction};
use crate::model::{ContentBlock, Inline, NoticeKind, QuoteHeader, TextRun};

/// Render blocks as display text.
pub fn to_text(blocks: &[ContentBlock]) -> String {
    to_text_with_visitor(blocks, &mut DefaultVisitor)
}

/// Render blocks as display text, consulting a visitor for every element.
pub fn to_text_with_visitor(blocks: &[ContentBlock], visitor: &mut dyn BlockVisitor) -> String {
    let mut writer = TextWriter {
        out: String::new(),
        visitor,
    };
    writer.write_blocks(blocks, "");
    let trimmed = writer.out.trim_end_matches('\n').len();
    writer.out.truncate(trimmed);
    writer.out
}

/// Concatenated text-span contents of all text blocks, in document order.
pub fn plain_text(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    collect_plain(blocks, &mut out);
    out
}

fn collect_plain(blocks: &[ContentBlock], out: &mut String) {
    for block in blocks {
        match block {
            ContentBlock::Text(run) => out.push_str(&run.plain_text()),
            other => {
                if let Some(children) = other.children() {
                    collect_plain(children, out);
                }
            }
        }
    }
}

struct TextWriter<'v> {
    out: String,
    visitor: &'v mut dyn BlockVisitor,
}

impl TextWriter<'_> {
    fn write_blocks(&mut self, blocks: &[ContentBlock], prefix: &str) {
        for block in blocks {
            self.write_block(block, prefix);
        }
    }

    fn write_block(&mut self, block: &ContentBlock, prefix: &str) {
        let action = match block {
            ContentBlock::Text(run) => self.visitor.visit_text(run),
            ContentBlock::Image { url, width, height } => {
                self.visitor.visit_image(url, *width, *height)
            }
            ContentBlock::AttachmentChip(chip) => self.visitor.visit_attachment(chip),
            ContentBlock::Spoiler { title, blocks } => {
                self.visitor.visit_spoiler(title.as_ref(), blocks)
            }
            ContentBlock::Quote { header, blocks, .. } => {
                self.visitor.visit_quote(header.as_ref(), blocks)
            }
            ContentBlock::Code { title, blocks } => {
                self.visitor.visit_code(title.as_deref(), blocks)
            }
            ContentBlock::Hidden { threshold, blocks } => {
                self.visitor.visit_hidden(*threshold, blocks)
            }
            ContentBlock::Aligned { .. } | ContentBlock::List { .. } | ContentBlock::Notice { .. } => {
                VisitorAction::Continue
            }
        };

        match action {
            VisitorAction::Skip => return,
            VisitorAction::Replace(text) => {
                self.out.push_str(&text);
                return;
            }
            VisitorAction::Continue => {}
        }

        match block {
            ContentBlock::Text(run) => {
                let text = self.run_text(run);
                self.write_lines(&text, prefix);
            }
            ContentBlock::Image { url, .. } => {
                self.write_lines(&format!("[image: {}]", url), prefix);
            }
            ContentBlock::AttachmentChip(chip) => {
                let mut line = format!("[file: {}, {}]", chip.name.plain_text(), chip.size_label);
                if let Some(caption) = &chip.caption {
                    line.push_str(&format!(" ({})", caption));
                }
                self.write_lines(&line, prefix);
            }
            ContentBlock::Aligned { blocks, .. } | ContentBlock::List { blocks, .. } => {
                self.write_container(block, blocks, None, prefix, prefix);
            }
            ContentBlock::Spoiler { title, blocks } => {
                let header = match title {
                    Some(title) => format!("Spoiler: {}", self.run_text(title)),
                    None => "Spoiler".to_string(),
                };
                let inner = format!("{}  ", prefix);
                self.write_container(block, blocks, Some(header), prefix, &inner);
            }
            ContentBlock::Quote {
                header,
                title,
                blocks,
            } => {
                let line = match (title, header) {
                    (Some(title), _) => Some(format!("{}:", self.run_text(title))),
                    (None, Some(header)) => Some(quote_header_line(header)),
                    (None, None) => None,
                };
                let inner = format!("{}> ", prefix);
                self.write_container(block, blocks, line, prefix, &inner);
            }
            ContentBlock::Code { title, blocks } => {
                let fence = format!("```{}", title.as_deref().unwrap_or_default());
                self.write_container(block, blocks, Some(fence), prefix, prefix);
                self.write_lines("```", prefix);
            }
            ContentBlock::Hidden { threshold, blocks } => {
                let header = match threshold {
                    Some(n) => format!("Hidden (reputation {}+):", n),
                    None => "Hidden:".to_string(),
                };
                let inner = format!("{}  ", prefix);
                self.write_container(block, blocks, Some(header), prefix, &inner);
            }
            ContentBlock::Notice { kind, blocks } => {
                let header = match kind {
                    NoticeKind::Curator => "Curator:",
                    NoticeKind::Moderator => "Moderator:",
                    NoticeKind::Admin => "Administrator:",
                };
                let inner = format!("{}| ", prefix);
                self.write_container(block, blocks, Some(header.to_string()), prefix, &inner);
            }
        }
    }

    fn write_container(
        &mut self,
        block: &ContentBlock,
        blocks: &[ContentBlock],
        header: Option<String>,
        prefix: &str,
        inner: &str,
    ) {
        self.visitor.on_container_start(block);
        if let Some(header) = header {
            self.write_lines(&header, prefix);
        }
        self.write_blocks(blocks, inner);
        self.visitor.on_container_end(block);
    }

    fn run_text(&mut self, run: &TextRun) -> String {
        let mut text = String::new();
        for span in &run.spans {
            match &span.content {
                Inline::Text { text: t } => text.push_str(t),
                Inline::Smile { alt, .. } => text.push_str(alt),
                Inline::Snapback { post_id } => text.push_str(&format!(">>{}", post_id)),
                Inline::Image { url, width, height } => {
                    match self.visitor.visit_image(url, *width, *height) {
                        VisitorAction::Continue => text.push_str(&format!("[image: {}]", url)),
                        VisitorAction::Replace(r) => text.push_str(&r),
                        VisitorAction::Skip => {}
                    }
                }
            }
        }
        text
    }

    fn write_lines(&mut self, text: &str, prefix: &str) {
        for line in text.split('\n') {
            self.out.push_str(prefix);
            self.out.push_str(line);
            self.out.push('\n');
        }
    }
}

fn quote_header_line(header: &QuoteHeader) -> String {
    match header {
        QuoteHeader::Title(title) => format!("{}:", title),
        QuoteHeader::Metadata { name, date, .. } => match date {
            Some(date) => format!("{} ({}) wrote:", name, date),
            None => format!("{} wrote:", name),
        },
    }
}
