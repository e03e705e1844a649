//! One full pass: parse, style, normalize.

use super::{Normalizer, RenderOptions, StyleRenderer};
use crate::model::{decode_brackets, Attachments, ContentBlock, Span, StyleContext, TextRun};
use crate::parser;

/// Run the whole pipeline over one markup text.
pub fn run(markup: &str, attachments: &Attachments, options: &RenderOptions) -> Vec<ContentBlock> {
    let nodes = parser::parse(markup, &options.parse);
    let styled = StyleRenderer::new(options).render(&nodes, &options.base_style);
    let blocks = Normalizer::new(attachments, options).normalize(styled);

    log::debug!(
        "rendered {} bytes of markup into {} top-level blocks",
        markup.len(),
        blocks.len()
    );
    blocks
}

/// Render an attribute clause (spoiler or quote title) into a single run.
///
/// Runs the pipeline with an empty attachment table, `base` as the root
/// style and `max_depth` as the nesting limit. Block structure in the clause
/// is flattened into newlines. With no depth left the clause is kept as
/// literal text.
pub(crate) fn render_clause(
    markup: &str,
    base: &StyleContext,
    options: &RenderOptions,
    max_depth: usize,
) -> Option<TextRun> {
    if max_depth == 0 {
        log::debug!("nesting limit reached, keeping clause {:?} as text", markup);
        let run = TextRun::plain(decode_brackets(markup), base.clone());
        return (!run.is_empty()).then_some(run);
    }

    let options = options
        .clone()
        .with_parse_options(options.parse.clone().with_max_depth(max_depth));
    let empty = Attachments::new();
    let nodes = parser::parse(markup, &options.parse);
    let styled = StyleRenderer::new(&options).render(&nodes, base);
    let blocks = Normalizer::new(&empty, &options).normalize(styled);

    let mut run = TextRun::new();
    flatten(&blocks, base, &mut run);
    (!run.is_empty()).then_some(run)
}

fn flatten(blocks: &[ContentBlock], base: &StyleContext, run: &mut TextRun) {
    for block in blocks {
        match block {
            ContentBlock::Text(text) => {
                if !run.is_empty() && !run.ends_with_newline() {
                    run.push(Span::text("\n", base.clone()));
                }
                run.append(text.clone());
            }
            ContentBlock::Image { url, width, height } => run.push(Span {
                content: super::attachment::Resolved::image_inline(url, *width, *height),
                style: base.clone(),
            }),
            ContentBlock::AttachmentChip(chip) => run.append(chip.name.clone()),
            other => {
                if let Some(children) = other.children() {
                    flatten(children, base, run);
                }
            }
        }
    }
}
