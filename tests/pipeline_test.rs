//! End-to-end tests for the rendering pipeline.

use unbb::render::{plain_text, retrim, to_text};
use unbb::{
    render, render_with_options, Attachment, Attachments, ContentBlock, Inline, ListOrdering,
    QuoteHeader, RenderOptions, StyleContext, TextRun,
};

fn base() -> StyleContext {
    StyleContext::default()
}

fn files() -> Vec<Attachment> {
    vec![
        Attachment::file(1, "archive.zip", 1536, "https://example.com/1").with_downloads(12),
        Attachment::image(2, "photo.jpg", "https://example.com/2", 640, 480),
    ]
}

fn text(block: &ContentBlock) -> String {
    block.as_text().map(TextRun::plain_text).unwrap_or_default()
}

fn walk<'a>(blocks: &'a [ContentBlock], out: &mut Vec<&'a ContentBlock>) {
    for block in blocks {
        out.push(block);
        if let Some(children) = block.children() {
            walk(children, out);
        }
    }
}

fn all_blocks(blocks: &[ContentBlock]) -> Vec<&ContentBlock> {
    let mut out = Vec::new();
    walk(blocks, &mut out);
    out
}

// ==================== Formatting ====================

#[test]
fn test_styles_nest() {
    let blocks = render("[b]bold [i]both[/i][/b] plain", &[], &base());
    assert_eq!(blocks.len(), 1);

    let run = blocks[0].as_text().unwrap();
    assert_eq!(run.plain_text(), "bold both plain");
    assert!(run.spans[0].style.bold && !run.spans[0].style.italic);
    assert!(run.spans[1].style.bold && run.spans[1].style.italic);
    assert!(!run.spans[2].style.bold);
}

#[test]
fn test_adjacent_same_style_spans_merge() {
    let blocks = render("[b]a[/b][b]b[/b]", &[], &base());
    let run = blocks[0].as_text().unwrap();
    assert_eq!(run.spans.len(), 1);
    assert_eq!(run.spans[0].as_text(), Some("ab"));
}

#[test]
fn test_url_without_attribute_links_to_text() {
    let blocks = render("[url]https://example.com[/url]", &[], &base());
    let run = blocks[0].as_text().unwrap();
    assert_eq!(
        run.spans[0].style.link.as_deref(),
        Some("https://example.com")
    );
}

// ==================== Lists ====================

#[test]
fn test_each_list_counts_from_one() {
    let blocks = render("[list=1][*]a[*]b[/list][list=1][*]c[/list]", &[], &base());
    assert_eq!(blocks.len(), 2);

    let ContentBlock::List { ordering, blocks: first } = &blocks[0] else {
        panic!("expected first list");
    };
    assert_eq!(*ordering, ListOrdering::Numeric);
    assert_eq!(text(&first[0]), "1. a\n2. b");

    let ContentBlock::List { blocks: second, .. } = &blocks[1] else {
        panic!("expected second list");
    };
    assert_eq!(text(&second[0]), "1. c");
}

#[test]
fn test_roman_markers() {
    let blocks = render("[list=i][*]a[*]b[*]c[*]d[/list]", &[], &base());
    let ContentBlock::List { blocks, .. } = &blocks[0] else {
        panic!("expected list");
    };
    assert!(text(&blocks[0]).ends_with("iv. d"));
}

// ==================== Attachments ====================

#[test]
fn test_unknown_attachment_stays_literal() {
    let blocks = render("[attachment=999:note]", &files(), &base());
    assert_eq!(blocks.len(), 1);
    assert_eq!(text(&blocks[0]), "[attachment=999:note]");
}

#[test]
fn test_file_attachment_chip() {
    let blocks = render("[attachment=1:archive]", &files(), &base());
    let ContentBlock::AttachmentChip(chip) = &blocks[0] else {
        panic!("expected chip");
    };
    assert_eq!(chip.id, 1);
    assert_eq!(chip.name.plain_text(), "archive.zip");
    assert_eq!(chip.size_label, "1.5 KB");
    assert_eq!(chip.caption.as_deref(), Some("Downloads: 12"));
}

#[test]
fn test_image_attachment_inline_between_words() {
    let blocks = render("left [attachment=2] right", &files(), &base());
    assert_eq!(blocks.len(), 1);
    let run = blocks[0].as_text().unwrap();
    assert!(run.spans.iter().any(|s| matches!(
        &s.content,
        Inline::Image { width: Some(640), height: Some(480), .. }
    )));
}

// ==================== Media Adjacency ====================

fn inline_images(blocks: &[ContentBlock]) -> usize {
    all_blocks(blocks)
        .into_iter()
        .filter_map(ContentBlock::as_text)
        .flat_map(|run| &run.spans)
        .filter(|span| matches!(span.content, Inline::Image { .. }))
        .count()
}

fn image_blocks(blocks: &[ContentBlock]) -> usize {
    all_blocks(blocks)
        .into_iter()
        .filter(|b| matches!(b, ContentBlock::Image { .. }))
        .count()
}

#[test]
fn test_image_at_container_start_joins_following_text() {
    let blocks = render("[quote][img]https://x/a.png[/img] text[/quote]", &[], &base());
    let ContentBlock::Quote { blocks, .. } = &blocks[0] else {
        panic!("expected quote");
    };
    assert_eq!(blocks.len(), 1);

    let run = blocks[0].as_text().unwrap();
    assert!(matches!(
        &run.spans[0].content,
        Inline::Image { url, .. } if url == "https://x/a.png"
    ));
    assert_eq!(run.plain_text(), " text");
}

#[test]
fn test_image_at_end_joins_preceding_text() {
    let blocks = render("text [img]https://x/a.png[/img]", &[], &base());
    assert_eq!(blocks.len(), 1);

    let run = blocks[0].as_text().unwrap();
    assert!(matches!(run.spans.last().map(|s| &s.content), Some(Inline::Image { .. })));
    assert_eq!(run.plain_text(), "text ");
}

#[test]
fn test_lone_space_does_not_pull_image_inline() {
    let blocks = render("[quote]q[/quote] [img]https://x/a.png[/img]\nafter", &[], &base());
    assert_eq!(image_blocks(&blocks), 1);
    assert_eq!(inline_images(&blocks), 0);

    let blocks = render("[quote] [img]https://x/a.png[/img]\n[/quote]", &[], &base());
    assert_eq!(image_blocks(&blocks), 1);
    assert_eq!(inline_images(&blocks), 0);
}

#[test]
fn test_space_after_text_line_keeps_image_inline() {
    // the run before the image is "a\n ", not a lone space
    let blocks = render("a\n [img]https://x/a.png[/img]\n", &[], &base());
    assert_eq!(blocks.len(), 1);
    assert_eq!(inline_images(&blocks), 1);
    assert_eq!(blocks[0].as_text().unwrap().plain_text(), "a\n ");
}

#[test]
fn test_image_between_newlines_is_standalone() {
    let blocks = render("a\n[img]https://x/a.png[/img]\nb", &[], &base());
    assert_eq!(blocks.len(), 3);
    assert!(matches!(&blocks[1], ContentBlock::Image { url, .. } if url == "https://x/a.png"));
    assert_eq!(text(&blocks[0]), "a\n");
    assert_eq!(text(&blocks[2]), "\nb");
}

#[test]
fn test_bracket_escapes_in_payloads() {
    let blocks = render("[code=&#91;x&#93;]y[/code]", &[], &base());
    assert!(matches!(&blocks[0], ContentBlock::Code { title: Some(t), .. } if t == "[x]"));

    let blocks = render("[img]https://x/&#91;1&#93;.png[/img]", &[], &base());
    assert!(matches!(&blocks[0], ContentBlock::Image { url, .. } if url == "https://x/[1].png"));

    let blocks = render("[quote=\"&#91;b&#93;Jane&#91;/b&#93;\"]x[/quote]", &[], &base());
    let ContentBlock::Quote { header, title, .. } = &blocks[0] else {
        panic!("expected quote");
    };
    assert_eq!(*header, Some(QuoteHeader::Title("[b]Jane[/b]".to_string())));
    let title = title.as_ref().unwrap();
    assert_eq!(title.plain_text(), "[b]Jane[/b]");
    assert!(!title.spans[0].style.bold);
}

// ==================== Quotes ====================

#[test]
fn test_quote_citation_header() {
    let blocks = render(
        "[quote name=\"Jane\" date=\"01.02.2024\" post=42]hello[/quote]",
        &[],
        &base(),
    );
    let ContentBlock::Quote { header, blocks, .. } = &blocks[0] else {
        panic!("expected quote");
    };
    assert_eq!(
        *header,
        Some(QuoteHeader::Metadata {
            name: "Jane".to_string(),
            date: Some("01.02.2024".to_string()),
            post_id: Some(42),
        })
    );
    assert_eq!(text(&blocks[0]), "hello");
}

#[test]
fn test_quote_title_keeps_markup() {
    let blocks = render("[quote=\"[b]Jane[/b]\"]x[/quote]", &[], &base());
    let ContentBlock::Quote { title, .. } = &blocks[0] else {
        panic!("expected quote");
    };
    let title = title.as_ref().unwrap();
    assert_eq!(title.plain_text(), "Jane");
    assert!(title.spans[0].style.bold);
}

#[test]
fn test_spoiler_title() {
    let blocks = render("[spoiler=Ending]it was a dream[/spoiler]", &[], &base());
    let ContentBlock::Spoiler { title, blocks } = &blocks[0] else {
        panic!("expected spoiler");
    };
    assert_eq!(title.as_ref().map(TextRun::plain_text).as_deref(), Some("Ending"));
    assert_eq!(text(&blocks[0]), "it was a dream");
}

// ==================== Output Invariants ====================

const SAMPLE: &str = "\n[b]Intro[/b]\n\n[quote=\"Jane\"]Look:\n[img]https://x/y.png[/img]\n[/quote]\n\
    [list][*]one\n[*]two[/list]\n[center]\n[spoiler]s[/spoiler]\n[/center]\n\n[attachment=1]\nbye\n";

#[test]
fn test_no_empty_text_blocks() {
    let blocks = render(SAMPLE, &files(), &base());
    for block in all_blocks(&blocks) {
        if let ContentBlock::Text(run) = block {
            assert!(!run.is_empty());
        }
    }
}

#[test]
fn test_retrim_idempotent_on_output() {
    let blocks = render(SAMPLE, &files(), &base());
    assert_eq!(retrim(blocks.clone()), blocks);
}

#[test]
fn test_plain_text_matches_text_content() {
    let blocks = render("[u]a[/u] b [s]c[/s]", &[], &base());
    assert_eq!(plain_text(&blocks), "a b c");
}

#[test]
fn test_entities_decoded_once() {
    let blocks = render("&#91;b&#93;not bold&#91;/b&#93;", &[], &base());
    let run = blocks[0].as_text().unwrap();
    assert_eq!(run.plain_text(), "[b]not bold[/b]");
    assert!(!run.spans[0].style.bold);
}

#[test]
fn test_display_text() {
    let blocks = render(
        "[quote name=\"Jane\"]hi[/quote][code]let x = 1;[/code]",
        &[],
        &base(),
    );
    assert_eq!(to_text(&blocks), "Jane wrote:\n> hi\n```\nlet x = 1;\n```");
}

#[test]
fn test_merge_time_uses_offset() {
    let options = RenderOptions::new()
        .with_date_format("%Y-%m-%d %H:%M")
        .with_utc_offset(-60);
    let blocks = render_with_options("[mergetime=3600]", &Attachments::new(), &options);
    assert_eq!(text(&blocks[0]), "1970-01-01 00:00");
}
