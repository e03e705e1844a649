//! Malformed markup never fails and never loses text.

use std::time::{Duration, Instant};

use unbb::parser::{parse, tokenize, ParseOptions, Token};
use unbb::render::plain_text;
use unbb::{render, ContentBlock, StyleContext, TextRun, Unbb};

fn rendered_text(markup: &str) -> String {
    plain_text(&render(markup, &[], &StyleContext::default()))
}

#[test]
fn test_misnested_tags_keep_text() {
    assert_eq!(
        rendered_text("[b]bold[i]mixed[/b]text[/i]"),
        "bold[i]mixedtext[/i]"
    );
}

#[test]
fn test_stray_close_is_literal() {
    assert_eq!(rendered_text("a[/quote]b"), "a[/quote]b");
}

#[test]
fn test_unclosed_structure_closed_at_end() {
    let blocks = render("[quote]never closed", &[], &StyleContext::default());
    assert_eq!(blocks.len(), 1);
    assert!(matches!(&blocks[0], ContentBlock::Quote { blocks, .. } if blocks.len() == 1));
}

#[test]
fn test_unknown_tags_are_text() {
    assert_eq!(rendered_text("[table]x[/table]"), "[table]x[/table]");
}

#[test]
fn test_bad_leaf_payload_is_text() {
    assert_eq!(rendered_text("[snapback=abc]"), "[snapback=abc]");
}

#[test]
fn test_unterminated_bracket() {
    assert_eq!(rendered_text("[b"), "[b");
    assert_eq!(rendered_text("x [color=red"), "x [color=red");
}

#[test]
fn test_crlf_normalized() {
    let tokens = tokenize("a\r\nb", &ParseOptions::default());
    assert_eq!(tokens, vec![Token::Text("a\nb".to_string())]);
}

#[test]
fn test_deep_nesting_bounded() {
    let options = ParseOptions::new().with_max_depth(4);
    let markup = "[quote]".repeat(50) + "core" + &"[/quote]".repeat(50);
    let nodes = parse(&markup, &options);
    let text: String = nodes.iter().map(|n| n.plain_text()).collect();
    assert!(text.contains("core"));
}

#[test]
fn test_deeply_nested_clauses_bounded() {
    let markup = "[spoiler=".repeat(20_000) + "x" + &"]".repeat(20_000) + "body";
    let blocks = render(&markup, &[], &StyleContext::default());
    assert!(plain_text(&blocks).contains("body"));
    assert!(blocks.iter().any(|b| matches!(b, ContentBlock::Spoiler { .. })));
}

#[test]
fn test_clause_past_depth_limit_is_literal() {
    let blocks = Unbb::new()
        .with_max_depth(1)
        .render("[spoiler=[spoiler=x]]body");
    let ContentBlock::Spoiler { title, blocks } = &blocks[0] else {
        panic!("expected spoiler");
    };
    assert_eq!(
        title.as_ref().map(TextRun::plain_text).as_deref(),
        Some("[spoiler=x]")
    );
    assert_eq!(plain_text(blocks), "body");
}

#[test]
fn test_unclosed_input_scans_in_linear_time() {
    for markup in ["[img]".repeat(20_000), "[b=".repeat(34_000)] {
        let started = Instant::now();
        let tokens = tokenize(&markup, &ParseOptions::default());
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(tokens, vec![Token::Text(markup.clone())]);
    }
}

#[test]
fn test_unclosed_input_renders_as_text() {
    let markup = "[img]".repeat(20_000);
    let started = Instant::now();
    assert_eq!(rendered_text(&markup), markup);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_garbage_keeps_every_word() {
    let markup = "[/i]one[b][u]two[/b][/u]three[s][list][*]four[/spoiler]five";
    let text = rendered_text(markup);
    for word in ["one", "two", "three", "four", "five"] {
        assert!(text.contains(word), "missing {word} in {text:?}");
    }
}
