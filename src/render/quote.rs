//! Quote attribute parsing.
//!
//! Two attribute shapes are recognized:
//!
//! - a title: `[quote="Jane's post"]`, `[quote=Jane @ 01.01.2024]`
//! - a citation: `[quote name="Jane" date="01.01.2024" post=5]`
//!
//! Anything else yields no header.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{decode_brackets, QuoteHeader};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bname\s*=\s*"([^"]*)""#).expect("valid name pattern"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bdate\s*=\s*"([^"]*)""#).expect("valid date pattern"));
static POST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bpost\s*=\s*"?(\d+)"?"#).expect("valid post pattern"));

/// Parse the raw attribute of a `[quote]` tag into a header.
pub fn parse_quote_attribute(attribute: Option<&str>) -> Option<QuoteHeader> {
    let raw = attribute?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(title) = raw_title(raw) {
        return Some(QuoteHeader::Title(decode_brackets(title)));
    }

    parse_citation(raw)
}

/// Title markup of a quote attribute, if it has the title shape.
///
/// Bracket escapes are left encoded so the title can still be rendered as
/// markup.
pub fn quote_title(attribute: Option<&str>) -> Option<String> {
    raw_title(attribute?.trim()).map(str::to_string)
}

fn raw_title(raw: &str) -> Option<&str> {
    if let Some(rest) = raw.strip_prefix('=') {
        parse_title(rest)
    } else if raw.starts_with('"') || raw.starts_with('\'') {
        parse_title(raw)
    } else {
        None
    }
}

fn parse_title(text: &str) -> Option<&str> {
    let text = text.trim();
    let title = if let Some(quoted) = double_quoted(text) {
        quoted
    } else if let Some((before, _)) = text.split_once('@') {
        before
    } else {
        strip_single_quotes(text)
    };

    Some(title.trim()).filter(|t| !t.is_empty())
}

fn parse_citation(raw: &str) -> Option<QuoteHeader> {
    let name = NAME_RE.captures(raw)?.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    let date = DATE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|d| !d.is_empty())
        .map(decode_brackets);

    let post_id = POST_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok());

    Some(QuoteHeader::Metadata {
        name: decode_brackets(name),
        date,
        post_id,
    })
}

fn double_quoted(text: &str) -> Option<&str> {
    let start = text.find('"')?;
    let rest = &text[start + 1..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn strip_single_quotes(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(s: &str) -> Option<QuoteHeader> {
        Some(QuoteHeader::Title(s.to_string()))
    }

    #[test]
    fn test_quoted_title() {
        assert_eq!(parse_quote_attribute(Some("=\"Jane's post\"")), title("Jane's post"));
        assert_eq!(parse_quote_attribute(Some("\"Jane's post\"")), title("Jane's post"));
    }

    #[test]
    fn test_title_before_at_sign() {
        assert_eq!(
            parse_quote_attribute(Some("=Jane @ 01.01.2024, 12:00")),
            title("Jane")
        );
    }

    #[test]
    fn test_bare_title() {
        assert_eq!(parse_quote_attribute(Some("= Some thread ")), title("Some thread"));
        assert_eq!(parse_quote_attribute(Some("='single'")), title("single"));
    }

    #[test]
    fn test_citation() {
        assert_eq!(
            parse_quote_attribute(Some("name=\"Jane\" date=\"01.01.24\" post=5")),
            Some(QuoteHeader::Metadata {
                name: "Jane".to_string(),
                date: Some("01.01.24".to_string()),
                post_id: Some(5),
            })
        );
    }

    #[test]
    fn test_citation_optional_fields() {
        assert_eq!(
            parse_quote_attribute(Some("post=\"12\" NAME=\"Bob\"")),
            Some(QuoteHeader::Metadata {
                name: "Bob".to_string(),
                date: None,
                post_id: Some(12),
            })
        );
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(parse_quote_attribute(None), None);
        assert_eq!(parse_quote_attribute(Some("   ")), None);
        assert_eq!(parse_quote_attribute(Some("=\"\"")), None);
        assert_eq!(parse_quote_attribute(Some("date=\"01.01.24\"")), None);
        assert_eq!(parse_quote_attribute(Some("username=\"x\"")), None);
    }

    #[test]
    fn test_bracket_escapes_decoded_in_header() {
        assert_eq!(
            parse_quote_attribute(Some("=\"&#91;1&#93; Jane\"")),
            title("[1] Jane")
        );
        assert_eq!(
            parse_quote_attribute(Some("name=\"&#91;mod&#93; Bob\"")),
            Some(QuoteHeader::Metadata {
                name: "[mod] Bob".to_string(),
                date: None,
                post_id: None,
            })
        );
        // the renderable title keeps them encoded
        assert_eq!(
            quote_title(Some("=\"&#91;b&#93;x\"")),
            Some("&#91;b&#93;x".to_string())
        );
    }

    #[test]
    fn test_quote_title_only_for_titles() {
        assert_eq!(quote_title(Some("=\"T\"")), Some("T".to_string()));
        assert_eq!(quote_title(Some("name=\"Jane\"")), None);
    }
}
