//! Markup tokenizer.
//!
//! Scans left to right and yields opening tags, closing tags, self-contained
//! leaf tags and text. Brackets that do not form a known tag are kept in the
//! surrounding text verbatim, and the `&#91;` / `&#93;` bracket entities are
//! left encoded for later stages.

use std::borrow::Cow;

use super::ParseOptions;
use crate::model::{decode_brackets, Leaf, Tag, TagName};

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Opening container tag
    Open {
        tag: Tag,
        /// Raw argument after the tag name, trimmed
        attribute: Option<String>,
        /// Source text of the tag
        raw: String,
    },

    /// Closing container tag
    Close { name: TagName, raw: String },

    /// Self-contained leaf tag
    Leaf {
        leaf: Leaf,
        attribute: Option<String>,
        raw: String,
    },

    /// Literal text
    Text(String),
}

impl Token {
    /// Source text this token was scanned from.
    pub fn source(&self) -> &str {
        match self {
            Token::Open { raw, .. } | Token::Close { raw, .. } | Token::Leaf { raw, .. } => raw,
            Token::Text(text) => text,
        }
    }
}

/// Tokenize markup text.
pub fn tokenize(input: &str, options: &ParseOptions) -> Vec<Token> {
    let input: Cow<'_, str> = if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    };
    Tokenizer::new(&input, options).tokenize()
}

/// Longest tag argument, in bytes, scanned before the tag is given up as
/// literal text.
pub const MAX_ARGUMENT_LEN: usize = 2048;

/// Single-pass markup scanner.
///
/// Forward searches that can fail (the `]` ending an argument, the `[/img]`
/// ending an image body) remember their last result, so a run of unclosed
/// tags costs time linear in the input.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw_code: bool,
    tokens: Vec<Token>,
    text: String,
    /// Last search for `]` or newline: (searched from, found at)
    stop_hint: Option<(usize, usize)>,
    /// Last search for `[/img]`: (searched from, closing tag span)
    image_hint: Option<(usize, Option<(usize, usize)>)>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            input,
            pos: 0,
            raw_code: options.raw_code,
            tokens: Vec::new(),
            text: String::new(),
            stop_hint: None,
            image_hint: None,
        }
    }

    /// Scan the whole input.
    pub fn tokenize(mut self) -> Vec<Token> {
        let input = self.input;
        while let Some(offset) = input[self.pos..].find('[') {
            let start = self.pos + offset;
            self.text.push_str(&input[self.pos..start]);

            match self.scan_tag(start) {
                Some((token, end)) => {
                    self.flush_text();
                    self.pos = end;
                    let is_code = matches!(&token, Token::Open { tag, .. } if tag.name() == TagName::Code);
                    self.tokens.push(token);
                    if is_code && self.raw_code {
                        self.scan_raw_code();
                    }
                }
                None => {
                    self.text.push('[');
                    self.pos = start + 1;
                }
            }
        }
        self.text.push_str(&input[self.pos..]);
        self.flush_text();
        self.tokens
    }

    /// Emit everything up to the next `[/code]` as text.
    fn scan_raw_code(&mut self) {
        let input = self.input;
        match find_closing(input, self.pos, TagName::Code) {
            Some((content_end, close_end)) => {
                self.text.push_str(&input[self.pos..content_end]);
                self.flush_text();
                self.tokens.push(Token::Close {
                    name: TagName::Code,
                    raw: input[content_end..close_end].to_string(),
                });
                self.pos = close_end;
            }
            None => {
                self.text.push_str(&input[self.pos..]);
                self.pos = input.len();
            }
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
    }

    /// Try to scan a tag starting at the `[` at byte `start`.
    ///
    /// Returns the token and the byte offset just past it.
    fn scan_tag(&mut self, start: usize) -> Option<(Token, usize)> {
        let input = self.input;
        let rest = &input[start + 1..];

        if let Some(after) = rest.strip_prefix('/') {
            let name_len = alpha_prefix_len(after);
            if after.as_bytes().get(name_len) != Some(&b']') {
                return None;
            }
            let name = TagName::from_name(&after[..name_len])?;
            if name.is_leaf() {
                return None;
            }
            let end = start + 2 + name_len + 1;
            return Some((
                Token::Close {
                    name,
                    raw: input[start..end].to_string(),
                },
                end,
            ));
        }

        let name_len = alpha_prefix_len(rest);
        let name = TagName::from_name(&rest[..name_len])?;
        let after = &rest[name_len..];
        let arg_len = match after.as_bytes().first()? {
            b']' => 0,
            b'=' | b' ' => {
                if !self.can_terminate(start + 1 + name_len) {
                    return None;
                }
                scan_argument(after)?
            }
            _ => return None,
        };
        let end = start + 1 + name_len + arg_len + 1;
        let raw = &input[start..end];
        let attribute = Some(after[..arg_len].trim()).filter(|a| !a.is_empty());

        if name == TagName::Image && attribute.is_none() {
            return self.scan_image_body(start, end);
        }

        let tag = Tag::from_parts(name, attribute)?;
        let attribute = attribute.map(str::to_string);
        let token = match tag {
            Tag::Leaf(leaf) => Token::Leaf {
                leaf,
                attribute,
                raw: raw.to_string(),
            },
            tag => Token::Open {
                tag,
                attribute,
                raw: raw.to_string(),
            },
        };
        Some((token, end))
    }

    /// `[img]url[/img]`: the URL body up to the closing tag is the payload.
    fn scan_image_body(&mut self, start: usize, body_start: usize) -> Option<(Token, usize)> {
        let (body_end, end) = self.image_close(body_start)?;
        let input = self.input;
        let url = input[body_start..body_end].trim();
        if url.is_empty() || url.contains('\n') {
            return None;
        }
        Some((
            Token::Leaf {
                leaf: Leaf::Image(decode_brackets(url)),
                attribute: None,
                raw: input[start..end].to_string(),
            },
            end,
        ))
    }

    /// Whether a `]` occurs at or after `from` before the next newline.
    fn can_terminate(&mut self, from: usize) -> bool {
        let stop = match self.stop_hint {
            Some((searched, found)) if searched <= from && from <= found => found,
            _ => {
                let found = self.input[from..]
                    .find([']', '\n'])
                    .map_or(self.input.len(), |i| from + i);
                self.stop_hint = Some((from, found));
                found
            }
        };
        self.input.as_bytes().get(stop) == Some(&b']')
    }

    /// The first `[/img]` at or after `from`.
    fn image_close(&mut self, from: usize) -> Option<(usize, usize)> {
        if let Some((searched, found)) = self.image_hint {
            let reusable = match found {
                Some((close_start, _)) => searched <= from && from <= close_start,
                None => searched <= from,
            };
            if reusable {
                return found;
            }
        }
        let found = find_closing(self.input, from, TagName::Image);
        self.image_hint = Some((from, found));
        found
    }
}

/// Length of the argument text before the terminating `]`.
///
/// A `]` closing a nested `[…]` pair, preceded by a backslash or inside a
/// double-quoted section does not terminate the argument. When the quotes
/// never balance, the first `]` terminating the argument with quotes
/// ignored is used instead. A newline, or an argument longer than
/// [`MAX_ARGUMENT_LEN`], aborts the scan.
fn scan_argument(s: &str) -> Option<usize> {
    let mut plain_depth = 0usize;
    let mut plain_end = None;
    let mut quoted_depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if i > MAX_ARGUMENT_LEN {
            break;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\n' => break,
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '[' => {
                if plain_end.is_none() {
                    plain_depth += 1;
                }
                if !in_quotes {
                    quoted_depth += 1;
                }
            }
            ']' => {
                if plain_end.is_none() {
                    if plain_depth == 0 {
                        plain_end = Some(i);
                    } else {
                        plain_depth -= 1;
                    }
                }
                if !in_quotes {
                    if quoted_depth == 0 {
                        return Some(i);
                    }
                    quoted_depth -= 1;
                }
            }
            _ => {}
        }
    }
    plain_end
}

/// Find `[/name]` (case-insensitive) at or after `from`.
///
/// Returns the offsets of the closing tag's start and end.
fn find_closing(input: &str, from: usize, name: TagName) -> Option<(usize, usize)> {
    let needle = format!("[/{}]", name.as_str());
    let idx = input.as_bytes()[from..]
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))?;
    let start = from + idx;
    Some((start, start + needle.len()))
}

fn alpha_prefix_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_alphabetic).count()
}
