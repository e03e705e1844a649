//! Tag vocabulary of the markup language.

use crate::catalog::{smiles, Smile};
use serde::{Deserialize, Serialize};

/// Tag names recognised by the tokenizer.
///
/// Names are matched case-insensitively; anything else in brackets is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagName {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Superscript,
    Subscript,
    Size,
    Color,
    Background,
    Font,
    Url,
    Anchor,
    Offtop,
    Center,
    Left,
    Right,
    Justify,
    Spoiler,
    Quote,
    List,
    Code,
    Hide,
    Curator,
    Moderator,
    Admin,
    Snapback,
    MergeTime,
    Image,
    Attachment,
    Smile,
}

impl TagName {
    /// Resolve a tag name as written in markup.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = match name.len() {
            1..=10 => name.to_ascii_lowercase(),
            _ => return None,
        };
        let tag = match name.as_str() {
            "b" => TagName::Bold,
            "i" => TagName::Italic,
            "u" => TagName::Underline,
            "s" | "strike" => TagName::Strikethrough,
            "sup" => TagName::Superscript,
            "sub" => TagName::Subscript,
            "size" => TagName::Size,
            "color" => TagName::Color,
            "background" | "bgcolor" => TagName::Background,
            "font" => TagName::Font,
            "url" => TagName::Url,
            "anchor" => TagName::Anchor,
            "offtop" => TagName::Offtop,
            "center" => TagName::Center,
            "left" => TagName::Left,
            "right" => TagName::Right,
            "justify" => TagName::Justify,
            "spoiler" => TagName::Spoiler,
            "quote" => TagName::Quote,
            "list" => TagName::List,
            "code" => TagName::Code,
            "hide" => TagName::Hide,
            "cur" => TagName::Curator,
            "mod" => TagName::Moderator,
            "ex" => TagName::Admin,
            "snapback" => TagName::Snapback,
            "mergetime" => TagName::MergeTime,
            "img" => TagName::Image,
            "attachment" => TagName::Attachment,
            "smile" => TagName::Smile,
            _ => return None,
        };
        Some(tag)
    }

    /// Canonical markup spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TagName::Bold => "b",
            TagName::Italic => "i",
            TagName::Underline => "u",
            TagName::Strikethrough => "s",
            TagName::Superscript => "sup",
            TagName::Subscript => "sub",
            TagName::Size => "size",
            TagName::Color => "color",
            TagName::Background => "background",
            TagName::Font => "font",
            TagName::Url => "url",
            TagName::Anchor => "anchor",
            TagName::Offtop => "offtop",
            TagName::Center => "center",
            TagName::Left => "left",
            TagName::Right => "right",
            TagName::Justify => "justify",
            TagName::Spoiler => "spoiler",
            TagName::Quote => "quote",
            TagName::List => "list",
            TagName::Code => "code",
            TagName::Hide => "hide",
            TagName::Curator => "cur",
            TagName::Moderator => "mod",
            TagName::Admin => "ex",
            TagName::Snapback => "snapback",
            TagName::MergeTime => "mergetime",
            TagName::Image => "img",
            TagName::Attachment => "attachment",
            TagName::Smile => "smile",
        }
    }

    /// Leaf tags are self-contained and never take a closing tag
    /// (`[img]` is closed by the tokenizer itself).
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            TagName::Snapback
                | TagName::MergeTime
                | TagName::Image
                | TagName::Attachment
                | TagName::Smile
        )
    }
}

/// A tag together with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Changes inherited text attributes only
    Format(Format),
    /// Wraps its children into a block
    Structure(Structure),
    /// Self-contained placeholder resolved late
    Leaf(Leaf),
}

/// Formatting tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Superscript,
    Subscript,
    /// `[size=n]`, n on the 1..=7 scale; 0 when unparsable
    Size(u8),
    /// `[color=spec]`
    Color(String),
    /// `[background=spec]`
    Background(String),
    /// `[font=name]`
    Font(String),
    /// `[url=href]`, or `[url]href[/url]` when `None`
    Url(Option<String>),
    /// `[anchor=name]`
    Anchor(Option<String>),
    Offtop,
}

/// Structural tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Align(Alignment),
    Spoiler,
    Quote,
    List(ListOrdering),
    Code,
    Hide,
    Notice(NoticeKind),
}

/// Leaf tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// Jump-to-post glyph
    Snapback(u64),
    /// Merge timestamp in unix seconds
    MergeTime(i64),
    /// External image URL
    Image(String),
    /// Attachment reference token, `<id>:<note>`
    Attachment(String),
    /// Catalogued smile
    Smile(&'static Smile),
}

/// Block alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Ordering of a list's item markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrdering {
    /// • item
    #[default]
    Bullet,
    /// 1. item
    Numeric,
    /// a. item
    Alphabetic,
    /// I. item
    RomanUpper,
    /// i. item
    RomanLower,
}

impl ListOrdering {
    /// Parse the `[list=…]` attribute value.
    pub fn from_attribute(value: &str) -> Self {
        match value.trim() {
            "1" => ListOrdering::Numeric,
            "a" | "A" => ListOrdering::Alphabetic,
            "I" => ListOrdering::RomanUpper,
            "i" => ListOrdering::RomanLower,
            _ => ListOrdering::Bullet,
        }
    }
}

/// Staff notice flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Curator,
    Moderator,
    Admin,
}

impl Tag {
    /// Build a tag from its name and the raw argument text that followed
    /// the name inside the brackets.
    ///
    /// Returns `None` when a leaf tag's payload is unusable; the caller then
    /// keeps the source as literal text.
    pub fn from_parts(name: TagName, raw: Option<&str>) -> Option<Self> {
        let value = raw.map(attribute_value).filter(|v| !v.is_empty());
        let tag = match name {
            TagName::Bold => Tag::Format(Format::Bold),
            TagName::Italic => Tag::Format(Format::Italic),
            TagName::Underline => Tag::Format(Format::Underline),
            TagName::Strikethrough => Tag::Format(Format::Strikethrough),
            TagName::Superscript => Tag::Format(Format::Superscript),
            TagName::Subscript => Tag::Format(Format::Subscript),
            TagName::Size => Tag::Format(Format::Size(
                value.and_then(|v| v.parse().ok()).unwrap_or(0),
            )),
            TagName::Color => Tag::Format(Format::Color(value.unwrap_or_default().to_string())),
            TagName::Background => {
                Tag::Format(Format::Background(value.unwrap_or_default().to_string()))
            }
            TagName::Font => Tag::Format(Format::Font(value.unwrap_or_default().to_string())),
            TagName::Url => Tag::Format(Format::Url(value.map(str::to_string))),
            TagName::Anchor => Tag::Format(Format::Anchor(value.map(str::to_string))),
            TagName::Offtop => Tag::Format(Format::Offtop),
            TagName::Center => Tag::Structure(Structure::Align(Alignment::Center)),
            TagName::Left => Tag::Structure(Structure::Align(Alignment::Left)),
            TagName::Right => Tag::Structure(Structure::Align(Alignment::Right)),
            TagName::Justify => Tag::Structure(Structure::Align(Alignment::Justify)),
            TagName::Spoiler => Tag::Structure(Structure::Spoiler),
            TagName::Quote => Tag::Structure(Structure::Quote),
            TagName::List => Tag::Structure(Structure::List(
                value.map(ListOrdering::from_attribute).unwrap_or_default(),
            )),
            TagName::Code => Tag::Structure(Structure::Code),
            TagName::Hide => Tag::Structure(Structure::Hide),
            TagName::Curator => Tag::Structure(Structure::Notice(NoticeKind::Curator)),
            TagName::Moderator => Tag::Structure(Structure::Notice(NoticeKind::Moderator)),
            TagName::Admin => Tag::Structure(Structure::Notice(NoticeKind::Admin)),
            TagName::Snapback => Tag::Leaf(Leaf::Snapback(value?.parse().ok()?)),
            TagName::MergeTime => Tag::Leaf(Leaf::MergeTime(value?.parse().ok()?)),
            TagName::Image => Tag::Leaf(Leaf::Image(decode_brackets(value?))),
            TagName::Attachment => Tag::Leaf(Leaf::Attachment(value?.to_string())),
            TagName::Smile => Tag::Leaf(Leaf::Smile(smiles::lookup(value?)?)),
        };
        Some(tag)
    }

    /// The name this tag was written with.
    pub fn name(&self) -> TagName {
        match self {
            Tag::Format(f) => match f {
                Format::Bold => TagName::Bold,
                Format::Italic => TagName::Italic,
                Format::Underline => TagName::Underline,
                Format::Strikethrough => TagName::Strikethrough,
                Format::Superscript => TagName::Superscript,
                Format::Subscript => TagName::Subscript,
                Format::Size(_) => TagName::Size,
                Format::Color(_) => TagName::Color,
                Format::Background(_) => TagName::Background,
                Format::Font(_) => TagName::Font,
                Format::Url(_) => TagName::Url,
                Format::Anchor(_) => TagName::Anchor,
                Format::Offtop => TagName::Offtop,
            },
            Tag::Structure(s) => match s {
                Structure::Align(Alignment::Center) => TagName::Center,
                Structure::Align(Alignment::Left) => TagName::Left,
                Structure::Align(Alignment::Right) => TagName::Right,
                Structure::Align(Alignment::Justify) => TagName::Justify,
                Structure::Spoiler => TagName::Spoiler,
                Structure::Quote => TagName::Quote,
                Structure::List(_) => TagName::List,
                Structure::Code => TagName::Code,
                Structure::Hide => TagName::Hide,
                Structure::Notice(NoticeKind::Curator) => TagName::Curator,
                Structure::Notice(NoticeKind::Moderator) => TagName::Moderator,
                Structure::Notice(NoticeKind::Admin) => TagName::Admin,
            },
            Tag::Leaf(l) => match l {
                Leaf::Snapback(_) => TagName::Snapback,
                Leaf::MergeTime(_) => TagName::MergeTime,
                Leaf::Image(_) => TagName::Image,
                Leaf::Attachment(_) => TagName::Attachment,
                Leaf::Smile(_) => TagName::Smile,
            },
        }
    }

    /// Check if this is a leaf tag.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Tag::Leaf(_))
    }
}

/// Extract the value from a raw tag argument.
///
/// Strips one leading `=`, surrounding whitespace and one pair of matching
/// surrounding quotes: `="Jane"` and ` Jane ` both yield `Jane`.
pub fn attribute_value(raw: &str) -> &str {
    let s = raw.trim();
    let s = s.strip_prefix('=').unwrap_or(s).trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Decode the bracket escapes `&#91;` and `&#93;`.
pub fn decode_brackets(text: &str) -> String {
    if text.contains("&#9") {
        text.replace("&#91;", "[").replace("&#93;", "]")
    } else {
        text.to_string()
    }
}
