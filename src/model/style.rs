//! Style context threaded through the style cascade.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    /// Parse a hex color: `#rgb`, `#rrggbb` or bare `rrggbb`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Rgb),
            // Short form is only accepted with the leading '#', otherwise
            // words like "bad" or "fed" would parse as colors.
            3 if s.starts_with('#') => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let (r, g, b) = ((v >> 8) & 0xf, (v >> 4) & 0xf, v & 0xf);
                Some(Rgb((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            _ => None,
        }
    }

    /// Red channel.
    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xff_ffff)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&value).ok_or_else(|| format!("invalid hex color: {}", value))
    }
}

/// A color with separate values for light and dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemedColor {
    /// Value used on light backgrounds
    pub light: Rgb,
    /// Value used on dark backgrounds
    pub dark: Rgb,
}

impl ThemedColor {
    /// Primary label color.
    pub const LABEL: ThemedColor = ThemedColor::new(Rgb(0x000000), Rgb(0xffffff));

    /// Secondary (dimmed) label color.
    pub const SECONDARY_LABEL: ThemedColor = ThemedColor::new(Rgb(0x8a8a8e), Rgb(0x98989f));

    /// Create a themed color from its two variants.
    pub const fn new(light: Rgb, dark: Rgb) -> Self {
        Self { light, dark }
    }

    /// Same value in both appearances.
    pub const fn fixed(rgb: Rgb) -> Self {
        Self {
            light: rgb,
            dark: rgb,
        }
    }
}

/// Named type sizes, smallest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSize {
    Caption2,
    Caption1,
    Footnote,
    Subheadline,
    #[default]
    Body,
    Title3,
    Title2,
    Title1,
    LargeTitle,
}

impl TypeSize {
    /// Map the 1..=7 markup size scale to a type size.
    ///
    /// Anything outside the scale falls back to [`TypeSize::Body`].
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => TypeSize::Caption1,
            2 => TypeSize::Footnote,
            3 => TypeSize::Body,
            4 => TypeSize::Title3,
            5 => TypeSize::Title2,
            6 => TypeSize::Title1,
            7 => TypeSize::LargeTitle,
            _ => TypeSize::Body,
        }
    }

    /// One step smaller, saturating at the smallest size.
    pub fn smaller(self) -> Self {
        match self {
            TypeSize::Caption2 | TypeSize::Caption1 => TypeSize::Caption2,
            TypeSize::Footnote => TypeSize::Caption1,
            TypeSize::Subheadline => TypeSize::Footnote,
            TypeSize::Body => TypeSize::Subheadline,
            TypeSize::Title3 => TypeSize::Body,
            TypeSize::Title2 => TypeSize::Title3,
            TypeSize::Title1 => TypeSize::Title2,
            TypeSize::LargeTitle => TypeSize::Title1,
        }
    }
}

/// Baseline shift applied by `[sup]` / `[sub]`.
pub const BASELINE_SHIFT: i8 = 5;

/// Inherited text attributes.
///
/// A context is never mutated in place: every derivation consumes a copy
/// and returns the new value, which is only visible to the subtree it was
/// derived for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleContext {
    /// Font family, `None` for the default font
    pub font: Option<String>,

    /// Type size
    pub size: TypeSize,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Baseline offset in points (positive raises)
    pub baseline_offset: i8,

    /// Text color
    pub foreground: ThemedColor,

    /// Highlight color
    pub background: Option<ThemedColor>,

    /// Link target
    pub link: Option<String>,
}

impl StyleContext {
    /// Create the default context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    pub fn with_underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }

    pub fn with_strikethrough(self) -> Self {
        Self {
            strikethrough: true,
            ..self
        }
    }

    /// Set the baseline offset.
    pub fn with_baseline(self, offset: i8) -> Self {
        Self {
            baseline_offset: offset,
            ..self
        }
    }

    /// Set the type size.
    pub fn with_size(self, size: TypeSize) -> Self {
        Self { size, ..self }
    }

    /// Set the font family (`None` restores the default font).
    pub fn with_font(self, font: Option<String>) -> Self {
        Self { font, ..self }
    }

    /// Set the text color.
    pub fn with_foreground(self, color: ThemedColor) -> Self {
        Self {
            foreground: color,
            ..self
        }
    }

    /// Set the highlight color.
    pub fn with_background(self, color: ThemedColor) -> Self {
        Self {
            background: Some(color),
            ..self
        }
    }

    /// Set the link target without touching decorations.
    pub fn with_link(self, target: impl Into<String>) -> Self {
        Self {
            link: Some(target.into()),
            ..self
        }
    }

    /// Check if any non-default styling is applied.
    pub fn has_styling(&self) -> bool {
        *self != Self::default()
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            font: None,
            size: TypeSize::Body,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            baseline_offset: 0,
            foreground: ThemedColor::LABEL,
            background: None,
            link: None,
        }
    }
}
