//! Text cleanup applied to runs before they are emitted.

use unicode_normalization::UnicodeNormalization;

use crate::model::TextRun;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization only
    Minimal,
    /// NFC + invisible character removal + newline limiting
    #[default]
    Standard,
    /// Standard plus whitespace squeezing and tighter newline limits
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove zero-width characters (U+200B..U+200D, U+2060, U+FEFF)
    pub remove_zero_width: bool,

    /// Squeeze runs of 3+ spaces down to 2
    pub normalize_whitespace: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: false,
            remove_zero_width: false,
            normalize_whitespace: false,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            remove_zero_width: true,
            normalize_whitespace: false,
            max_consecutive_newlines: 3,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            remove_zero_width: true,
            normalize_whitespace: true,
            max_consecutive_newlines: 2,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process a single string.
    pub fn process(&self, text: &str) -> String {
        let mut newlines = 0;
        self.process_with(text, &mut newlines)
    }

    /// Process every text span of a run.
    ///
    /// The newline limit applies across span boundaries.
    pub fn process_run(&self, run: TextRun) -> TextRun {
        let mut newlines = 0;
        run.map_text(|text| self.process_with(text, &mut newlines))
    }

    fn process_with(&self, text: &str, newlines: &mut usize) -> String {
        let mut result: String = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.remove_replacement_char || self.options.remove_zero_width {
            result.retain(|c| !self.is_removed(c));
        }

        if self.options.normalize_whitespace {
            result = squeeze_spaces(&result);
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result, newlines);
        }

        result
    }

    fn is_removed(&self, c: char) -> bool {
        match c {
            '\u{FFFD}' => self.options.remove_replacement_char,
            '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' => self.options.remove_zero_width,
            _ => false,
        }
    }

    fn limit_newlines(&self, text: &str, count: &mut usize) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == '\n' {
                *count += 1;
                if *count > max {
                    continue;
                }
            } else {
                *count = 0;
            }
            out.push(c);
        }
        out
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

fn squeeze_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut spaces = 0;
    for c in text.chars() {
        if c == ' ' {
            spaces += 1;
            if spaces > 2 {
                continue;
            }
        } else {
            spaces = 0;
        }
        out.push(c);
    }
    out
}
