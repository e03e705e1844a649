//! Rendering options and configuration.

use chrono::{FixedOffset, Offset, Utc};

use super::{CleanupOptions, CleanupPreset};
use crate::model::StyleContext;
use crate::parser::ParseOptions;

/// Default strftime pattern for `[mergetime]`.
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y, %H:%M";

/// Largest accepted UTC offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Options for rendering markup into content blocks.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Root of the style cascade
    pub base_style: StyleContext,

    /// strftime pattern used for merge timestamps
    pub date_format: String,

    /// Offset from UTC used to localize merge timestamps, in minutes
    pub utc_offset_minutes: i32,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,

    /// Tokenizer and tree builder options
    pub parse: ParseOptions,

    /// Render batches in parallel
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base style.
    pub fn with_base_style(mut self, style: StyleContext) -> Self {
        self.base_style = style;
        self
    }

    /// Set the date format for merge timestamps.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the UTC offset in minutes (clamped to ±18 hours).
    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes.clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES);
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Enable or disable parallel batch rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch rendering.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }

    /// The configured UTC offset.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_style: StyleContext::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            utc_offset_minutes: 0,
            cleanup: None,
            parse: ParseOptions::default(),
            parallel: true,
        }
    }
}
