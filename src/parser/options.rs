//! Parsing options and configuration.

/// Default limit for nested container tags.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for tokenizing and tree building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of container tags; deeper opening tags are
    /// kept as literal text
    pub max_depth: usize,

    /// Keep `[code]` content verbatim instead of parsing tags inside it
    pub raw_code: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Enable or disable verbatim `[code]` content.
    pub fn with_raw_code(mut self, raw: bool) -> Self {
        self.raw_code = raw;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            raw_code: true,
        }
    }
}
