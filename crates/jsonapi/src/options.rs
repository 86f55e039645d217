//! Decoder and encoder configuration.

/// How wire numbers are narrowed into fixed-width native fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericMode {
    /// Values outside the target range fail with `NumericOverflow`.
    /// Fractions are still truncated toward zero.
    #[default]
    Checked,
    /// Out-of-range values are cast with `as`, silently wrapping or
    /// saturating.
    Truncate,
}

/// Default bound on relationship recursion.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub numeric: NumericMode,
    /// Drop record elements of attribute arrays that fail to decode instead
    /// of failing the whole record.
    pub skip_invalid_elements: bool,
    /// Maximum number of relationship hops followed from a primary resource.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            numeric: NumericMode::Checked,
            skip_invalid_elements: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Side-load related records into `included`. When off, relationships
    /// carry linkage only.
    pub include: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { include: true }
    }
}
