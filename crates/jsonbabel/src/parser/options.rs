/// Nesting limit applied by [`ParserOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the JSON parser.
///
/// # Examples
///
/// ```rust
/// use jsonbabel::{ParserOptions, parse_with_options};
///
/// let options = ParserOptions { max_depth: Some(2) };
/// assert!(parse_with_options("[[1]]", options).is_ok());
/// assert!(parse_with_options("[[[1]]]", options).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// The deepest nesting of arrays and objects the parser will descend
    /// into before failing with `DepthLimitExceeded`.
    ///
    /// The parser recurses once per nesting level, so this bounds its stack
    /// usage on hostile input. `None` removes the limit.
    ///
    /// # Default
    ///
    /// `Some(128)`
    pub max_depth: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}
