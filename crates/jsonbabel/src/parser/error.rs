use thiserror::Error;

/// A fatal syntax error, positioned at the offending character.
///
/// Lines and columns are 1-based and count Unicode scalar values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column of the offending character.
    pub column: usize,
}

/// The kinds of syntax error the parser reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing but whitespace.
    #[error("empty input")]
    EmptyInput,
    /// A character that cannot start or continue the current token.
    #[error("unexpected character '{}'", .0.escape_debug())]
    UnexpectedCharacter(char),
    /// The text ended inside a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A string with no closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// A backslash followed by an unknown escape character.
    #[error("invalid escape sequence '\\{}'", .0.escape_debug())]
    InvalidEscape(char),
    /// A lone or misordered UTF-16 surrogate, carrying the offending code unit.
    #[error("invalid unicode escape \\u{0:04X}")]
    InvalidUnicode(u32),
    /// A misspelling of the named keyword.
    #[error("unexpected keyword, expected `{0}`")]
    UnexpectedKeyword(&'static str),
    /// A number that breaks the grammar, or an integer outside `i64`.
    #[error("invalid number")]
    InvalidNumber,
    /// Non-whitespace after the top-level value.
    #[error("extra token '{}' after the JSON value", .0.escape_debug())]
    ExtraToken(char),
    /// Arrays and objects nested deeper than the configured limit.
    #[error("nesting exceeds the depth limit of {0}")]
    DepthLimitExceeded(usize),
}
