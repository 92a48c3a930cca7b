//! Parse error values.
//!
//! Parsing never panics: both parsers report the first failure as a
//! [`ParsingError`] carrying the error kind, the byte position of the
//! offending input and, when meaningful, the kind of value that was being
//! parsed.

use core::fmt;

use thiserror::Error;

/// The kind of bencode value a parser was working on when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BencodeType {
    /// An integer: `i` digits `e`.
    Integer,
    /// A length-prefixed byte string.
    String,
    /// A list: `l` values `e`.
    List,
    /// A dict: `d` (key, value) pairs `e`.
    Dict,
}

impl fmt::Display for BencodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::List => "list",
            Self::Dict => "dict",
        })
    }
}

/// Classifies every failure the parsers can produce.
///
/// Grammar violations and truncation are structural; `leading_zero`,
/// `negative_zero` and `out_of_range` are lexical; the `*_limit_exceeded`
/// kinds are resource bounds from [`ParserOptions`](crate::ParserOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParsingErrorKind {
    /// A value was expected but the input byte cannot start one.
    #[error("expected a value")]
    ExpectedValue,
    /// The `:` separator after a string length prefix is missing.
    #[error("expected ':' after string length")]
    ExpectedColon,
    /// An integer token is not terminated by `e`.
    #[error("expected integer digits terminated by 'e'")]
    ExpectedEnd,
    /// Inside a dict, a byte that starts neither a key nor `e` was found.
    #[error("expected a dict key or 'e'")]
    ExpectedDictKeyOrEnd,
    /// A dict key has no value before the closing `e`.
    #[error("expected a dict value")]
    ExpectedDictValue,
    /// Inside a list, the input ended before a value or `e`.
    #[error("expected a list value or 'e'")]
    ExpectedListValueOrEnd,
    /// The input ended in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// Bytes remain after the top-level value.
    #[error("expected end of input")]
    ExpectedEof,
    /// An integer or length has a superfluous leading zero.
    #[error("leading zeros are not allowed")]
    LeadingZero,
    /// The integer `-0` was found.
    #[error("negative zero is not allowed")]
    NegativeZero,
    /// An integer magnitude exceeds the signed 64-bit range.
    #[error("integer out of range")]
    OutOfRange,
    /// A string length or the input size exceeds the 32-bit limit.
    #[error("size limit exceeded")]
    SizeLimitExceeded,
    /// More containers are open than the configured recursion limit.
    #[error("recursion depth exceeded")]
    RecursionDepthExceeded,
    /// The descriptor count exceeds the configured value limit.
    #[error("value limit exceeded")]
    ValueLimitExceeded,
    /// An invariant of the parser itself was violated. Indicates a bug.
    #[error("internal parser error")]
    InternalError,
}

/// The first error encountered by a parse.
///
/// # Examples
///
/// ```
/// use bentable::{DescriptorParser, ParserOptions, ParsingErrorKind};
///
/// let mut parser = DescriptorParser::new(ParserOptions::default());
/// let err = parser.parse(b"i-0e").unwrap_err();
/// assert_eq!(err.kind(), ParsingErrorKind::NegativeZero);
/// assert_eq!(parser.error(), Some(err));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsingError {
    kind: ParsingErrorKind,
    position: usize,
    context: Option<BencodeType>,
}

impl ParsingError {
    pub(crate) fn new(
        kind: ParsingErrorKind,
        position: usize,
        context: Option<BencodeType>,
    ) -> Self {
        Self {
            kind,
            position,
            context,
        }
    }

    /// The error classification.
    #[must_use]
    pub fn kind(&self) -> ParsingErrorKind {
        self.kind
    }

    /// Byte offset into the source where the error was detected.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The kind of value being parsed when the error occurred, if meaningful.
    #[must_use]
    pub fn context(&self) -> Option<BencodeType> {
        self.context
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)?;
        if let Some(context) = self.context {
            write!(f, " while parsing {context}")?;
        }
        Ok(())
    }
}

impl core::error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}
