//! Parser configuration.

/// Configuration options shared by [`DescriptorParser`](crate::DescriptorParser)
/// and [`PushParser`](crate::PushParser).
///
/// # Examples
///
/// ```
/// use bentable::{DescriptorParser, ParserOptions, ParsingErrorKind};
///
/// let mut parser = DescriptorParser::new(ParserOptions {
///     recursion_limit: 10,
///     ..Default::default()
/// });
/// let err = parser.parse(b"lllllllllll").unwrap_err();
/// assert_eq!(err.kind(), ParsingErrorKind::RecursionDepthExceeded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Maximum number of simultaneously open containers.
    ///
    /// Opening a container when this many are already open fails the parse
    /// with [`RecursionDepthExceeded`]. The parsers are iterative, so this
    /// bounds the heap-allocated frame stack rather than call depth.
    ///
    /// [`RecursionDepthExceeded`]: crate::ParsingErrorKind::RecursionDepthExceeded
    ///
    /// # Default
    ///
    /// `1024`
    pub recursion_limit: u32,

    /// Maximum total number of descriptors a parse may produce.
    ///
    /// Every value and every container-close marker counts. Exceeding the
    /// limit fails the parse with [`ValueLimitExceeded`].
    ///
    /// [`ValueLimitExceeded`]: crate::ParsingErrorKind::ValueLimitExceeded
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    pub value_limit: Option<u32>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            recursion_limit: 1024,
            value_limit: None,
        }
    }
}
