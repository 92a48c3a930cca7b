//! The event consumer contract.

use crate::error::ParsingError;

/// Callback protocol connecting parsers to emitters.
///
/// The [`PushParser`](crate::PushParser) and
/// [`DescriptorTable::emit_events`](crate::DescriptorTable::emit_events)
/// drive a consumer through the same event sequence:
///
/// - `begin_list` / `begin_dict` precede the container's children;
/// - every child value is immediately followed by its role marker
///   (`list_item`, `dict_key` or `dict_value`) — for a nested container
///   the marker follows its `end_*` event;
/// - `end_list` / `end_dict` follow the last child's marker;
/// - `error` is invoked at most once, before the producer returns failure.
///
/// `size` hints are passed when the producer knows the element count: the
/// push parser knows it only on `end_*`, table replay knows it on both
/// ends. Consumers must tolerate `None`.
///
/// Implementations may keep arbitrary state but own no source bytes; every
/// call should be cheap and must not block.
///
/// # Examples
///
/// Counting values without building anything:
///
/// ```
/// use bentable::{EventConsumer, PushParser, ParserOptions};
///
/// #[derive(Default)]
/// struct CountValues(usize);
///
/// impl EventConsumer for CountValues {
///     fn integer(&mut self, _value: i64) {
///         self.0 += 1;
///     }
///     fn string(&mut self, _value: &[u8]) {
///         self.0 += 1;
///     }
///     fn begin_list(&mut self, _size: Option<usize>) {
///         self.0 += 1;
///     }
///     fn end_list(&mut self, _size: Option<usize>) {}
///     fn begin_dict(&mut self, _size: Option<usize>) {
///         self.0 += 1;
///     }
///     fn end_dict(&mut self, _size: Option<usize>) {}
/// }
///
/// let mut count = CountValues::default();
/// let mut parser = PushParser::new(ParserOptions::default());
/// parser.parse(&mut count, b"li1ei2ed1:ai3eee").unwrap();
/// assert_eq!(count.0, 6);
/// ```
pub trait EventConsumer {
    /// An integer value was decoded.
    fn integer(&mut self, value: i64);

    /// A string value was decoded. The slice borrows from the source.
    fn string(&mut self, value: &[u8]);

    /// A list opens.
    fn begin_list(&mut self, size: Option<usize>);

    /// The preceding value was a list element.
    fn list_item(&mut self) {}

    /// A list closes.
    fn end_list(&mut self, size: Option<usize>);

    /// A dict opens.
    fn begin_dict(&mut self, size: Option<usize>);

    /// The preceding string was a dict key.
    fn dict_key(&mut self) {}

    /// The preceding value completed a dict entry.
    fn dict_value(&mut self) {}

    /// A dict closes.
    fn end_dict(&mut self, size: Option<usize>);

    /// The parse failed. No further events follow.
    fn error(&mut self, error: &ParsingError) {
        let _ = error;
    }
}
