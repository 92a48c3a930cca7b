//! The owning result of a descriptor parse.

use alloc::vec::Vec;

use crate::consumer::EventConsumer;
use crate::descriptor::Descriptor;
use crate::view::View;

/// An ordered sequence of [`Descriptor`] records plus a borrow of the
/// source bytes they index.
///
/// Produced by [`DescriptorParser::parse`](crate::DescriptorParser::parse).
/// The table owns only the records; payload bytes stay in `source`, which
/// must outlive the table and every [`View`] derived from it.
///
/// # Examples
///
/// ```
/// use bentable::{DescriptorParser, Encoder, ParserOptions};
///
/// let source = b"l4:spami42ee";
/// let mut parser = DescriptorParser::new(ParserOptions::default());
/// let table = parser.parse(source).unwrap();
///
/// // Replaying the table through an encoder reconstructs the input.
/// let mut encoder = Encoder::new();
/// table.emit_events(&mut encoder);
/// assert_eq!(encoder.into_bytes(), source);
/// ```
#[derive(Debug)]
pub struct DescriptorTable<'a> {
    descriptors: Vec<Descriptor>,
    source: &'a [u8],
}

impl<'a> DescriptorTable<'a> {
    pub(crate) fn new(descriptors: Vec<Descriptor>, source: &'a [u8]) -> Self {
        Self {
            descriptors,
            source,
        }
    }

    /// A view of the top-level value.
    #[must_use]
    pub fn root(&self) -> View<'_> {
        View::new(&self.descriptors, 0, self.source)
    }

    /// A view of the record at `index`, or `None` when out of bounds.
    ///
    /// Container views constructed on an end record canonicalize to their
    /// matching header.
    #[must_use]
    pub fn view_at(&self, index: usize) -> Option<View<'_>> {
        (index < self.descriptors.len()).then(|| View::new(&self.descriptors, index, self.source))
    }

    /// The raw records, in parse order.
    #[must_use]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The source bytes the table indexes.
    #[must_use]
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Replays the table as an event stream in input order.
    ///
    /// Equivalent to the events a [`PushParser`](crate::PushParser) would
    /// produce for the same input, except that element counts are known up
    /// front, so both `begin_*` and `end_*` receive a size hint.
    pub fn emit_events<C: EventConsumer>(&self, consumer: &mut C) {
        for descriptor in &self.descriptors {
            if descriptor.is_integer() {
                consumer.integer(descriptor.value());
            } else if descriptor.is_string() {
                let start = descriptor.position() + descriptor.offset() as usize;
                consumer.string(&self.source[start..start + descriptor.size() as usize]);
            } else if descriptor.is_list() {
                if descriptor.is_end() {
                    consumer.end_list(Some(descriptor.size() as usize));
                } else {
                    consumer.begin_list(Some(descriptor.size() as usize));
                    continue;
                }
            } else if descriptor.is_dict() {
                if descriptor.is_end() {
                    consumer.end_dict(Some(descriptor.size() as usize));
                } else {
                    consumer.begin_dict(Some(descriptor.size() as usize));
                    continue;
                }
            } else {
                continue;
            }

            if descriptor.is_dict_key() {
                consumer.dict_key();
            } else if descriptor.is_dict_value() {
                consumer.dict_value();
            } else if descriptor.is_list_value() {
                consumer.list_item();
            }
        }
    }
}
