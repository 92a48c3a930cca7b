//! Dict views and lookup.

use crate::descriptor::Descriptor;

use super::{stride_backward, stride_forward, AccessError, StringView, View};

/// A view of a parsed dict.
///
/// Entries appear in input order. Canonical producers emit keys in
/// ascending byte order, but the parser does not enforce this, so lookup
/// never assumes it: every entry remains reachable in a non-canonical
/// dict.
///
/// # Examples
///
/// ```
/// use bentable::{DescriptorParser, ParserOptions};
///
/// let mut parser = DescriptorParser::new(ParserOptions::default());
/// let table = parser.parse(b"d3:bar4:spam3:fooi42ee").unwrap();
/// let dict = table.root().as_dict().unwrap();
///
/// assert!(dict.contains(b"bar"));
/// assert_eq!(dict.find(b"foo").unwrap().as_integer().unwrap().value(), 42);
/// assert!(dict.find(b"baz").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictView<'a> {
    descriptors: &'a [Descriptor],
    /// Canonical header index; never an end record.
    header: usize,
    source: &'a [u8],
}

impl<'a> DictView<'a> {
    pub(crate) fn new(descriptors: &'a [Descriptor], header: usize, source: &'a [u8]) -> Self {
        debug_assert!(descriptors[header].is_dict() && !descriptors[header].is_end());
        Self {
            descriptors,
            header,
            source,
        }
    }

    /// Number of key-value pairs.
    #[must_use]
    pub fn size(&self) -> usize {
        self.descriptors[self.header].size() as usize
    }

    /// `true` for `de`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Looks up the value stored under `key`, or `None`.
    ///
    /// Entry access is sequential (value strides depend on nesting), so
    /// lookup is a linear scan over all entries. Keys may be unsorted in
    /// non-canonical input; the scan never stops before a later entry
    /// could still match.
    #[must_use]
    pub fn find(&self, key: &[u8]) -> Option<View<'a>> {
        self.iter()
            .find(|(entry_key, _)| entry_key.value() == key)
            .map(|(_, value)| value)
    }

    /// `true` when an entry with `key` exists.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// The value stored under `key`, or [`AccessError::KeyNotFound`].
    pub fn at(&self, key: &[u8]) -> Result<View<'a>, AccessError> {
        self.find(key).ok_or(AccessError::KeyNotFound)
    }

    /// Iterates `(key, value)` pairs in input order.
    #[must_use]
    pub fn iter(&self) -> DictIter<'a> {
        DictIter {
            descriptors: self.descriptors,
            source: self.source,
            front: self.header + 1,
            back: self.header + self.descriptors[self.header].offset() as usize,
            remaining: self.size(),
        }
    }

    /// The raw bencoded bytes of the whole dict.
    #[must_use]
    pub fn bencoded_view(&self) -> &'a [u8] {
        View::new(self.descriptors, self.header, self.source).bencoded_view()
    }

    /// Byte offset of the opening `d` in the source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.descriptors[self.header].position()
    }
}

impl<'a> IntoIterator for DictView<'a> {
    type Item = (StringView<'a>, View<'a>);
    type IntoIter = DictIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &DictView<'a> {
    type Item = (StringView<'a>, View<'a>);
    type IntoIter = DictIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Double-ended iterator over a [`DictView`], yielding `(key, value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictIter<'a> {
    descriptors: &'a [Descriptor],
    source: &'a [u8],
    /// Index of the next key to yield from the front.
    front: usize,
    /// Index one past the last unyielded value (initially the end record).
    back: usize,
    remaining: usize,
}

impl<'a> Iterator for DictIter<'a> {
    type Item = (StringView<'a>, View<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = StringView::new(View::new(self.descriptors, self.front, self.source));
        let value_index = self.front + 1;
        let value = View::new(self.descriptors, value_index, self.source);
        self.front = stride_forward(self.descriptors, value_index);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for DictIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value_index = stride_backward(self.descriptors, self.back);
        let key_index = value_index - 1;
        self.back = key_index;
        self.remaining -= 1;
        let key = StringView::new(View::new(self.descriptors, key_index, self.source));
        Some((key, View::new(self.descriptors, value_index, self.source)))
    }
}

impl ExactSizeIterator for DictIter<'_> {}
