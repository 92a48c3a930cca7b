//! Zero-copy typed accessors over a descriptor table.
//!
//! Views are non-owning, freely copyable handles pairing one descriptor
//! with the source bytes. Typed projection goes through the `as_*`
//! conversions; list and dict iteration steps descriptor indices, using
//! the container `offset` to stride over nested structures in constant
//! time per element.

mod dict;
mod integer;
mod list;
mod string;

pub use dict::{DictIter, DictView};
pub use integer::IntegerView;
pub use list::{ListIter, ListView};
pub use string::StringView;

use thiserror::Error;

use crate::descriptor::Descriptor;
use crate::error::BencodeType;

/// Failure of a checked view accessor.
///
/// These are the only errors views produce; everything else is caught at
/// parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// An index-based accessor was given an index past the container size.
    #[error("index {index} out of range for container of size {size}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The container's element count.
        size: usize,
    },
    /// A dict lookup found no entry with the requested key.
    #[error("key not found in dict")]
    KeyNotFound,
}

/// A view of one parsed value of any kind.
///
/// Obtained from [`DescriptorTable::root`](crate::DescriptorTable::root),
/// [`DescriptorTable::view_at`](crate::DescriptorTable::view_at) or by
/// iterating a [`ListView`] or [`DictView`].
///
/// # Examples
///
/// ```
/// use bentable::{BencodeType, DescriptorParser, ParserOptions};
///
/// let mut parser = DescriptorParser::new(ParserOptions::default());
/// let table = parser.parse(b"i63e").unwrap();
/// let root = table.root();
/// assert_eq!(root.kind(), Some(BencodeType::Integer));
/// assert_eq!(root.as_integer().unwrap().value(), 63);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View<'a> {
    descriptors: &'a [Descriptor],
    index: usize,
    source: &'a [u8],
}

impl<'a> View<'a> {
    pub(crate) fn new(descriptors: &'a [Descriptor], index: usize, source: &'a [u8]) -> Self {
        debug_assert!(index < descriptors.len());
        Self {
            descriptors,
            index,
            source,
        }
    }

    /// The descriptor backing this view.
    #[must_use]
    pub fn descriptor(&self) -> &'a Descriptor {
        &self.descriptors[self.index]
    }

    /// The primary kind of this value, or `None` for a record without a
    /// primary tag.
    #[must_use]
    pub fn kind(&self) -> Option<BencodeType> {
        let d = self.descriptor();
        if d.is_integer() {
            Some(BencodeType::Integer)
        } else if d.is_string() {
            Some(BencodeType::String)
        } else if d.is_list() {
            Some(BencodeType::List)
        } else if d.is_dict() {
            Some(BencodeType::Dict)
        } else {
            None
        }
    }

    /// Byte offset of this value in the source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.descriptor().position()
    }

    /// `true` when this view refers to an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.descriptor().is_integer()
    }

    /// `true` when this view refers to a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.descriptor().is_string()
    }

    /// `true` when this view refers to a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.descriptor().is_list()
    }

    /// `true` when this view refers to a dict.
    #[must_use]
    pub fn is_dict(&self) -> bool {
        self.descriptor().is_dict()
    }

    /// Projects to an integer view, or `None` on kind mismatch.
    #[must_use]
    pub fn as_integer(&self) -> Option<IntegerView<'a>> {
        self.is_integer().then(|| IntegerView::new(*self))
    }

    /// Projects to a string view, or `None` on kind mismatch.
    #[must_use]
    pub fn as_string(&self) -> Option<StringView<'a>> {
        self.is_string().then(|| StringView::new(*self))
    }

    /// Projects to a list view, or `None` on kind mismatch.
    ///
    /// A view on a list end record canonicalizes to its matching header,
    /// so iterators obtained either way compare equal.
    #[must_use]
    pub fn as_list(&self) -> Option<ListView<'a>> {
        self.is_list()
            .then(|| ListView::new(self.descriptors, self.canonical_index(), self.source))
    }

    /// Projects to a dict view, or `None` on kind mismatch.
    ///
    /// A view on a dict end record canonicalizes to its matching header.
    #[must_use]
    pub fn as_dict(&self) -> Option<DictView<'a>> {
        self.is_dict()
            .then(|| DictView::new(self.descriptors, self.canonical_index(), self.source))
    }

    /// The raw bencoded bytes of this value, container contents included.
    #[must_use]
    pub fn bencoded_view(&self) -> &'a [u8] {
        let d = self.descriptor();
        let start = d.position();
        if d.is_integer() {
            let len = self.source[start..]
                .iter()
                .position(|&b| b == b'e')
                .map_or(self.source.len() - start, |i| i + 1);
            &self.source[start..start + len]
        } else if d.is_string() {
            &self.source[start..start + d.offset() as usize + d.size() as usize]
        } else {
            let header = self.canonical_index();
            let end = header + self.descriptors[header].offset() as usize;
            let first = self.descriptors[header].position();
            let last = self.descriptors[end].position();
            &self.source[first..=last]
        }
    }

    pub(crate) fn source(&self) -> &'a [u8] {
        self.source
    }

    /// For container records, the header index; identity otherwise.
    fn canonical_index(&self) -> usize {
        let d = self.descriptor();
        if d.is_end() {
            self.index - d.offset() as usize
        } else {
            self.index
        }
    }
}

/// Index of the record one past `index`'s value, skipping over nested
/// container contents.
pub(crate) fn stride_forward(descriptors: &[Descriptor], index: usize) -> usize {
    let d = &descriptors[index];
    if (d.is_list() || d.is_dict()) && !d.is_end() {
        index + d.offset() as usize + 1
    } else {
        index + 1
    }
}

/// Index of the value record ending just before `marker`, stepping over a
/// nested container in one hop via the end record's offset.
pub(crate) fn stride_backward(descriptors: &[Descriptor], marker: usize) -> usize {
    let prev = marker - 1;
    let d = &descriptors[prev];
    if d.is_end() {
        prev - d.offset() as usize
    } else {
        prev
    }
}
