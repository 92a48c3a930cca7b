//! Descriptor-table bencode parser with zero-copy views.
//!
//! A single forward pass over a bencoded byte range produces a compact table
//! of fixed-width [`Descriptor`] records that indexes every value in place.
//! The table supports typed, zero-copy traversal through [`View`] handles
//! without re-parsing and without copying payload bytes.
//!
//! Alternatively, the event-driven [`PushParser`] dispatches the same parse
//! to an [`EventConsumer`] without building a table. The bundled consumers
//! [`Encoder`] and [`JsonPrinter`] re-emit the canonical encoding and
//! pretty-print JSON respectively.
//!
//! # Examples
//!
//! ```
//! use bentable::{DescriptorParser, ParserOptions};
//!
//! let mut parser = DescriptorParser::new(ParserOptions::default());
//! let table = parser.parse(b"d3:cowi3e4:spaml1:a1:bee").unwrap();
//!
//! let dict = table.root().as_dict().unwrap();
//! assert_eq!(dict.find(b"cow").unwrap().as_integer().unwrap().value(), 3);
//! let spam = dict.find(b"spam").unwrap().as_list().unwrap();
//! assert_eq!(spam.size(), 2);
//! assert_eq!(spam.get(0).unwrap().as_string().unwrap().value(), b"a");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod consumer;
mod descriptor;
mod encode;
mod error;
mod json;
mod lex;
mod options;
mod parser;
mod push_parser;
mod state;
mod table;
mod view;

pub use consumer::EventConsumer;
pub use descriptor::{Descriptor, DescriptorFlags};
pub use encode::Encoder;
pub use error::{BencodeType, ParsingError, ParsingErrorKind};
pub use json::JsonPrinter;
pub use options::ParserOptions;
pub use parser::DescriptorParser;
pub use push_parser::PushParser;
pub use table::DescriptorTable;
pub use view::{AccessError, DictIter, DictView, IntegerView, ListIter, ListView, StringView, View};

#[cfg(test)]
mod tests;
