//! The pretty-printing JSON consumer.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Write as _;

use crate::consumer::EventConsumer;

/// An [`EventConsumer`] that renders the event stream as indented JSON.
///
/// Integers print bare, strings print as JSON string literals (with `"`,
/// `\` and control characters escaped and invalid UTF-8 replaced), lists
/// become arrays and dicts become objects. A root scalar prints without
/// any surrounding whitespace.
///
/// # Examples
///
/// ```
/// use bentable::{DescriptorParser, JsonPrinter, ParserOptions};
///
/// let mut parser = DescriptorParser::new(ParserOptions::default());
/// let table = parser.parse(b"i63e").unwrap();
///
/// let mut json = JsonPrinter::new(4);
/// table.emit_events(&mut json);
/// assert_eq!(json.as_str(), "63");
/// ```
#[derive(Debug)]
pub struct JsonPrinter {
    out: String,
    indent: usize,
    current_indent: usize,
    first: bool,
    after_key: bool,
}

impl Default for JsonPrinter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl JsonPrinter {
    /// Creates a printer indenting nested values by `indent` spaces.
    #[must_use]
    pub fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent,
            current_indent: 0,
            first: true,
            after_key: true,
        }
    }

    /// The JSON rendered so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the printer and returns the rendered JSON.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    fn next_line(&mut self) {
        self.out.push('\n');
        for _ in 0..self.current_indent {
            self.out.push(' ');
        }
    }

    /// Separates this value from the previous one. The very first value
    /// after a container opens, and every value following its key, stay on
    /// the current line.
    fn next(&mut self) {
        if !self.first {
            self.out.push(',');
        }
        if self.after_key {
            self.after_key = false;
        } else {
            self.next_line();
        }
    }

    fn write_escaped(&mut self, value: &[u8]) {
        self.out.push('"');
        let text: Cow<'_, str> = String::from_utf8_lossy(value);
        for c in text.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

impl EventConsumer for JsonPrinter {
    fn integer(&mut self, value: i64) {
        self.next();
        let _ = write!(self.out, "{value}");
    }

    fn string(&mut self, value: &[u8]) {
        self.next();
        self.write_escaped(value);
    }

    fn begin_list(&mut self, _size: Option<usize>) {
        self.next();
        self.out.push('[');
        self.current_indent += self.indent;
        self.first = true;
    }

    fn list_item(&mut self) {
        self.first = false;
    }

    fn end_list(&mut self, _size: Option<usize>) {
        self.current_indent -= self.indent;
        if !self.first {
            self.next_line();
        }
        self.out.push(']');
    }

    fn begin_dict(&mut self, _size: Option<usize>) {
        self.next();
        self.out.push('{');
        self.current_indent += self.indent;
        self.first = true;
    }

    fn dict_key(&mut self) {
        self.out.push_str(": ");
        self.first = true;
        self.after_key = true;
    }

    fn dict_value(&mut self) {
        self.first = false;
    }

    fn end_dict(&mut self, _size: Option<usize>) {
        self.current_indent -= self.indent;
        if !self.first {
            self.next_line();
        }
        self.out.push('}');
    }
}
