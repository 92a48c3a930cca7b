//! The descriptor parser: byte range → descriptor table.
//!
//! A non-recursive state machine drives one forward pass over the input.
//! Container headers are appended with unknown `offset`/`size` and
//! back-patched when the matching `e` is reached; the explicit frame stack
//! bounds memory through [`ParserOptions::recursion_limit`].

use alloc::vec::Vec;

use crate::descriptor::{Descriptor, DescriptorFlags};
use crate::error::{BencodeType, ParsingError, ParsingErrorKind};
use crate::lex;
use crate::options::ParserOptions;
use crate::state::{FrameState, StackFrame};
use crate::table::DescriptorTable;

/// Parses bencoded data into a [`DescriptorTable`].
///
/// A parser instance is reusable: each call to [`parse`](Self::parse)
/// starts fresh and replaces the recorded error. The most recent failure
/// stays available through [`error`](Self::error) until the next parse.
///
/// # Examples
///
/// ```
/// use bentable::{DescriptorParser, ParserOptions};
///
/// let mut parser = DescriptorParser::new(ParserOptions::default());
/// let table = parser.parse(b"li1ei2ee").unwrap();
/// let list = table.root().as_list().unwrap();
/// assert_eq!(list.size(), 2);
/// ```
#[derive(Debug)]
pub struct DescriptorParser {
    options: ParserOptions,
    stack: Vec<StackFrame>,
    descriptors: Vec<Descriptor>,
    error: Option<ParsingError>,
}

impl Default for DescriptorParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl DescriptorParser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            descriptors: Vec::new(),
            error: None,
        }
    }

    /// Parses one complete top-level value from `source`.
    ///
    /// The returned table borrows `source`; it indexes the input without
    /// copying any payload bytes. Trailing bytes after the value fail with
    /// [`ExpectedEof`](ParsingErrorKind::ExpectedEof).
    pub fn parse<'a>(&mut self, source: &'a [u8]) -> Result<DescriptorTable<'a>, ParsingError> {
        self.stack.clear();
        self.descriptors.clear();
        self.error = None;

        match self.parse_loop(source) {
            Ok(()) => {
                debug_assert!(self.stack.is_empty());
                let mut descriptors = core::mem::take(&mut self.descriptors);
                if let Some(last) = descriptors.last_mut() {
                    last.set_stop_flag();
                }
                Ok(DescriptorTable::new(descriptors, source))
            }
            Err(error) => {
                self.error = Some(error);
                Err(error)
            }
        }
    }

    /// The error recorded by the most recent [`parse`](Self::parse), if it
    /// failed.
    #[must_use]
    pub fn error(&self) -> Option<ParsingError> {
        self.error
    }

    fn parse_loop(&mut self, source: &[u8]) -> Result<(), ParsingError> {
        if source.is_empty() {
            return Err(ParsingError::new(ParsingErrorKind::UnexpectedEof, 0, None));
        }
        if source.len() > u32::MAX as usize {
            return Err(ParsingError::new(
                ParsingErrorKind::SizeLimitExceeded,
                0,
                None,
            ));
        }

        let mut pos = 0usize;

        while pos < source.len() {
            if let Some(limit) = self.options.value_limit {
                if self.descriptors.len() > limit as usize {
                    return Err(ParsingError::new(
                        ParsingErrorKind::ValueLimitExceeded,
                        pos,
                        None,
                    ));
                }
            }

            let Some(frame) = self.stack.last().copied() else {
                if !self.descriptors.is_empty() {
                    // The single top-level value is complete.
                    return Err(ParsingError::new(ParsingErrorKind::ExpectedEof, pos, None));
                }
                self.handle_value(source, &mut pos, DescriptorFlags::empty())?;
                continue;
            };

            match frame.state {
                FrameState::DictKey => match source[pos] {
                    b'0'..=b'9' => self.handle_dict_key(source, &mut pos)?,
                    b'e' => self.close_container(&mut pos, BencodeType::Dict)?,
                    _ => {
                        return Err(ParsingError::new(
                            ParsingErrorKind::ExpectedDictKeyOrEnd,
                            pos,
                            Some(BencodeType::Dict),
                        ));
                    }
                },
                FrameState::DictValue => {
                    if source[pos] == b'e' {
                        return Err(ParsingError::new(
                            ParsingErrorKind::ExpectedDictValue,
                            pos,
                            Some(BencodeType::Dict),
                        ));
                    }
                    self.handle_value(source, &mut pos, DescriptorFlags::DICT_VALUE)?;
                }
                FrameState::ListValue => {
                    if source[pos] == b'e' {
                        self.close_container(&mut pos, BencodeType::List)?;
                    } else {
                        self.handle_value(source, &mut pos, DescriptorFlags::LIST_VALUE)?;
                    }
                }
            }
        }

        // Input exhausted with open containers: report what the innermost
        // one was waiting for.
        if let Some(frame) = self.stack.last() {
            let kind = match frame.state {
                FrameState::ListValue => ParsingErrorKind::ExpectedListValueOrEnd,
                FrameState::DictKey => ParsingErrorKind::ExpectedDictKeyOrEnd,
                FrameState::DictValue => ParsingErrorKind::ExpectedDictValue,
            };
            return Err(ParsingError::new(
                kind,
                source.len(),
                Some(frame.state.container()),
            ));
        }

        Ok(())
    }

    fn handle_value(
        &mut self,
        source: &[u8],
        pos: &mut usize,
        modifier: DescriptorFlags,
    ) -> Result<(), ParsingError> {
        match source[*pos] {
            b'i' => {
                let start = *pos;
                let value = lex::decode_integer(source, pos).map_err(|kind| {
                    ParsingError::new(kind, *pos, Some(BencodeType::Integer))
                })?;
                let mut d = Descriptor::new(DescriptorFlags::INTEGER | modifier, start as u32);
                d.set_value(value);
                self.descriptors.push(d);
                self.value_completed();
                Ok(())
            }
            b'0'..=b'9' => {
                let start = *pos;
                let token = lex::decode_string_token(source, pos).map_err(|kind| {
                    ParsingError::new(kind, *pos, Some(BencodeType::String))
                })?;
                let mut d = Descriptor::new(DescriptorFlags::STRING | modifier, start as u32);
                d.set_offset(token.offset);
                d.set_size(token.size);
                self.descriptors.push(d);
                self.value_completed();
                Ok(())
            }
            b'l' => self.open_container(pos, BencodeType::List, modifier),
            b'd' => self.open_container(pos, BencodeType::Dict, modifier),
            _ => {
                let context = self.stack.last().map(|f| f.state.container());
                Err(ParsingError::new(
                    ParsingErrorKind::ExpectedValue,
                    *pos,
                    context,
                ))
            }
        }
    }

    fn handle_dict_key(&mut self, source: &[u8], pos: &mut usize) -> Result<(), ParsingError> {
        let start = *pos;
        let token = lex::decode_string_token(source, pos)
            .map_err(|kind| ParsingError::new(kind, *pos, Some(BencodeType::String)))?;

        let mut d = Descriptor::new(
            DescriptorFlags::STRING | DescriptorFlags::DICT_KEY,
            start as u32,
        );
        d.set_offset(token.offset);
        d.set_size(token.size);
        self.descriptors.push(d);

        match self.stack.last_mut() {
            Some(frame) => frame.state = FrameState::DictValue,
            None => {
                return Err(ParsingError::new(
                    ParsingErrorKind::InternalError,
                    start,
                    None,
                ));
            }
        }
        Ok(())
    }

    fn open_container(
        &mut self,
        pos: &mut usize,
        kind: BencodeType,
        modifier: DescriptorFlags,
    ) -> Result<(), ParsingError> {
        if self.stack.len() >= self.options.recursion_limit as usize {
            return Err(ParsingError::new(
                ParsingErrorKind::RecursionDepthExceeded,
                *pos,
                None,
            ));
        }

        let (primary, state) = match kind {
            BencodeType::List => (DescriptorFlags::LIST, FrameState::ListValue),
            _ => (DescriptorFlags::DICT, FrameState::DictKey),
        };

        self.descriptors
            .push(Descriptor::new(primary | modifier, *pos as u32));
        self.stack.push(StackFrame {
            state,
            header: (self.descriptors.len() - 1) as u32,
            count: 0,
        });
        *pos += 1;
        Ok(())
    }

    fn close_container(
        &mut self,
        pos: &mut usize,
        kind: BencodeType,
    ) -> Result<(), ParsingError> {
        let Some(frame) = self.stack.pop() else {
            return Err(ParsingError::new(
                ParsingErrorKind::InternalError,
                *pos,
                None,
            ));
        };

        let primary = match kind {
            BencodeType::List => DescriptorFlags::LIST,
            _ => DescriptorFlags::DICT,
        };
        let header = frame.header as usize;
        let offset = (self.descriptors.len() - header) as u32;
        let position = *pos as u32;
        *pos += 1;

        // The end record also carries the closed container's role in its
        // parent, so that it fully describes the value when iterating
        // backwards.
        let parent_role = self
            .stack
            .last()
            .map_or(DescriptorFlags::empty(), |f| f.state.role_modifier());

        let mut end = Descriptor::new(primary | DescriptorFlags::END | parent_role, position);
        end.set_offset(offset);
        end.set_size(frame.count);
        self.descriptors.push(end);
        self.descriptors[header].set_offset(offset);
        self.descriptors[header].set_size(frame.count);

        self.value_completed();
        Ok(())
    }

    /// Bumps the parent frame after a value (scalar or container) closed
    /// inside it, flipping the dict key/value expectation.
    fn value_completed(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            match frame.state {
                FrameState::ListValue => frame.count += 1,
                FrameState::DictValue => {
                    frame.count += 1;
                    frame.state = FrameState::DictKey;
                }
                // Keys are not counted; the pair is, when its value closes.
                FrameState::DictKey => {}
            }
        }
    }
}
