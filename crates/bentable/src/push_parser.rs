//! The event-driven parser variant.
//!
//! Runs the same state machine as [`DescriptorParser`](crate::DescriptorParser)
//! but dispatches every lexical event to an [`EventConsumer`] instead of
//! building a table.

use alloc::vec::Vec;

use crate::consumer::EventConsumer;
use crate::error::{BencodeType, ParsingError, ParsingErrorKind};
use crate::lex;
use crate::options::ParserOptions;
use crate::state::{FrameState, StackFrame};

/// Parses bencoded data by driving an [`EventConsumer`].
///
/// The parser is monomorphized over the concrete consumer type, so the
/// callback dispatch compiles down to direct calls. On failure the
/// consumer's [`error`](EventConsumer::error) hook is invoked once before
/// `parse` returns, and the error stays available through
/// [`error`](Self::error) until the next parse.
///
/// # Examples
///
/// Re-encoding input through the bundled [`Encoder`](crate::Encoder):
///
/// ```
/// use bentable::{Encoder, ParserOptions, PushParser};
///
/// let mut parser = PushParser::new(ParserOptions::default());
/// let mut encoder = Encoder::new();
/// parser.parse(&mut encoder, b"d3:fooli1ei2eee").unwrap();
/// assert_eq!(encoder.into_bytes(), b"d3:fooli1ei2eee");
/// ```
#[derive(Debug)]
pub struct PushParser {
    options: ParserOptions,
    stack: Vec<StackFrame>,
    error: Option<ParsingError>,
}

impl Default for PushParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl PushParser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            error: None,
        }
    }

    /// Parses one complete top-level value from `source`, dispatching
    /// events to `consumer`.
    pub fn parse<C: EventConsumer>(
        &mut self,
        consumer: &mut C,
        source: &[u8],
    ) -> Result<(), ParsingError> {
        self.stack.clear();
        self.error = None;

        match self.parse_loop(consumer, source) {
            Ok(()) => Ok(()),
            Err(error) => {
                consumer.error(&error);
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

    fn parse_loop<C: EventConsumer>(
        &mut self,
        consumer: &mut C,
        source: &[u8],
    ) -> Result<(), ParsingError> {
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
        // Descriptor-equivalent records produced so far, for the value
        // limit. Matches the table parser: every value and every
        // container close counts.
        let mut produced: u64 = 0;

        while pos < source.len() {
            if let Some(limit) = self.options.value_limit {
                if produced > u64::from(limit) {
                    return Err(ParsingError::new(
                        ParsingErrorKind::ValueLimitExceeded,
                        pos,
                        None,
                    ));
                }
            }

            let Some(frame) = self.stack.last().copied() else {
                if produced != 0 {
                    return Err(ParsingError::new(ParsingErrorKind::ExpectedEof, pos, None));
                }
                self.handle_value(consumer, source, &mut pos, &mut produced)?;
                continue;
            };

            match frame.state {
                FrameState::DictKey => match source[pos] {
                    b'0'..=b'9' => {
                        self.handle_dict_key(consumer, source, &mut pos)?;
                        produced += 1;
                    }
                    b'e' => {
                        self.close_container(consumer, &mut pos, BencodeType::Dict)?;
                        produced += 1;
                    }
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
                    self.handle_value(consumer, source, &mut pos, &mut produced)?;
                }
                FrameState::ListValue => {
                    if source[pos] == b'e' {
                        self.close_container(consumer, &mut pos, BencodeType::List)?;
                        produced += 1;
                    } else {
                        self.handle_value(consumer, source, &mut pos, &mut produced)?;
                    }
                }
            }
        }

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

    fn handle_value<C: EventConsumer>(
        &mut self,
        consumer: &mut C,
        source: &[u8],
        pos: &mut usize,
        produced: &mut u64,
    ) -> Result<(), ParsingError> {
        match source[*pos] {
            b'i' => {
                let value = lex::decode_integer(source, pos).map_err(|kind| {
                    ParsingError::new(kind, *pos, Some(BencodeType::Integer))
                })?;
                consumer.integer(value);
                *produced += 1;
                self.value_completed(consumer);
                Ok(())
            }
            b'0'..=b'9' => {
                let start = *pos;
                let token = lex::decode_string_token(source, pos).map_err(|kind| {
                    ParsingError::new(kind, *pos, Some(BencodeType::String))
                })?;
                let payload_start = start + token.offset as usize;
                consumer.string(&source[payload_start..payload_start + token.size as usize]);
                *produced += 1;
                self.value_completed(consumer);
                Ok(())
            }
            b'l' | b'd' => {
                if self.stack.len() >= self.options.recursion_limit as usize {
                    return Err(ParsingError::new(
                        ParsingErrorKind::RecursionDepthExceeded,
                        *pos,
                        None,
                    ));
                }
                let state = if source[*pos] == b'l' {
                    consumer.begin_list(None);
                    FrameState::ListValue
                } else {
                    consumer.begin_dict(None);
                    FrameState::DictKey
                };
                self.stack.push(StackFrame {
                    state,
                    header: 0,
                    count: 0,
                });
                *pos += 1;
                *produced += 1;
                Ok(())
            }
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

    fn handle_dict_key<C: EventConsumer>(
        &mut self,
        consumer: &mut C,
        source: &[u8],
        pos: &mut usize,
    ) -> Result<(), ParsingError> {
        let start = *pos;
        let token = lex::decode_string_token(source, pos)
            .map_err(|kind| ParsingError::new(kind, *pos, Some(BencodeType::String)))?;

        let payload_start = start + token.offset as usize;
        consumer.string(&source[payload_start..payload_start + token.size as usize]);
        consumer.dict_key();

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

    fn close_container<C: EventConsumer>(
        &mut self,
        consumer: &mut C,
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
        *pos += 1;

        match kind {
            BencodeType::List => consumer.end_list(Some(frame.count as usize)),
            _ => consumer.end_dict(Some(frame.count as usize)),
        }

        self.value_completed(consumer);
        Ok(())
    }

    /// Emits the role marker for the value that just completed and bumps
    /// the parent frame.
    fn value_completed<C: EventConsumer>(&mut self, consumer: &mut C) {
        if let Some(frame) = self.stack.last_mut() {
            match frame.state {
                FrameState::ListValue => {
                    frame.count += 1;
                    consumer.list_item();
                }
                FrameState::DictValue => {
                    frame.count += 1;
                    frame.state = FrameState::DictKey;
                    consumer.dict_value();
                }
                FrameState::DictKey => {}
            }
        }
    }
}
