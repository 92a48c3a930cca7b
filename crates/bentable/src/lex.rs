//! Lexical primitives: the two token decoders shared by both parsers.
//!
//! Each decoder takes the full source slice plus a cursor, advances the
//! cursor past the token on success, and leaves the cursor on the offending
//! byte on failure so the caller can report an exact error position.

use crate::error::ParsingErrorKind;

/// Result of decoding a string length prefix.
///
/// `offset` is the distance from the token start to the first payload byte
/// (prefix width plus one for the colon); `size` is the payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringToken {
    pub offset: u32,
    pub size: u32,
}

/// Decodes an integer token `i` `-`? digit+ `e` and returns its value.
///
/// The cursor must point at the `i`.
pub(crate) fn decode_integer(
    source: &[u8],
    cursor: &mut usize,
) -> Result<i64, ParsingErrorKind> {
    debug_assert_eq!(source.get(*cursor), Some(&b'i'));
    let mut pos = *cursor + 1;

    let negative = match source.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(_) => false,
        None => {
            *cursor = source.len();
            return Err(ParsingErrorKind::UnexpectedEof);
        }
    };

    let first = match source.get(pos) {
        Some(&b) if b.is_ascii_digit() => b,
        Some(_) => {
            *cursor = pos;
            return Err(ParsingErrorKind::ExpectedEnd);
        }
        None => {
            *cursor = source.len();
            return Err(ParsingErrorKind::UnexpectedEof);
        }
    };

    if first == b'0' {
        match source.get(pos + 1) {
            Some(b'e') if negative => {
                *cursor = pos;
                return Err(ParsingErrorKind::NegativeZero);
            }
            Some(b'e') => {
                *cursor = pos + 2;
                return Ok(0);
            }
            Some(&b) if b.is_ascii_digit() => {
                *cursor = pos;
                return Err(ParsingErrorKind::LeadingZero);
            }
            Some(_) => {
                *cursor = pos + 1;
                return Err(ParsingErrorKind::ExpectedEnd);
            }
            None => {
                *cursor = source.len();
                return Err(ParsingErrorKind::UnexpectedEof);
            }
        }
    }

    // Accumulate the magnitude as u64; i64::MIN has one more step of
    // magnitude than i64::MAX.
    let limit: u64 = if negative {
        (i64::MAX as u64) + 1
    } else {
        i64::MAX as u64
    };
    let mut magnitude: u64 = 0;

    loop {
        match source.get(pos) {
            Some(&b) if b.is_ascii_digit() => {
                magnitude = magnitude
                    .checked_mul(10)
                    .and_then(|m| m.checked_add(u64::from(b - b'0')))
                    .filter(|&m| m <= limit)
                    .ok_or_else(|| {
                        *cursor = pos;
                        ParsingErrorKind::OutOfRange
                    })?;
                pos += 1;
            }
            Some(b'e') => {
                *cursor = pos + 1;
                let value = if negative {
                    magnitude.wrapping_neg() as i64
                } else {
                    magnitude as i64
                };
                return Ok(value);
            }
            Some(_) => {
                *cursor = pos;
                return Err(ParsingErrorKind::ExpectedEnd);
            }
            None => {
                *cursor = source.len();
                return Err(ParsingErrorKind::UnexpectedEof);
            }
        }
    }
}

/// Decodes a string token `digit+ ':' bytes{N}`.
///
/// The cursor must point at the first digit of the length prefix. On
/// success the cursor lands on the byte after the payload.
pub(crate) fn decode_string_token(
    source: &[u8],
    cursor: &mut usize,
) -> Result<StringToken, ParsingErrorKind> {
    let start = *cursor;
    debug_assert!(source.get(start).is_some_and(u8::is_ascii_digit));

    let mut pos = start;
    let mut length: u64 = 0;

    if source[pos] == b'0' && source.get(pos + 1).is_some_and(u8::is_ascii_digit) {
        return Err(ParsingErrorKind::LeadingZero);
    }

    loop {
        match source.get(pos) {
            Some(&b) if b.is_ascii_digit() => {
                length = length
                    .checked_mul(10)
                    .and_then(|l| l.checked_add(u64::from(b - b'0')))
                    .filter(|&l| l <= u64::from(u32::MAX))
                    .ok_or_else(|| {
                        *cursor = pos;
                        ParsingErrorKind::SizeLimitExceeded
                    })?;
                pos += 1;
            }
            Some(b':') => {
                pos += 1;
                break;
            }
            Some(_) => {
                *cursor = pos;
                return Err(ParsingErrorKind::ExpectedColon);
            }
            None => {
                *cursor = source.len();
                return Err(ParsingErrorKind::UnexpectedEof);
            }
        }
    }

    let size = length as u32;
    let remaining = source.len() - pos;
    if (remaining as u64) < length {
        *cursor = source.len();
        return Err(ParsingErrorKind::UnexpectedEof);
    }

    let offset = (pos - start) as u32;
    *cursor = pos + size as usize;
    Ok(StringToken { offset, size })
}
