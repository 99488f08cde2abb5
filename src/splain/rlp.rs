//! RLP item decoding.
//!
//! Prefix byte ranges:
//! - `0x00..=0x7f`: the byte is its own value
//! - `0x80..=0xb7`: string of `b - 0x80` bytes
//! - `0xb8..=0xbf`: `b - 0xb7` big-endian length bytes, then the string
//! - `0xc0..=0xf7`: list whose children take `b - 0xc0` bytes
//! - `0xf8..=0xff`: `b - 0xf7` big-endian length bytes, then the children
//!
//! Decoding only records where things are; it never copies payload bytes.

use super::error::SplainError;
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Long forms are only canonical above this length.
const SHORT_FORM_MAX: u64 = 55;

/// How strictly encodings are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Reproduce whatever bytes are present, canonical or not.
    #[default]
    Lenient,
    /// Reject non-minimal encodings and trailing bytes.
    Strict,
}

impl Mode {
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// A view into the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub offset: usize,
    pub len: usize,
}

impl ByteRange {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn slice<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        buffer.get(self.offset..self.end()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpKind {
    SingleByte,
    ShortString,
    LongString,
    ShortList,
    LongList,
}

impl RlpKind {
    pub fn classify(prefix: u8) -> Self {
        match prefix {
            0x00..=0x7f => Self::SingleByte,
            0x80..=0xb7 => Self::ShortString,
            0xb8..=0xbf => Self::LongString,
            0xc0..=0xf7 => Self::ShortList,
            0xf8..=0xff => Self::LongList,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, Self::ShortList | Self::LongList)
    }
}

impl fmt::Display for RlpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SingleByte => "single byte",
            Self::ShortString => "short string",
            Self::LongString => "long string",
            Self::ShortList => "short list",
            Self::LongList => "long list",
        };
        f.write_str(name)
    }
}

/// One decoded RLP unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpItem {
    /// Offset of the first prefix byte (or of the value for single bytes).
    pub offset: usize,
    pub kind: RlpKind,
    /// Prefix byte plus any length bytes; 0 for single bytes.
    pub prefix_bytes: usize,
    pub payload: ByteRange,
    /// `prefix_bytes + payload.len`, never 0.
    pub total_consumed: usize,
}

impl RlpItem {
    pub fn prefix_range(&self) -> ByteRange {
        ByteRange::new(self.offset, self.prefix_bytes)
    }

    pub fn encoded_range(&self) -> ByteRange {
        ByteRange::new(self.offset, self.total_consumed)
    }

    /// The big-endian length bytes of a long form; empty for every other kind.
    pub fn length_bytes(&self) -> ByteRange {
        ByteRange::new(self.offset + 1, self.prefix_bytes.saturating_sub(1))
    }

    pub fn end(&self) -> usize {
        self.offset + self.total_consumed
    }
}

/// Decodes the item starting at `offset`, accepting non-canonical encodings.
pub fn decode_item(buffer: &[u8], offset: usize) -> Result<RlpItem, SplainError> {
    decode_item_with(buffer, offset, Mode::Lenient)
}

pub fn decode_item_with(
    buffer: &[u8],
    offset: usize,
    mode: Mode,
) -> Result<RlpItem, SplainError> {
    let prefix = *buffer.get(offset).ok_or_else(|| {
        SplainError::malformed(format!(
            "offset {} is past the end of a {}-byte buffer",
            offset,
            buffer.len()
        ))
    })?;

    let kind = RlpKind::classify(prefix);
    let (prefix_bytes, payload_len) = match kind {
        RlpKind::SingleByte => {
            return Ok(RlpItem {
                offset,
                kind,
                prefix_bytes: 0,
                payload: ByteRange::new(offset, 1),
                total_consumed: 1,
            });
        }
        RlpKind::ShortString => (1, usize::from(prefix - 0x80)),
        RlpKind::ShortList => (1, usize::from(prefix - 0xc0)),
        RlpKind::LongString => read_long_length(buffer, offset, prefix - 0xb7, mode)?,
        RlpKind::LongList => read_long_length(buffer, offset, prefix - 0xf7, mode)?,
    };

    let payload_offset = offset + prefix_bytes;
    payload_offset
        .checked_add(payload_len)
        .filter(|end| *end <= buffer.len())
        .ok_or_else(|| {
            SplainError::malformed(format!(
                "{} at offset {} declares {} payload bytes but only {} remain",
                kind,
                offset,
                payload_len,
                buffer.len().saturating_sub(payload_offset)
            ))
        })?;

    if mode.is_strict()
        && kind == RlpKind::ShortString
        && payload_len == 1
        && buffer[payload_offset] < 0x80
    {
        return Err(SplainError::non_canonical(
            offset,
            "single byte below 0x80 wrapped in a string prefix",
        ));
    }

    Ok(RlpItem {
        offset,
        kind,
        prefix_bytes,
        payload: ByteRange::new(payload_offset, payload_len),
        total_consumed: prefix_bytes + payload_len,
    })
}

/// Reads the length bytes of a long string or long list.
/// Returns `(prefix_bytes, payload_len)`.
fn read_long_length(
    buffer: &[u8],
    offset: usize,
    len_of_len: u8,
    mode: Mode,
) -> Result<(usize, usize), SplainError> {
    let len_of_len = usize::from(len_of_len);
    let start = offset + 1;
    let length_bytes = buffer.get(start..start + len_of_len).ok_or_else(|| {
        SplainError::malformed(format!(
            "length of length {} at offset {} runs past the end of a {}-byte buffer",
            len_of_len,
            offset,
            buffer.len()
        ))
    })?;

    let declared = BigEndian::read_uint(length_bytes, len_of_len);

    if mode.is_strict() {
        if length_bytes.first() == Some(&0) {
            return Err(SplainError::non_canonical(
                offset,
                "length has a leading zero byte",
            ));
        }
        if declared <= SHORT_FORM_MAX {
            return Err(SplainError::non_canonical(
                offset,
                format!("long form used for a {declared}-byte payload"),
            ));
        }
    }

    let payload_len = usize::try_from(declared).map_err(|_| {
        SplainError::malformed(format!(
            "declared length {declared} at offset {offset} does not fit in memory"
        ))
    })?;

    Ok((1 + len_of_len, payload_len))
}
