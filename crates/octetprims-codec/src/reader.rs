use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::codec::{be_uint, CodecConfig, LONG_FORM_FLAG, MAX_INT_BYTES, SHORT_FORM_MAX};
use crate::error::{CodecError, Result};

/// Anything a [`Reader`] can be built from.
///
/// Parsers that accept "a buffer or a reader" take `impl Into<ReaderSource>`
/// and call [`Reader::from_source`]; an existing reader passes through with
/// its cursor and bookmarks intact.
#[derive(Debug)]
pub enum ReaderSource<'a> {
    /// A borrowed byte buffer; reading starts at offset 0.
    Bytes(&'a [u8]),
    /// An existing reader, returned unchanged.
    Reader(Reader<'a>),
    /// Text is ambiguous (UTF-8? hex?) and is always rejected.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for ReaderSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ReaderSource::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ReaderSource<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        ReaderSource::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for ReaderSource<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ReaderSource::Bytes(bytes)
    }
}

impl<'a> From<&'a Bytes> for ReaderSource<'a> {
    fn from(bytes: &'a Bytes) -> Self {
        ReaderSource::Bytes(bytes)
    }
}

impl<'a> From<&'a BytesMut> for ReaderSource<'a> {
    fn from(bytes: &'a BytesMut) -> Self {
        ReaderSource::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for ReaderSource<'a> {
    fn from(text: &'a str) -> Self {
        ReaderSource::Text(text)
    }
}

impl<'a> From<Reader<'a>> for ReaderSource<'a> {
    fn from(reader: Reader<'a>) -> Self {
        ReaderSource::Reader(reader)
    }
}

/// Consuming decoder over a borrowed byte buffer.
///
/// Every successful read or skip advances the cursor by exactly the bytes
/// it consumed. A failed call leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    cursor: usize,
    bookmarks: Vec<usize>,
    config: CodecConfig,
}

impl<'a> Reader<'a> {
    /// Create a reader at offset 0 with default configuration.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, CodecConfig::default())
    }

    /// Create a reader at offset 0 with explicit configuration.
    pub fn with_config(buf: &'a [u8], config: CodecConfig) -> Self {
        Self {
            buf,
            cursor: 0,
            bookmarks: Vec::new(),
            config,
        }
    }

    /// Resolve a buffer-or-reader argument.
    pub fn from_source(source: impl Into<ReaderSource<'a>>) -> Result<Self> {
        match source.into() {
            ReaderSource::Bytes(buf) => Ok(Self::new(buf)),
            ReaderSource::Reader(reader) => Ok(reader),
            ReaderSource::Text(_) => Err(CodecError::InvalidSource("text")),
        }
    }

    /// Current reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Current read position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to an absolute position (at most `len()`).
    pub fn set_cursor(&mut self, cursor: usize) -> Result<()> {
        if cursor > self.buf.len() {
            return Err(CodecError::CursorOutOfBounds {
                cursor,
                len: self.buf.len(),
            });
        }
        self.cursor = cursor;
        Ok(())
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Returns true if any unread bytes remain.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// The unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.cursor..]
    }

    /// Save the current cursor position.
    pub fn bookmark(&mut self) {
        self.bookmarks.push(self.cursor);
    }

    /// Return to the most recent bookmark, discarding everything read since.
    pub fn restore(&mut self) -> Result<()> {
        let cursor = self.bookmarks.pop().ok_or(CodecError::NoBookmark)?;
        self.cursor = cursor;
        Ok(())
    }

    /// Drop the most recent bookmark and keep the current position.
    pub fn discard_bookmark(&mut self) -> Result<()> {
        self.bookmarks.pop().ok_or(CodecError::NoBookmark)?;
        Ok(())
    }

    /// Number of outstanding bookmarks.
    pub fn bookmark_depth(&self) -> usize {
        self.bookmarks.len()
    }

    fn ensure(&self, requested: usize) -> Result<()> {
        let available = self.remaining();
        if requested > available {
            debug!(
                requested,
                available,
                cursor = self.cursor,
                "buffer underrun"
            );
            return Err(CodecError::BufferUnderrun {
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Return the next `len` bytes without consuming them.
    pub fn peek(&self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        Ok(&self.buf[self.cursor..self.cursor + len])
    }

    /// Consume and return the next `len` bytes.
    pub fn read(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.peek(len)?;
        self.cursor += len;
        Ok(bytes)
    }

    /// Consume the next `len` bytes without looking at them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.cursor += len;
        Ok(())
    }

    /// Decode a big-endian integer of `length` bytes (0..=6) without consuming it.
    pub fn peek_uint(&self, length: usize) -> Result<u64> {
        if length > MAX_INT_BYTES {
            return Err(CodecError::IntegerTooLarge {
                length,
                max: MAX_INT_BYTES,
            });
        }
        Ok(be_uint(self.peek(length)?))
    }

    /// Decode and consume a big-endian integer of `length` bytes (0..=6).
    pub fn read_uint(&mut self, length: usize) -> Result<u64> {
        let value = self.peek_uint(length)?;
        self.cursor += length;
        Ok(value)
    }

    /// Skip a fixed-width integer of `length` bytes.
    pub fn skip_uint(&mut self, length: usize) -> Result<()> {
        self.skip(length)
    }

    /// Raw payload of the next var uint, of any width, without consuming it.
    pub fn peek_var_uint_bytes(&self) -> Result<&'a [u8]> {
        let width = usize::from(self.peek(1)?[0]);
        Ok(&self.peek(1 + width)?[1..])
    }

    /// Consume the next var uint and return its raw payload.
    ///
    /// Use this for magnitudes wider than [`MAX_INT_BYTES`].
    pub fn read_var_uint_bytes(&mut self) -> Result<&'a [u8]> {
        let payload = self.peek_var_uint_bytes()?;
        self.cursor += 1 + payload.len();
        Ok(payload)
    }

    /// Decode the next var uint without consuming it.
    pub fn peek_var_uint(&self) -> Result<u64> {
        decode_var_uint(self.peek_var_uint_bytes()?)
    }

    /// Decode and consume the next var uint.
    pub fn read_var_uint(&mut self) -> Result<u64> {
        let payload = self.peek_var_uint_bytes()?;
        let value = decode_var_uint(payload)?;
        self.cursor += 1 + payload.len();
        Ok(value)
    }

    /// Skip the next var uint without decoding its payload.
    pub fn skip_var_uint(&mut self) -> Result<()> {
        let payload = self.peek_var_uint_bytes()?;
        self.cursor += 1 + payload.len();
        Ok(())
    }

    /// Return the next `length` bytes as an octet string without consuming them.
    pub fn peek_octet_string(&self, length: usize) -> Result<&'a [u8]> {
        self.peek(length)
    }

    /// Consume an octet string of exactly `length` bytes.
    pub fn read_octet_string(&mut self, length: usize) -> Result<&'a [u8]> {
        self.read(length)
    }

    /// Skip an octet string of exactly `length` bytes.
    pub fn skip_octet_string(&mut self, length: usize) -> Result<()> {
        self.skip(length)
    }

    /// Decode the length prefix at the cursor.
    ///
    /// Returns `(prefix_bytes, payload_len)`.
    fn peek_length_prefix(&self) -> Result<(usize, usize)> {
        let first = self.peek(1)?[0];
        if first & LONG_FORM_FLAG == 0 {
            return Ok((1, usize::from(first)));
        }

        let strict = self.config.strict_length_prefix;
        let width = usize::from(first & !LONG_FORM_FLAG);
        if width == 0 {
            if strict {
                return Err(self.non_canonical("long form with no length bytes"));
            }
            return Ok((1, 0));
        }
        let max = self.config.max_length_prefix_bytes.min(8);
        if width > max {
            return Err(CodecError::LengthPrefixTooWide { width, max });
        }

        let len_bytes = &self.peek(1 + width)?[1..];
        if strict && len_bytes[0] == 0 {
            return Err(self.non_canonical("leading zero in length"));
        }
        let len = be_uint(len_bytes);
        if strict && len <= SHORT_FORM_MAX as u64 {
            return Err(self.non_canonical("long form for a short length"));
        }

        let limit = self.config.max_var_octet_string_len;
        match usize::try_from(len) {
            Ok(len) if len <= limit => Ok((1 + width, len)),
            _ => Err(CodecError::PayloadTooLarge {
                size: len,
                max: limit,
            }),
        }
    }

    fn non_canonical(&self, reason: &'static str) -> CodecError {
        debug!(cursor = self.cursor, reason, "non-canonical length prefix");
        CodecError::NonCanonicalLengthPrefix(reason)
    }

    /// Declared length of the next var octet string, without consuming anything.
    pub fn peek_var_octet_string_len(&self) -> Result<usize> {
        Ok(self.peek_length_prefix()?.1)
    }

    /// Consume only the length prefix of the next var octet string.
    pub fn read_var_octet_string_len(&mut self) -> Result<usize> {
        let (prefix, len) = self.peek_length_prefix()?;
        self.cursor += prefix;
        Ok(len)
    }

    /// Return the payload of the next var octet string without consuming it.
    pub fn peek_var_octet_string(&self) -> Result<&'a [u8]> {
        let (prefix, len) = self.peek_length_prefix()?;
        Ok(&self.peek(prefix.saturating_add(len))?[prefix..])
    }

    /// Consume the next var octet string and return its payload.
    pub fn read_var_octet_string(&mut self) -> Result<&'a [u8]> {
        let (prefix, len) = self.peek_length_prefix()?;
        let total = prefix.saturating_add(len);
        let bytes = self.peek(total)?;
        self.cursor += total;
        Ok(&bytes[prefix..])
    }

    /// Skip the next var octet string.
    pub fn skip_var_octet_string(&mut self) -> Result<()> {
        let (prefix, len) = self.peek_length_prefix()?;
        self.skip(prefix.saturating_add(len))
    }
}

fn decode_var_uint(payload: &[u8]) -> Result<u64> {
    if payload.len() > MAX_INT_BYTES {
        return Err(CodecError::VarIntTooLarge {
            length: payload.len(),
            max: MAX_INT_BYTES,
        });
    }
    Ok(be_uint(payload))
}
