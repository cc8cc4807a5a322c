use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{
    fixed_uint_size, octet_string_size, put_length_prefix, put_var_uint, var_octet_string_size,
    var_uint_bytes_size, UIntArg,
};
use crate::error::Result;

/// Append-only encoder over an owned, growable buffer.
///
/// The output is the concatenation of every successful write in call order.
/// A rejected write appends nothing.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    ///
    /// Pair with [`Predictor::size`](crate::Predictor::size) to encode without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current allocation size.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Borrow the bytes written so far.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Copy out the bytes written so far, leaving the writer usable.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }

    /// Finish writing and return the encoded bytes without copying.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Write `value` big-endian in exactly `length` bytes (0..=6).
    pub fn write_uint<V: UIntArg>(&mut self, value: V, length: usize) -> Result<()> {
        let value = value.to_uint()?;
        fixed_uint_size(value, length)?;
        self.buf.put_uint(value, length);
        Ok(())
    }

    /// Write `value` as a length byte followed by its minimal big-endian form.
    pub fn write_var_uint<V: UIntArg>(&mut self, value: V) -> Result<()> {
        let value = value.to_uint()?;
        put_var_uint(&mut self.buf, value);
        Ok(())
    }

    /// Write a var uint whose payload is supplied verbatim.
    ///
    /// For magnitudes beyond native integers. The caller is responsible for
    /// the payload being minimal.
    pub fn write_var_uint_bytes(&mut self, raw: &[u8]) -> Result<()> {
        self.buf.reserve(var_uint_bytes_size(raw)?);
        self.buf.put_u8(raw.len() as u8);
        self.buf.put_slice(raw);
        Ok(())
    }

    /// Write exactly `length` raw bytes; `bytes` must be that long.
    pub fn write_octet_string(&mut self, bytes: &[u8], length: usize) -> Result<()> {
        octet_string_size(bytes, length)?;
        self.buf.put_slice(bytes);
        Ok(())
    }

    /// Write a length prefix followed by `bytes`.
    pub fn write_var_octet_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.reserve(var_octet_string_size(bytes.len()));
        put_length_prefix(&mut self.buf, bytes.len());
        self.buf.put_slice(bytes);
        Ok(())
    }
}

impl AsRef<[u8]> for Writer {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<Writer> for Bytes {
    fn from(writer: Writer) -> Self {
        writer.into_bytes()
    }
}
