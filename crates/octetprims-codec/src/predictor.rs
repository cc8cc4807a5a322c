use crate::codec::{
    fixed_uint_size, octet_string_size, var_octet_string_size, var_uint_bytes_size,
    var_uint_size as var_uint_size_of, UIntArg,
};
use crate::error::Result;

/// Dry-run encoder: same write surface as [`Writer`](crate::Writer), but only
/// counts bytes.
///
/// After any sequence of calls, [`size`](Self::size) equals the length a
/// `Writer` would produce for the same calls. Validation is shared with the
/// writer, so a call the writer rejects is rejected here too and adds nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Predictor {
    size: usize,
}

impl Predictor {
    /// Create a predictor with a size of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Reset the accumulated size to zero.
    pub fn reset(&mut self) {
        self.size = 0;
    }

    /// Account for `write_uint(value, length)`.
    pub fn write_uint<V: UIntArg>(&mut self, value: V, length: usize) -> Result<()> {
        self.size += fixed_uint_size(value.to_uint()?, length)?;
        Ok(())
    }

    /// Account for `write_var_uint(value)`.
    pub fn write_var_uint<V: UIntArg>(&mut self, value: V) -> Result<()> {
        self.size += var_uint_size_of(value.to_uint()?);
        Ok(())
    }

    /// Account for `write_var_uint_bytes(raw)`.
    pub fn write_var_uint_bytes(&mut self, raw: &[u8]) -> Result<()> {
        self.size += var_uint_bytes_size(raw)?;
        Ok(())
    }

    /// Account for `write_octet_string(bytes, length)`.
    pub fn write_octet_string(&mut self, bytes: &[u8], length: usize) -> Result<()> {
        self.size += octet_string_size(bytes, length)?;
        Ok(())
    }

    /// Account for `write_var_octet_string(bytes)`.
    pub fn write_var_octet_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.size += var_octet_string_size(bytes.len());
        Ok(())
    }

    /// Encoded size of a var uint holding `value`.
    pub fn var_uint_size<V: UIntArg>(value: V) -> Result<usize> {
        Ok(var_uint_size_of(value.to_uint()?))
    }

    /// Encoded size of a var octet string with a `len`-byte payload.
    pub fn var_octet_string_size(len: usize) -> usize {
        var_octet_string_size(len)
    }
}
