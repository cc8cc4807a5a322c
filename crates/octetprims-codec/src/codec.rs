use bytes::{BufMut, BytesMut};

use crate::error::{ArgumentError, CodecError, Result};

/// Widest integer, in bytes, decoded into a native `u64`.
///
/// 48 bits stays inside the range a double-precision float represents
/// exactly, which is what peers of this format assume.
pub const MAX_INT_BYTES: usize = 6;

/// Default cap on `K` in a long-form length prefix (`0x80 | K`).
pub const DEFAULT_MAX_LENGTH_PREFIX_BYTES: usize = 8;

/// Default maximum var octet string payload: unbounded.
///
/// Reads borrow from a buffer that already holds the bytes, so the declared
/// length is bounds-checked against it rather than driving an allocation.
pub const DEFAULT_MAX_VAR_OCTET_STRING_LEN: usize = usize::MAX;

/// Largest length carried in the short form of a length prefix.
pub const SHORT_FORM_MAX: usize = 0x7f;

/// Largest raw var uint payload (its length prefix is a single byte).
pub const MAX_VAR_UINT_PAYLOAD: usize = u8::MAX as usize;

pub(crate) const LONG_FORM_FLAG: u8 = 0x80;

/// Largest float accepted as an exact integer (2^53 - 1).
const MAX_SAFE_FLOAT_INT: f64 = 9_007_199_254_740_991.0;

/// Limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Maximum `K` accepted in a long-form length prefix. Values above 8 are
    /// treated as 8. Default: 8.
    pub max_length_prefix_bytes: usize,
    /// Maximum declared var octet string length. Default: unbounded.
    pub max_var_octet_string_len: usize,
    /// Reject length prefixes that are not minimal: `0x80`, a long form for a
    /// length below 128, or a leading zero length byte. Default: false.
    pub strict_length_prefix: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_length_prefix_bytes: DEFAULT_MAX_LENGTH_PREFIX_BYTES,
            max_var_octet_string_len: DEFAULT_MAX_VAR_OCTET_STRING_LEN,
            strict_length_prefix: false,
        }
    }
}

/// A value accepted by the integer writers.
///
/// Unsigned integers always convert. Signed integers fail when negative.
/// Floats must be finite, whole, non-negative and at most 2^53 - 1.
pub trait UIntArg: Copy {
    fn to_uint(self) -> std::result::Result<u64, ArgumentError>;
}

macro_rules! impl_uint_arg_unsigned {
    ($($ty:ty),*) => {$(
        impl UIntArg for $ty {
            fn to_uint(self) -> std::result::Result<u64, ArgumentError> {
                Ok(u64::from(self))
            }
        }
    )*};
}

macro_rules! impl_uint_arg_signed {
    ($($ty:ty),*) => {$(
        impl UIntArg for $ty {
            fn to_uint(self) -> std::result::Result<u64, ArgumentError> {
                u64::try_from(self).map_err(|_| ArgumentError::Negative)
            }
        }
    )*};
}

impl_uint_arg_unsigned!(u8, u16, u32, u64);
impl_uint_arg_signed!(i8, i16, i32, i64, isize);

impl UIntArg for usize {
    fn to_uint(self) -> std::result::Result<u64, ArgumentError> {
        u64::try_from(self).map_err(|_| ArgumentError::Imprecise)
    }
}

impl UIntArg for f64 {
    fn to_uint(self) -> std::result::Result<u64, ArgumentError> {
        if !self.is_finite() || self.fract() != 0.0 {
            return Err(ArgumentError::NotAnInteger);
        }
        if self < 0.0 {
            return Err(ArgumentError::Negative);
        }
        if self > MAX_SAFE_FLOAT_INT {
            return Err(ArgumentError::Imprecise);
        }
        Ok(self as u64)
    }
}

impl UIntArg for f32 {
    fn to_uint(self) -> std::result::Result<u64, ArgumentError> {
        f64::from(self).to_uint()
    }
}

/// Bytes in the minimal big-endian form of `value`. Zero takes one byte.
pub fn uint_byte_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Encoded size of a length prefix announcing `len` payload bytes.
pub fn length_prefix_size(len: usize) -> usize {
    if len <= SHORT_FORM_MAX {
        1
    } else {
        1 + uint_byte_len(len as u64)
    }
}

/// Decode a big-endian unsigned integer of at most 8 bytes.
pub(crate) fn be_uint(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

// Size rules. Writer and Predictor both go through these, so validation and
// byte counts cannot drift apart.

pub(crate) fn fixed_uint_size(value: u64, length: usize) -> Result<usize> {
    if length > MAX_INT_BYTES {
        return Err(CodecError::IntegerTooLarge {
            length,
            max: MAX_INT_BYTES,
        });
    }
    if value >> (8 * length) != 0 {
        return Err(CodecError::Overflow { value, length });
    }
    Ok(length)
}

pub(crate) fn var_uint_size(value: u64) -> usize {
    1 + uint_byte_len(value)
}

pub(crate) fn var_uint_bytes_size(raw: &[u8]) -> Result<usize> {
    if raw.len() > MAX_VAR_UINT_PAYLOAD {
        return Err(ArgumentError::VarUIntPayloadTooLong { len: raw.len() }.into());
    }
    Ok(1 + raw.len())
}

pub(crate) fn octet_string_size(bytes: &[u8], length: usize) -> Result<usize> {
    if bytes.len() != length {
        return Err(CodecError::LengthMismatch {
            expected: length,
            actual: bytes.len(),
        });
    }
    Ok(length)
}

pub(crate) fn var_octet_string_size(len: usize) -> usize {
    length_prefix_size(len) + len
}

// Emitters. Callers validate first; these never fail.

pub(crate) fn put_var_uint(dst: &mut BytesMut, value: u64) {
    let width = uint_byte_len(value);
    dst.put_u8(width as u8);
    dst.put_uint(value, width);
}

pub(crate) fn put_length_prefix(dst: &mut BytesMut, len: usize) {
    if len <= SHORT_FORM_MAX {
        dst.put_u8(len as u8);
    } else {
        let width = uint_byte_len(len as u64);
        dst.put_u8(LONG_FORM_FLAG | width as u8);
        dst.put_uint(len as u64, width);
    }
}
