//! Canonical octet encoding with a shared reader/writer/predictor contract.
//!
//! Three independent cursors agree byte-for-byte on one wire format:
//! - [`Writer`] appends encoded values to an owned buffer
//! - [`Reader`] decodes values from a borrowed buffer, with bookmarks for
//!   speculative parsing
//! - [`Predictor`] counts the bytes a `Writer` would produce, so the output
//!   buffer can be allocated once
//!
//! Wire format:
//! ```text
//! fixed uint(n)      n bytes, big-endian, n <= 6
//! var uint           L (1 byte) + L bytes minimal big-endian (zero is 01 00)
//! octet string(n)    n raw bytes
//! var octet string   len < 128:  len (1 byte) + payload
//!                    len >= 128: 0x80|K + K bytes big-endian len + payload
//! ```

pub mod codec;
pub mod error;
pub mod predictor;
pub mod reader;
pub mod sink;
pub mod writer;

pub use codec::{
    length_prefix_size, uint_byte_len, CodecConfig, UIntArg, DEFAULT_MAX_LENGTH_PREFIX_BYTES,
    DEFAULT_MAX_VAR_OCTET_STRING_LEN, MAX_INT_BYTES, MAX_VAR_UINT_PAYLOAD, SHORT_FORM_MAX,
};
pub use error::{ArgumentError, CodecError, Result};
pub use predictor::Predictor;
pub use reader::{Reader, ReaderSource};
pub use sink::{encode_to_bytes, predict_size, Encode, OctetSink};
pub use writer::Writer;
