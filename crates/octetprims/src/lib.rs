//! Canonical octet encoding primitives.
//!
//! octetprims provides the byte-level building blocks for packet formats:
//! fixed and variable-length unsigned integers, fixed and variable-length
//! octet strings, a bookmarking reader for speculative parsing, and a size
//! predictor for single-allocation encoding.
//!
//! # Crate Structure
//!
//! - [`codec`] — Reader, Writer, Predictor and the shared framing rules
//!
//! # Example
//!
//! ```
//! use octetprims::{Predictor, Reader, Writer};
//!
//! let mut predictor = Predictor::new();
//! predictor.write_uint(7, 2)?;
//! predictor.write_var_octet_string(b"payload")?;
//!
//! let mut writer = Writer::with_capacity(predictor.size());
//! writer.write_uint(7, 2)?;
//! writer.write_var_octet_string(b"payload")?;
//! let wire = writer.into_bytes();
//! assert_eq!(wire.len(), predictor.size());
//!
//! let mut reader = Reader::new(&wire);
//! assert_eq!(reader.read_uint(2)?, 7);
//! assert_eq!(reader.read_var_octet_string()?, b"payload");
//! # Ok::<(), octetprims::CodecError>(())
//! ```

/// Re-export codec types.
pub mod codec {
    pub use octetprims_codec::*;
}

pub use bytes::Bytes;
pub use octetprims_codec::{
    encode_to_bytes, predict_size, ArgumentError, CodecConfig, CodecError, Encode, OctetSink,
    Predictor, Reader, ReaderSource, Result, UIntArg, Writer, MAX_INT_BYTES,
};
