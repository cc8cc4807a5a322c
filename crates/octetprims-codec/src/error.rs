/// Reasons a caller-supplied value is rejected before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// The value has a fractional part, or is not a finite number.
    #[error("UInt must be an integer")]
    NotAnInteger,

    /// The value is below zero.
    #[error("UInt must be positive")]
    Negative,

    /// The value is a float above 2^53 - 1 and cannot be taken as an exact integer.
    #[error("UInt must be a safe integer (at most 2^53 - 1)")]
    Imprecise,

    /// A raw var uint payload is longer than its one-byte length prefix can describe.
    #[error("var uint payload too long ({len} bytes, max 255)")]
    VarUIntPayloadTooLong { len: usize },
}

/// Errors that can occur while encoding, predicting or decoding.
///
/// Every failing call leaves the reader cursor, writer buffer and predictor
/// size exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The value passed to an integer writer is not a non-negative integer.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// The value does not fit the declared fixed width.
    #[error("UInt {value} does not fit in {length} bytes")]
    Overflow { value: u64, length: usize },

    /// The octet string length disagrees with the declared fixed length.
    #[error("incorrect length for octet string (expected {expected} bytes, got {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    /// A read, peek or skip asked for more bytes than remain.
    #[error("tried to read {requested} bytes, but only {available} bytes available")]
    BufferUnderrun { requested: usize, available: usize },

    /// A fixed-width integer is wider than the supported ceiling.
    #[error("tried to read too large integer ({length} bytes, max {max})")]
    IntegerTooLarge { length: usize, max: usize },

    /// A var uint payload is wider than the supported native ceiling.
    #[error("var uint of {length} bytes is too large to parse as integer (max {max})")]
    VarIntTooLarge { length: usize, max: usize },

    /// The reader was constructed from something that is not a byte buffer.
    #[error("reader must be given a byte buffer or a reader (got {0})")]
    InvalidSource(&'static str),

    /// `restore` or `discard_bookmark` was called with an empty bookmark stack.
    #[error("no bookmark to restore")]
    NoBookmark,

    /// A var octet string length prefix is not in its minimal form.
    #[error("non-canonical length prefix: {0}")]
    NonCanonicalLengthPrefix(&'static str),

    /// A long-form length prefix declares more length bytes than allowed.
    #[error("length prefix too wide ({width} bytes, max {max})")]
    LengthPrefixTooWide { width: usize, max: usize },

    /// A var octet string declares a payload above the configured maximum.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: u64, max: usize },

    /// An explicit cursor position lies past the end of the buffer.
    #[error("cursor {cursor} out of bounds (buffer is {len} bytes)")]
    CursorOutOfBounds { cursor: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
