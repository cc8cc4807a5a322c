use bytes::Bytes;
use tracing::trace;

use crate::codec::UIntArg;
use crate::error::Result;
use crate::predictor::Predictor;
use crate::writer::Writer;

/// The write surface shared by [`Writer`] and [`Predictor`].
///
/// Code written against `OctetSink` can size a message and then encode it
/// with the exact same sequence of calls.
pub trait OctetSink {
    fn write_uint<V: UIntArg>(&mut self, value: V, length: usize) -> Result<()>;
    fn write_var_uint<V: UIntArg>(&mut self, value: V) -> Result<()>;
    fn write_var_uint_bytes(&mut self, raw: &[u8]) -> Result<()>;
    fn write_octet_string(&mut self, bytes: &[u8], length: usize) -> Result<()>;
    fn write_var_octet_string(&mut self, bytes: &[u8]) -> Result<()>;
}

impl OctetSink for Writer {
    fn write_uint<V: UIntArg>(&mut self, value: V, length: usize) -> Result<()> {
        Writer::write_uint(self, value, length)
    }

    fn write_var_uint<V: UIntArg>(&mut self, value: V) -> Result<()> {
        Writer::write_var_uint(self, value)
    }

    fn write_var_uint_bytes(&mut self, raw: &[u8]) -> Result<()> {
        Writer::write_var_uint_bytes(self, raw)
    }

    fn write_octet_string(&mut self, bytes: &[u8], length: usize) -> Result<()> {
        Writer::write_octet_string(self, bytes, length)
    }

    fn write_var_octet_string(&mut self, bytes: &[u8]) -> Result<()> {
        Writer::write_var_octet_string(self, bytes)
    }
}

impl OctetSink for Predictor {
    fn write_uint<V: UIntArg>(&mut self, value: V, length: usize) -> Result<()> {
        Predictor::write_uint(self, value, length)
    }

    fn write_var_uint<V: UIntArg>(&mut self, value: V) -> Result<()> {
        Predictor::write_var_uint(self, value)
    }

    fn write_var_uint_bytes(&mut self, raw: &[u8]) -> Result<()> {
        Predictor::write_var_uint_bytes(self, raw)
    }

    fn write_octet_string(&mut self, bytes: &[u8], length: usize) -> Result<()> {
        Predictor::write_octet_string(self, bytes, length)
    }

    fn write_var_octet_string(&mut self, bytes: &[u8]) -> Result<()> {
        Predictor::write_var_octet_string(self, bytes)
    }
}

/// A caller-defined encoding plan.
pub trait Encode {
    fn encode<S: OctetSink>(&self, sink: &mut S) -> Result<()>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<S: OctetSink>(&self, sink: &mut S) -> Result<()> {
        (**self).encode(sink)
    }
}

/// Run `value`'s plan against a [`Predictor`] and return the encoded size.
pub fn predict_size<T: Encode + ?Sized>(value: &T) -> Result<usize> {
    let mut predictor = Predictor::new();
    value.encode(&mut predictor)?;
    Ok(predictor.size())
}

/// Encode `value` into a buffer allocated once at its predicted size.
pub fn encode_to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Bytes> {
    let size = predict_size(value)?;
    trace!(size, "allocating writer from prediction");

    let mut writer = Writer::with_capacity(size);
    value.encode(&mut writer)?;
    debug_assert_eq!(
        writer.len(),
        size,
        "predictor and writer disagree on encoded size"
    );
    Ok(writer.into_bytes())
}
