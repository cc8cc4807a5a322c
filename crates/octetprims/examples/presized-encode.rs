//! Presized encode example — sizes a packet with a Predictor, encodes it in a
//! single allocation, then decodes it back.
//!
//! Run with:
//!   cargo run --example presized-encode

use octetprims::{encode_to_bytes, predict_size, Encode, OctetSink, Reader};

struct Transfer<'a> {
    amount: u64,
    expires_at: u64,
    condition: [u8; 32],
    destination: &'a str,
    data: &'a [u8],
}

impl Encode for Transfer<'_> {
    fn encode<S: OctetSink>(&self, sink: &mut S) -> octetprims::Result<()> {
        sink.write_uint(12, 1)?;
        sink.write_var_uint(self.amount)?;
        sink.write_uint(self.expires_at, 6)?;
        sink.write_octet_string(&self.condition, 32)?;
        sink.write_var_octet_string(self.destination.as_bytes())?;
        sink.write_var_octet_string(self.data)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = vec![0x42; 300];
    let transfer = Transfer {
        amount: 1_000_000,
        expires_at: 1_700_000_000_000,
        condition: [0xcc; 32],
        destination: "example.alice",
        data: &data,
    };

    let size = predict_size(&transfer)?;
    let wire = encode_to_bytes(&transfer)?;
    eprintln!("[encode] predicted={size} actual={}", wire.len());

    let mut reader = Reader::new(&wire);
    let kind = reader.read_uint(1)?;
    let amount = reader.read_var_uint()?;
    let expires_at = reader.read_uint(6)?;
    reader.skip_octet_string(32)?;
    let destination = String::from_utf8_lossy(reader.read_var_octet_string()?);
    let data_len = reader.peek_var_octet_string_len()?;
    reader.skip_var_octet_string()?;

    eprintln!(
        "[decode] kind={kind} amount={amount} expires_at={expires_at} destination={destination} data_len={data_len}"
    );
    Ok(())
}
