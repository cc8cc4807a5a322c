use octetprims::{OctetSink, Predictor, Reader, Writer, MAX_INT_BYTES};
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

/// One primitive write, with arguments that are always valid.
#[derive(Debug, Clone)]
enum Op {
    UInt { value: u64, length: usize },
    VarUInt(u64),
    VarUIntBytes(Vec<u8>),
    OctetString(Vec<u8>),
    VarOctetString(Vec<u8>),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 5 {
            0 => {
                let length = usize::arbitrary(g) % (MAX_INT_BYTES + 1);
                let mask = (1u64 << (8 * length)) - 1;
                Op::UInt {
                    value: u64::arbitrary(g) & mask,
                    length,
                }
            }
            1 => Op::VarUInt(u64::arbitrary(g) >> (u8::arbitrary(g) % 64)),
            2 => {
                let mut raw = Vec::<u8>::arbitrary(g);
                raw.truncate(255);
                Op::VarUIntBytes(raw)
            }
            3 => Op::OctetString(Vec::arbitrary(g)),
            _ => {
                // Reach past the short form regularly.
                let len = usize::arbitrary(g) % 1024;
                Op::VarOctetString(vec![u8::arbitrary(g); len])
            }
        }
    }
}

fn apply<S: OctetSink>(sink: &mut S, op: &Op) {
    let result = match op {
        Op::UInt { value, length } => sink.write_uint(*value, *length),
        Op::VarUInt(value) => sink.write_var_uint(*value),
        Op::VarUIntBytes(raw) => sink.write_var_uint_bytes(raw),
        Op::OctetString(bytes) => sink.write_octet_string(bytes, bytes.len()),
        Op::VarOctetString(bytes) => sink.write_var_octet_string(bytes),
    };
    result.unwrap();
}

fn read_back(reader: &mut Reader<'_>, op: &Op) -> bool {
    match op {
        Op::UInt { value, length } => {
            let peeked = reader.peek_uint(*length).unwrap();
            peeked == *value && reader.read_uint(*length).unwrap() == *value
        }
        Op::VarUInt(value) => {
            let payload = reader.peek_var_uint_bytes().unwrap();
            if payload.len() <= MAX_INT_BYTES {
                reader.read_var_uint().unwrap() == *value
            } else {
                let raw = reader.read_var_uint_bytes().unwrap();
                raw == &value.to_be_bytes()[8 - raw.len()..]
            }
        }
        Op::VarUIntBytes(raw) => reader.read_var_uint_bytes().unwrap() == raw.as_slice(),
        Op::OctetString(bytes) => reader.read_octet_string(bytes.len()).unwrap() == bytes.as_slice(),
        Op::VarOctetString(bytes) => {
            reader.peek_var_octet_string_len().unwrap() == bytes.len()
                && reader.read_var_octet_string().unwrap() == bytes.as_slice()
        }
    }
}

#[test]
fn predictor_size_equals_writer_len_quickcheck() {
    fn prop(ops: Vec<Op>) -> bool {
        let mut writer = Writer::new();
        let mut predictor = Predictor::new();
        for op in &ops {
            apply(&mut writer, op);
            apply(&mut predictor, op);
        }
        predictor.size() == writer.len()
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn writes_read_back_quickcheck() {
    fn prop(ops: Vec<Op>) -> bool {
        let mut writer = Writer::new();
        for op in &ops {
            apply(&mut writer, op);
        }
        let wire = writer.into_bytes();
        let mut reader = Reader::new(&wire);
        ops.iter().all(|op| read_back(&mut reader, op)) && !reader.has_remaining()
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

#[test]
fn skip_matches_read_quickcheck() {
    fn prop(op: Op) -> TestResult {
        let mut writer = Writer::new();
        apply(&mut writer, &op);
        let wire = writer.into_bytes();

        let mut read = Reader::new(&wire);
        let mut skipped = Reader::new(&wire);
        match &op {
            Op::UInt { length, .. } => {
                read.read_uint(*length).unwrap();
                skipped.skip_uint(*length).unwrap();
            }
            Op::VarUInt(_) | Op::VarUIntBytes(_) => {
                read.read_var_uint_bytes().unwrap();
                skipped.skip_var_uint().unwrap();
            }
            Op::OctetString(bytes) => {
                read.read_octet_string(bytes.len()).unwrap();
                skipped.skip_octet_string(bytes.len()).unwrap();
            }
            Op::VarOctetString(_) => {
                read.read_var_octet_string().unwrap();
                skipped.skip_var_octet_string().unwrap();
            }
        }
        TestResult::from_bool(read.cursor() == skipped.cursor() && read.cursor() == wire.len())
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Op) -> TestResult);
}

#[test]
fn bookmark_restore_quickcheck() {
    fn prop(ops: Vec<Op>, split: usize) -> TestResult {
        if ops.is_empty() {
            return TestResult::discard();
        }
        let mut writer = Writer::new();
        for op in &ops {
            apply(&mut writer, op);
        }
        let wire = writer.into_bytes();
        let mut reader = Reader::new(&wire);

        let split = split % ops.len();
        for op in &ops[..split] {
            read_back(&mut reader, op);
        }
        let mark = reader.cursor();
        reader.bookmark();
        for op in &ops[split..] {
            read_back(&mut reader, op);
        }
        reader.restore().unwrap();
        TestResult::from_bool(reader.cursor() == mark)
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<Op>, usize) -> TestResult);
}
