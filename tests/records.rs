//! Integration tests for complete NanoBuf records.
//!
//! These tests build whole records the way a generated serializer would: reserve the header,
//! patch the type id and field sizes, append the payload and finally write the length prefix.
//! The result is checked byte by byte and, where useful, read back with the little-endian
//! helpers from `nanobuf::io`.

use std::sync::{Arc, Mutex};

use nanobuf::{
    io::{read_le, read_le_at},
    prelude::*,
};

/// Walks a header written without length prefix and returns `(type_id, field_sizes)`.
fn read_header(bytes: &[u8], field_count: usize) -> Result<(u32, Vec<i32>)> {
    let mut offset = 0;
    let type_id = read_le_at::<u32>(bytes, &mut offset)?;
    let mut sizes = Vec::with_capacity(field_count);
    for _ in 0..field_count {
        sizes.push(read_le_at::<i32>(bytes, &mut offset)?);
    }
    Ok((type_id, sizes))
}

/// A record with one fixed-size and one variable-length field.
#[test]
fn test_mixed_record_layout() -> Result<()> {
    let mut writer = NanoBufWriter::with_config(WriterConfig::for_header(2, false));
    writer.write_type_id(3)?;
    writer.write_field_size(0, 8)?;
    writer.write_field_size(1, VARIABLE_FIELD_SIZE)?;

    writer.append_f64(-0.5);
    let name_len = writer.append_str_with_size("ünïcode")?;
    assert_eq!(name_len, "ünïcode".len());

    let bytes = writer.bytes();
    let (type_id, sizes) = read_header(bytes, 2)?;
    assert_eq!(type_id, 3);
    assert_eq!(sizes, vec![8, -1]);

    let mut offset = 12;
    assert_eq!(read_le_at::<f64>(bytes, &mut offset)?, -0.5);
    let string_len = read_le_at::<u32>(bytes, &mut offset)? as usize;
    assert_eq!(string_len, name_len);
    assert_eq!(&bytes[offset..offset + string_len], "ünïcode".as_bytes());
    assert_eq!(offset + string_len, writer.current_size());

    Ok(())
}

/// Field sizes that are only known after appending are patched afterwards.
#[test]
fn test_field_size_patched_after_append() -> Result<()> {
    let mut writer = NanoBufWriter::new(12);
    writer.write_type_id(21)?;

    let first = writer.append_str("alpha");
    let second = writer.append_bytes(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00]);

    writer.write_field_size(1, second as i32)?;
    writer.write_field_size(0, first as i32)?;

    let (type_id, sizes) = read_header(writer.bytes(), 2)?;
    assert_eq!(type_id, 21);
    assert_eq!(sizes, vec![5, 5]);
    assert_eq!(&writer.bytes()[12..17], b"alpha");
    assert_eq!(&writer.bytes()[17..], &[0xDE, 0xAD, 0xBE, 0xEF, 0x00]);

    Ok(())
}

/// The length prefix shifts the whole header by four bytes.
#[test]
fn test_length_prefixed_record() -> Result<()> {
    let mut writer = NanoBufWriter::with_length_prefix(12);
    writer.write_type_id(10)?;
    writer.write_field_size(0, 4)?;
    writer.append_i32(123);
    writer.write_length_prefix(12)?;

    assert_eq!(
        writer.bytes(),
        &[12, 0, 0, 0, 10, 0, 0, 0, 4, 0, 0, 0, 123, 0, 0, 0]
    );

    let total = writer.current_size() as u32;
    writer.write_length_prefix(total)?;
    assert_eq!(read_le::<u32>(writer.bytes())?, 16);

    Ok(())
}

/// Header space that was not reserved can be added with `alloc_more`.
#[test]
fn test_header_grown_on_demand() -> Result<()> {
    let mut writer = NanoBufWriter::new(4);
    writer.write_type_id(1)?;

    let err = writer.write_field_size(0, 2).unwrap_err();
    assert_eq!(
        err,
        Error::OutOfBounds {
            offset: 4,
            len: 4,
            size: 4
        }
    );

    writer.alloc_more(4);
    writer.write_field_size(0, 2)?;
    writer.append_u16(0x1234);

    assert_eq!(writer.bytes(), &[1, 0, 0, 0, 2, 0, 0, 0, 0x34, 0x12]);

    Ok(())
}

/// Patches may also target payload bytes once they exist, but never past the end.
#[test]
fn test_patch_inside_payload() -> Result<()> {
    let mut writer = NanoBufWriter::new(0);
    writer.append_u32(0);
    writer.append_u32(0);

    writer.write_type_id_at(-1, 4)?;
    assert_eq!(writer.bytes(), &[0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);

    assert!(writer.write_type_id_at(0, 5).is_err());
    assert_eq!(writer.current_size(), 8);

    Ok(())
}

/// Misconfigured writers reject the length prefix without touching the buffer.
#[test]
fn test_length_prefix_requires_configuration() {
    let mut writer = NanoBufWriter::with_config(WriterConfig::for_header(1, false));
    writer.append_bool(true);

    assert!(matches!(
        writer.write_length_prefix(9),
        Err(Error::LengthPrefixDisabled)
    ));
    assert_eq!(writer.bytes(), &[0, 0, 0, 0, 0, 0, 0, 0, 1]);
}

/// Writers are independent values and can be built on separate threads.
#[test]
fn test_writer_per_thread() {
    let handles: Vec<_> = (0..4_i32)
        .map(|id| {
            std::thread::spawn(move || -> Result<Vec<u8>> {
                let mut writer = NanoBufWriter::new(4);
                writer.write_type_id(id)?;
                writer.append_i32(id * 10);
                Ok(writer.into_bytes())
            })
        })
        .collect();

    for (id, handle) in handles.into_iter().enumerate() {
        let bytes = handle.join().unwrap().unwrap();
        assert_eq!(read_le::<i32>(&bytes).unwrap(), id as i32);
        assert_eq!(read_le::<i32>(&bytes[4..]).unwrap(), id as i32 * 10);
    }
}

/// `io::Write` sink that collects formatted tracing output for inspection.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writer events go through `tracing` and reach any installed subscriber.
#[test]
fn test_tracing_events_emitted() {
    let log = CapturedLog::default();
    let sink = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut writer = NanoBufWriter::new(0);
        writer.alloc_more(4);
        writer.write_type_id(1).unwrap();
        assert!(writer.write_length_prefix(4).is_err());
    });

    let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("creating NanoBuf writer"));
    assert!(output.contains("growing NanoBuf buffer"));
    assert!(output.contains("patching NanoBuf header cell"));

    let warning = output
        .lines()
        .find(|line| line.contains("length prefix written on a writer created without one"))
        .expect("missing warning for disabled length prefix");
    assert!(warning.contains("WARN"));
    assert!(warning.contains("length=4"));
}
