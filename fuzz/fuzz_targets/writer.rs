#![no_main]

use libfuzzer_sys::fuzz_target;
use nanobuf::{NanoBufWriter, WriterConfig};

fn take<const N: usize>(data: &mut &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let len = data.len().min(N);
    out[..len].copy_from_slice(&data[..len]);
    *data = &data[len..];
    out
}

fuzz_target!(|data: &[u8]| {
    let mut data = data;
    let [initial, flags] = take::<2>(&mut data);
    let mut writer = NanoBufWriter::with_config(
        WriterConfig::new(usize::from(initial)).length_prefix(flags & 1 == 1),
    );

    while let [op, rest @ ..] = data {
        data = rest;
        let before = writer.current_size();
        let arg = u32::from_le_bytes(take::<4>(&mut data));

        match op % 12 {
            0 => {
                let _ = writer.write_length_prefix(arg);
            }
            1 => {
                let _ = writer.write_type_id(arg as i32);
            }
            2 => {
                let _ = writer.write_type_id_at(arg as i32, usize::from(arg as u8));
            }
            3 => {
                let _ = writer.write_field_size(usize::from(arg as u8), -1);
            }
            4 => {
                let _ = writer.write_field_size_at(usize::from(arg as u8), arg as i32);
            }
            5 => writer.alloc_more(usize::from(arg as u8)),
            6 => assert_eq!(writer.append_i32(arg as i32), 4),
            7 => assert_eq!(writer.append_bool(arg & 1 == 1), 1),
            8 => {
                let wide = i128::from(arg) << (arg % 96);
                let _ = writer.append_int64(wide);
            }
            9 => assert_eq!(writer.append_f64(f64::from(arg)), 8),
            10 => {
                let len = usize::from(arg as u8).min(data.len());
                let text = String::from_utf8_lossy(&data[..len]).into_owned();
                data = &data[len..];
                assert_eq!(writer.append_str_with_size(&text).ok(), Some(text.len()));
            }
            _ => {
                let len = usize::from(arg as u8).min(data.len());
                assert_eq!(writer.append_bytes(&data[..len]), len);
                data = &data[len..];
            }
        }

        assert!(writer.current_size() >= before);
    }

    assert_eq!(writer.bytes().len(), writer.current_size());
});
