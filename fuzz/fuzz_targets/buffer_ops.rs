#![no_main]

use std::io::Cursor;

use growbuf::{Buffer, BufferConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, Vec<(u8, Vec<u8>)>)| {
    let (unit, ops) = input;
    let unit = usize::from(unit).max(1);
    let mut buf = Buffer::new(BufferConfig::new(unit).unwrap()).unwrap();
    let mut model: Vec<u8> = Vec::new();

    for (kind, payload) in ops {
        let before = buf.capacity();
        match kind % 6 {
            0 => {
                buf.append(&payload).unwrap();
                model.extend_from_slice(&payload);
            }
            1 => {
                let byte = payload.first().copied().unwrap_or(0);
                buf.append_byte(byte).unwrap();
                model.push(byte);
            }
            2 => {
                let text = String::from_utf8_lossy(&payload);
                buf.append_fmt(format_args!("{}|{}", text, payload.len())).unwrap();
                model.extend_from_slice(format!("{}|{}", text, payload.len()).as_bytes());
            }
            3 => {
                buf.append_from_reader(&mut Cursor::new(&payload)).unwrap();
                model.extend_from_slice(&payload);
            }
            4 => {
                buf.truncate();
                model.clear();
                assert_eq!(buf.capacity(), before);
            }
            _ => {
                // Verify: clones are exact and sized to their content
                let copy = buf.try_clone().unwrap();
                assert_eq!(copy, buf);
                assert_eq!(copy.capacity(), copy.len());
            }
        }

        // Verify: content tracks the model, capacity moves in whole units
        assert_eq!(buf.as_bytes(), &model[..]);
        assert!(buf.len() <= buf.capacity());
        assert_eq!((buf.capacity() - before) % unit, 0);
    }
});
