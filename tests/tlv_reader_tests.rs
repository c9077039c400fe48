//! TLV Reader Tests
//!
//! Framing validation, scan termination rules, and per-kind decoding.

use std::cell::RefCell;

use vbxlink::tlv::{DecodeKind, TlvReader, TlvValue, MAGIC};

/// Build a message buffer: magic signature followed by raw record bytes
fn message(records: &[u8]) -> Vec<u8> {
    let mut buffer = MAGIC.to_vec();
    buffer.extend_from_slice(records);
    buffer
}

// =============================================================================
// Magic Validation Tests
// =============================================================================

#[test]
fn test_empty_buffer_rejected() {
    let result = TlvReader::new(&[]);
    assert!(result.is_err());
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .contains("magic signature"));
}

#[test]
fn test_short_buffer_rejected() {
    let result = TlvReader::new(&MAGIC[..4]);
    assert!(result.is_err());
}

#[test]
fn test_wrong_magic_rejected() {
    let mut buffer = MAGIC.to_vec();
    buffer[0] = 0x42;

    let result = TlvReader::new(&buffer);
    assert!(result.is_err());
}

#[test]
fn test_wrong_version_byte_rejected() {
    let mut buffer = MAGIC.to_vec();
    buffer[8] = 0x02;

    let result = TlvReader::new(&buffer);
    assert!(result.is_err());
}

#[test]
fn test_bare_magic_accepted_yields_no_callbacks() {
    let buffer = MAGIC.to_vec();
    let fired = RefCell::new(0u32);

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |_, _| {
        *fired.borrow_mut() += 1;
    });

    reader.read_all().unwrap();
    assert_eq!(*fired.borrow(), 0);
}

// =============================================================================
// Numeric Decoding Tests
// =============================================================================

#[test]
fn test_decode_u32_record() {
    // Type 1, length 4, value 42
    let buffer = message(&[0x01, 0x04, 0x00, 0x00, 0x00, 0x2A]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |type_code, value| {
        seen.borrow_mut().push((type_code, value));
    });

    reader.read_all().unwrap();
    assert_eq!(seen.borrow().as_slice(), &[(1, TlvValue::Numeric(42))]);
}

#[test]
fn test_decode_all_numeric_widths() {
    let buffer = message(&[
        10, 1, 0xFF, // u8
        11, 2, 0xBE, 0xEF, // u16
        12, 4, 0xDE, 0xAD, 0xBE, 0xEF, // u32
        13, 8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, // u64
    ]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    for type_code in 10..=13 {
        reader.register(type_code, DecodeKind::Numeric, |type_code, value| {
            seen.borrow_mut().push((type_code, value));
        });
    }

    reader.read_all().unwrap();
    assert_eq!(
        seen.borrow().as_slice(),
        &[
            (10, TlvValue::Numeric(0xFF)),
            (11, TlvValue::Numeric(0xBEEF)),
            (12, TlvValue::Numeric(0xDEAD_BEEF)),
            (13, TlvValue::Numeric(0x0102_0304_0506_0708)),
        ]
    );
}

#[test]
fn test_unsupported_numeric_width_aborts_scan() {
    let buffer = message(&[
        1, 3, 0xAA, 0xBB, 0xCC, // 3 bytes is not a valid numeric width
        2, 1, 0x07, // never reached
    ]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });
    reader.register(2, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });

    let result = reader.read_all();
    assert!(result.is_err());

    let rendered = result.err().unwrap().to_string();
    assert!(rendered.contains("numeric length 3"));
    assert!(rendered.contains("type 1"));

    // The failure aborts the remainder of the scan
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_zero_length_numeric_is_error() {
    let buffer = message(&[1, 0]);

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |_, _| {});

    assert!(reader.read_all().is_err());
}

// =============================================================================
// Text Decoding Tests
// =============================================================================

#[test]
fn test_text_terminator_stripped() {
    let buffer = message(&[5, 4, b'a', b'b', b'c', 0x00]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(5, DecodeKind::Text, |_, value| {
        seen.borrow_mut().push(value);
    });

    reader.read_all().unwrap();
    assert_eq!(
        seen.borrow().as_slice(),
        &[TlvValue::Text("abc".to_string())]
    );
}

#[test]
fn test_text_without_terminator() {
    let buffer = message(&[5, 3, b'a', b'b', b'c']);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(5, DecodeKind::Text, |_, value| {
        seen.borrow_mut().push(value);
    });

    reader.read_all().unwrap();
    assert_eq!(
        seen.borrow().as_slice(),
        &[TlvValue::Text("abc".to_string())]
    );
}

#[test]
fn test_text_strips_exactly_one_nul() {
    // Only the final NUL is a terminator; interior bytes are kept
    let buffer = message(&[5, 3, b'a', 0x00, 0x00]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(5, DecodeKind::Text, |_, value| {
        seen.borrow_mut().push(value);
    });

    reader.read_all().unwrap();
    assert_eq!(
        seen.borrow().as_slice(),
        &[TlvValue::Text("a\0".to_string())]
    );
}

#[test]
fn test_empty_text_record() {
    let buffer = message(&[5, 0]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(5, DecodeKind::Text, |_, value| {
        seen.borrow_mut().push(value);
    });

    reader.read_all().unwrap();
    assert_eq!(seen.borrow().as_slice(), &[TlvValue::Text(String::new())]);
}

// =============================================================================
// Scan Termination Tests
// =============================================================================

#[test]
fn test_unknown_type_skipped() {
    let buffer = message(&[
        1, 1, 0x11, // registered
        9, 2, 0xAA, 0xBB, // unregistered, skipped silently
        2, 1, 0x22, // registered, still decoded
    ]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });
    reader.register(2, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });

    reader.read_all().unwrap();
    assert_eq!(seen.borrow().as_slice(), &[1, 2]);
}

#[test]
fn test_overrunning_record_stops_scan_silently() {
    let buffer = message(&[
        1, 1, 0x11, // decoded
        2, 10, 0x01, 0x02, // declares 10 bytes, only 2 remain
    ]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });
    reader.register(2, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });

    // Truncated tail is tolerated, prior records remain delivered
    reader.read_all().unwrap();
    assert_eq!(seen.borrow().as_slice(), &[1]);
}

#[test]
fn test_trailing_partial_header_stops_scan() {
    // One stray byte after the last record: less than a full header
    let buffer = message(&[1, 1, 0x11, 0x42]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |type_code, _| {
        seen.borrow_mut().push(type_code);
    });

    reader.read_all().unwrap();
    assert_eq!(seen.borrow().as_slice(), &[1]);
}

// =============================================================================
// Registration and Lifecycle Tests
// =============================================================================

#[test]
fn test_callbacks_fire_in_buffer_order() {
    // Records of the same type are not grouped; offset order wins
    let buffer = message(&[2, 1, 0x01, 1, 1, 0x02, 2, 1, 0x03]);
    let seen = RefCell::new(Vec::new());

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |type_code, value| {
        seen.borrow_mut().push((type_code, value));
    });
    reader.register(2, DecodeKind::Numeric, |type_code, value| {
        seen.borrow_mut().push((type_code, value));
    });

    reader.read_all().unwrap();
    assert_eq!(
        seen.borrow().as_slice(),
        &[
            (2, TlvValue::Numeric(1)),
            (1, TlvValue::Numeric(2)),
            (2, TlvValue::Numeric(3)),
        ]
    );
}

#[test]
fn test_reregistration_replaces_previous_handler() {
    let buffer = message(&[1, 1, 0x2A]);
    let first = RefCell::new(0u32);
    let second = RefCell::new(0u32);

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |_, _| {
        *first.borrow_mut() += 1;
    });
    reader.register(1, DecodeKind::Numeric, |_, _| {
        *second.borrow_mut() += 1;
    });

    reader.read_all().unwrap();
    assert_eq!(*first.borrow(), 0);
    assert_eq!(*second.borrow(), 1);
}

#[test]
fn test_second_read_all_is_noop() {
    let buffer = message(&[1, 1, 0x2A]);
    let fired = RefCell::new(0u32);

    let mut reader = TlvReader::new(&buffer).unwrap();
    reader.register(1, DecodeKind::Numeric, |_, _| {
        *fired.borrow_mut() += 1;
    });

    reader.read_all().unwrap();
    reader.read_all().unwrap();

    assert_eq!(*fired.borrow(), 1);
}
