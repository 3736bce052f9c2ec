use crate::test::{array, doc, NO_SHARING};
use crate::{Decoder, ErrorKind, TextEncoding};

#[test]
fn invalid_header() {
    let e = crate::decode(b"X)\n\x00\x22").unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidHeader {
            found: b"X)\n".to_vec()
        }
    );
    assert_eq!(e.offset(), Some(0));

    // the signature is checked before the flag byte is needed
    let e = crate::decode(b"X)\n").unwrap_err();
    assert!(matches!(e.kind(), ErrorKind::InvalidHeader { .. }));
}

#[test]
fn empty_input() {
    let e = crate::decode(b"").unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::TruncatedInput {
            needed: 3,
            available: 0
        }
    );
}

#[test]
fn header_without_value() {
    let e = crate::decode(b":)\n\x00").unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::TruncatedInput {
            needed: 1,
            available: 0
        }
    );
    assert_eq!(e.offset(), Some(4));
}

#[test]
fn reserved_value_token() {
    let e = crate::decode(&doc(NO_SHARING, &[0x27])).unwrap_err();
    assert_eq!(*e.kind(), ErrorKind::ReservedToken { token: 0x27 });
    assert_eq!(e.offset(), Some(4));
}

#[test]
fn unknown_value_tokens() {
    let unassigned = (0x2a..=0x3f)
        .chain(0xe1..=0xe3)
        .chain(0xe5..=0xeb)
        .chain(0xf0..=0xf7)
        .chain(vec![0xf9, 0xfb, 0xfc, 0xfe, 0xff]);
    for token in unassigned {
        let e = crate::decode(&doc(NO_SHARING, &[token])).unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::UnknownToken { token });
        assert_eq!(e.offset(), Some(4));
    }
}

#[test]
fn truncated_values() {
    let cases: &[&[u8]] = &[
        &[0x24],
        &[0x24, 0x01],
        &[0x26, 0x82, 0x55],
        &[0x28, 0, 0, 0],
        &[0x29, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0x43, b'a', b'b'],
        &[0x80, 0xc3],
        &[0xe0, b'a', b'b'],
        &[0xe4],
        &[0xfd, 0x85, 1, 2, 3],
        &[0xf8, 0x21],
        &[0xfa],
        &[0xfa, 0x81, b'a'],
    ];
    for case in cases {
        let e = crate::decode(&doc(NO_SHARING, case)).unwrap_err();
        assert!(
            matches!(e.kind(), ErrorKind::TruncatedInput { .. }),
            "{:?}: {}",
            case,
            e
        );
    }
}

#[test]
fn truncated_error_context() {
    let e = crate::decode(&doc(NO_SHARING, &[0x44, b'a', b'b'])).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::TruncatedInput {
            needed: 5,
            available: 2
        }
    );
    assert_eq!(e.offset(), Some(5));
}

#[test]
fn invalid_ascii() {
    let e = crate::decode(&doc(NO_SHARING, &[0x40, 0xc3])).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidText {
            encoding: TextEncoding::Ascii
        }
    );
    assert_eq!(e.offset(), Some(4));
}

#[test]
fn invalid_utf8() {
    let e = crate::decode(&doc(NO_SHARING, &[0x80, 0xc3, 0x28])).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidText {
            encoding: TextEncoding::Utf8
        }
    );
}

#[test]
fn recursion_limit() {
    let decoder = Decoder::builder().max_depth(3).build();

    let mut body = array(&[array(&[array(&[])])]);
    assert!(decoder.decode(&doc(NO_SHARING, &body)).is_ok());

    body = array(&[body]);
    let e = decoder.decode(&doc(NO_SHARING, &body)).unwrap_err();
    assert_eq!(*e.kind(), ErrorKind::RecursionLimitExceeded);
    assert_eq!(e.offset(), Some(7));
}

#[test]
fn default_recursion_limit() {
    let mut body = vec![0xf8; 200];
    body.extend_from_slice(&[0xf9; 200]);
    let e = crate::decode(&doc(NO_SHARING, &body)).unwrap_err();
    assert_eq!(*e.kind(), ErrorKind::RecursionLimitExceeded);

    let mut body = vec![0xf8; 128];
    body.extend_from_slice(&[0xf9; 128]);
    assert!(crate::decode(&doc(NO_SHARING, &body)).is_ok());
}

#[test]
fn vint_limit() {
    let body = [0x24, 0x01, 0x01, 0x01, 0x80];
    assert!(crate::decode(&doc(NO_SHARING, &body)).is_ok());

    let decoder = Decoder::builder().max_vint_bytes(3).build();
    let e = decoder.decode(&doc(NO_SHARING, &body)).unwrap_err();
    assert_eq!(*e.kind(), ErrorKind::UnterminatedVint);
    assert_eq!(e.offset(), Some(5));
}

#[test]
fn oversized_raw_binary() {
    let mut body = vec![0xfd];
    body.extend(crate::test::vint(u64::MAX >> 1));
    let e = crate::decode(&doc(NO_SHARING, &body)).unwrap_err();
    assert!(matches!(
        e.kind(),
        ErrorKind::TruncatedInput { .. } | ErrorKind::NumberOutOfRange
    ));
}

#[test]
fn display() {
    let e = crate::decode(&doc(NO_SHARING, &[0xf0])).unwrap_err();
    assert_eq!(e.to_string(), "unknown token 0xf0 at offset 4");
}
