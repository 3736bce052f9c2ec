use crate::test::{
    array, ascii_key, ascii_value, doc, object, NO_SHARING, SHARED_KEYS, SHARED_VALUES,
};
use crate::value::Value;
use crate::{Decoder, ErrorKind, SharedTable};

fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

#[test]
fn short_value_reference() {
    let value = crate::decode(b":)\n\x03\xf8\x41ab\x01\xf9").unwrap();
    assert_eq!(value, Value::Array(vec![string("ab"), string("ab")]));
}

#[test]
fn references_resolve_in_document_order() {
    let body = array(&[
        ascii_value("zero"),
        ascii_value("one"),
        vec![0x02],
        vec![0x01],
        ascii_value("two"),
        vec![0x03],
    ]);
    let value = crate::decode(&doc(SHARED_VALUES, &body)).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            string("zero"),
            string("one"),
            string("one"),
            string("zero"),
            string("two"),
            string("two"),
        ])
    );
}

#[test]
fn unicode_values_are_shared() {
    let mut body = vec![0xf8, 0x80];
    body.extend_from_slice("é".as_bytes());
    body.extend_from_slice(&[0x01, 0xf9]);
    let value = crate::decode(&doc(SHARED_VALUES, &body)).unwrap();
    assert_eq!(value, Value::Array(vec![string("é"), string("é")]));
}

#[test]
fn long_value_reference() {
    let mut items = (0..300)
        .map(|i| ascii_value(&format!("v{}", i)))
        .collect::<Vec<_>>();
    // 1 << 8 | 0x2b = 299
    items.push(vec![0xed, 0x2b]);
    items.push(vec![0xec, 0x05]);

    let value = crate::decode(&doc(SHARED_VALUES, &array(&items))).unwrap();
    let values = value.as_array().unwrap();
    assert_eq!(values.len(), 302);
    assert_eq!(values[300], string("v299"));
    assert_eq!(values[301], string("v5"));
}

#[test]
fn key_references() {
    let body = array(&[
        object(&[(ascii_key("name"), vec![0xc2])]),
        object(&[(vec![0x40], vec![0xc4])]),
        object(&[(vec![0x30, 0x00], vec![0xc6])]),
    ]);
    let value = crate::decode(&doc(SHARED_KEYS, &body)).unwrap();
    assert_eq!(value[0]["name"], Value::Integer(1));
    assert_eq!(value[1]["name"], Value::Integer(2));
    assert_eq!(value[2]["name"], Value::Integer(3));
}

#[test]
fn keys_and_values_use_separate_tables() {
    let body = object(&[
        (ascii_key("k"), ascii_value("v")),
        (ascii_key("k2"), vec![0x01]),
        (vec![0x40, 0x02], vec![0x21]),
    ]);
    // only "v" has been registered as a value
    let e = crate::decode(&doc(SHARED_KEYS | SHARED_VALUES, &body)).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidReference {
            table: SharedTable::Values,
            index: 1,
            len: 1,
        }
    );

    let body = object(&[
        (ascii_key("k"), ascii_value("v")),
        (ascii_key("k2"), vec![0x01]),
        (vec![0x41], vec![0x21]),
    ]);
    let value = crate::decode(&doc(SHARED_KEYS | SHARED_VALUES, &body)).unwrap();
    assert_eq!(value["k"], string("v"));
    assert_eq!(value["k2"], Value::Null);
}

#[test]
fn short_strings_up_to_64_bytes_are_shared() {
    // short ASCII, 64 bytes
    let s = "a".repeat(64);
    let body = array(&[ascii_value(&s), vec![0x01]]);
    assert_eq!(body[1], 0x7f);
    let value = crate::decode(&doc(SHARED_VALUES, &body)).unwrap();
    assert_eq!(value, Value::Array(vec![string(&s), string(&s)]));

    // short unicode, 64 bytes
    let s = "é".repeat(32);
    let mut body = vec![0xf8, 0xbe];
    body.extend_from_slice(s.as_bytes());
    body.extend_from_slice(&[0x01, 0xf9]);
    let value = crate::decode(&doc(SHARED_VALUES, &body)).unwrap();
    assert_eq!(value, Value::Array(vec![string(&s), string(&s)]));

    // short ASCII key, 64 bytes
    let k = "k".repeat(64);
    let body = array(&[
        object(&[(ascii_key(&k), vec![0xc2])]),
        object(&[(vec![0x40], vec![0xc4])]),
    ]);
    let value = crate::decode(&doc(SHARED_KEYS, &body)).unwrap();
    assert_eq!(value[0][&*k], Value::Integer(1));
    assert_eq!(value[1][&*k], Value::Integer(2));
}

#[test]
fn strings_over_64_bytes_are_not_shared() {
    // 65 byte short unicode string
    let s = "a".repeat(65);
    let mut body = vec![0xf8, 0xbf];
    body.extend_from_slice(s.as_bytes());
    body.extend_from_slice(&[0x01, 0xf9]);

    let e = crate::decode(&doc(SHARED_VALUES, &body)).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidReference {
            table: SharedTable::Values,
            index: 0,
            len: 0,
        }
    );
    assert_eq!(e.offset(), Some(4 + 2 + 65));
}

#[test]
fn long_strings_are_not_shared() {
    let body = array(&[vec![0xe0, b'a', b'b', 0xfc], vec![0x01]]);
    let e = crate::decode(&doc(SHARED_VALUES, &body)).unwrap_err();
    assert!(matches!(e.kind(), ErrorKind::InvalidReference { .. }));
}

#[test]
fn reference_token_zero_is_invalid() {
    let body = array(&[ascii_value("a"), vec![0x00]]);
    let e = crate::decode(&doc(SHARED_VALUES, &body)).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidReference {
            table: SharedTable::Values,
            index: -1,
            len: 1,
        }
    );
}

#[test]
fn value_sharing_disabled() {
    let body = array(&[ascii_value("ab"), vec![0x01]]);
    let e = crate::decode(&doc(SHARED_KEYS, &body)).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::SharingNotEnabled {
            table: SharedTable::Values
        }
    );
    assert_eq!(e.offset(), Some(8));

    let e = crate::decode(&doc(NO_SHARING, &[0xec, 0x00])).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::SharingNotEnabled {
            table: SharedTable::Values
        }
    );
}

#[test]
fn key_sharing_disabled() {
    let body = object(&[(vec![0x40], vec![0x21])]);
    let e = crate::decode(&doc(SHARED_VALUES, &body)).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::SharingNotEnabled {
            table: SharedTable::Keys
        }
    );

    let body = object(&[(vec![0x31, 0x00], vec![0x21])]);
    let e = crate::decode(&doc(SHARED_VALUES, &body)).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::SharingNotEnabled {
            table: SharedTable::Keys
        }
    );
}

fn distinct_strings(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| ascii_value(&format!("s{}", i))).collect()
}

#[test]
fn full_table_still_resolves() {
    let mut items = distinct_strings(1024);
    // index 1023
    items.push(vec![0xef, 0xff]);
    let value = crate::decode(&doc(SHARED_VALUES, &array(&items))).unwrap();
    assert_eq!(value[1024], string("s1023"));
}

#[test]
fn table_resets_after_1024_entries() {
    let mut items = distinct_strings(1025);
    items.push(vec![0x01]);
    let value = crate::decode(&doc(SHARED_VALUES, &array(&items))).unwrap();
    assert_eq!(value[1025], string("s1024"));

    let mut items = distinct_strings(1025);
    items.push(vec![0x02]);
    let e = crate::decode(&doc(SHARED_VALUES, &array(&items))).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidReference {
            table: SharedTable::Values,
            index: 1,
            len: 1,
        }
    );

    let mut items = distinct_strings(1025);
    items.push(vec![0xef, 0xff]);
    let e = crate::decode(&doc(SHARED_VALUES, &array(&items))).unwrap_err();
    assert!(matches!(
        e.kind(),
        ErrorKind::InvalidReference { index: 1023, .. }
    ));
}

#[test]
fn key_table_resets_after_1024_entries() {
    let mut entries = (0..1025)
        .map(|i| (ascii_key(&format!("k{}", i)), vec![0x21]))
        .collect::<Vec<_>>();
    entries.push((vec![0x41], vec![0x21]));
    let e = crate::decode(&doc(SHARED_KEYS, &object(&entries))).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidReference {
            table: SharedTable::Keys,
            index: 1,
            len: 1,
        }
    );
}

#[test]
fn state_does_not_leak_between_calls() {
    let decoder = Decoder::new();
    let first = doc(SHARED_VALUES, &array(&[ascii_value("ab"), vec![0x01]]));
    assert_eq!(
        decoder.decode(&first).unwrap(),
        Value::Array(vec![string("ab"), string("ab")])
    );

    let e = decoder.decode(&doc(SHARED_VALUES, &[0x01])).unwrap_err();
    assert_eq!(
        *e.kind(),
        ErrorKind::InvalidReference {
            table: SharedTable::Values,
            index: 0,
            len: 0,
        }
    );
}
