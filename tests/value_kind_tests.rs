//! `#[derive(ValueKind)]`, `#[derive(AnyBitPattern)]` and byte-level
//! semantics of user value kinds.

use std::cmp::Ordering;

use typekit::{AnyBitPattern, Type, ValueKind, ValueKindExt, bits};

/// A 16-byte identifier with no meaningful `==`.
#[derive(Clone, Copy, ValueKind, AnyBitPattern)]
#[repr(C)]
struct Guid {
    bytes: [u8; 16],
}

#[derive(Clone, Copy, Debug, ValueKind)]
#[repr(transparent)]
struct Meters(f64);

#[derive(Clone, Copy, ValueKind)]
#[repr(C, packed)]
struct Header {
    kind: u8,
    length: u32,
}

#[derive(Clone, Copy, ValueKind)]
#[repr(C)]
struct Marker;

/// Readable as bytes, but not every byte is a valid `bool`.
#[derive(Clone, Copy, Debug, PartialEq, ValueKind)]
#[repr(C)]
struct Flagged {
    enabled: bool,
    level: u8,
}

fn random_guid() -> Guid {
    Guid {
        bytes: uuid::Uuid::new_v4().into_bytes(),
    }
}

#[test]
fn guid_default_and_binary() {
    let empty = Type::<Guid>::default_value();
    assert!(Type::<Guid>::is_default(&empty));

    let guid = random_guid();
    assert!(!Type::<Guid>::is_default(&guid));

    let provider = Type::<Guid>::value_type().unwrap();
    assert_eq!(&*provider.as_binary(&guid), &guid.bytes);
    assert!(provider.bitwise_equals(&guid, &guid));
    assert!(!provider.bitwise_equals(&guid, &empty));
}

#[test]
fn guid_bit_cast_round_trip() {
    let guid = random_guid();

    let wide: u128 = guid.bit_cast().unwrap();
    let back: Guid = wide.bit_cast().unwrap();
    assert!(back.bitwise_eq(&guid));

    let err = guid.bit_cast::<u64>().unwrap_err();
    assert!(err.is_size_mismatch());
    assert!(err.to_string().contains("16 bytes"));
}

#[test]
fn bitwise_equality_ignores_float_semantics() {
    assert!(!Meters(0.0).bitwise_eq(&Meters(-0.0)));
    assert!(Meters(f64::NAN).bitwise_eq(&Meters(f64::NAN)));
    assert_eq!(Meters(f64::NAN).bitwise_hash(), Meters(f64::NAN).bitwise_hash());
}

#[test]
fn compare_agrees_with_equality() {
    let a = random_guid();
    let b = a;
    assert_eq!(a.bitwise_cmp(&b), Ordering::Equal);

    let mut c = a;
    c.bytes[15] = c.bytes[15].wrapping_add(1);
    assert_ne!(a.bitwise_cmp(&c), Ordering::Equal);
    assert_eq!(a.bitwise_cmp(&c) == Ordering::Equal, a.bitwise_eq(&c));
}

#[test]
fn packed_and_unit_structs() {
    assert_eq!(Header::FIELD_BYTES, 5);
    assert_eq!(bits::as_bytes(&Header { kind: 1, length: 0 }).len(), 5);
    assert!(Type::<Header>::is_default(&Type::<Header>::default_value()));

    assert_eq!(Marker::FIELD_BYTES, 0);
    assert!(Type::<Marker>::is_default(&Marker));
    assert!(Type::<Marker>::flags().contains(typekit::TypeFlags::ZERO_SIZED));
}

#[test]
fn transparent_wrappers_share_layout() {
    let meters: f64 = Meters(2.5).bit_cast().unwrap();
    assert_eq!(meters, 2.5);
    assert_eq!(Meters::FIELD_BYTES, 8);
}

#[test]
fn bool_fields_read_as_bytes() {
    let provider = Type::<Flagged>::value_type().unwrap();
    assert_eq!(Type::<Flagged>::default_value(), Flagged { enabled: false, level: 0 });

    let on = Flagged { enabled: true, level: 3 };
    assert!(!Type::<Flagged>::is_default(&on));
    assert_eq!(&*provider.as_binary(&on), &[1, 3]);

    let raw: u16 = on.bit_cast().unwrap();
    assert_eq!(raw.to_ne_bytes(), [1, 3]);
}

#[cfg(feature = "uuid")]
#[test]
fn uuid_is_a_value_kind() {
    let id = uuid::Uuid::new_v4();
    assert!(Type::<uuid::Uuid>::is_default(&uuid::Uuid::nil()));
    assert!(!Type::<uuid::Uuid>::is_default(&id));
    assert_eq!(&*id.as_binary(), id.as_bytes());
}
