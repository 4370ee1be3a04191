//! Test padding detection error.

use typekit::ValueKind;

#[derive(Clone, Copy, ValueKind)]
#[repr(C)]
struct Padded {
    tag: u8,
    value: u32,
}

fn main() {}
