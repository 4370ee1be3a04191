//! Test non-ValueKind field error.

use typekit::ValueKind;

#[derive(Clone, Copy, ValueKind)]
#[repr(C)]
struct Borrowed {
    name: &'static str,
}

fn main() {}
