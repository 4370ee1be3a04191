//! Test missing repr error.

use typekit::ValueKind;

#[derive(Clone, Copy, ValueKind)]
struct Loose {
    a: u32,
    b: u32,
}

fn main() {}
