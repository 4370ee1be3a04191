//! Test AnyBitPattern with a bool field error.

use typekit::{AnyBitPattern, ValueKind};

#[derive(Clone, Copy, ValueKind, AnyBitPattern)]
#[repr(C)]
struct Toggle {
    on: bool,
    level: u8,
}

fn main() {}
