//! Test non-struct error.

use typekit::ValueKind;

#[derive(Clone, Copy, ValueKind)]
#[repr(C)]
enum Mode {
    On,
    Off,
}

fn main() {}
