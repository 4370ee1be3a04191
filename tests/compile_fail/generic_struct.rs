//! Test generic struct error.

use typekit::ValueKind;

#[derive(Clone, Copy, ValueKind)]
#[repr(C)]
struct Wrapper<T: Copy> {
    inner: T,
}

fn main() {}
