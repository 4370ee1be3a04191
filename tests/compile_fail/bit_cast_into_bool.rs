//! Test bit_cast into a type without AnyBitPattern error.

use typekit::ValueKindExt;

fn main() {
    let _ = 2u8.bit_cast::<bool>();
}
