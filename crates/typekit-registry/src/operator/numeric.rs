//! Built-in numeric conversions.
//!
//! Every ordered pair of distinct numeric primitives converts with `as`
//! semantics. Classification follows the usual primitive conversion table:
//! lossless conversions are implicit, everything else needs an explicit
//! lookup unless narrowing is allowed implicitly.

use std::any::TypeId;

use typekit_core::PrimitiveKind;

use super::{Conversion, ConversionKind, Registered};

/// Classify a numeric conversion. `None` for identical kinds.
pub(crate) fn classify(
    from: PrimitiveKind,
    to: PrimitiveKind,
    implicit_narrowing: bool,
) -> Option<Conversion> {
    if from == to {
        return None;
    }

    let (kind, cost, lossless) = match (from.is_float(), to.is_float()) {
        (false, false) => classify_integer(from, to),
        (false, true) => (
            ConversionKind::IntToFloat,
            Conversion::COST_INT_TO_FLOAT,
            from.precision_bits() <= to.precision_bits(),
        ),
        (true, false) => (ConversionKind::FloatToInt, Conversion::COST_FLOAT_TO_INT, false),
        (true, true) if to.size() > from.size() => {
            (ConversionKind::Widening, Conversion::COST_WIDENING, true)
        }
        (true, true) => (ConversionKind::Narrowing, Conversion::COST_NARROWING, false),
    };

    Some(Conversion {
        kind,
        cost,
        is_implicit: lossless || implicit_narrowing,
    })
}

fn classify_integer(from: PrimitiveKind, to: PrimitiveKind) -> (ConversionKind, u32, bool) {
    let widening = (ConversionKind::Widening, Conversion::COST_WIDENING, true);
    let narrowing = (ConversionKind::Narrowing, Conversion::COST_NARROWING, false);

    match (from.is_signed(), to.is_signed()) {
        (a, b) if a == b => {
            if to.size() >= from.size() {
                widening
            } else {
                narrowing
            }
        }
        // Unsigned to larger signed holds every value.
        (false, true) if to.size() > from.size() => widening,
        _ if to.size() == from.size() => {
            let cost = if from.is_signed() {
                Conversion::COST_SIGNED_TO_UNSIGNED
            } else {
                Conversion::COST_UNSIGNED_TO_SIGNED
            };
            (ConversionKind::SignChange, cost, false)
        }
        _ => narrowing,
    }
}

struct Table<F> {
    implicit_narrowing: bool,
    insert: F,
}

impl<F: FnMut(TypeId, TypeId, Registered)> Table<F> {
    fn add<U: 'static, T: 'static>(&mut self, func: fn(U) -> T) {
        let (Some(from), Some(to)) = (PrimitiveKind::of::<U>(), PrimitiveKind::of::<T>()) else {
            return;
        };
        if let Some(conversion) = classify(from, to, self.implicit_narrowing) {
            (self.insert)(TypeId::of::<U>(), TypeId::of::<T>(), Registered::new(conversion, func));
        }
    }
}

macro_rules! numeric_table {
    ($table:ident; $($ty:ty),* $(,)?) => {
        numeric_table!(@rows $table; [$($ty),*]; [$($ty),*]);
    };
    (@rows $table:ident; [$($from:ty),*]; $targets:tt) => {
        $( numeric_table!(@row $table; $from; $targets); )*
    };
    (@row $table:ident; $from:ty; [$($to:ty),*]) => {
        $( $table.add::<$from, $to>(|value: $from| value as $to); )*
    };
}

/// Call `insert` with `(source, target, operator)` for every built-in
/// numeric conversion.
#[allow(clippy::unnecessary_cast)]
pub(crate) fn for_each(implicit_narrowing: bool, insert: impl FnMut(TypeId, TypeId, Registered)) {
    let mut table = Table {
        implicit_narrowing,
        insert,
    };
    numeric_table!(table; i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
}
