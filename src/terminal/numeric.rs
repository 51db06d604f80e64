use ordered_float::{NotNan, OrderedFloat};

/// Lossy conversion to `f64`, used by `average`.
///
/// Implemented for the primitive numeric types and the `ordered-float`
/// wrappers so float keys used for sorting can be averaged directly.
pub trait AsF64 {
    fn as_f64(&self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($t:ty),* $(,)?) => {
        $(
            impl AsF64 for $t {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn as_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl AsF64 for OrderedFloat<f64> {
    fn as_f64(&self) -> f64 {
        self.0
    }
}

impl AsF64 for OrderedFloat<f32> {
    fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl AsF64 for NotNan<f64> {
    fn as_f64(&self) -> f64 {
        self.into_inner()
    }
}
