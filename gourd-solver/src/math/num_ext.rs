//! Rounding divisions which are not available on the stable standard library.

pub(crate) trait NumExt {
    /// Division with rounding towards positive infinity.
    fn ceil_div(self, other: Self) -> Self;

    /// Division with rounding towards negative infinity.
    ///
    /// Note this is different from truncating, which is rounding toward zero.
    fn floor_div(self, other: Self) -> Self;
}

impl NumExt for i64 {
    fn ceil_div(self, other: Self) -> Self {
        let d = self / other;
        let r = self % other;
        if (r > 0 && other > 0) || (r < 0 && other < 0) {
            d + 1
        } else {
            d
        }
    }

    fn floor_div(self, other: Self) -> Self {
        let d = self / other;
        let r = self % other;
        if (r > 0 && other < 0) || (r < 0 && other > 0) {
            d - 1
        } else {
            d
        }
    }
}
