//! Evaluation of one interval of a natural cubic spline.
use num_traits::Float;

use crate::axis::Bracket;

/// Evaluate the cubic spline through `(x, y)` with second derivatives `y2`
/// on the interval selected by `bracket`.
///
/// With `h = x[i+1] - x[i]`, `b = bracket.frac` and `a = 1 - b`,
///
/// `a y[i] + b y[i+1] + ((a^3 - a) y2[i] + (b^3 - b) y2[i+1]) h^2 / 6`.
///
/// At either end of the interval the cubic term vanishes and the stored
/// sample is returned exactly. For an extrapolated bracket, the cubic of
/// the edge interval is continued.
#[inline]
pub fn evaluate<T: Float>(x: &[T], bracket: &Bracket<T>, y: &[T], y2: &[T]) -> T {
    let i = bracket.index;
    let h = x[i + 1] - x[i];
    let b = bracket.frac;
    let a = T::one() - b;
    let three = T::one() + T::one() + T::one();
    let six = three + three;

    let linear = a * y[i] + b * y[i + 1];
    let cubic = ((a * a * a - a) * y2[i] + (b * b * b - b) * y2[i + 1]) * (h * h) / six;
    linear + cubic
}

/// First derivative with respect to `x` of the same spline interval as [`evaluate`].
#[inline]
pub fn derivative<T: Float>(x: &[T], bracket: &Bracket<T>, y: &[T], y2: &[T]) -> T {
    let i = bracket.index;
    let h = x[i + 1] - x[i];
    let b = bracket.frac;
    let a = T::one() - b;
    let one = T::one();
    let three = one + one + one;
    let six = three + three;

    (y[i + 1] - y[i]) / h - (three * a * a - one) / six * h * y2[i]
        + (three * b * b - one) / six * h * y2[i + 1]
}
