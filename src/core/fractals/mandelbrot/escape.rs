use crate::core::data::complex::Complex;

/// Squared escape radius: an orbit with `a² + b² > ESCAPE_LIMIT` has diverged.
pub const ESCAPE_LIMIT: f64 = 4.0;

/// Escape-time count for `c = cx + cy·i`.
///
/// Returns a value below `max_iterations` when the orbit escapes and exactly
/// `max_iterations` when it stays bounded for the whole budget.
#[inline]
#[must_use]
pub fn escape_iterations(cx: f64, cy: f64, max_iterations: u32) -> u32 {
    escape_iterations_within(Complex::new(cx, cy), max_iterations, ESCAPE_LIMIT)
}

/// [`escape_iterations`] with an explicit squared escape radius.
///
/// The orbit starts at `z = c`; the count is the number of `z² + c` steps taken
/// until the first value outside the radius.
#[inline]
#[must_use]
pub fn escape_iterations_within(c: Complex, max_iterations: u32, limit: f64) -> u32 {
    let mut z = c;

    for iteration in 1..=max_iterations {
        z = z.square_add(c);
        if z.magnitude_squared() > limit {
            return iteration;
        }
    }

    max_iterations
}

#[inline]
#[must_use]
pub fn is_bounded(iterations: u32, max_iterations: u32) -> bool {
    iterations >= max_iterations
}
