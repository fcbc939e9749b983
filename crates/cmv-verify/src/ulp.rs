//! Single-ulp stepping on `f64`.

/// Returns the smallest representable value strictly greater than `x`.
///
/// `NaN` and `+inf` are returned unchanged; both signed zeros step to the
/// smallest positive subnormal.
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Returns the largest representable value strictly less than `x`.
pub fn next_down(x: f64) -> f64 {
    -next_up(-x)
}
