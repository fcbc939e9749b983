//! Ulp-guarded scalar comparison.

use crate::ulp::{next_down, next_up};

/// Decides `a <= b` after moving `a` one ulp up and `b` one ulp down.
///
/// The nudge goes against the claim, so a pass survives one ulp of rounding
/// error on either side. It does not track error through whatever arithmetic
/// produced `a` and `b`; use interval mode when that matters. `NaN` on either
/// side never passes.
pub fn verified_le(a: f64, b: f64) -> bool {
    next_up(a) <= next_down(b)
}
