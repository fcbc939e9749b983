//! Outward-rounded interval arithmetic.
//!
//! Only the operations the contraction checks need are provided: addition,
//! multiplication and the exponential. Every result endpoint is pushed one ulp
//! outward, so the returned interval encloses the exact result for any reals
//! drawn from the operands, provided the underlying `+`, `*` and `exp` are
//! faithfully rounded.

use std::fmt;
use std::ops::{Add, Mul};

use cmv_core::errors::{CmvError, ErrorInfo};
use serde::Serialize;

use crate::ulp::{next_down, next_up};

/// Closed interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Builds an interval, rejecting reversed or `NaN` endpoints.
    pub fn new(lo: f64, hi: f64) -> Result<Self, CmvError> {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(CmvError::Input(
                ErrorInfo::new("invalid-interval", "interval endpoints must satisfy lo <= hi")
                    .with_context("lo", lo.to_string())
                    .with_context("hi", hi.to_string()),
            ));
        }
        Ok(Self { lo, hi })
    }

    /// Degenerate interval enclosing exactly `value`.
    pub const fn point(value: f64) -> Self {
        Self {
            lo: value,
            hi: value,
        }
    }

    /// Lower endpoint.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper endpoint.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    fn has_nan(&self) -> bool {
        self.lo.is_nan() || self.hi.is_nan()
    }

    /// Exponential; monotone, so applied endpoint-wise. The lower bound never
    /// drops below zero.
    pub fn exp(self) -> Self {
        Self {
            lo: next_down(self.lo.exp()).max(0.0),
            hi: next_up(self.hi.exp()),
        }
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        Interval {
            lo: next_down(self.lo + rhs.lo),
            hi: next_up(self.hi + rhs.hi),
        }
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        if self.has_nan() || rhs.has_nan() {
            return Interval {
                lo: f64::NEG_INFINITY,
                hi: f64::INFINITY,
            };
        }
        // Operand signs are unconstrained, so every corner is a candidate.
        // A zero endpoint times an infinite one contributes zero.
        let corner = |a: f64, b: f64| if a == 0.0 || b == 0.0 { 0.0 } else { a * b };
        let corners = [
            corner(self.lo, rhs.lo),
            corner(self.lo, rhs.hi),
            corner(self.hi, rhs.lo),
            corner(self.hi, rhs.hi),
        ];
        let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Interval {
            lo: next_down(min),
            hi: next_up(max),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:e}, {:e}]", self.lo, self.hi)
    }
}
