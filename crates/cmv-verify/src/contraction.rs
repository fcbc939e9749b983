//! Single-step Banach contraction check: `gamma * (1 + t * c_P) <= bound`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::verified_le;
use crate::config::VerifyMode;
use crate::interval::Interval;
use crate::manifest::CoreParams;
use crate::threshold::Threshold;

/// Result of the core contraction check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreOutcome {
    /// Left-hand side; the worst-case upper bound in interval mode.
    pub lhs: f64,
    /// Comparison limit; the rounded-down lower bound in interval mode.
    pub rhs: f64,
    /// `lhs - rhs`, negative when the inequality holds.
    pub gap: f64,
    pub pass: bool,
}

pub(crate) fn contraction_factor(gamma: f64, t: f64, c_p: f64) -> f64 {
    gamma * (1.0 + t * c_p)
}

pub(crate) fn contraction_factor_interval(gamma: f64, t: f64, c_p: f64) -> Interval {
    Interval::point(gamma) * (Interval::point(1.0) + Interval::point(t) * Interval::point(c_p))
}

/// Evaluates the contraction inequality in the requested arithmetic.
///
/// Interval mode only passes when the upper bound of the left side clears the
/// lower bound of the right side, so it may reject inequalities that hold by
/// less than the accumulated rounding slack but never accepts one that fails.
pub fn check_core(params: &CoreParams, threshold: &Threshold, mode: VerifyMode) -> CoreOutcome {
    let (lhs, rhs, pass) = match mode {
        VerifyMode::Scalar => {
            let lhs = contraction_factor(params.gamma, params.t, threshold.c_p);
            let rhs = threshold.scalar_limit();
            (lhs, rhs, lhs <= rhs)
        }
        VerifyMode::VerifiedScalar => {
            let lhs = contraction_factor(params.gamma, params.t, threshold.c_p);
            let rhs = threshold.scalar_limit();
            (lhs, rhs, verified_le(lhs, rhs))
        }
        VerifyMode::Interval => {
            let lhs = contraction_factor_interval(params.gamma, params.t, threshold.c_p);
            let rhs = threshold.interval_limit();
            debug!(%lhs, rhs, "core contraction enclosure");
            (lhs.hi(), rhs, lhs.hi() <= rhs)
        }
    };
    CoreOutcome {
        lhs,
        rhs,
        gap: lhs - rhs,
        pass,
    }
}
