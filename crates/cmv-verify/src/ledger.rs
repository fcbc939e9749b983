//! Multi-step decaying ledger check.
//!
//! Each step is verified on its own against the shared threshold:
//! `gamma_k * (1 + t_k * c_P) * exp(-sigma * delta_tau_k) <= bound`.
//! No state carries from one step to the next.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::compare::verified_le;
use crate::config::VerifyMode;
use crate::contraction::{contraction_factor, contraction_factor_interval};
use crate::interval::Interval;
use crate::manifest::LedgerStep;
use crate::threshold::Threshold;

/// Verdict for a single ledger step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub index: usize,
    pub lhs: f64,
    /// `lhs - limit`; negative when the step holds.
    pub gap: f64,
    pub pass: bool,
}

/// Aggregate ledger verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerOutcome {
    pub steps: Vec<StepOutcome>,
    /// Largest signed gap across steps, `None` for an empty ledger.
    pub worst_gap: Option<f64>,
    /// Conjunction of the step verdicts; false for an empty ledger.
    pub pass: bool,
}

fn check_step(
    index: usize,
    step: &LedgerStep,
    sigma: f64,
    threshold: &Threshold,
    mode: VerifyMode,
) -> StepOutcome {
    let (lhs, limit, pass) = match mode {
        VerifyMode::Scalar | VerifyMode::VerifiedScalar => {
            let decay = (-sigma * step.delta_tau).exp();
            let lhs = contraction_factor(step.gamma, step.t, threshold.c_p) * decay;
            let limit = threshold.scalar_limit();
            let pass = if mode == VerifyMode::Scalar {
                lhs <= limit
            } else {
                verified_le(lhs, limit)
            };
            (lhs, limit, pass)
        }
        VerifyMode::Interval => {
            let decay = (Interval::point(-sigma) * Interval::point(step.delta_tau)).exp();
            let lhs = contraction_factor_interval(step.gamma, step.t, threshold.c_p) * decay;
            let limit = threshold.interval_limit();
            (lhs.hi(), limit, lhs.hi() <= limit)
        }
    };
    let outcome = StepOutcome {
        index,
        lhs,
        gap: lhs - limit,
        pass,
    };
    trace!(index, lhs, gap = outcome.gap, pass, "ledger step");
    outcome
}

/// Verifies every step and aggregates the verdicts.
pub fn check_ledger(
    steps: &[LedgerStep],
    sigma: f64,
    threshold: &Threshold,
    mode: VerifyMode,
) -> LedgerOutcome {
    let outcomes: Vec<StepOutcome> = steps
        .iter()
        .enumerate()
        .map(|(index, step)| check_step(index, step, sigma, threshold, mode))
        .collect();
    let worst_gap = outcomes
        .iter()
        .map(|outcome| outcome.gap)
        .reduce(f64::max);
    let pass = !outcomes.is_empty() && outcomes.iter().all(|outcome| outcome.pass);
    LedgerOutcome {
        steps: outcomes,
        worst_gap,
        pass,
    }
}
