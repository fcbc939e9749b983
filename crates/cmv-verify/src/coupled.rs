//! Coupled-streams spectral gap check.

use serde::{Deserialize, Serialize};

use crate::manifest::StreamParams;

/// Result of the coupled-streams check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoupledOutcome {
    pub min_kappa: f64,
    /// `2 * sqrt(max(eta1, 0) * max(eta2, 0))`.
    pub coupling: f64,
    /// `min_kappa - coupling` on success, exactly `0.0` on failure.
    pub eps_eff: f64,
    pub pass: bool,
}

/// Verifies `min(kappa1, kappa2) - coupling > tol` in plain scalar arithmetic.
///
/// Negative rates are clamped to zero before the square root.
pub fn check_coupled(params: &StreamParams, tol: f64) -> CoupledOutcome {
    let min_kappa = params.kappa1.min(params.kappa2);
    let coupling = 2.0 * (params.eta1.max(0.0) * params.eta2.max(0.0)).sqrt();
    let gap = min_kappa - coupling;
    let pass = gap > tol;
    CoupledOutcome {
        min_kappa,
        coupling,
        eps_eff: if pass { gap } else { 0.0 },
        pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streams(kappa1: f64, kappa2: f64, eta1: f64, eta2: f64) -> StreamParams {
        StreamParams {
            kappa1,
            kappa2,
            eta1,
            eta2,
        }
    }

    #[test]
    fn weak_coupling_leaves_a_gap() {
        let outcome = check_coupled(&streams(0.3, 0.28, 0.04, 0.025), 0.0);
        assert!(outcome.pass);
        assert_eq!(outcome.min_kappa, 0.28);
        assert!((outcome.coupling - 0.063245553).abs() < 1e-8);
        assert!((outcome.eps_eff - 0.216754447).abs() < 1e-8);
    }

    #[test]
    fn strong_coupling_reports_zero_margin() {
        let outcome = check_coupled(&streams(0.1, 0.1, 0.1, 0.1), 0.0);
        assert!(!outcome.pass);
        assert!((outcome.coupling - 0.2).abs() < 1e-15);
        assert_eq!(outcome.eps_eff, 0.0);
    }

    #[test]
    fn negative_rates_are_clamped() {
        let outcome = check_coupled(&streams(0.1, 0.2, -4.0, 9.0), 0.0);
        assert_eq!(outcome.coupling, 0.0);
        assert!(outcome.pass);
        assert_eq!(outcome.eps_eff, 0.1);
    }

    #[test]
    fn zero_gap_is_not_strict() {
        let outcome = check_coupled(&streams(0.125, 0.25, 0.0625, 0.0625), 0.0);
        assert_eq!(outcome.coupling, 0.125);
        assert!(!outcome.pass);
        assert_eq!(outcome.eps_eff, 0.0);
    }

    #[test]
    fn tolerance_raises_the_bar() {
        let params = streams(0.3, 0.28, 0.04, 0.025);
        assert!(check_coupled(&params, 0.2).pass);
        let strict = check_coupled(&params, 0.25);
        assert!(!strict.pass);
        assert_eq!(strict.eps_eff, 0.0);
    }
}
