use cmv_verify::{
    check_core, check_coupled, check_ledger, BoundConvention, CoreParams, LedgerStep,
    StreamParams, Threshold, ThresholdSource, VerifyMode,
};
use proptest::prelude::*;

fn threshold(eps: f64, c_p: f64) -> Threshold {
    Threshold {
        eps,
        source: ThresholdSource::Override,
        c_p,
        bound: BoundConvention::OneMinusEps,
        tol: 0.0,
    }
}

fn mode_strategy() -> impl Strategy<Value = VerifyMode> {
    prop_oneof![
        Just(VerifyMode::Scalar),
        Just(VerifyMode::VerifiedScalar),
        Just(VerifyMode::Interval),
    ]
}

proptest! {
    #[test]
    fn core_verdict_is_monotone_in_gamma_and_t(
        gamma in 0f64..2.0, dgamma in 0f64..1.0,
        t in 0f64..2.0, dt in 0f64..1.0,
        c_p in 0f64..3.0, eps in 0f64..0.5,
        mode in mode_strategy(),
    ) {
        let limit = threshold(eps, c_p);
        let base = check_core(&CoreParams { gamma, t }, &limit, mode);
        let bigger_gamma = check_core(&CoreParams { gamma: gamma + dgamma, t }, &limit, mode);
        let bigger_t = check_core(&CoreParams { gamma, t: t + dt }, &limit, mode);
        prop_assert!(base.pass || !bigger_gamma.pass);
        prop_assert!(base.pass || !bigger_t.pass);
    }

    #[test]
    fn guarded_modes_never_pass_what_scalar_rejects(
        gamma in 0f64..2.0, t in 0f64..2.0, c_p in 0f64..3.0, eps in 0f64..0.5,
    ) {
        let limit = threshold(eps, c_p);
        let params = CoreParams { gamma, t };
        let scalar = check_core(&params, &limit, VerifyMode::Scalar);
        for mode in [VerifyMode::VerifiedScalar, VerifyMode::Interval] {
            let guarded = check_core(&params, &limit, mode);
            prop_assert!(scalar.pass || !guarded.pass);
        }
    }

    #[test]
    fn ledger_verdict_is_the_conjunction_of_steps(
        raw in prop::collection::vec((0f64..1.2, 0f64..0.2, 0f64..0.5), 0..8),
        sigma in 0f64..1.0,
        mode in mode_strategy(),
    ) {
        let steps: Vec<LedgerStep> = raw
            .into_iter()
            .map(|(gamma, t, delta_tau)| LedgerStep { gamma, t, delta_tau })
            .collect();
        let outcome = check_ledger(&steps, sigma, &threshold(0.01, 1.0), mode);
        prop_assert_eq!(outcome.steps.len(), steps.len());
        let all = !steps.is_empty() && outcome.steps.iter().all(|s| s.pass);
        prop_assert_eq!(outcome.pass, all);
        let max_gap = outcome.steps.iter().map(|s| s.gap).fold(f64::NEG_INFINITY, f64::max);
        match outcome.worst_gap {
            Some(gap) => prop_assert_eq!(gap, max_gap),
            None => prop_assert!(steps.is_empty()),
        }
    }

    #[test]
    fn coupled_margin_tracks_the_verdict(
        kappa1 in -1f64..1.0, kappa2 in -1f64..1.0,
        eta1 in -0.5f64..0.5, eta2 in -0.5f64..0.5,
    ) {
        let outcome = check_coupled(&StreamParams { kappa1, kappa2, eta1, eta2 }, 0.0);
        if outcome.pass {
            prop_assert!(outcome.eps_eff > 0.0);
        } else {
            prop_assert_eq!(outcome.eps_eff, 0.0);
        }
    }
}
