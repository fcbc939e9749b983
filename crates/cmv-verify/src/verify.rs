use cmv_core::errors::CmvError;
use tracing::{debug, info};

use crate::config::{CheckKind, VerifyConfig, VerifyMode};
use crate::contraction::check_core;
use crate::coupled::check_coupled;
use crate::hash::stable_hash_string;
use crate::ledger::check_ledger;
use crate::manifest::Manifest;
use crate::report::{CheckOutcome, VerificationReport};
use crate::threshold::{Threshold, Witness};

/// Resolves the threshold, runs the configured check and returns its report.
///
/// Errors only on malformed input; a failed inequality is reported through
/// `VerificationReport::pass`.
pub fn verify_manifest(
    manifest: &Manifest,
    config: &VerifyConfig,
) -> Result<VerificationReport, CmvError> {
    config.validate()?;
    let kind = config.require_kind()?;
    let threshold = Threshold::resolve(manifest, config)?;
    let outcome = match kind {
        CheckKind::CoreBanach => {
            let params = manifest.core_params()?;
            debug!(gamma = params.gamma, t = params.t, "core contraction inputs");
            CheckOutcome::Core(check_core(&params, &threshold, config.mode))
        }
        CheckKind::Ledger => {
            let steps = manifest.ledger_steps()?;
            let sigma = Witness::from_manifest(manifest).sigma;
            debug!(steps = steps.len(), sigma, "ledger inputs");
            CheckOutcome::Ledger(check_ledger(&steps, sigma, &threshold, config.mode))
        }
        CheckKind::CoupledStream => {
            let params = manifest.stream_params()?;
            if config.mode != VerifyMode::Scalar {
                debug!(
                    mode = config.mode.as_str(),
                    "coupled streams are evaluated in scalar arithmetic only"
                );
            }
            CheckOutcome::Coupled(check_coupled(&params, threshold.tol))
        }
    };
    let report = VerificationReport::new(
        kind,
        config.mode,
        threshold,
        outcome,
        stable_hash_string(manifest)?,
    )?;
    info!(
        check = kind.as_str(),
        pass = report.pass,
        margin = ?report.margin,
        "verification finished"
    );
    Ok(report)
}
