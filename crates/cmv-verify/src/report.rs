use cmv_core::errors::CmvError;
use cmv_core::provenance::{SchemaVersion, VerifyProvenance};
use serde::{Deserialize, Serialize};

use crate::config::{CheckKind, VerifyMode};
use crate::contraction::CoreOutcome;
use crate::coupled::CoupledOutcome;
use crate::hash::stable_hash_string;
use crate::ledger::LedgerOutcome;
use crate::serde::to_canonical_json_bytes;
use crate::threshold::Threshold;

/// Schema of [`VerificationReport`] payloads.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Check-specific detail of a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckOutcome {
    Core(CoreOutcome),
    Ledger(LedgerOutcome),
    Coupled(CoupledOutcome),
}

impl CheckOutcome {
    pub fn pass(&self) -> bool {
        match self {
            CheckOutcome::Core(outcome) => outcome.pass,
            CheckOutcome::Ledger(outcome) => outcome.pass,
            CheckOutcome::Coupled(outcome) => outcome.pass,
        }
    }

    /// Primary signed margin: the gap for core, the worst gap for ledger and
    /// `eps_eff` for coupled streams. Core and ledger gaps are negative on
    /// success; `eps_eff` is positive.
    pub fn margin(&self) -> Option<f64> {
        match self {
            CheckOutcome::Core(outcome) => Some(outcome.gap),
            CheckOutcome::Ledger(outcome) => outcome.worst_gap,
            CheckOutcome::Coupled(outcome) => Some(outcome.eps_eff),
        }
    }
}

/// Verdict of one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Content-addressed hash of the report payload.
    pub analysis_hash: String,
    pub kind: CheckKind,
    pub mode: VerifyMode,
    pub threshold: Threshold,
    pub pass: bool,
    pub margin: Option<f64>,
    pub outcome: CheckOutcome,
    pub provenance: VerifyProvenance,
}

impl VerificationReport {
    /// Assembles a report and computes its stable hash.
    pub fn new(
        kind: CheckKind,
        mode: VerifyMode,
        threshold: Threshold,
        outcome: CheckOutcome,
        manifest_hash: String,
    ) -> Result<Self, CmvError> {
        let provenance = VerifyProvenance {
            schema_version: REPORT_SCHEMA,
            manifest_hash,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let pass = outcome.pass();
        let margin = outcome.margin();
        let analysis_hash =
            stable_hash_string(&(&kind, &mode, &threshold, pass, margin, &outcome, &provenance))?;
        Ok(Self {
            analysis_hash,
            kind,
            mode,
            threshold,
            pass,
            margin,
            outcome,
            provenance,
        })
    }

    /// Persists the report as canonical JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CmvError> {
        to_canonical_json_bytes(self)
    }
}
