//! Verification engine for contraction-mapping smallness conditions.
//!
//! A manifest and a [`VerifyConfig`] go in; a [`VerificationReport`] with a
//! verdict and a signed margin comes out. Three checks are available: the
//! single-step core contraction, the decaying ledger, and the coupled-streams
//! spectral gap. The first two can run in scalar, ulp-guarded scalar, or
//! outward-rounded interval arithmetic.

pub mod compare;
pub mod config;
pub mod contraction;
pub mod coupled;
pub mod format;
mod hash;
pub mod interval;
pub mod ledger;
pub mod manifest;
pub mod report;
pub mod serde;
pub mod threshold;
pub mod ulp;
mod verify;

pub use compare::verified_le;
pub use config::{BoundConvention, CheckKind, VerifyConfig, VerifyMode};
pub use contraction::{check_core, CoreOutcome};
pub use coupled::{check_coupled, CoupledOutcome};
pub use format::render_lines;
pub use hash::stable_hash_string;
pub use interval::Interval;
pub use ledger::{check_ledger, LedgerOutcome, StepOutcome};
pub use manifest::{CoreParams, LedgerStep, Manifest, StreamParams};
pub use report::{CheckOutcome, VerificationReport};
pub use threshold::{Threshold, ThresholdSource, Witness};
pub use verify::verify_manifest;
