//! Typed view of the JSON verification manifest.
//!
//! Every field is optional on the wire. The per-check accessors enforce the
//! required parameter block for the selected check and convert it into the
//! strongly typed structs the engine consumes.

use std::fs;
use std::path::Path;

use cmv_core::errors::{CmvError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::config::CheckKind;

/// Raw manifest as deserialized from JSON.
///
/// `deltaTauMin` and `epsilon` are accepted as spellings of `delta_tau_min`
/// and `eps`; when both spellings appear, the snake_case one wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ManifestWire")]
pub struct Manifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_tau_min: Option<f64>,
    /// Direct threshold, used when no override or complete witness is supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(rename = "c_P", skip_serializing_if = "Option::is_none")]
    pub c_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_params: Option<RawCoreParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<RawStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_params: Option<RawStreamParams>,
}

#[derive(Deserialize)]
struct ManifestWire {
    #[serde(default)]
    alpha: Option<f64>,
    #[serde(default)]
    beta: Option<f64>,
    #[serde(default)]
    sigma: Option<f64>,
    #[serde(default)]
    delta_tau_min: Option<f64>,
    #[serde(default, rename = "deltaTauMin")]
    delta_tau_min_camel: Option<f64>,
    #[serde(default)]
    eps: Option<f64>,
    #[serde(default)]
    epsilon: Option<f64>,
    #[serde(default, rename = "c_P")]
    c_p: Option<f64>,
    #[serde(default)]
    core_params: Option<RawCoreParams>,
    #[serde(default)]
    steps: Option<Vec<RawStep>>,
    #[serde(default)]
    stream_params: Option<RawStreamParams>,
}

impl From<ManifestWire> for Manifest {
    fn from(wire: ManifestWire) -> Self {
        Self {
            alpha: wire.alpha,
            beta: wire.beta,
            sigma: wire.sigma,
            delta_tau_min: wire.delta_tau_min.or(wire.delta_tau_min_camel),
            eps: wire.eps.or(wire.epsilon),
            c_p: wire.c_p,
            core_params: wire.core_params,
            steps: wire.steps,
            stream_params: wire.stream_params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCoreParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_tau: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawStreamParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta2: Option<f64>,
}

/// Single-step contraction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreParams {
    /// Contraction factor.
    pub gamma: f64,
    /// Step weight.
    pub t: f64,
}

/// One ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerStep {
    pub gamma: f64,
    pub t: f64,
    /// Time increment feeding the per-step decay `exp(-sigma * delta_tau)`.
    pub delta_tau: f64,
}

/// Coupling constants and cross-coupling rates of two streams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamParams {
    pub kappa1: f64,
    pub kappa2: f64,
    pub eta1: f64,
    pub eta2: f64,
}

fn missing_block(block: &str, kind: CheckKind) -> CmvError {
    CmvError::Input(
        ErrorInfo::new(
            "missing-block",
            format!("manifest has no `{block}` block"),
        )
        .with_context("check", kind.as_str())
        .with_hint(format!("`{block}` is required for {kind}")),
    )
}

fn require(value: Option<f64>, field: &str) -> Result<f64, CmvError> {
    value.ok_or_else(|| {
        CmvError::Input(
            ErrorInfo::new(
                "missing-field",
                format!("required field `{field}` is missing"),
            )
            .with_context("field", field),
        )
    })
}

impl Manifest {
    /// Parses a manifest from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CmvError> {
        serde_json::from_slice(bytes).map_err(|err| CmvError::serde("json-read", err))
    }

    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> Result<Self, CmvError> {
        let bytes = fs::read(path).map_err(|err| {
            CmvError::Input(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Serializes the manifest as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, CmvError> {
        serde_json::to_string_pretty(self).map_err(|err| CmvError::serde("json-write", err))
    }

    /// Parameters for the core contraction check.
    pub fn core_params(&self) -> Result<CoreParams, CmvError> {
        let raw = self
            .core_params
            .as_ref()
            .ok_or_else(|| missing_block("core_params", CheckKind::CoreBanach))?;
        Ok(CoreParams {
            gamma: require(raw.gamma, "core_params.gamma")?,
            t: require(raw.t, "core_params.t")?,
        })
    }

    /// Ledger steps in manifest order.
    ///
    /// A step without `delta_tau` inherits the manifest's `delta_tau_min`. An
    /// empty list is returned as-is; the ledger check reports it as a failure.
    pub fn ledger_steps(&self) -> Result<Vec<LedgerStep>, CmvError> {
        let raw_steps = self
            .steps
            .as_ref()
            .ok_or_else(|| missing_block("steps", CheckKind::Ledger))?;
        raw_steps
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                Ok(LedgerStep {
                    gamma: require(raw.gamma, &format!("steps[{idx}].gamma"))?,
                    t: require(raw.t, &format!("steps[{idx}].t"))?,
                    delta_tau: require(
                        raw.delta_tau.or(self.delta_tau_min),
                        &format!("steps[{idx}].delta_tau"),
                    )?,
                })
            })
            .collect()
    }

    /// Parameters for the coupled-streams check.
    pub fn stream_params(&self) -> Result<StreamParams, CmvError> {
        let raw = self
            .stream_params
            .as_ref()
            .ok_or_else(|| missing_block("stream_params", CheckKind::CoupledStream))?;
        Ok(StreamParams {
            kappa1: require(raw.kappa1, "stream_params.kappa1")?,
            kappa2: require(raw.kappa2, "stream_params.kappa2")?,
            eta1: require(raw.eta1, "stream_params.eta1")?,
            eta2: require(raw.eta2, "stream_params.eta2")?,
        })
    }

    /// Sample manifest for the given check type.
    pub fn example(kind: CheckKind) -> Self {
        let mut manifest = Manifest {
            alpha: Some(0.9982),
            beta: Some(0.0021),
            sigma: Some(0.12),
            delta_tau_min: Some(0.0047),
            c_p: Some(1.0),
            ..Manifest::default()
        };
        match kind {
            CheckKind::CoreBanach => {
                manifest.core_params = Some(RawCoreParams {
                    gamma: Some(0.6),
                    t: Some(0.1),
                });
            }
            CheckKind::Ledger => {
                manifest.steps = Some(
                    [(0.993, 0.01, 0.005), (0.992, 0.015, 0.0048), (0.994, 0.012, 0.0052)]
                        .into_iter()
                        .map(|(gamma, t, delta_tau)| RawStep {
                            gamma: Some(gamma),
                            t: Some(t),
                            delta_tau: Some(delta_tau),
                        })
                        .collect(),
                );
            }
            CheckKind::CoupledStream => {
                manifest.stream_params = Some(RawStreamParams {
                    kappa1: Some(0.3),
                    kappa2: Some(0.28),
                    eta1: Some(0.04),
                    eta2: Some(0.025),
                });
            }
        }
        manifest
    }
}
