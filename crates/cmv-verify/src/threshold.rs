//! Derivation of the safety threshold `eps` and the projection bound `c_P`.

use cmv_core::errors::{CmvError, ErrorInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BoundConvention, VerifyConfig};
use crate::interval::Interval;
use crate::manifest::Manifest;

pub const DEFAULT_ALPHA: f64 = 0.99;
pub const DEFAULT_BETA: f64 = 1.0;
pub const DEFAULT_SIGMA: f64 = 1.0;
pub const DEFAULT_DELTA_TAU_MIN: f64 = 0.1;
pub const DEFAULT_C_P: f64 = 1.0;

/// Witness parameters from which `eps` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    pub alpha: f64,
    pub beta: f64,
    pub sigma: f64,
    pub delta_tau_min: f64,
}

impl Default for Witness {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            sigma: DEFAULT_SIGMA,
            delta_tau_min: DEFAULT_DELTA_TAU_MIN,
        }
    }
}

impl Witness {
    /// Reads the witness fields, defaulting each one independently.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let defaults = Self::default();
        Self {
            alpha: manifest.alpha.unwrap_or(defaults.alpha),
            beta: manifest.beta.unwrap_or(defaults.beta),
            sigma: manifest.sigma.unwrap_or(defaults.sigma),
            delta_tau_min: manifest.delta_tau_min.unwrap_or(defaults.delta_tau_min),
        }
    }

    /// The witness as written in the manifest, when all four fields are present.
    pub fn complete(manifest: &Manifest) -> Option<Self> {
        Some(Self {
            alpha: manifest.alpha?,
            beta: manifest.beta?,
            sigma: manifest.sigma?,
            delta_tau_min: manifest.delta_tau_min?,
        })
    }

    /// `alpha^beta * exp(-sigma * delta_tau_min)`.
    pub fn eps(&self) -> f64 {
        self.alpha.powf(self.beta) * (-self.sigma * self.delta_tau_min).exp()
    }
}

/// Where the effective `eps` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Caller override (CLI flag or config file).
    Override,
    /// Direct `eps` field in the manifest.
    Manifest,
    /// Computed from the witness parameters.
    Derived,
}

/// Resolved threshold shared by every check of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub eps: f64,
    pub source: ThresholdSource,
    pub c_p: f64,
    pub bound: BoundConvention,
    pub tol: f64,
}

impl Threshold {
    /// Resolves `eps` and `c_P`.
    ///
    /// `eps` precedence: caller override, then a complete witness in the
    /// manifest, then the manifest's direct `eps`, then the witness with
    /// defaults filled in.
    pub fn resolve(manifest: &Manifest, config: &VerifyConfig) -> Result<Self, CmvError> {
        let (eps, source) = match (config.eps, Witness::complete(manifest), manifest.eps) {
            (Some(eps), _, _) => (eps, ThresholdSource::Override),
            (None, Some(witness), _) => (witness.eps(), ThresholdSource::Derived),
            (None, None, Some(eps)) => (eps, ThresholdSource::Manifest),
            (None, None, None) => (
                Witness::from_manifest(manifest).eps(),
                ThresholdSource::Derived,
            ),
        };
        if !(eps.is_finite() && eps >= 0.0) {
            return Err(CmvError::Input(
                ErrorInfo::new("invalid-eps", "eps must be finite and non-negative")
                    .with_context("eps", eps.to_string())
                    .with_context("source", format!("{source:?}")),
            ));
        }
        let c_p = config.c_p.or(manifest.c_p).unwrap_or(DEFAULT_C_P);
        if !(c_p.is_finite() && c_p >= 0.0) {
            return Err(CmvError::Input(
                ErrorInfo::new("invalid-c-p", "c_P must be finite and non-negative")
                    .with_context("c_P", c_p.to_string()),
            ));
        }
        debug!(eps, ?source, c_p, bound = config.bound.as_str(), "resolved threshold");
        Ok(Self {
            eps,
            source,
            c_p,
            bound: config.bound,
            tol: config.tol,
        })
    }

    /// Right-hand side of the contraction inequalities before tolerance.
    pub fn bound(&self) -> f64 {
        match self.bound {
            BoundConvention::OneMinusEps => 1.0 - self.eps,
            BoundConvention::Eps => self.eps,
        }
    }

    /// Comparison limit in scalar arithmetic.
    pub fn scalar_limit(&self) -> f64 {
        self.bound() + self.tol
    }

    /// Rounded-down lower end of the limit, for interval mode.
    pub fn interval_limit(&self) -> f64 {
        let mut limit = match self.bound {
            BoundConvention::OneMinusEps => Interval::point(1.0) + Interval::point(-self.eps),
            BoundConvention::Eps => Interval::point(self.eps),
        };
        if self.tol > 0.0 {
            limit = limit + Interval::point(self.tol);
        }
        limit.lo()
    }
}
