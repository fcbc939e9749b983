use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use cmv_core::errors::{CmvError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Which smallness inequality an invocation verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    CoreBanach,
    Ledger,
    CoupledStream,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [
        CheckKind::CoreBanach,
        CheckKind::Ledger,
        CheckKind::CoupledStream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::CoreBanach => "core_banach",
            CheckKind::Ledger => "ledger",
            CheckKind::CoupledStream => "coupled_stream",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = CmvError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| {
                CmvError::Config(
                    ErrorInfo::new("unknown-check", format!("unknown check type `{raw}`"))
                        .with_hint("expected one of core_banach, ledger, coupled_stream"),
                )
            })
    }
}

/// Arithmetic used to evaluate an inequality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VerifyMode {
    /// Plain floating point with a direct comparison.
    #[default]
    Scalar,
    /// Plain floating point, final comparison guarded by one ulp per side.
    VerifiedScalar,
    /// Outward-rounded interval propagation through every operation.
    Interval,
}

impl VerifyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyMode::Scalar => "scalar",
            VerifyMode::VerifiedScalar => "verified-scalar",
            VerifyMode::Interval => "interval",
        }
    }
}

impl fmt::Display for VerifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerifyMode {
    type Err = CmvError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "scalar" => Ok(VerifyMode::Scalar),
            "verified-scalar" => Ok(VerifyMode::VerifiedScalar),
            "interval" => Ok(VerifyMode::Interval),
            other => Err(CmvError::config(
                "unknown-mode",
                format!("unknown verification mode `{other}`"),
            )),
        }
    }
}

/// How `eps` turns into the right-hand side of the contraction inequalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BoundConvention {
    /// `lhs <= 1 - eps`: eps is a safety margin below one.
    #[default]
    OneMinusEps,
    /// `lhs <= eps`: eps is the contraction budget itself.
    Eps,
}

impl BoundConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundConvention::OneMinusEps => "one-minus-eps",
            BoundConvention::Eps => "eps",
        }
    }
}

impl FromStr for BoundConvention {
    type Err = CmvError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "one-minus-eps" => Ok(BoundConvention::OneMinusEps),
            "eps" => Ok(BoundConvention::Eps),
            other => Err(CmvError::config(
                "unknown-bound",
                format!("unknown bound convention `{other}`"),
            )),
        }
    }
}

/// Immutable settings assembled once per invocation and threaded through the
/// checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VerifyConfig {
    /// Check to run; must be set before verification.
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<CheckKind>,
    /// Arithmetic mode.
    #[serde(default)]
    pub mode: VerifyMode,
    /// Explicit threshold taking precedence over the manifest.
    #[serde(default)]
    pub eps: Option<f64>,
    /// Explicit projection norm bound taking precedence over the manifest.
    #[serde(default, rename = "c_P", alias = "c_p")]
    pub c_p: Option<f64>,
    /// Slack added to every threshold.
    #[serde(default = "VerifyConfig::default_tol")]
    pub tol: f64,
    /// Right-hand side convention for the core and ledger checks.
    #[serde(default)]
    pub bound: BoundConvention,
}

impl VerifyConfig {
    const fn default_tol() -> f64 {
        0.0
    }

    /// Parses a YAML configuration document.
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, CmvError> {
        serde_yaml::from_slice(bytes).map_err(|err| CmvError::serde("yaml-read", err))
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, CmvError> {
        let bytes = fs::read(path).map_err(|err| {
            CmvError::Input(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config = Self::from_yaml_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects negative or non-finite numeric settings.
    pub fn validate(&self) -> Result<(), CmvError> {
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(invalid_setting("tol", self.tol));
        }
        if let Some(eps) = self.eps {
            if !(eps.is_finite() && eps >= 0.0) {
                return Err(invalid_setting("eps", eps));
            }
        }
        if let Some(c_p) = self.c_p {
            if !(c_p.is_finite() && c_p >= 0.0) {
                return Err(invalid_setting("c_P", c_p));
            }
        }
        Ok(())
    }

    /// Returns the selected check or a configuration error when none was chosen.
    pub fn require_kind(&self) -> Result<CheckKind, CmvError> {
        self.kind.ok_or_else(|| {
            CmvError::Config(
                ErrorInfo::new("missing-check", "no check type selected")
                    .with_hint("pass --type or set `type` in the config file"),
            )
        })
    }
}

fn invalid_setting(name: &str, value: f64) -> CmvError {
    CmvError::Config(
        ErrorInfo::new(
            "invalid-setting",
            format!("`{name}` must be finite and non-negative"),
        )
        .with_context(name, value.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_defaults_fill_missing_fields() {
        let config = VerifyConfig::from_yaml_slice(b"type: ledger\n").unwrap();
        assert_eq!(config.kind, Some(CheckKind::Ledger));
        assert_eq!(config.mode, VerifyMode::Scalar);
        assert_eq!(config.bound, BoundConvention::OneMinusEps);
        assert_eq!(config.tol, 0.0);
        assert!(config.eps.is_none() && config.c_p.is_none());
    }

    #[test]
    fn yaml_accepts_all_fields() {
        let yaml = b"type: core_banach\nmode: verified-scalar\neps: 0.01\nc_P: 2.0\ntol: 1.0e-12\nbound: eps\n";
        let config = VerifyConfig::from_yaml_slice(yaml).unwrap();
        assert_eq!(config.kind, Some(CheckKind::CoreBanach));
        assert_eq!(config.mode, VerifyMode::VerifiedScalar);
        assert_eq!(config.eps, Some(0.01));
        assert_eq!(config.c_p, Some(2.0));
        assert_eq!(config.tol, 1e-12);
        assert_eq!(config.bound, BoundConvention::Eps);
        config.validate().unwrap();
    }

    #[test]
    fn validation_rejects_negative_settings() {
        let config = VerifyConfig {
            tol: -1.0,
            ..VerifyConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().info().code, "invalid-setting");
        let config = VerifyConfig {
            c_p: Some(f64::NAN),
            ..VerifyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn kinds_parse_from_cli_names() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.as_str().parse::<CheckKind>().unwrap(), kind);
        }
        let err = "banach".parse::<CheckKind>().unwrap_err();
        assert_eq!(err.info().code, "unknown-check");
        assert_eq!("interval".parse::<VerifyMode>().unwrap(), VerifyMode::Interval);
        assert!("exact".parse::<VerifyMode>().is_err());
    }

    #[test]
    fn missing_kind_is_a_config_error() {
        let err = VerifyConfig::default().require_kind().unwrap_err();
        assert!(matches!(err, CmvError::Config(_)));
    }
}
