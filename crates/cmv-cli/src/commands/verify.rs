use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use cmv_core::errors::{CmvError, ErrorInfo};
use cmv_verify::{
    render_lines, verify_manifest, BoundConvention, CheckKind, Manifest, VerifyConfig, VerifyMode,
};
use tracing::debug;

use super::example;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the JSON manifest.
    pub manifest: Option<PathBuf>,
    /// Check to run: core_banach, ledger or coupled_stream.
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<CheckKind>,
    /// Override the eps threshold.
    #[arg(long)]
    pub eps: Option<f64>,
    /// Override c_P, the operator norm bound of the projection.
    #[arg(long = "cP", value_name = "C_P")]
    pub c_p: Option<f64>,
    /// Arithmetic mode: scalar, verified-scalar or interval.
    #[arg(long)]
    pub mode: Option<VerifyMode>,
    /// Shorthand for `--mode verified-scalar`.
    #[arg(long, conflicts_with = "mode")]
    pub verified: bool,
    /// Slack added to every threshold.
    #[arg(long)]
    pub tol: Option<f64>,
    /// Threshold convention: one-minus-eps or eps.
    #[arg(long)]
    pub bound: Option<BoundConvention>,
    /// YAML file with defaults for the options above.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print a sample manifest for the given check type instead of verifying.
    #[arg(long, value_name = "TYPE")]
    pub example: Option<CheckKind>,
    /// Also write the canonical JSON report to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Outcome of a completed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Merges the config file with command line overrides.
fn build_config(args: &VerifyArgs) -> Result<VerifyConfig, CmvError> {
    let mut config = match &args.config {
        Some(path) => VerifyConfig::load(path)?,
        None => VerifyConfig::default(),
    };
    if args.kind.is_some() {
        config.kind = args.kind;
    }
    if args.eps.is_some() {
        config.eps = args.eps;
    }
    if args.c_p.is_some() {
        config.c_p = args.c_p;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.verified {
        config.mode = VerifyMode::VerifiedScalar;
    }
    if let Some(tol) = args.tol {
        config.tol = tol;
    }
    if let Some(bound) = args.bound {
        config.bound = bound;
    }
    config.validate()?;
    Ok(config)
}

pub fn run(args: &VerifyArgs) -> Result<Verdict, Box<dyn Error>> {
    if let Some(kind) = args.example {
        example::run(kind)?;
        return Ok(Verdict::Pass);
    }
    let Some(path) = args.manifest.as_ref() else {
        return Err(Box::new(CmvError::Input(
            ErrorInfo::new("missing-manifest", "no manifest path given")
                .with_hint("pass a manifest path or --example <TYPE>"),
        )));
    };
    let config = build_config(args)?;
    debug!(?config, manifest = %path.display(), "starting verification");
    let manifest = Manifest::load(path)?;
    let report = verify_manifest(&manifest, &config)?;
    for line in render_lines(&report) {
        println!("{line}");
    }
    if let Some(out) = &args.json {
        fs::write(out, report.to_bytes()?)?;
    }
    Ok(if report.pass {
        Verdict::Pass
    } else {
        Verdict::Fail
    })
}
