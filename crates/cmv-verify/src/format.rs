//! Plain-ASCII console rendering of verification reports.

use crate::report::{CheckOutcome, VerificationReport};

/// Replaces anything that is not printable ASCII with `?`.
pub fn ascii_only(line: &str) -> String {
    line.chars()
        .map(|ch| if ch == ' ' || ch.is_ascii_graphic() { ch } else { '?' })
        .collect()
}

fn fixed_range(value: f64) -> bool {
    value == 0.0 || (1e-3..1e4).contains(&value.abs())
}

/// Signed margin: fixed point for moderate magnitudes, scientific otherwise.
pub fn format_margin(value: f64) -> String {
    if fixed_range(value) {
        format!("{value:+.6}")
    } else {
        format!("{value:+.3e}")
    }
}

/// Unsigned variant of [`format_margin`] for thresholds.
pub fn format_value(value: f64) -> String {
    if fixed_range(value) {
        format!("{value:.6}")
    } else {
        format!("{value:.3e}")
    }
}

fn status(pass: bool) -> &'static str {
    if pass {
        "OK"
    } else {
        "FAIL"
    }
}

/// Renders the console lines for a report.
pub fn render_lines(report: &VerificationReport) -> Vec<String> {
    let mut lines = vec![format!(
        "eps = {}   c_P = {}   type = {}   mode = {}",
        format_value(report.threshold.eps),
        format_value(report.threshold.c_p),
        report.kind,
        report.mode
    )];
    match &report.outcome {
        CheckOutcome::Core(outcome) => lines.push(format!(
            "Core Banach: {} (gap = {})",
            status(outcome.pass),
            format_margin(outcome.gap)
        )),
        CheckOutcome::Ledger(outcome) => {
            if outcome.steps.is_empty() {
                lines.push("Ledger: no steps provided".to_string());
            }
            for step in &outcome.steps {
                lines.push(format!(
                    "  step {}: {} (gap = {})",
                    step.index,
                    status(step.pass),
                    format_margin(step.gap)
                ));
            }
            let summary = match outcome.worst_gap {
                Some(gap) => format!(
                    "Ledger overall: {} (worst gap = {})",
                    status(outcome.pass),
                    format_margin(gap)
                ),
                None => format!("Ledger overall: {}", status(outcome.pass)),
            };
            lines.push(summary);
        }
        CheckOutcome::Coupled(outcome) => lines.push(format!(
            "Coupled streams: {} (eps_eff = {})",
            status(outcome.pass),
            format_margin(outcome.eps_eff)
        )),
    }
    lines.into_iter().map(|line| ascii_only(&line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_switch_notation_by_magnitude() {
        assert_eq!(format_margin(-0.3395), "-0.339500");
        assert_eq!(format_margin(0.0), "+0.000000");
        assert_eq!(format_margin(2.5e-7), "+2.500e-7");
        assert_eq!(format_margin(-12346.0), "-1.235e4");
        assert_eq!(format_value(0.99943), "0.999430");
        assert_eq!(format_value(5.0e-4), "5.000e-4");
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(ascii_only("eps \u{2248} 0.1\t"), "eps ? 0.1?");
        assert_eq!(ascii_only("plain line"), "plain line");
    }
}
