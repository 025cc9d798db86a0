//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::positional::{AxisRegressions, PrincipalAxes};
use crate::result::{ProfileReport, ProfileSetReport, WaferReport};

/// Correlation below which a scan is flagged as unlike the others.
const WEAK_CORRELATION: f64 = 0.9;

fn separator() -> String {
    "\u{2500}".repeat(62)
}

/// Format a WaferReport for human-readable terminal output.
pub fn format_wafer_report(report: &WaferReport) -> String {
    let mut output = String::new();
    let sep = separator();

    output.push_str("pad-metrology: wafer\n");
    output.push_str(&sep);
    output.push_str("\n\n");

    output.push_str(&format!("  Pads analyzed: {}\n", report.pad_count));
    output.push_str(&format!(
        "  Failed reads:  {}\n",
        format_count(report.failed_count)
    ));
    output.push_str(&format!(
        "  Outliers:      {} (> {} std dev)\n",
        format_count(report.rejected_count),
        report.config.outlier_sigma
    ));
    output.push('\n');

    let d = &report.dimensions;
    output.push_str("  Pad dimensions (microns):\n");
    output.push_str(&format!(
        "    X: nominal {:.2}, average {:.2}, std {:.3}, bias {:+.3}\n",
        d.x.nominal,
        d.x.average,
        d.x.std_dev,
        d.x.bias()
    ));
    output.push_str(&format!(
        "    Y: nominal {:.2}, average {:.2}, std {:.3}, bias {:+.3}\n",
        d.y.nominal,
        d.y.average,
        d.y.std_dev,
        d.y.bias()
    ));
    output.push('\n');

    let (du, dv) = report.field.mean_offset();
    output.push_str(&format!(
        "  Mean positional offset: ({:+.4}, {:+.4})\n",
        du, dv
    ));
    output.push_str(&format_axes("Raw field axes", &report.axes));
    output.push_str(&format_axes("Centred field axes", &report.centered_axes));
    output.push('\n');

    output.push_str(&format_regressions("Positional error", &report.positional));
    output.push_str(&format_regressions("Pad width error", &report.dimensional));
    output.push('\n');

    output.push_str(&sep);
    output.push('\n');
    output.push_str("Note: Slopes are error per unit reference position, in ppm.\n");

    output
}

/// Format a ProfileReport for human-readable terminal output.
pub fn format_profile_report(report: &ProfileReport) -> String {
    let mut output = String::new();
    let sep = separator();

    output.push_str("pad-metrology: profile\n");
    output.push_str(&sep);
    output.push_str("\n\n");

    let p = &report.profile;
    output.push_str(&format!(
        "  Points: {} (trimmed {} front, {} back)\n\n",
        p.values.len(),
        p.trimmed_front,
        p.trimmed_back
    ));

    let e = &report.extrema;
    output.push_str("  Minimum Z values:\n");
    for (z, x) in e.min_values.iter().zip(&e.min_locations) {
        output.push_str(&format!("    {:>12.4} at x = {:.4}\n", z, x));
    }
    output.push_str("  Maximum Z values:\n");
    for (z, x) in e.max_values.iter().zip(&e.max_locations) {
        output.push_str(&format!("    {:>12.4} at x = {:.4}\n", z, x));
    }
    output.push('\n');

    let s = &report.slopes;
    output.push_str("  Steepest descending slopes:\n");
    for ((m, x), w) in s.min_slopes.iter().zip(&s.min_locations).zip(&s.min_weights) {
        output.push_str(&format!("    {:>12.5} at x = {:.4}, weight {}\n", m, x, w));
    }
    output.push_str("  Steepest ascending slopes:\n");
    for ((m, x), w) in s.max_slopes.iter().zip(&s.max_locations).zip(&s.max_weights) {
        output.push_str(&format!("    {:>12.5} at x = {:.4}, weight {}\n", m, x, w));
    }
    output.push('\n');

    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a ProfileSetReport for human-readable terminal output.
pub fn format_profile_set_report(report: &ProfileSetReport) -> String {
    let mut output = String::new();
    let sep = separator();

    output.push_str("pad-metrology: profile set\n");
    output.push_str(&sep);
    output.push_str("\n\n");

    output.push_str(&format!(
        "  Scans: {}, common window: {} points\n\n",
        report.correlations.len(),
        report.coordinates.len()
    ));
    output.push_str("  Correlation with average:\n");
    for (i, c) in report.correlations.iter().enumerate() {
        output.push_str(&format!("    Scan {:>3}: {}\n", i + 1, format_correlation(*c)));
    }
    if report.direction.is_some() {
        output.push_str("\n  Dominant direction computed.\n");
    }
    output.push('\n');

    output.push_str(&sep);
    output.push('\n');
    output
}

fn format_count(n: usize) -> String {
    if n == 0 {
        "0".green().to_string()
    } else {
        n.to_string().yellow().to_string()
    }
}

fn format_correlation(c: f64) -> String {
    let text = format!("{:.4}", c);
    if c < WEAK_CORRELATION {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

fn format_axes(title: &str, axes: &PrincipalAxes) -> String {
    let mut out = format!("  {}:\n", title);
    for i in 0..2 {
        out.push_str(&format!(
            "    {} ({:+.4}, {:+.4}), weight {:.3}\n",
            if i == 0 { "Primary:  " } else { "Secondary:" },
            axes.components[i][0],
            axes.components[i][1],
            axes.magnitudes[i]
        ));
    }
    out
}

fn format_regressions(title: &str, fits: &AxisRegressions) -> String {
    let labels = ["X vs X ref", "Y vs Y ref", "X vs Y ref", "Y vs X ref"];
    let mut out = format!("  {} slopes:\n", title);
    for (label, ppm) in labels.iter().zip(fits.slopes_ppm()) {
        out.push_str(&format!("    {}: {:+.4} ppm\n", label, ppm));
    }
    out
}
