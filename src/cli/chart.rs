//! ASCII charts for the stage views
//!
//! Two shapes: horizontal bars coloured by correlation band, and a trend
//! chart with one row per point and a fixed reference line. Both plot the
//! values they are given; nothing is computed from the underlying records.

use console::style;

use crate::cli::helpers::truncate_str;
use crate::entities::series::{CorrelationBand, CorrelationEntry, TrendPoint};

/// Sparkline glyph ramp
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const LABEL_MAX: usize = 26;

/// Number of filled cells for `value` on a `0..=max` scale
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    filled.min(width)
}

/// Render a horizontal gauge with percentage label
pub fn gauge(used_pct: f64, width: usize) -> String {
    let clamped_pct = used_pct.clamp(0.0, 100.0);
    let filled = cells(clamped_pct, 100.0, width);
    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        clamped_pct,
    )
}

/// Render a sparkline scaled to the largest value
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sparkline(values: &[f64]) -> String {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|value| {
            if max <= 0.0 {
                return SPARK_CHARS[0];
            }
            let idx = ((value / max).clamp(0.0, 1.0) * 7.0).round() as usize;
            SPARK_CHARS[idx.min(7)]
        })
        .collect()
}

/// Horizontal bar chart of change/defect correlations
///
/// Bars are scaled to a 0-1 axis and coloured red above 0.7, yellow above
/// 0.5, blue otherwise.
pub fn correlation_chart(entries: &[CorrelationEntry], width: usize) -> String {
    let label_width = entries
        .iter()
        .map(|e| e.change.chars().count().min(LABEL_MAX))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let filled = cells(entry.correlation, 1.0, width);
        let bar = "█".repeat(filled);
        let bar = match entry.band() {
            CorrelationBand::High => style(bar).red(),
            CorrelationBand::Medium => style(bar).yellow(),
            CorrelationBand::Low => style(bar).blue(),
        };
        let label = truncate_str(&entry.change, LABEL_MAX);
        out.push_str(&format!(
            "{:<lw$} │{}{} {:.2}  (p = {})\n",
            label,
            bar,
            " ".repeat(width - filled),
            entry.correlation,
            entry.p_value,
            lw = label_width,
        ));
    }

    out.push_str(&format!("{:<lw$} └{}\n", "", "─".repeat(width), lw = label_width));
    let legend: Vec<String> = [CorrelationBand::High, CorrelationBand::Medium, CorrelationBand::Low]
        .iter()
        .map(|band| {
            let swatch = match band {
                CorrelationBand::High => style("█").red(),
                CorrelationBand::Medium => style("█").yellow(),
                CorrelationBand::Low => style("█").blue(),
            };
            format!("{} {}", swatch, band.label())
        })
        .collect();
    out.push_str(&format!("{:<lw$}  {}\n", "", legend.join("   "), lw = label_width));
    out
}

/// Trend chart with a reference line at `threshold`
///
/// One row per point. The axis runs from zero to the larger of the highest
/// reading and the threshold; the reference line is drawn as `┊` wherever a
/// bar does not cover it, and points above it are highlighted.
pub fn trend_chart(points: &[TrendPoint], threshold: f64, width: usize) -> String {
    let max = points
        .iter()
        .map(|p| p.leak_rate)
        .fold(threshold, f64::max);
    let marker = cells(threshold, max, width).min(width.saturating_sub(1));
    let label_width = points
        .iter()
        .map(|p| p.date.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<lw$}  {}{} {:.1}% threshold\n",
        "",
        " ".repeat(marker),
        style("┊").red(),
        threshold,
        lw = label_width,
    ));

    for point in points {
        let filled = cells(point.leak_rate, max, width);
        let mut row = String::with_capacity(width);
        for col in 0..width {
            if col < filled {
                row.push('█');
            } else if col == marker {
                row.push('┊');
            } else {
                row.push(' ');
            }
        }
        let value = format!("{:.1}%", point.leak_rate);
        let value = if point.above_threshold() {
            style(value).red().bold()
        } else {
            style(value).dim()
        };
        let row = if point.above_threshold() {
            style(row).red()
        } else {
            style(row).cyan()
        };
        out.push_str(&format!(
            "{:<lw$} │{} {}\n",
            point.date,
            row,
            value,
            lw = label_width
        ));
    }

    out.push_str(&format!(
        "{:<lw$} └{}\n{:<lw$}  0{:>w$}\n",
        "",
        "─".repeat(width),
        "",
        format!("{:.1}%", max),
        lw = label_width,
        w = width.saturating_sub(1),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    fn entry(change: &str, correlation: f64) -> CorrelationEntry {
        CorrelationEntry {
            change: change.to_string(),
            correlation,
            p_value: 0.01,
        }
    }

    fn point(date: &str, leak_rate: f64) -> TrendPoint {
        TrendPoint {
            date: date.to_string(),
            leak_rate,
        }
    }

    #[test]
    fn gauge_renders_percent_and_bounds() {
        let half = gauge(50.0, 20);
        let over = gauge(150.0, 10);
        assert!(half.contains("50%"));
        assert_eq!(half.matches('█').count(), 10);
        assert_eq!(over.matches('█').count(), 10);
        assert!(gauge(-5.0, 10).contains("0%"));
    }

    #[test]
    fn sparkline_scales_to_max() {
        let line = sparkline(&[0.0, 2.35, 4.7]);
        assert_eq!(line.chars().count(), 3);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
        assert_eq!(sparkline(&[0.0, 0.0]), "▁▁");
    }

    #[test]
    fn correlation_bars_scale_to_unit_axis() {
        let chart = correlation_chart(&[entry("Flux", 0.5), entry("Gauge", 1.0)], 20);
        let plain = strip_ansi_codes(&chart);
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines[0].matches('█').count(), 10);
        assert_eq!(lines[1].matches('█').count(), 20);
        assert!(lines[0].contains("0.50"));
        assert!(plain.contains("High (>0.7)"));
    }

    #[test]
    fn correlation_labels_are_aligned() {
        let chart = correlation_chart(&[entry("A", 0.2), entry("Longer label", 0.8)], 10);
        let plain = strip_ansi_codes(&chart);
        let bars: Vec<usize> = plain
            .lines()
            .take(2)
            .map(|l| l.chars().position(|c| c == '│').unwrap())
            .collect();
        assert_eq!(bars[0], bars[1]);
    }

    #[test]
    fn trend_chart_draws_threshold_line() {
        let points = vec![point("Jun 08", 1.0), point("Jun 15", 4.0)];
        let chart = trend_chart(&points, 2.0, 20);
        let plain = strip_ansi_codes(&chart);
        let lines: Vec<&str> = plain.lines().collect();

        assert!(lines[0].contains("2.0% threshold"));
        // Below the threshold the reference line shows through
        assert!(lines[1].starts_with("Jun 08"));
        assert!(lines[1].contains('┊'));
        assert!(lines[1].contains("1.0%"));
        // The maximum reading fills the row and hides the line
        assert_eq!(lines[2].matches('█').count(), 20);
        assert!(!lines[2].contains('┊'));
        assert!(plain.contains("4.0%"));
    }

    #[test]
    fn trend_chart_axis_covers_threshold() {
        let chart = trend_chart(&[point("Jun 08", 1.0)], 2.0, 10);
        let plain = strip_ansi_codes(&chart);
        assert_eq!(plain.lines().nth(1).unwrap().matches('█').count(), 5);
        assert!(plain.contains("2.0%"));
    }

    #[test]
    fn empty_series_render_axes_only() {
        assert!(trend_chart(&[], 2.0, 10).contains('└'));
        assert!(correlation_chart(&[], 10).contains('└'));
    }
}
