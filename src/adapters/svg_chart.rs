//! Static SVG chart rendering: price with SMA overlay and signal
//! markers on top, z-score panel below.

use crate::domain::signal::SignalRecord;
use std::fmt::Write as _;

const WIDTH: f64 = 900.0;
const PRICE_HEIGHT: f64 = 360.0;
const Z_HEIGHT: f64 = 140.0;
const PADDING: f64 = 45.0;

struct Scale {
    min: f64,
    max: f64,
    top: f64,
    height: f64,
}

impl Scale {
    fn new(values: impl Iterator<Item = f64>, top: f64, height: f64) -> Scale {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        }
        if max - min < f64::EPSILON {
            // Flat series still needs a non-degenerate axis.
            max = min + 1.0;
        }
        Scale {
            min,
            max,
            top,
            height,
        }
    }

    fn y(&self, value: f64) -> f64 {
        let plot = self.height - 2.0 * PADDING;
        self.top + PADDING + plot - (value - self.min) / (self.max - self.min) * plot
    }
}

fn x_at(index: usize, count: usize) -> f64 {
    let plot = WIDTH - 2.0 * PADDING;
    let step = if count > 1 {
        plot / (count - 1) as f64
    } else {
        0.0
    };
    PADDING + index as f64 * step
}

fn polyline(points: &[(f64, f64)], stroke: &str, extra: &str) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect();
    format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="1.5" {} points="{}"/>"#,
        stroke,
        extra,
        coords.join(" ")
    )
}

/// Render the full chart as an SVG document. An empty series produces a
/// valid SVG with a "no data" label rather than failing.
pub fn render_chart(records: &[SignalRecord]) -> String {
    let total_height = PRICE_HEIGHT + Z_HEIGHT;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        WIDTH, total_height, WIDTH, total_height
    );
    svg.push('\n');
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    svg.push('\n');

    if records.is_empty() {
        let _ = writeln!(
            svg,
            r#"<text x="{:.0}" y="{:.0}" text-anchor="middle">no data</text>"#,
            WIDTH / 2.0,
            total_height / 2.0
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let count = records.len();
    let price_scale = Scale::new(records.iter().map(|r| r.close), 0.0, PRICE_HEIGHT);

    let close_points: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (x_at(i, count), price_scale.y(r.close)))
        .collect();
    svg.push_str(&polyline(&close_points, "steelblue", ""));
    svg.push('\n');

    let sma_points: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.sma.map(|s| (x_at(i, count), price_scale.y(s))))
        .collect();
    if sma_points.len() > 1 {
        svg.push_str(&polyline(&sma_points, "orange", r#"opacity="0.8""#));
        svg.push('\n');
    }

    // Signal markers: upward triangle for BUY, downward for SELL.
    for (i, record) in records.iter().enumerate() {
        let x = x_at(i, count);
        let y = price_scale.y(record.close);
        if record.is_buy() {
            let _ = writeln!(
                svg,
                r#"<polygon fill="green" points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}"/>"#,
                x,
                y - 10.0,
                x - 5.0,
                y - 2.0,
                x + 5.0,
                y - 2.0
            );
        } else if record.is_sell() {
            let _ = writeln!(
                svg,
                r#"<polygon fill="red" points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}"/>"#,
                x,
                y + 10.0,
                x - 5.0,
                y + 2.0,
                x + 5.0,
                y + 2.0
            );
        }
    }

    let z_values: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.z_score.map(|z| (i, z)))
        .collect();
    if z_values.len() > 1 {
        // Axis always spans the ±2 guide lines even when the data does not.
        let z_scale = Scale::new(
            z_values
                .iter()
                .map(|&(_, z)| z)
                .chain([-2.0, 2.0]),
            PRICE_HEIGHT,
            Z_HEIGHT,
        );

        for (guide, color) in [(2.0, "red"), (0.0, "black"), (-2.0, "green")] {
            let y = z_scale.y(guide);
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="4 3" opacity="0.6"/>"#,
                PADDING,
                y,
                WIDTH - PADDING,
                y,
                color
            );
        }

        let z_points: Vec<(f64, f64)> = z_values
            .iter()
            .map(|&(i, z)| (x_at(i, count), z_scale.y(z)))
            .collect();
        svg.push_str(&polyline(&z_points, "purple", ""));
        svg.push('\n');
    }

    // Date labels at the ends of the x axis.
    let _ = writeln!(
        svg,
        r#"<text x="{:.0}" y="{:.0}" font-size="11">{}</text>"#,
        PADDING,
        total_height - 8.0,
        records[0].date
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.0}" y="{:.0}" font-size="11" text-anchor="end">{}</text>"#,
        WIDTH - PADDING,
        total_height - 8.0,
        records[count - 1].date
    );

    svg.push_str("</svg>\n");
    svg
}
