//! ASCII/Unicode line charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal or a CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line segments between consecutive defined values: `-`
//! - data points: `o` for the first series, `*` for the second, then `+`, `x`
//! - missing values break the line

use super::LineChart;

const MARKERS: [char; 4] = ['o', '*', '+', 'x'];

/// Render a chart into a fixed-size text grid.
pub fn render_ascii_chart(chart: &LineChart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let n = chart.categories.len();

    let (y_min, y_max) = chart.y_range().unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw lines first (so markers can overlay).
    for series in &chart.series {
        let mut prev: Option<(usize, usize)> = None;
        for (i, value) in series.values.iter().enumerate() {
            let Some(y) = value else {
                prev = None;
                continue;
            };
            let x = map_x(i, n, width);
            let yy = map_y(*y, y_min, y_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, yy, '-');
            }
            prev = Some((x, yy));
        }
    }

    for (series, marker) in chart.series.iter().zip(MARKERS.iter().cycle()) {
        for (i, value) in series.values.iter().enumerate() {
            if let Some(y) = value {
                grid[map_y(*y, y_min, y_max, height)][map_x(i, n, width)] = *marker;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');
    out.push_str(&format!("{}: [{y_min:.2}, {y_max:.2}]\n", chart.y_label));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str(&category_row(&chart.categories, width));
    out.push('\n');
    out.push_str(&format!("{}\n", chart.x_label));
    out.push_str(&legend(chart));
    out.push('\n');

    out
}

fn legend(chart: &LineChart) -> String {
    let parts: Vec<String> = chart
        .series
        .iter()
        .zip(MARKERS.iter().cycle())
        .map(|(s, m)| format!("{m} {}", s.label))
        .collect();
    parts.join(" | ")
}

/// Place each category label centered under its column, skipping labels that
/// would overlap the previous one.
fn category_row(categories: &[String], width: usize) -> String {
    let mut row = vec![' '; width];
    let mut next_free = 0usize;

    for (i, label) in categories.iter().enumerate() {
        let len = label.chars().count();
        if len > width {
            continue;
        }
        let center = map_x(i, categories.len(), width);
        let start = center.saturating_sub(len / 2).min(width - len);
        if start < next_free {
            continue;
        }
        for (offset, ch) in label.chars().enumerate() {
            row[start + offset] = ch;
        }
        next_free = start + len + 1;
    }

    row.into_iter().collect::<String>().trim_end().to_string()
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Categories are evenly spaced across the full width.
fn map_x(index: usize, count: usize, width: usize) -> usize {
    let width = width.max(2);
    if count <= 1 {
        return 0;
    }
    let u = index as f64 / (count as f64 - 1.0);
    (u.clamp(0.0, 1.0) * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
