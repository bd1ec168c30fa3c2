//! Plotters-powered sales chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Series palette, high-contrast for terminal readability.
pub const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(0, 255, 255), // cyan
    RGBColor(255, 165, 0), // orange
    RGBColor(0, 255, 0),   // green
    RGBColor(255, 0, 255), // magenta
];

/// A lightweight, render-only chart description.
///
/// All segments and bounds are computed outside the render call.
pub struct SalesPlottersChart<'a> {
    /// Per series: contiguous runs of `(x, y)` points. A gap starts a new run.
    pub segments: &'a [Vec<Vec<(f64, f64)>>],
    /// X bounds in category-index space.
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for SalesPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Tick labels are drawn by the caller in Ratatui cells; Plotters
            // only draws the axes here.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .axis_style(&WHITE)
                .draw()?;

            for (runs, color) in self.segments.iter().zip(SERIES_COLORS.iter().cycle()) {
                for run in runs {
                    chart.draw_series(LineSeries::new(run.iter().copied(), color))?;
                }

                // Markers as colored `Pixel`s: the ratatui backend maps circle
                // radii from pixels to canvas units incorrectly, so `Circle`
                // comes out huge.
                chart.draw_series(
                    runs.iter()
                        .flatten()
                        .map(|&(x, y)| Pixel::new((x, y), *color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
