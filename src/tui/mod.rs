//! Ratatui-based chart viewer.
//!
//! `show_chart` takes over the terminal, draws one `LineChart` full-screen and
//! blocks until the user dismisses it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};
use tracing::debug;

use crate::error::{AppError, EXIT_RUNTIME};
use crate::plot::LineChart;

mod plotters_chart;

use plotters_chart::{SalesPlottersChart, SERIES_COLORS};

/// Show `chart` until `q`, `Esc` or `Enter` is pressed.
pub fn show_chart(chart: &LineChart) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let view = ChartView::new(chart);
    debug!(title = %chart.title, "showing chart");
    view.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct ChartView<'a> {
    chart: &'a LineChart,
    data: Option<ChartData>,
}

impl<'a> ChartView<'a> {
    fn new(chart: &'a LineChart) -> Self {
        Self {
            chart,
            data: chart_data(chart),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if is_dismiss_key(key.code) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_chart(frame, chunks[0]);
        self.draw_footer(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.chart.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(data) = &self.data else {
            let msg = Paragraph::new("No data to plot.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = SalesPlottersChart {
            segments: &data.segments,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            self.draw_axis_ticks(frame, inner, chart_rect, insets, data);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for (series, color) in self.chart.series.iter().zip(SERIES_COLORS.iter().cycle()) {
            let plotters::style::RGBColor(r, g, b) = *color;
            spans.push(Span::styled("● ", Style::default().fg(Color::Rgb(r, g, b))));
            spans.push(Span::raw(series.label.as_str()));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::raw("| "));
        spans.push(Span::styled("q/Esc/Enter close", Style::default().fg(Color::Gray)));

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_axis_ticks(
        &self,
        frame: &mut ratatui::Frame<'_>,
        inner: Rect,
        chart: Rect,
        insets: AxisInsets,
        data: &ChartData,
    ) {
        let style = Style::default().fg(Color::Gray);
        let [x0, x1] = data.x_bounds;
        let [y0, y1] = data.y_bounds;

        // X: one label per category, skipping labels that would overlap.
        let y = chart.y + chart.height;
        if y < inner.y + inner.height - 1 {
            let mut next_free = chart.x;
            for (i, label) in self.chart.categories.iter().enumerate() {
                let u = (i as f64 - x0) / (x1 - x0);
                let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
                let label_len = label.chars().count() as u16;
                let start = x.saturating_sub(label_len / 2);
                if start < next_free || start + label_len > inner.x + inner.width {
                    continue;
                }
                frame.render_widget(
                    Paragraph::new(label.as_str()).style(style),
                    Rect {
                        x: start,
                        y,
                        width: label_len,
                        height: 1,
                    },
                );
                next_free = start + label_len + 1;
            }
        }

        let ticks = 5usize;
        for i in 0..ticks {
            let u = i as f64 / (ticks as f64 - 1.0);
            let y_val = y0 + u * (y1 - y0);
            let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
            let label = format!("{:.0}", y_val);
            let label_len = label.len() as u16;
            let x = inner.x + insets.left.saturating_sub(1);
            let start = x.saturating_sub(label_len);
            if start < inner.x {
                continue;
            }
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }

        let x_label = Paragraph::new(self.chart.x_label.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        let x_rect = Rect {
            x: chart.x,
            y: chart.y + chart.height + 1,
            width: chart.width,
            height: 1,
        };
        if x_rect.y < inner.y + inner.height {
            frame.render_widget(x_label, x_rect);
        }

        let y_label = Paragraph::new(self.chart.y_label.as_str())
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
        let y_rect = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(y_label, y_rect);
    }
}

fn is_dismiss_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

/// Chart geometry in category-index space.
#[derive(Debug, Clone, PartialEq)]
struct ChartData {
    segments: Vec<Vec<Vec<(f64, f64)>>>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_data(chart: &LineChart) -> Option<ChartData> {
    let (y_min, y_max) = chart.y_range()?;
    let pad = (y_max - y_min) * 0.05;

    let segments = chart
        .series
        .iter()
        .map(|s| {
            let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
            let mut current: Vec<(f64, f64)> = Vec::new();
            for (i, v) in s.values.iter().enumerate() {
                match v {
                    Some(y) => current.push((i as f64, *y)),
                    None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                    None => {}
                }
            }
            if !current.is_empty() {
                runs.push(current);
            }
            runs
        })
        .collect();

    let last = chart.categories.len().saturating_sub(1) as f64;
    Some(ChartData {
        segments,
        x_bounds: [-0.25, last + 0.25],
        y_bounds: [y_min - pad, y_max + pad],
    })
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::ChartSeries;

    fn chart() -> LineChart {
        LineChart {
            title: "Sales Forecasting".to_string(),
            x_label: "Month".to_string(),
            y_label: "Sales".to_string(),
            categories: vec!["2023-01".into(), "2023-02".into(), "2023-03".into(), "2023-04".into()],
            series: vec![
                ChartSeries {
                    label: "Actual Sales".to_string(),
                    values: vec![Some(100.0), Some(200.0), Some(300.0), Some(200.0)],
                },
                ChartSeries {
                    label: "Forecast (Moving Avg)".to_string(),
                    values: vec![None, None, Some(200.0), Some(0.0)],
                },
            ],
        }
    }

    #[test]
    fn chart_data_splits_runs_at_gaps() {
        let data = chart_data(&chart()).unwrap();
        assert_eq!(data.segments.len(), 2);
        assert_eq!(data.segments[0].len(), 1);
        assert_eq!(data.segments[0][0].len(), 4);
        assert_eq!(data.segments[1], vec![vec![(2.0, 200.0), (3.0, 0.0)]]);
        assert_eq!(data.x_bounds, [-0.25, 3.25]);
        assert_eq!(data.y_bounds, [-15.0, 315.0]);
    }

    #[test]
    fn gap_in_the_middle_starts_a_new_run() {
        let mut c = chart();
        c.series.truncate(1);
        c.series[0].values[1] = None;
        let data = chart_data(&c).unwrap();
        assert_eq!(data.segments[0], vec![vec![(0.0, 100.0)], vec![(2.0, 300.0), (3.0, 200.0)]]);
    }

    #[test]
    fn no_values_no_chart_data() {
        let mut c = chart();
        for s in &mut c.series {
            s.values.iter_mut().for_each(|v| *v = None);
        }
        assert!(chart_data(&c).is_none());
    }

    #[test]
    fn dismiss_keys() {
        assert!(is_dismiss_key(KeyCode::Char('q')));
        assert!(is_dismiss_key(KeyCode::Esc));
        assert!(is_dismiss_key(KeyCode::Enter));
        assert!(!is_dismiss_key(KeyCode::Char('x')));
    }

    #[test]
    fn small_area_skips_axis_insets() {
        let (rect, insets) = chart_layout(Rect::new(0, 0, 15, 6));
        assert_eq!(rect, Rect::new(0, 0, 15, 6));
        assert!(insets.is_none());
    }
}
