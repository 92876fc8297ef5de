//! Plotters-powered grade curve widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
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

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and makes
/// it easy to test/benchmark the data prep separately.
pub struct GradeCurveChart<'a> {
    /// Line series for the grade curve (points, raw grade).
    pub curve: &'a [(f64, f64)],
    /// Scatter series for students at or above the pass grade.
    pub passing: &'a [(f64, f64)],
    /// Scatter series for students below the pass grade.
    pub failing: &'a [(f64, f64)],
    /// X bounds (points).
    pub x_bounds: [f64; 2],
    /// Y bounds (grade; the domain is [1, 6] plus a little padding).
    pub y_bounds: [f64; 2],
    /// Grade drawn as the horizontal pass guide line.
    pub pass_grade: f64,
}

impl<'a> Widget for GradeCurveChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
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

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 5)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("points")
                .y_desc("grade")
                .x_labels(5)
                .y_labels(6)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal
            // readability.
            let curve_color = RGBColor(0, 255, 255); // cyan
            let guide_color = RGBColor(255, 255, 0); // yellow
            let pass_color = RGBColor(0, 255, 0); // green
            let fail_color = RGBColor(255, 0, 0); // red

            // 1) Pass guide line at grade 4.
            chart.draw_series(LineSeries::new(
                [(x0, self.pass_grade), (x1, self.pass_grade)],
                &guide_color,
            ))?;

            // 2) Grade curve line.
            chart.draw_series(LineSeries::new(self.curve.iter().copied(), &curve_color))?;

            // 3) Student markers.
            //
            // We intentionally avoid `Circle` markers here. The underlying
            // `plotters-ratatui-backend` currently maps circle radii
            // incorrectly (pixel radius -> normalized canvas units),
            // producing huge circles. A colored `Pixel` gives a clean "dot"
            // that looks good in terminals.
            chart.draw_series(
                self.passing
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), pass_color)),
            )?;
            chart.draw_series(
                self.failing
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), fail_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
