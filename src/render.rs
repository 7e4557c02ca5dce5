//! Draws a [`ChartLayout`] with `plotters`.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::config::FigureConfig;
use crate::error::{ChartError, Result};
use crate::layout::{ChartLayout, BOX_WIDTH};

/// Light gray used behind each half of the chart.
const REGION_FILL: RGBColor = RGBColor(242, 242, 242);
const REGION_EDGE: RGBColor = RGBColor(190, 190, 190);

/// Anything that can be drawn into an image file.
pub trait Chart {
    fn render(&self, path: &Path, figure: &FigureConfig) -> Result<()>;
}

impl Chart for ChartLayout {
    fn render(&self, path: &Path, figure: &FigureConfig) -> Result<()> {
        let size = figure.pixel_size();
        debug!(path = %path.display(), width = size.0, height = size.1, "rendering chart");
        match ImageFormat::from_path(path)? {
            ImageFormat::Svg => {
                draw(&SVGBackend::new(path, size).into_drawing_area(), self, figure)
            }
            ImageFormat::Bitmap => {
                draw(&BitMapBackend::new(path, size).into_drawing_area(), self, figure)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Bitmap,
}

impl ImageFormat {
    /// Backend for `path`; extensions the encoders cannot write are rejected.
    pub fn from_path(path: &Path) -> Result<Self> {
        match extension(path).as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            Some("png" | "jpg" | "jpeg" | "bmp") => Ok(ImageFormat::Bitmap),
            other => Err(ChartError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

/// Lower-cased file extension.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn render_err(err: impl std::fmt::Display) -> ChartError {
    ChartError::Render(err.to_string())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &ChartLayout,
    figure: &FigureConfig,
) -> Result<()> {
    let (width, height) = figure.pixel_size();
    let (width, height) = (width as f64, height as f64);
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(root)
        .margin_top((height * 0.10) as u32)
        .margin_right((width * 0.05) as u32)
        .x_label_area_size((height * 0.15) as u32)
        .y_label_area_size((width * 0.15) as u32)
        .build_cartesian_2d(layout.x_range.clone(), layout.y_range.clone())
        .map_err(render_err)?;

    let label_font = ("serif", figure.points(14.0));
    let line = BLACK.stroke_width(1);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(layout.tick_labels.len().max(2))
        .x_label_formatter(&|x| layout.label_at(*x).to_string())
        .x_label_style(label_font)
        .y_label_style(label_font)
        .x_desc("Number of obstacles")
        .y_desc("Time (µs)")
        .axis_desc_style(("serif", figure.points(18.0)))
        .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
        .set_tick_mark_size(LabelAreaPosition::Left, figure.points(8.0) as i32)
        .axis_style(line)
        .draw()
        .map_err(render_err)?;

    // backgrounds first so the boxes sit on top
    let y = &layout.y_range;
    for region in layout.regions.iter().filter(|r| r.x.1 > r.x.0) {
        let (x0, x1) = region.x;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, y.start), (x1, y.end)],
                REGION_FILL.filled(),
            )))
            .map_err(render_err)?;

        let corners = [
            chart.backend_coord(&(x0, y.start)),
            chart.backend_coord(&(x1, y.start)),
            chart.backend_coord(&(x1, y.end)),
            chart.backend_coord(&(x0, y.end)),
        ];
        let dash = figure.points(4.0);
        for i in 0..corners.len() {
            let (from, to) = (corners[i], corners[(i + 1) % corners.len()]);
            for segment in dash_segments(from, to, dash, dash) {
                root.draw(&PathElement::new(
                    segment.to_vec(),
                    REGION_EDGE.stroke_width(1),
                ))
                .map_err(render_err)?;
            }
        }
    }

    let half_width = BOX_WIDTH / 2.0;
    let cap = BOX_WIDTH / 4.0;
    for placed in &layout.boxes {
        let x = placed.position;
        let s = &placed.stats;
        let body = [(x - half_width, s.q1), (x + half_width, s.q3)];
        chart
            .draw_series([
                Rectangle::new(body, WHITE.filled()),
                Rectangle::new(body, line),
            ])
            .map_err(render_err)?;
        chart
            .draw_series([
                PathElement::new(vec![(x, s.q1), (x, s.whisker_low)], line),
                PathElement::new(vec![(x, s.q3), (x, s.whisker_high)], line),
                PathElement::new(vec![(x - cap, s.whisker_low), (x + cap, s.whisker_low)], line),
                PathElement::new(vec![(x - cap, s.whisker_high), (x + cap, s.whisker_high)], line),
                PathElement::new(vec![(x - half_width, s.median), (x + half_width, s.median)], line),
            ])
            .map_err(render_err)?;
    }

    let (x_px, y_px) = chart.plotting_area().get_pixel_range();
    let plot_width = (x_px.end - x_px.start) as f64;
    let plot_height = (y_px.end - y_px.start) as f64;
    let text_style = TextStyle::from(("serif", figure.points(16.0)))
        .pos(Pos::new(HPos::Center, VPos::Bottom))
        .color(&BLACK);
    for annotation in &layout.annotations {
        let px = x_px.start as f64 + annotation.axes_x * plot_width;
        let py = y_px.end as f64 - annotation.axes_y * plot_height;
        root.draw(&Text::new(
            annotation.text,
            (px.round() as i32, py.round() as i32),
            text_style.clone(),
        ))
        .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Split the line `from -> to` into dashes of `dash` pixels separated by
/// `gap` pixels. The last dash is clipped to the end point.
pub fn dash_segments(from: (i32, i32), to: (i32, i32), dash: f64, gap: f64) -> Vec<[(i32, i32); 2]> {
    let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
    let length = dx.hypot(dy);
    if length == 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let at = |t: f64| {
        (
            (from.0 as f64 + dx * t / length).round() as i32,
            (from.1 as f64 + dy * t / length).round() as i32,
        )
    };
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        segments.push([at(start), at(end)]);
        start = end + gap.max(0.0);
    }
    segments
}
