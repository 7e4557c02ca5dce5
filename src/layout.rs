//! Where everything goes on the chart, in data coordinates.
//!
//! The sorted benchmarks are split into two halves. The first half sits at
//! x positions `1..=half`, the second at `half + 2..=len + 1`, leaving one
//! empty slot between them and one at each edge of the axis.

use std::ops::Range;

use crate::benchmark::ObstacleBatch;
use crate::ordering::half;
use crate::stats::BoxStats;

/// Box width in x units.
pub const BOX_WIDTH: f64 = 0.5;

/// Fraction of the y span added above and below the whiskers.
const Y_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBox {
    pub position: f64,
    pub stats: BoxStats,
}

/// Shaded background behind one half of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: (f64, f64),
}

/// Text placed in axes-relative coordinates (0..1 spans the plotting area).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub text: &'static str,
    pub axes_x: f64,
    pub axes_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub boxes: Vec<PlacedBox>,
    /// Label for every integer tick, starting at x = 0.
    pub tick_labels: Vec<String>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub regions: Vec<Region>,
    pub annotations: Vec<Annotation>,
}

/// X positions for `len` boxes with the middle gap.
pub fn positions(len: usize) -> Vec<f64> {
    let half = half(len);
    (1..=half).chain(half + 2..=len + 1).map(|p| p as f64).collect()
}

/// Tick labels for sorted benchmarks: obstacle totals, padded with blanks at
/// both edges and in the middle gap.
pub fn tick_labels(benchmarks: &[ObstacleBatch]) -> Vec<String> {
    let high = benchmarks.len();
    let mut labels: Vec<String> = benchmarks
        .iter()
        .map(|b| b.obstacles.total.to_string())
        .collect();
    labels.insert(high, String::new());
    labels.insert(half(high), String::new());
    labels.insert(0, String::new());
    labels
}

fn y_range(boxes: &[PlacedBox]) -> Range<f64> {
    let low = boxes
        .iter()
        .map(|b| b.stats.whisker_low)
        .fold(f64::INFINITY, f64::min);
    let high = boxes
        .iter()
        .map(|b| b.stats.whisker_high)
        .fold(f64::NEG_INFINITY, f64::max);
    if !low.is_finite() || !high.is_finite() {
        return 0.0..1.0;
    }
    let span = high - low;
    let pad = if span > 0.0 {
        span * Y_MARGIN
    } else {
        (high.abs() * Y_MARGIN).max(1.0)
    };
    (low - pad)..(high + pad)
}

impl ChartLayout {
    /// Lay out benchmarks that are already in plotting order.
    pub fn from_sorted(benchmarks: &[ObstacleBatch]) -> Self {
        if benchmarks.is_empty() {
            return Self::empty();
        }
        let high = benchmarks.len();
        let half = half(high) as f64;
        let boxes: Vec<PlacedBox> = positions(high)
            .into_iter()
            .zip(benchmarks)
            .map(|(position, benchmark)| PlacedBox {
                position,
                stats: BoxStats::from_samples(benchmark.run_times()),
            })
            .collect();
        let y_range = y_range(&boxes);

        Self {
            boxes,
            tick_labels: tick_labels(benchmarks),
            x_range: 0.0..(high + 2) as f64,
            y_range,
            regions: vec![
                Region {
                    x: (0.5, half + 0.5),
                },
                Region {
                    x: (half + 1.5, high as f64 + 1.5),
                },
            ],
            annotations: vec![
                Annotation {
                    text: "Insignificant",
                    axes_x: 0.25,
                    axes_y: 1.025,
                },
                Annotation {
                    text: "Significant",
                    axes_x: 0.75,
                    axes_y: 1.025,
                },
            ],
        }
    }

    /// Bare axes, used when nothing was charted.
    pub fn empty() -> Self {
        Self {
            boxes: Vec::new(),
            tick_labels: Vec::new(),
            x_range: 0.0..1.0,
            y_range: 0.0..1.0,
            regions: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Label for the tick nearest to `x`, blank between integer ticks.
    pub fn label_at(&self, x: f64) -> &str {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return "";
        }
        self.tick_labels
            .get(rounded as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}
