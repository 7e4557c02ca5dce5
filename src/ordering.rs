use std::cmp::Ordering;

use crate::benchmark::{ObstacleBatch, Obstacles};

/// Benchmarks without significant obstacles come first, then each class is
/// ordered by ascending obstacle total.
pub fn compare_obstacles(a: &Obstacles, b: &Obstacles) -> Ordering {
    a.is_significant()
        .cmp(&b.is_significant())
        .then_with(|| a.total.cmp(&b.total))
}

pub fn compare_benchmarks(a: &ObstacleBatch, b: &ObstacleBatch) -> Ordering {
    compare_obstacles(&a.obstacles, &b.obstacles)
}

/// Stable sort into plotting order.
pub fn sort_benchmarks(benchmarks: &mut [ObstacleBatch]) {
    benchmarks.sort_by(compare_benchmarks);
}

/// Index where the second half of the plotting order starts.
pub fn half(len: usize) -> usize {
    len / 2
}
