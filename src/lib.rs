pub mod benchmark;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod ordering;
pub mod output;
pub mod render;
pub mod stats;
pub mod telemetry;

use std::path::Path;

pub use benchmark::{BenchmarkLoader, ObstacleBatch, Obstacles};
pub use config::ChartConfig;
pub use error::ChartError;
pub use layout::ChartLayout;
pub use output::{Presentation, Presenter, SystemRunner};

/// Load `input`, print each benchmark's outlier share and lay the sorted
/// benchmarks out for plotting.
pub fn chart(base_dir: impl AsRef<Path>, input: impl AsRef<Path>) -> error::Result<ChartLayout> {
    let mut benchmarks = BenchmarkLoader::new(base_dir).load(input)?;
    benchmark::report_outliers(&benchmarks);
    ordering::sort_benchmarks(&mut benchmarks);
    Ok(ChartLayout::from_sorted(&benchmarks))
}
