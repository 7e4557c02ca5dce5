use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::stats::OutlierSummary;

/// Obstacle counts of a single benchmark scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Obstacles {
    pub total: u32,
    pub significant: u32,
    #[serde(default)]
    pub insignificant: Option<u32>,
}

impl Obstacles {
    pub fn new(total: u32, significant: u32) -> Self {
        Self {
            total,
            significant,
            insignificant: None,
        }
    }

    pub fn is_significant(&self) -> bool {
        self.significant > 0
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub num_runs: Option<u32>,
    pub run_times: Vec<f64>,
}

/// One benchmark record: the obstacle set and the timed batch run against it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObstacleBatch {
    pub obstacles: Obstacles,
    pub batch: Batch,
}

impl ObstacleBatch {
    pub fn new(obstacles: Obstacles, run_times: Vec<f64>) -> Self {
        Self {
            obstacles,
            batch: Batch {
                num_runs: None,
                run_times,
            },
        }
    }

    pub fn run_times(&self) -> &[f64] {
        &self.batch.run_times
    }
}

/// Resolves benchmark files relative to a base directory.
pub struct BenchmarkLoader {
    base_dir: PathBuf,
}

impl BenchmarkLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Vec<ObstacleBatch>> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path).map_err(|err| ChartError::io(&path, err))?;
        let benchmarks = parse_benchmarks(&data).map_err(|err| match err {
            ParseFailure::Json(source) => ChartError::Parse {
                path: path.clone(),
                source,
            },
            ParseFailure::Empty(index) => ChartError::EmptyRunTimes { index },
        })?;
        debug!(path = %path.display(), count = benchmarks.len(), "loaded benchmarks");
        Ok(benchmarks)
    }
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    Empty(usize),
}

fn parse_benchmarks(data: &str) -> std::result::Result<Vec<ObstacleBatch>, ParseFailure> {
    let benchmarks: Vec<ObstacleBatch> = serde_json::from_str(data).map_err(ParseFailure::Json)?;
    if let Some(index) = benchmarks.iter().position(|b| b.run_times().is_empty()) {
        return Err(ParseFailure::Empty(index));
    }
    Ok(benchmarks)
}

/// Prints the outlier percentage of every benchmark, in file order.
pub fn report_outliers(benchmarks: &[ObstacleBatch]) -> Vec<OutlierSummary> {
    benchmarks
        .iter()
        .map(|benchmark| {
            let summary = OutlierSummary::from_samples(benchmark.run_times());
            println!("Outliers: {:2.2}", summary.percentage);
            debug!(
                total = benchmark.obstacles.total,
                significant = benchmark.obstacles.significant,
                outliers = summary.count,
                samples = summary.samples,
                "outlier check"
            );
            summary
        })
        .collect()
}
