use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse benchmark data {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse chart config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("benchmark #{index} has no run times")]
    EmptyRunTimes { index: usize },

    #[error("no filename supplied")]
    NoFilename,

    #[error("figures directory {} does not exist", .0.display())]
    MissingFiguresDir(PathBuf),

    #[error("cannot save charts as .{0} files")]
    UnsupportedFormat(String),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl ChartError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChartError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
