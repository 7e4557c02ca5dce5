//! Chart settings, with an optional YAML file layered under CLI flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default = "default_figures_dir")]
    pub figures_dir: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub postprocess: PostprocessConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            figures_dir: default_figures_dir(),
            logging: LoggingConfig::default(),
            postprocess: PostprocessConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_width_in")]
    pub width_in: f64,
    #[serde(default = "default_height_in")]
    pub height_in: f64,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

impl FigureConfig {
    /// Pixel size of the figure at the configured DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert a font size in points to pixels.
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: default_width_in(),
            height_in: default_height_in(),
            dpi: default_dpi(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostprocessConfig {
    #[serde(default = "default_postprocess")]
    pub enabled: bool,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self {
            enabled: default_postprocess(),
        }
    }
}

fn default_width_in() -> f64 {
    6.4
}

fn default_height_in() -> f64 {
    4.8
}

fn default_dpi() -> u32 {
    150
}

fn default_figures_dir() -> PathBuf {
    PathBuf::from("figures")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_postprocess() -> bool {
    true
}

impl ChartConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ChartError::io(path, err))?;
        serde_yaml::from_str(&contents).map_err(|source| ChartError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
