use std::path::PathBuf;

use clap::Parser;

use crate::config::ChartConfig;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(author, version, about = "Box-plot comparison of obstacle avoidance benchmarks")]
pub struct Cli {
    /// `INPUT OUTPUT`: chart the INPUT JSON and save it as OUTPUT in the
    /// figures directory. Any other count opens an empty figure.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Resolution used when saving
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Directory, relative to the working directory, that receives saved figures
    #[arg(long)]
    pub figures_dir: Option<PathBuf>,

    /// YAML file with chart settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,

    /// Skip cropping and trimming saved figures
    #[arg(long)]
    pub no_postprocess: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Show,
    Chart { input: PathBuf, output: String },
}

impl Cli {
    /// Only an exact pair of positionals charts anything.
    pub fn invocation(&self) -> Invocation {
        match self.args.as_slice() {
            [input, output] => Invocation::Chart {
                input: PathBuf::from(input),
                output: output.clone(),
            },
            _ => Invocation::Show,
        }
    }

    /// Settings from `--config` (or defaults) with flags applied on top.
    pub fn chart_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_yaml(path)?,
            None => ChartConfig::default(),
        };
        if let Some(dpi) = self.dpi {
            config.figure.dpi = dpi;
        }
        if let Some(dir) = &self.figures_dir {
            config.figures_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.no_postprocess {
            config.postprocess.enabled = false;
        }
        Ok(config)
    }
}
