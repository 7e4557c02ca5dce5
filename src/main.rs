use std::env;

use anyhow::{Context, Result};
use clap::Parser;

use benchplot::{
    cli::{Cli, Invocation},
    telemetry, ChartLayout, Presentation, Presenter, SystemRunner,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.chart_config().context("Failed to load chart settings")?;
    telemetry::init_subscriber(&config.logging.level);

    let base_dir = env::current_dir().context("Failed to resolve working directory")?;
    let (layout, presentation) = match cli.invocation() {
        Invocation::Chart { input, output } => {
            let layout = benchplot::chart(&base_dir, &input)
                .with_context(|| format!("Failed to chart {}", input.display()))?;
            (layout, Presentation::Save(output))
        }
        Invocation::Show => (ChartLayout::empty(), Presentation::Show),
    };

    let mut presenter = Presenter::new(config, &base_dir, SystemRunner);
    presenter
        .present(&layout, &presentation)
        .context("Failed to present chart")?;
    Ok(())
}
