//! Showing or saving a finished chart.
//!
//! Saved figures land in `<base_dir>/<figures_dir>/<name>`. PDF and PNG files
//! are tidied afterwards with external tools; those runs are best effort and
//! only logged when they fail.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::render::{extension, Chart, ImageFormat};

/// What to do with the chart once it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Show,
    Save(String),
}

/// An external program invocation, kept as separate argv entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands, reporting whether they exited successfully.
pub trait CommandRunner {
    fn run(&mut self, command: &ExternalCommand) -> io::Result<bool>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &ExternalCommand) -> io::Result<bool> {
        (**self).run(command)
    }
}

/// Spawns real processes and waits for them.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ExternalCommand) -> io::Result<bool> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::null())
            .status()?;
        Ok(status.success())
    }
}

/// Post-processing for a saved figure, chosen by its extension.
pub fn postprocess_commands(path: &Path) -> Vec<ExternalCommand> {
    match extension(path).as_deref() {
        Some("pdf") => vec![ExternalCommand::new("pdfcrop")
            .arg("--margins")
            .arg("30")
            .arg(path)
            .arg(path)],
        Some("png") => vec![
            ExternalCommand::new("convert").arg("-trim").arg(path).arg(path),
            ExternalCommand::new("convert")
                .arg("-bordercolor")
                .arg("White")
                .arg("-border")
                .arg("50x50")
                .arg(path)
                .arg(path),
        ],
        _ => Vec::new(),
    }
}

/// Converts an SVG rendering into a PDF.
pub fn pdf_conversion(svg: &Path, pdf: &Path) -> ExternalCommand {
    ExternalCommand::new("rsvg-convert")
        .arg("-f")
        .arg("pdf")
        .arg("-o")
        .arg(pdf)
        .arg(svg)
}

/// Opens a file in the platform's default viewer.
pub fn viewer_command(path: &Path) -> ExternalCommand {
    let program = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    ExternalCommand::new(program).arg(path)
}

pub struct Presenter<R: CommandRunner> {
    config: ChartConfig,
    base_dir: PathBuf,
    runner: R,
}

impl<R: CommandRunner> Presenter<R> {
    pub fn new(config: ChartConfig, base_dir: impl AsRef<Path>, runner: R) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            runner,
        }
    }

    /// Show or save `chart`. Returns the saved path, if any.
    pub fn present(
        &mut self,
        chart: &impl Chart,
        presentation: &Presentation,
    ) -> Result<Option<PathBuf>> {
        match presentation {
            Presentation::Show => self.show(chart).map(|_| None),
            Presentation::Save(name) => self.save(chart, name).map(Some),
        }
    }

    pub fn figures_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.figures_dir)
    }

    /// Save `chart` as `name` in the figures directory. A name without an
    /// extension is saved as PNG.
    pub fn save(&mut self, chart: &impl Chart, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(ChartError::NoFilename);
        }
        let dir = self.figures_dir();
        if !dir.is_dir() {
            return Err(ChartError::MissingFiguresDir(dir));
        }
        let mut path = dir.join(name);
        // extensionless names get the default format appended
        if path.extension().is_none() {
            path.set_extension("png");
        }
        let is_pdf = extension(&path).as_deref() == Some("pdf");
        if !is_pdf {
            ImageFormat::from_path(&path)?;
        }

        if is_pdf {
            let svg = tempfile::Builder::new()
                .prefix("benchplot-")
                .suffix(".svg")
                .tempfile_in(&dir)
                .map_err(|err| ChartError::io(&dir, err))?
                .into_temp_path();
            chart.render(&svg, &self.config.figure)?;
            let convert = pdf_conversion(&svg, &path);
            match self.runner.run(&convert) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(ChartError::Render(format!("`{convert}` failed")));
                }
                Err(err) => {
                    return Err(ChartError::Render(format!("could not run `{convert}`: {err}")));
                }
            }
        } else {
            chart.render(&path, &self.config.figure)?;
        }
        info!(path = %path.display(), "saved chart");

        if self.config.postprocess.enabled {
            for command in postprocess_commands(&path) {
                self.run_best_effort(&command);
            }
        }
        Ok(path)
    }

    /// Render `chart` to a temporary SVG and open it in a viewer. Blocks
    /// until the viewer command returns.
    pub fn show(&mut self, chart: &impl Chart) -> Result<()> {
        let temp = tempfile::Builder::new()
            .prefix("benchplot-")
            .suffix(".svg")
            .tempfile()
            .map_err(|err| ChartError::io(std::env::temp_dir(), err))?
            .into_temp_path();
        chart.render(&temp, &self.config.figure)?;
        // the viewer may outlive this process, so the file stays behind
        let path = temp
            .keep()
            .map_err(|err| ChartError::io(std::env::temp_dir(), err.error))?;
        debug!(path = %path.display(), "showing chart");
        self.run_best_effort(&viewer_command(&path));
        Ok(())
    }

    fn run_best_effort(&mut self, command: &ExternalCommand) {
        match self.runner.run(command) {
            Ok(true) => debug!(%command, "command finished"),
            Ok(false) => warn!(%command, "command exited with failure"),
            Err(err) => warn!(%command, error = %err, "could not run command"),
        }
    }
}
