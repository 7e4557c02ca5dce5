use std::io;
use std::path::{Path, PathBuf};

use benchplot::{
    config::FigureConfig,
    error::Result,
    output::{CommandRunner, ExternalCommand, Presentation},
    render::Chart,
    ChartConfig, ChartError, ChartLayout, Presenter,
};

/// Writes a placeholder instead of drawing, so no fonts are needed.
struct Placeholder;

impl Chart for Placeholder {
    fn render(&self, path: &Path, _figure: &FigureConfig) -> Result<()> {
        std::fs::write(path, b"chart").map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Default)]
struct RecordingRunner {
    commands: Vec<ExternalCommand>,
    succeed: bool,
}

impl RecordingRunner {
    fn succeeding() -> Self {
        Self {
            commands: Vec::new(),
            succeed: true,
        }
    }

    fn programs(&self) -> Vec<(&str, Option<&str>)> {
        self.commands
            .iter()
            .map(|c| (c.program.as_str(), c.args.first().and_then(|a| a.to_str())))
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &ExternalCommand) -> io::Result<bool> {
        self.commands.push(command.clone());
        Ok(self.succeed)
    }
}

fn workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let figures = dir.path().join("figures");
    std::fs::create_dir(&figures).unwrap();
    (dir, figures)
}

fn presenter<'a>(
    base: &Path,
    runner: &'a mut RecordingRunner,
) -> Presenter<&'a mut RecordingRunner> {
    Presenter::new(ChartConfig::default(), base, runner)
}

/// Contents of every `<text>` element, trimmed.
fn svg_texts(svg: &str) -> Vec<String> {
    svg.split("<text")
        .skip(1)
        .filter_map(|element| {
            let start = element.find('>')? + 1;
            let end = element.find("</text>")?;
            Some(element[start..end].trim().to_string())
        })
        .collect()
}

fn fixture_layout() -> ChartLayout {
    benchplot::chart(
        env!("CARGO_MANIFEST_DIR"),
        "tests/fixtures/obstacle_avoidance.json",
    )
    .expect("fixture charts")
}

#[test]
fn png_is_trimmed_then_bordered() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();
    let mut presenter = presenter(dir.path(), &mut runner);

    let path = presenter.save(&Placeholder, "out.png").unwrap();

    assert_eq!(path, figures.join("out.png"));
    assert!(path.exists());
    assert_eq!(
        runner.programs(),
        vec![("convert", Some("-trim")), ("convert", Some("-bordercolor"))]
    );
}

#[test]
fn pdf_is_converted_then_cropped() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();
    presenter(dir.path(), &mut runner)
        .save(&Placeholder, "out.pdf")
        .unwrap();

    assert_eq!(runner.commands.len(), 2);
    assert_eq!(runner.commands[0].program, "rsvg-convert");
    let pdf = figures.join("out.pdf");
    assert_eq!(
        runner.commands[1].to_string(),
        format!("pdfcrop --margins 30 {} {}", pdf.display(), pdf.display())
    );
}

#[test]
fn svg_has_no_postprocessing() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();
    presenter(dir.path(), &mut runner)
        .save(&Placeholder, "out.svg")
        .unwrap();

    assert!(figures.join("out.svg").exists());
    assert!(runner.commands.is_empty());
}

#[test]
fn empty_name_is_rejected_before_writing() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();

    let err = presenter(dir.path(), &mut runner)
        .save(&Placeholder, "")
        .unwrap_err();

    assert!(matches!(err, ChartError::NoFilename));
    assert_eq!(err.to_string(), "no filename supplied");
    assert_eq!(std::fs::read_dir(&figures).unwrap().count(), 0);
    assert!(runner.commands.is_empty());
}

#[test]
fn present_save_returns_the_saved_path() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();

    let saved = presenter(dir.path(), &mut runner)
        .present(&Placeholder, &Presentation::Save("chart.jpg".into()))
        .unwrap();
    assert_eq!(saved, Some(figures.join("chart.jpg")));
}

#[test]
fn name_without_extension_is_saved_as_png() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();

    let path = presenter(dir.path(), &mut runner)
        .save(&Placeholder, "noext")
        .unwrap();

    assert_eq!(path, figures.join("noext.png"));
    assert!(path.exists());
    assert_eq!(runner.commands.len(), 2);
}

#[test]
fn unsupported_extension_is_rejected_before_writing() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();

    let err = presenter(dir.path(), &mut runner)
        .save(&Placeholder, "out.tga")
        .unwrap_err();

    assert!(matches!(err, ChartError::UnsupportedFormat(ref ext) if ext == "tga"));
    assert_eq!(std::fs::read_dir(&figures).unwrap().count(), 0);
    assert!(runner.commands.is_empty());
}

#[test]
fn figures_directory_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = RecordingRunner::succeeding();

    let err = presenter(dir.path(), &mut runner)
        .save(&Placeholder, "out.svg")
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingFiguresDir(_)));
    assert!(!dir.path().join("figures").exists());
}

#[test]
fn failing_postprocessing_is_not_an_error() {
    let (dir, _figures) = workspace();
    let mut runner = RecordingRunner::default();

    let path = presenter(dir.path(), &mut runner)
        .save(&Placeholder, "out.png")
        .unwrap();
    assert!(path.exists());
    assert_eq!(runner.commands.len(), 2);
}

#[test]
fn failed_pdf_conversion_is_reported() {
    let (dir, _figures) = workspace();
    let mut runner = RecordingRunner::default();

    let err = presenter(dir.path(), &mut runner)
        .save(&Placeholder, "out.pdf")
        .unwrap_err();
    assert!(matches!(err, ChartError::Render(_)));
    assert_eq!(runner.commands.len(), 1);
}

#[test]
fn postprocessing_can_be_disabled() {
    let (dir, _figures) = workspace();
    let mut config = ChartConfig::default();
    config.postprocess.enabled = false;
    let mut runner = RecordingRunner::succeeding();

    Presenter::new(config, dir.path(), &mut runner)
        .save(&Placeholder, "out.png")
        .unwrap();
    assert!(runner.commands.is_empty());
}

#[test]
fn show_opens_a_viewer() {
    let mut runner = RecordingRunner::succeeding();

    let saved = presenter(Path::new("."), &mut runner)
        .present(&Placeholder, &Presentation::Show)
        .unwrap();

    assert_eq!(saved, None);
    assert_eq!(runner.commands.len(), 1);
    let shown = PathBuf::from(&runner.commands[0].args[0]);
    assert!(shown.exists());
    std::fs::remove_file(shown).ok();
}

#[test]
fn fixture_chart_renders_as_svg() {
    let (dir, figures) = workspace();
    let mut runner = RecordingRunner::succeeding();

    let path = presenter(dir.path(), &mut runner)
        .save(&fixture_layout(), "out.svg")
        .unwrap();

    assert_eq!(path, figures.join("out.svg"));
    let svg = std::fs::read_to_string(&path).unwrap();
    let texts = svg_texts(&svg);
    for expected in ["Insignificant", "Significant", "1", "5", "10"] {
        assert!(
            texts.iter().any(|t| t == expected),
            "expected text {expected:?} in rendered chart"
        );
    }
    assert_eq!(texts.iter().filter(|t| *t == "10").count(), 2);
    assert!(runner.commands.is_empty());
}

#[test]
fn fixture_chart_renders_as_png() {
    let (dir, _figures) = workspace();
    let mut config = ChartConfig::default();
    config.postprocess.enabled = false;
    let mut runner = RecordingRunner::succeeding();

    let path = Presenter::new(config, dir.path(), &mut runner)
        .save(&fixture_layout(), "out.png")
        .unwrap();

    let size = std::fs::metadata(&path).unwrap().len();
    assert!(size > 0, "rendered png should not be empty");
}
