use clap::Parser;
use color_eyre::Result;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use building_viewer::config::{Viewport, ViewerConfig};
use building_viewer::editor::Editor;
use building_viewer::export::{export_csv, export_json};
use building_viewer::parser::parse_descriptor_file;
use building_viewer::sensor::DefaultSource;
use building_viewer::ui::App;

const DEFAULT_LOG_FILTER: &str = "info,building_viewer=debug";

#[derive(Parser, Debug)]
#[command(name = "building-viewer")]
#[command(about = "Building Viewer - project JSON building descriptors and browse them floor by floor")]
#[command(version)]
struct Args {
    /// Path to building descriptor (JSON)
    #[arg(required = true)]
    file: PathBuf,

    /// Viewport the scene is fitted into, as WIDTHxHEIGHT
    #[arg(long, env = "BUILDING_VIEWPORT", default_value = "1920x1080")]
    viewport: Viewport,

    /// Floor to open in plan mode
    #[arg(long, default_value = "")]
    floor: String,

    /// Active layer
    #[arg(long, default_value = "")]
    layer: String,

    /// Initial view, e.g. "front left" or "top"
    #[arg(long)]
    view: Option<String>,

    /// Export the scene snapshot to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Export one row per side to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write logs to this file while the viewer is open
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Poll sensor endpoints
    #[arg(long)]
    sensors: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let exporting = args.csv.is_some() || args.json.is_some();

    if exporting {
        init_logging_to_stderr();
    } else if let Some(path) = &args.log {
        init_logging_to_file(path)?;
    }

    let descriptor = parse_descriptor_file(&args.file)?;
    let config = ViewerConfig {
        viewport: args.viewport,
        floor: args.floor,
        layer: args.layer,
        view: args.view,
    };
    tracing::info!(
        file = %args.file.display(),
        viewport = %config.viewport,
        floor = %config.floor,
        layer = %config.layer,
        "Opening building"
    );
    let editor = Editor::new(descriptor, &config);

    if let Some(csv_path) = &args.csv {
        export_csv(editor.scene(), csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(editor.scene(), json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if exporting {
        return Ok(());
    }

    let mut app = App::new(editor);
    if args.sensors {
        app = app.with_sensors(Box::new(DefaultSource::default()));
    }

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
}

fn init_logging_to_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn init_logging_to_file(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
