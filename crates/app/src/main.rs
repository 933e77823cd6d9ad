//! Nitro editor - headless pixel editing driver
//!
//! Loads an image from a PNG directory store, replays a JSON-lines script of
//! UI messages against an editing session, autosaves with the configured
//! debounce and optionally writes a preview render at the end. Notifications
//! for the UI are printed to stdout, one JSON object per line.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use nitro_ipc::{EditorToUi, UiToEditor};
use raster::{EditorSession, PngDirStore, render_view};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod bridge;
mod config;
mod driver;

use driver::EditorDriver;

#[derive(Parser, Debug)]
#[command(name = "nitro-editor", version)]
struct Cli {
    /// Directory holding `<id>.png` images.
    #[arg(long)]
    store: PathBuf,

    /// Image to open.
    #[arg(long)]
    id: String,

    /// JSON-lines file of UI messages; `-` reads stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// JSON config file (defaults otherwise; NITRO_* env vars override).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a render of the final canvas view to this PNG.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Autosave debounce in milliseconds (0 saves immediately).
    #[arg(long)]
    autosave_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;
    let settings = config::session_settings(&config, cli.autosave_ms)?;
    info!(
        "Starting nitro-editor (history {}, autosave {:?})",
        settings.history_limit, settings.save_delay
    );

    let store = Arc::new(PngDirStore::new(&cli.store));
    let (notify, mut notifications) = mpsc::unbounded_channel();
    let mut driver = EditorDriver::new(EditorSession::new(settings), store, notify);
    driver
        .load(&cli.id)
        .await
        .with_context(|| format!("open '{}' in {}", cli.id, cli.store.display()))?;

    let printer = tokio::spawn(async move {
        while let Some(message) = notifications.recv().await {
            print_notification(&message);
        }
    });

    let (inbox_tx, inbox) = mpsc::unbounded_channel();
    let session_task = tokio::spawn(driver.run(inbox));

    if let Some(script) = cli.script {
        let lines = tokio::task::spawn_blocking(move || read_script(&script)).await??;
        for (number, line) in lines.into_iter().enumerate() {
            match UiToEditor::from_json(&line) {
                Ok(message) => {
                    if inbox_tx.send(message).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Skipping script line {}: {}", number + 1, e),
            }
        }
    }
    drop(inbox_tx);

    let session = session_task.await.context("editor task failed")?;
    printer.await.context("notification printer failed")?;

    if let (Some(path), Some(grid)) = (cli.export, session.grid()) {
        render_view(grid, &session.render_options())
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write preview '{}'", path.display()))?;
        info!("Wrote preview to {}", path.display());
    }

    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open script '{}'", path.display()))?;
        Box::new(std::io::BufReader::new(file))
    };

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn print_notification(message: &EditorToUi) {
    match message.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => warn!("Failed to encode notification: {}", e),
    }
}
