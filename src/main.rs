mod core;
mod global_constants;
mod ports;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::interfaces::ports::MousePositionProvider;
use crate::core::models::{AnnotationKind, GlobalPoint, UserSettings};
use crate::core::orchestrators::CaptureSession;
use crate::global_constants::{
    DEFAULT_MOUSE_POSITION_X, DEFAULT_MOUSE_POSITION_Y, LOG_TAG_MAIN,
};
use crate::ports::{
    MarkdownReportSink, SystemMousePositionProvider, XcapDisplayTopology, XcapFrameGrabber,
};

/// Captures the monitor under the cursor, stamps a status marker at the
/// cursor position, and appends caption plus screenshot to an evidence
/// report. The hotkey daemon invokes this once per trigger.
#[derive(Parser, Debug)]
#[command(name = "evidence-capture", version, about)]
struct Cli {
    /// Outcome to stamp at the cursor position
    #[arg(long, value_enum, default_value_t = AnnotationKind::None)]
    kind: AnnotationKind,

    /// Caption written above the screenshot
    #[arg(long, default_value = "")]
    caption: String,

    /// Override the report output folder from settings
    #[arg(long)]
    report_folder: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        // Terminal failures surface once; the process never panics on a
        // failed capture.
        log::error!("{} capture failed: {:#}", LOG_TAG_MAIN, e);
        eprintln!("capture failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    log::info!("{} starting evidence capture", LOG_TAG_MAIN);

    let settings = UserSettings::load().unwrap_or_else(|e| {
        log::warn!(
            "{} Failed to load settings: {}, using defaults",
            LOG_TAG_MAIN,
            e
        );
        UserSettings::default()
    });
    settings
        .validate()
        .context("settings rejected at startup")?;

    if !utils::ensure_single_instance() {
        log::error!("{} Failed to ensure single instance", LOG_TAG_MAIN);
    }

    let report_base = cli
        .report_folder
        .clone()
        .or_else(|| settings.report_folder.clone())
        .or_else(|| dirs::document_dir().map(|documents| documents.join("evidence")))
        .context("no report folder configured and no documents directory found")?;

    let sink = Arc::new(MarkdownReportSink::open(&report_base)?);
    let session = CaptureSession::build(
        Arc::new(XcapDisplayTopology::initialize()),
        Arc::new(XcapFrameGrabber::initialize()),
        sink.clone(),
        settings,
    );

    let cursor = SystemMousePositionProvider::initialize()
        .get_current_mouse_position()
        .unwrap_or_else(|_| {
            GlobalPoint::at_coordinates(DEFAULT_MOUSE_POSITION_X, DEFAULT_MOUSE_POSITION_Y)
        });

    let annotated = session
        .capture_and_annotate(cursor, cli.kind, &cli.caption)
        .map_err(anyhow::Error::from)?;

    sink.finalize()?;

    log::info!(
        "{} appended {}x{} capture from display {} to {:?}",
        LOG_TAG_MAIN,
        annotated.buffer.width,
        annotated.buffer.height,
        annotated.source_display_id,
        sink.report_dir()
    );
    println!("{}", sink.report_dir().display());

    Ok(())
}
