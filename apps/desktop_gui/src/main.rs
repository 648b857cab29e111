use std::path::PathBuf;

mod backend_bridge;
mod board;
mod controller;
mod focus;
mod store;
mod timer;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use clap::Parser;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use ui::app::{PersistedSettings, SudokuApp, SETTINGS_STORAGE_KEY};

/// Desktop Sudoku client. The solving engine runs as a separate process
/// and is driven over its stdio.
#[derive(Debug, Parser)]
#[command(name = "sudoku-desk", version)]
struct Args {
    /// Engine executable to launch.
    #[arg(long, default_value = "sudoku-engine")]
    engine: PathBuf,
    /// Directory for savegames and other per-user data. Defaults to the
    /// platform's local app data dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(
        cmd_rx,
        ui_tx,
        runtime::StartupConfig {
            engine_cmd: args.engine,
            data_dir: args.data_dir,
        },
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sudoku")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([900.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sudoku",
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedSettings>(&text).ok())
            });
            Ok(Box::new(SudokuApp::new(cmd_tx, ui_rx, persisted)))
        }),
    )
}
