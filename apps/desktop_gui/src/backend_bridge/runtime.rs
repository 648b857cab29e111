//! Backend worker: owns the engine process and the savegame store on a
//! dedicated thread with its own tokio runtime. Commands arrive over the
//! crossbeam queue; results and authoritative pushes flow back as
//! [`UiEvent`]s. Nothing here retries: every failure is reported once and
//! the worker moves on to the next command.

use std::{path::PathBuf, thread};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use engine_client::EngineClient;
use shared::protocol::EnginePush;
use storage::SavegameStore;
use tokio::sync::broadcast;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Engine executable launched as a child process.
    pub engine_cmd: PathBuf,
    /// Override for the per-user data root.
    pub data_dir: Option<PathBuf>,
}

fn resolve_savegame_store(startup: &StartupConfig) -> Result<SavegameStore> {
    let root = match &startup.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_local_dir()
            .context("unable to resolve the local app data dir")?
            .join("sudoku-desk"),
    };
    Ok(SavegameStore::new(root.join("savegames")))
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(%err, "failed to build backend runtime");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::EngineStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let savegames = match resolve_savegame_store(&startup) {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!(%err, "savegame store unavailable");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::storage(
                        UiErrorContext::EngineStartup,
                        &err,
                    )));
                    return;
                }
            };

            let client = match EngineClient::spawn(&startup.engine_cmd) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!(%err, engine = %startup.engine_cmd.display(), "engine startup failed");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::EngineStartup,
                        format!("{err:#}"),
                    )));
                    return;
                }
            };

            // Fan the engine's push stream into the UI event queue. The
            // subscription lives as long as the worker; eframe teardown
            // drops the channels and both loops unwind.
            tokio::spawn(forward_pushes(client.subscribe_events(), ui_tx.clone()));

            let _ = ui_tx.try_send(UiEvent::EngineReady);

            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&client, &savegames, &ui_tx, cmd).await;
            }
            tracing::info!("backend worker shutting down");
        });
    });
}

/// Forwards engine pushes into the UI event queue. A full queue or a
/// lagged subscription costs single events, never the stream: the loop
/// only ends when one side goes away for good.
async fn forward_pushes(mut pushes: broadcast::Receiver<EnginePush>, ui_tx: Sender<UiEvent>) {
    loop {
        let push = match pushes.recv().await {
            Ok(push) => push,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "push stream lagged; skipping ahead");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };
        let event = match push {
            EnginePush::CellUpdate(update) => UiEvent::Cell(update),
            EnginePush::GameUpdate(summary) => UiEvent::Summary(summary),
        };
        match ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue full; dropping a push");
            }
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
}

async fn handle_command(
    client: &EngineClient,
    savegames: &SavegameStore,
    ui_tx: &Sender<UiEvent>,
    cmd: BackendCommand,
) {
    match cmd {
        BackendCommand::SetValue {
            row,
            col,
            value,
            counts,
        } => {
            if let Err(err) = client.set_value(row, col, value, counts).await {
                report_engine(ui_tx, UiErrorContext::Move, &err);
            }
        }
        BackendCommand::IncrementValue { row, col, counts } => {
            if let Err(err) = client.increment_value(row, col, counts).await {
                report_engine(ui_tx, UiErrorContext::Move, &err);
            }
        }
        BackendCommand::ToggleNote { row, col, digit } => {
            if let Err(err) = client.toggle_note(row, col, digit).await {
                report_engine(ui_tx, UiErrorContext::Move, &err);
            }
        }
        BackendCommand::Generate {
            difficulty,
            seed,
            counts,
            fix_result,
        } => match client.generate(difficulty, seed, counts, fix_result).await {
            Ok(()) => {
                let _ = ui_tx.try_send(UiEvent::GenerateFinished);
            }
            Err(err) => report_engine(ui_tx, UiErrorContext::Generate, &err),
        },
        BackendCommand::Solve { counts } => {
            if let Err(err) = client.solve(counts).await {
                report_engine(ui_tx, UiErrorContext::Solve, &err);
            }
        }
        BackendCommand::Reset { counts, hard } => {
            if let Err(err) = client.reset(counts, hard).await {
                report_engine(ui_tx, UiErrorContext::Reset, &err);
            }
        }
        BackendCommand::Hint { counts } => {
            if let Err(err) = client.hint(counts).await {
                report_engine(ui_tx, UiErrorContext::Hint, &err);
            }
        }
        BackendCommand::FixCurrent { counts } => {
            if let Err(err) = client.fix_current(counts).await {
                report_engine(ui_tx, UiErrorContext::Fix, &err);
            }
        }
        BackendCommand::TriggerUpdate { counts } => {
            if let Err(err) = client.trigger_update(counts).await {
                report_engine(ui_tx, UiErrorContext::General, &err);
            }
        }
        BackendCommand::SaveGame { name } => {
            let content = match client.serialize().await {
                Ok(content) => content,
                Err(err) => {
                    report_engine(ui_tx, UiErrorContext::SaveGame, &err);
                    return;
                }
            };
            if let Err(err) = savegames.write(&name, &content) {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::storage(
                    UiErrorContext::SaveGame,
                    &err,
                )));
                return;
            }
            let _ = ui_tx.try_send(UiEvent::SaveFinished { name });
            send_savegame_list(savegames, ui_tx);
        }
        BackendCommand::LoadGame { name, counts } => {
            let content = match savegames.read(&name) {
                Ok(content) => content,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::storage(
                        UiErrorContext::LoadGame,
                        &err,
                    )));
                    return;
                }
            };
            match client.deserialize(content, counts).await {
                Ok(()) => {
                    let _ = ui_tx.try_send(UiEvent::LoadFinished);
                }
                Err(err) => report_engine(ui_tx, UiErrorContext::LoadGame, &err),
            }
        }
        BackendCommand::ListSavegames => send_savegame_list(savegames, ui_tx),
        BackendCommand::PollElapsed => match client.elapsed_seconds().await {
            Ok(seconds) => {
                let _ = ui_tx.try_send(UiEvent::Elapsed(seconds));
            }
            Err(err) => report_engine(ui_tx, UiErrorContext::Timer, &err),
        },
    }
}

fn send_savegame_list(savegames: &SavegameStore, ui_tx: &Sender<UiEvent>) {
    match savegames.list() {
        Ok(entries) => {
            let _ = ui_tx.try_send(UiEvent::Savegames(entries));
        }
        Err(err) => {
            // The modal simply shows no entries; the failure goes to the
            // status line.
            tracing::warn!(%err, "failed to list savegames");
            let _ = ui_tx.try_send(UiEvent::Savegames(Vec::new()));
            let _ = ui_tx.try_send(UiEvent::Error(UiError::storage(
                UiErrorContext::LoadGame,
                &err,
            )));
        }
    }
}

fn report_engine(ui_tx: &Sender<UiEvent>, context: UiErrorContext, err: &shared::error::EngineError) {
    tracing::warn!(?context, %err, "engine request failed");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::engine(context, err)));
}
