//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::store::SessionStore;

/// Queues a command for the backend worker. Fire-and-forget: a full queue
/// or a dead worker degrades to a status-line message, the command is
/// dropped, and no local state is rolled back (authoritative state was
/// never locally mutated to begin with).
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    store: &mut SessionStore,
) {
    let cmd_name = match &cmd {
        BackendCommand::SetValue { .. } => "set_value",
        BackendCommand::IncrementValue { .. } => "increment_value",
        BackendCommand::ToggleNote { .. } => "toggle_note",
        BackendCommand::Generate { .. } => "generate",
        BackendCommand::Solve { .. } => "solve",
        BackendCommand::Reset { .. } => "reset",
        BackendCommand::Hint { .. } => "hint",
        BackendCommand::FixCurrent { .. } => "fix_current",
        BackendCommand::TriggerUpdate { .. } => "trigger_update",
        BackendCommand::SaveGame { .. } => "save_game",
        BackendCommand::LoadGame { .. } => "load_game",
        BackendCommand::ListSavegames => "list_savegames",
        BackendCommand::PollElapsed => "poll_elapsed",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->engine command"),
        Err(TrySendError::Full(_)) => {
            store.set_status("command queue is full; please retry");
        }
        Err(TrySendError::Disconnected(_)) => {
            store.set_status("engine worker is gone; restart the application");
        }
    }
}
