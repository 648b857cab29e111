//! Commands queued from the UI thread to the backend worker.
//!
//! Mutating commands carry the two count flags; the UI decides them from
//! the current application state (counting only while editing).

use shared::protocol::CountFlags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SetValue {
        row: u8,
        col: u8,
        value: u8,
        counts: CountFlags,
    },
    IncrementValue {
        row: u8,
        col: u8,
        counts: CountFlags,
    },
    ToggleNote {
        row: u8,
        col: u8,
        digit: u8,
    },
    Generate {
        difficulty: u8,
        seed: u64,
        counts: CountFlags,
        fix_result: bool,
    },
    Solve {
        counts: CountFlags,
    },
    Reset {
        counts: CountFlags,
        hard: bool,
    },
    Hint {
        counts: CountFlags,
    },
    FixCurrent {
        counts: CountFlags,
    },
    TriggerUpdate {
        counts: CountFlags,
    },
    SaveGame {
        name: String,
    },
    LoadGame {
        name: String,
        counts: CountFlags,
    },
    ListSavegames,
    PollElapsed,
}
