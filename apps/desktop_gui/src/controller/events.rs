//! Events flowing from the backend worker to the UI, and error modeling.

use shared::error::EngineError;
use shared::protocol::{CellUpdate, GameSummary};
use storage::SavegameEntry;

pub enum UiEvent {
    /// The engine process is up and its push stream is attached.
    EngineReady,
    /// Authoritative per-cell state; routed to exactly one cell.
    Cell(CellUpdate),
    /// Authoritative game summary (completion state, clue/solution counts).
    Summary(GameSummary),
    GenerateFinished,
    LoadFinished,
    SaveFinished { name: String },
    Savegames(Vec<SavegameEntry>),
    /// Elapsed play time in seconds; negative means expired.
    Elapsed(i64),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// The engine refused the request (invalid move, invalid puzzle).
    Engine,
    /// Savegame persistence failed.
    Storage,
    /// The engine process or its transport went away.
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    EngineStartup,
    Move,
    Generate,
    Solve,
    Reset,
    Hint,
    Fix,
    SaveGame,
    LoadGame,
    Timer,
    General,
}

impl UiErrorContext {
    fn label(self) -> &'static str {
        match self {
            Self::EngineStartup => "engine startup",
            Self::Move => "move",
            Self::Generate => "generate",
            Self::Solve => "solve",
            Self::Reset => "reset",
            Self::Hint => "hint",
            Self::Fix => "fix puzzle",
            Self::SaveGame => "save",
            Self::LoadGame => "load",
            Self::Timer => "timer",
            Self::General => "error",
        }
    }
}

/// A UI-facing failure. Never thrown into the render tree; the worst
/// outcome is a line on the status header.
#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn engine(context: UiErrorContext, err: &EngineError) -> Self {
        let category = match err {
            EngineError::Rejected(_) => UiErrorCategory::Engine,
            EngineError::Disconnected | EngineError::Io(_) => UiErrorCategory::Transport,
            EngineError::Protocol(_) => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn storage(context: UiErrorContext, err: &anyhow::Error) -> Self {
        Self {
            category: UiErrorCategory::Storage,
            context,
            message: format!("{err:#}"),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("closed")
            || lower.contains("disconnect")
            || lower.contains("launch")
            || lower.contains("i/o")
        {
            UiErrorCategory::Transport
        } else if lower.contains("rejected") {
            UiErrorCategory::Engine
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    /// One line for the status header.
    pub fn status_line(&self) -> String {
        format!("{}: {}", self.context.label(), self.message)
    }
}
