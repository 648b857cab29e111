use serde::{Deserialize, Serialize};

use crate::domain::{CellState, GameState, Notes};

/// The two independent flags controlling whether the engine should compute
/// and push clue/solution counts alongside a request. Counting is expensive
/// and only wanted while editing puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CountFlags {
    #[serde(rename = "include_clue_count")]
    pub clue_count: bool,
    #[serde(rename = "include_solution_count")]
    pub solution_count: bool,
}

impl CountFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            clue_count: true,
            solution_count: true,
        }
    }
}

/// Requests the client issues to the engine. Everything except `serialize`
/// and `elapsed_seconds` is fire-and-forget: a success reply only
/// acknowledges the request, and the resulting state arrives as pushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EngineRequest {
    SetValue {
        row: u8,
        col: u8,
        value: u8,
        #[serde(flatten)]
        counts: CountFlags,
    },
    IncrementValue {
        row: u8,
        col: u8,
        #[serde(flatten)]
        counts: CountFlags,
    },
    ToggleNote {
        row: u8,
        col: u8,
        value: u8,
    },
    Generate {
        difficulty: u8,
        seed: u64,
        #[serde(flatten)]
        counts: CountFlags,
        fix_result: bool,
    },
    Solve {
        #[serde(flatten)]
        counts: CountFlags,
    },
    Reset {
        #[serde(flatten)]
        counts: CountFlags,
        hard: bool,
    },
    Hint {
        #[serde(flatten)]
        counts: CountFlags,
    },
    FixCurrent {
        #[serde(flatten)]
        counts: CountFlags,
    },
    Serialize,
    Deserialize {
        content: String,
        #[serde(flatten)]
        counts: CountFlags,
    },
    TriggerUpdate {
        #[serde(flatten)]
        counts: CountFlags,
    },
    ElapsedSeconds,
}

/// Authoritative per-cell update pushed by the engine. Each field is
/// independently optional; absence means "unchanged".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub row: u8,
    pub col: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CellState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
}

/// Aggregate puzzle metrics pushed by the engine; never computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameSummary {
    pub state: GameState,
    pub clue_count: u32,
    pub solution_count: u32,
}

/// Backend-originated push events. Pushes carry no correlation id; ordering
/// is only guaranteed within one cell coordinate, never across cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EnginePush {
    CellUpdate(CellUpdate),
    GameUpdate(GameSummary),
}

/// Outbound wire envelope: a request plus its correlation id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFrame {
    pub id: u64,
    #[serde(flatten)]
    pub request: EngineRequest,
}

/// Inbound reply envelope. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyFrame {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Any inbound line from the engine: a correlated reply or an uncorrelated
/// push.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EngineFrame {
    Reply(ReplyFrame),
    Push(EnginePush),
}
