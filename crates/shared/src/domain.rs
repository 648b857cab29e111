use serde::{Deserialize, Serialize};

/// Number of rows/columns on the board.
pub const GRID_SIZE: usize = 9;
/// Total cell count.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Visual state of a single cell, as asserted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Blank,
    /// Part of the fixed puzzle; not editable while solving.
    Fix,
    /// Entered by the player.
    Set,
    /// Conflicts with another cell.
    Error,
    /// Placed by the hint operation.
    Hint,
}

/// Engine-reported completion state of the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Blank,
    Running,
    Solved,
    Error,
}

/// Candidate-note flags for one cell; index i corresponds to digit i + 1.
pub type Notes = [bool; GRID_SIZE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_state_wire_names_are_snake_case() {
        assert_eq!(serde_json::to_string(&CellState::Fix).unwrap(), "\"fix\"");
        assert_eq!(
            serde_json::from_str::<CellState>("\"hint\"").unwrap(),
            CellState::Hint
        );
    }

    #[test]
    fn game_state_round_trips() {
        for state in [
            GameState::Blank,
            GameState::Running,
            GameState::Solved,
            GameState::Error,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(serde_json::from_str::<GameState>(&json).unwrap(), state);
        }
    }
}
