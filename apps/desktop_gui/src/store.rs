//! Process-wide session state behind reducer-style transitions.
//!
//! Everything that gates the UI lives here: the application state machine,
//! the single open modal, the last engine-pushed game summary, and the
//! status line. Components never mutate the fields directly; the reducers
//! are the only way through, so the invariants (one modal, valid state
//! edges, controls-enabled == no modal open) hold at a single choke point.
//! Invalid transitions are deliberate no-ops, never panics.

use shared::domain::GameState;
use shared::protocol::{CountFlags, GameSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Editing,
    Solving,
    Solved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenModal {
    None,
    Load,
    Generate,
    Save,
}

pub struct SessionStore {
    app_state: AppState,
    open_modal: OpenModal,
    summary: GameSummary,
    status: String,
    show_errors: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            app_state: AppState::Start,
            open_modal: OpenModal::None,
            summary: GameSummary::default(),
            status: "Welcome to Sudoku!".to_string(),
            show_errors: false,
        }
    }
}

impl SessionStore {
    pub fn app_state(&self) -> AppState {
        self.app_state
    }

    pub fn open_modal(&self) -> OpenModal {
        self.open_modal
    }

    pub fn summary(&self) -> GameSummary {
        self.summary
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    /// Background controls are enabled exactly when no modal is open. This
    /// is computed, not stored, so the coupling cannot drift out of sync.
    pub fn controls_enabled(&self) -> bool {
        self.open_modal == OpenModal::None
    }

    pub fn grid_visible(&self) -> bool {
        self.app_state != AppState::Start
    }

    /// Clue/solution counting is expensive; only request it while editing.
    pub fn include_counts(&self) -> CountFlags {
        if self.app_state == AppState::Editing {
            CountFlags::all()
        } else {
            CountFlags::none()
        }
    }

    /// Engine error states render as errors while editing; while solving
    /// the player opts in via the checkbox.
    pub fn render_errors(&self) -> bool {
        self.show_errors || self.app_state == AppState::Editing
    }

    pub fn toggle_show_errors(&mut self) {
        self.show_errors = !self.show_errors;
    }

    pub fn set_show_errors(&mut self, show: bool) {
        self.show_errors = show;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Periodic status clear; the solved message stays pinned.
    pub fn clear_status_tick(&mut self) {
        if self.app_state != AppState::Solved {
            self.status.clear();
        }
    }

    /// Opens a modal, replacing any already-open one. Never stacks.
    pub fn set_modal(&mut self, modal: OpenModal) {
        self.open_modal = modal;
    }

    pub fn close_modal(&mut self) {
        self.open_modal = OpenModal::None;
    }

    /// Start → Editing. A no-op anywhere else.
    pub fn enter_editor(&mut self) -> bool {
        if self.app_state != AppState::Start {
            return false;
        }
        self.app_state = AppState::Editing;
        self.set_status("place clues, then hit play once exactly one solution remains");
        true
    }

    /// A generate request completed: close the modal and, unless the editor
    /// is active (which keeps editing the fresh puzzle), start solving.
    pub fn generate_finished(&mut self) {
        self.close_modal();
        if self.app_state != AppState::Editing {
            self.app_state = AppState::Solving;
            self.set_status("Let's get cracking!");
        }
    }

    /// A deserialize request completed; same state rule as generation.
    pub fn load_finished(&mut self) {
        if self.app_state != AppState::Editing {
            self.app_state = AppState::Solving;
            self.set_status("Let's get cracking!");
        }
    }

    /// Editing → Solving, gated on a uniquely-solvable puzzle. The caller
    /// pairs a successful transition with a fix-current engine request.
    pub fn start_play(&mut self) -> bool {
        if !self.can_play() {
            return false;
        }
        self.app_state = AppState::Solving;
        self.set_status("let's see if you can crack this Sudoku");
        true
    }

    pub fn can_play(&self) -> bool {
        self.app_state == AppState::Editing && self.summary.solution_count == 1
    }

    /// Any → Start. The caller pairs this with a non-counting hard reset.
    pub fn back_to_start(&mut self) {
        self.app_state = AppState::Start;
        self.summary = GameSummary::default();
        self.set_status("do you want to play or create a new game?");
    }

    /// Stores an engine-pushed summary. The one route into Solved: a
    /// summary whose state is the engine's solved sentinel, received while
    /// solving.
    pub fn apply_summary(&mut self, summary: GameSummary) {
        self.summary = summary;
        if self.app_state == AppState::Solving && summary.state == GameState::Solved {
            self.app_state = AppState::Solved;
            self.set_status("solved!");
        }
    }
}
