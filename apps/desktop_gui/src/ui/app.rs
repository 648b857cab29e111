//! Top-level egui application: drains backend events each frame, runs the
//! periodic cadences (status decay, solve-timer polling), translates
//! keyboard input into backend commands, and lays out the panels.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::GRID_SIZE;
use storage::SavegameEntry;

use crate::backend_bridge::commands::BackendCommand;
use crate::board::Board;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::focus::{Direction, FocusController};
use crate::store::{AppState, SessionStore};
use crate::timer::SolveTimer;
use crate::ui::{modals, playfield, sidebar};

const STATUS_DECAY: Duration = Duration::from_secs(3);

pub const SETTINGS_STORAGE_KEY: &str = "sudoku_desk_settings";

/// The handful of preferences carried across runs via eframe storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub show_errors: bool,
    pub gen_difficulty: u8,
}

pub struct SudokuApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(crate) store: SessionStore,
    pub(crate) board: Board,
    pub(crate) focus: FocusController,
    pub(crate) timer: SolveTimer,
    pub(crate) savegames: Vec<SavegameEntry>,
    pub(crate) save_name: String,
    pub(crate) gen_difficulty: u8,
    pub(crate) gen_seed: u64,
    engine_ready: bool,
    last_status_clear: Instant,
}

impl SudokuApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedSettings>,
    ) -> Self {
        let mut store = SessionStore::default();
        let mut gen_difficulty = 40;
        if let Some(settings) = persisted {
            store.set_show_errors(settings.show_errors);
            gen_difficulty = settings.gen_difficulty.clamp(20, 57);
        }
        Self {
            cmd_tx,
            ui_rx,
            store,
            board: Board::default(),
            focus: FocusController::default(),
            timer: SolveTimer::default(),
            savegames: Vec::new(),
            save_name: String::new(),
            gen_difficulty,
            gen_seed: 0,
            engine_ready: false,
            last_status_clear: Instant::now(),
        }
    }

    pub(crate) fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.store);
    }

    /// Drains the backend queue. Each event is applied in arrival order;
    /// cell pushes touch only their own cell.
    pub(crate) fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::EngineReady => {
                    self.engine_ready = true;
                }
                UiEvent::Cell(update) => self.board.apply(&update),
                UiEvent::Summary(summary) => self.store.apply_summary(summary),
                UiEvent::GenerateFinished => {
                    self.store.generate_finished();
                    self.timer.reset();
                }
                UiEvent::LoadFinished => {
                    self.store.load_finished();
                    self.timer.reset();
                }
                UiEvent::SaveFinished { name } => {
                    self.store.set_status(format!("saved {name}"));
                }
                UiEvent::Savegames(entries) => self.savegames = entries,
                UiEvent::Elapsed(seconds) => self.timer.apply_elapsed(seconds),
                UiEvent::Error(err) => self.store.set_status(err.status_line()),
            }
        }
    }

    /// Soft reset while playing: the engine keeps the fixed clues and
    /// restarts its clock, so the expiry latch must clear too.
    pub(crate) fn restart_puzzle(&mut self) {
        self.timer.reset();
        let counts = self.store.include_counts();
        self.dispatch(BackendCommand::Reset {
            counts,
            hard: false,
        });
    }

    fn run_cadences(&mut self, now: Instant) {
        if now.duration_since(self.last_status_clear) >= STATUS_DECAY {
            self.store.clear_status_tick();
            self.last_status_clear = now;
        }
        if self.store.app_state() == AppState::Solving && self.timer.should_poll(now) {
            self.dispatch(BackendCommand::PollElapsed);
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if !self.store.controls_enabled() || !self.store.grid_visible() {
            return;
        }
        let mut moves: Vec<Direction> = Vec::new();
        let mut clear_focus = false;
        let mut digits: Vec<(u8, bool)> = Vec::new();
        let mut erase = false;
        ctx.input(|input| {
            for event in &input.events {
                let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                else {
                    continue;
                };
                match key {
                    egui::Key::ArrowUp | egui::Key::W => moves.push(Direction::Up),
                    egui::Key::ArrowDown | egui::Key::S => moves.push(Direction::Down),
                    egui::Key::ArrowLeft | egui::Key::A => moves.push(Direction::Left),
                    egui::Key::ArrowRight | egui::Key::D => moves.push(Direction::Right),
                    egui::Key::Escape => clear_focus = true,
                    egui::Key::Num0 | egui::Key::Delete | egui::Key::Backspace => erase = true,
                    key => {
                        if let Some(digit) = digit_of(*key) {
                            digits.push((digit, modifiers.ctrl));
                        }
                    }
                }
            }
        });

        for direction in moves {
            self.focus.step(direction);
        }
        if clear_focus {
            self.focus.clear();
        }
        let Some(index) = self.focus.focused() else {
            return;
        };
        let (row, col) = ((index / GRID_SIZE) as u8, (index % GRID_SIZE) as u8);
        for (digit, note_mode) in digits {
            if note_mode {
                // Only blank cells carry notes; a dead toggle sends nothing.
                if self.board.toggle_note(row as usize, col as usize, digit) {
                    self.dispatch(BackendCommand::ToggleNote { row, col, digit });
                }
            } else {
                let counts = self.store.include_counts();
                self.dispatch(BackendCommand::SetValue {
                    row,
                    col,
                    value: digit,
                    counts,
                });
            }
        }
        if erase {
            let counts = self.store.include_counts();
            self.dispatch(BackendCommand::SetValue {
                row,
                col,
                value: 0,
                counts,
            });
        }
    }
}

fn digit_of(key: egui::Key) -> Option<u8> {
    match key {
        egui::Key::Num1 => Some(1),
        egui::Key::Num2 => Some(2),
        egui::Key::Num3 => Some(3),
        egui::Key::Num4 => Some(4),
        egui::Key::Num5 => Some(5),
        egui::Key::Num6 => Some(6),
        egui::Key::Num7 => Some(7),
        egui::Key::Num8 => Some(8),
        egui::Key::Num9 => Some(9),
        _ => None,
    }
}

impl eframe::App for SudokuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.run_cadences(Instant::now());
        self.handle_keyboard(ctx);

        let controls_enabled = self.store.controls_enabled();

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Sudoku");
                ui.separator();
                if self.engine_ready {
                    ui.label(self.store.status());
                } else {
                    ui.label("starting engine...");
                }
            });
        });

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(controls_enabled, |ui| {
                    sidebar::show(self, ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(controls_enabled, |ui| {
                if self.store.grid_visible() {
                    playfield::show(self, ui);
                } else {
                    ui.centered_and_justified(|ui| {
                        ui.heading("generate a puzzle, load a game, or open the editor");
                    });
                }
            });
        });

        modals::show(self, ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            show_errors: self.store.show_errors(),
            gen_difficulty: self.gen_difficulty,
        };
        if let Ok(text) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OpenModal;
    use shared::domain::{CellState, GameState};
    use shared::protocol::{CellUpdate, GameSummary};

    fn app() -> (SudokuApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(256);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(2048);
        (SudokuApp::new(cmd_tx, ui_rx, None), cmd_rx, ui_tx)
    }

    #[test]
    fn generate_flow_closes_the_modal_and_enters_solving() {
        let (mut app, _cmd_rx, ui_tx) = app();
        app.store.set_modal(OpenModal::Generate);
        assert!(!app.store.controls_enabled());

        ui_tx.send(UiEvent::GenerateFinished).unwrap();
        app.process_ui_events();

        assert_eq!(app.store.open_modal(), OpenModal::None);
        assert_eq!(app.store.app_state(), AppState::Solving);
        assert!(app.store.controls_enabled());
    }

    #[test]
    fn cell_pushes_touch_only_their_own_cell() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Cell(CellUpdate {
                row: 2,
                col: 3,
                value: Some(7),
                state: Some(CellState::Fix),
                notes: None,
            }))
            .unwrap();
        app.process_ui_events();

        assert_eq!(app.board.cell(2, 3).value, 7);
        assert_eq!(app.board.cell(2, 3).state, CellState::Fix);
        for index in 0..81 {
            if index == 2 * 9 + 3 {
                continue;
            }
            assert_eq!(app.board.cell(index / 9, index % 9).value, 0);
        }
    }

    #[test]
    fn solved_summary_freezes_the_status_line() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx.send(UiEvent::GenerateFinished).unwrap();
        ui_tx
            .send(UiEvent::Summary(GameSummary {
                state: GameState::Solved,
                clue_count: 30,
                solution_count: 1,
            }))
            .unwrap();
        app.process_ui_events();

        assert_eq!(app.store.app_state(), AppState::Solved);
        app.store.clear_status_tick();
        assert_eq!(app.store.status(), "solved!");
    }

    #[test]
    fn restart_after_expiry_resumes_the_timer() {
        let (mut app, cmd_rx, ui_tx) = app();
        ui_tx.send(UiEvent::GenerateFinished).unwrap();
        ui_tx.send(UiEvent::Elapsed(-1)).unwrap();
        app.process_ui_events();
        assert_eq!(app.timer.display(), "EXPIRED");

        app.restart_puzzle();

        assert_eq!(app.timer.display(), "00:00:00");
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::Reset { hard: false, .. })
        ));
        app.run_cadences(Instant::now() + Duration::from_secs(10));
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::PollElapsed)));
    }

    #[test]
    fn expired_timer_stops_polling() {
        let (mut app, cmd_rx, ui_tx) = app();
        ui_tx.send(UiEvent::GenerateFinished).unwrap();
        ui_tx.send(UiEvent::Elapsed(-1)).unwrap();
        app.process_ui_events();

        assert_eq!(app.timer.display(), "EXPIRED");
        app.run_cadences(Instant::now() + Duration::from_secs(10));
        assert!(cmd_rx.try_recv().is_err());
    }
}
