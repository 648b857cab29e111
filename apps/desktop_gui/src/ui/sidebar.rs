//! Left control panel. Which controls show depends on the app state; the
//! whole panel is disabled while a modal is open.

use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::store::{AppState, OpenModal};
use crate::ui::app::SudokuApp;

pub fn show(app: &mut SudokuApp, ui: &mut egui::Ui) {
    ui.add_space(8.0);
    match app.store.app_state() {
        AppState::Start => show_start(app, ui),
        AppState::Editing => show_editing(app, ui),
        AppState::Solving | AppState::Solved => show_playing(app, ui),
    }
}

fn show_start(app: &mut SudokuApp, ui: &mut egui::Ui) {
    ui.heading("welcome");
    ui.add_space(8.0);
    if ui.button("new game").clicked() {
        app.store.set_modal(OpenModal::Generate);
    }
    if ui.button("load game").clicked() {
        app.store.set_modal(OpenModal::Load);
        app.dispatch(BackendCommand::ListSavegames);
    }
    if ui.button("editor").clicked() && app.store.enter_editor() {
        // A fresh editor needs the blank grid and its counts pushed once.
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::TriggerUpdate { counts });
    }
}

fn show_editing(app: &mut SudokuApp, ui: &mut egui::Ui) {
    ui.heading("editor");
    ui.add_space(8.0);

    let summary = app.store.summary();
    ui.label(format!("clues: {}", summary.clue_count));
    let solutions = if summary.solution_count > 4 {
        "> 4".to_string()
    } else {
        summary.solution_count.to_string()
    };
    ui.label(format!("solutions: {solutions}"));
    ui.add_space(8.0);

    if ui.button("generate").clicked() {
        app.store.set_modal(OpenModal::Generate);
    }
    if ui.button("solve").clicked() {
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::Solve { counts });
    }
    if ui.button("hint").clicked() {
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::Hint { counts });
    }
    if ui.button("clear").clicked() {
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::Reset { counts, hard: true });
    }
    ui.add_space(8.0);
    if ui.button("load game").clicked() {
        app.store.set_modal(OpenModal::Load);
        app.dispatch(BackendCommand::ListSavegames);
    }
    if ui.button("save game").clicked() {
        app.store.set_modal(OpenModal::Save);
    }
    ui.add_space(8.0);

    let playable = app.store.can_play();
    if ui
        .add_enabled(playable, egui::Button::new("play"))
        .on_disabled_hover_text("the puzzle needs exactly one solution")
        .clicked()
        && app.store.start_play()
    {
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::FixCurrent { counts });
        app.timer.reset();
    }
    if ui.button("back").clicked() {
        back_to_start(app);
    }
}

fn show_playing(app: &mut SudokuApp, ui: &mut egui::Ui) {
    if app.store.app_state() == AppState::Solved {
        ui.heading("solved!");
    } else {
        ui.heading("playing");
    }
    ui.add_space(8.0);
    ui.label(format!("time: {}", app.timer.display()));
    ui.add_space(8.0);

    if ui.button("hint").clicked() {
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::Hint { counts });
    }
    if ui.button("restart").clicked() {
        app.restart_puzzle();
    }
    if ui.button("save game").clicked() {
        app.store.set_modal(OpenModal::Save);
    }
    ui.add_space(8.0);

    let mut show_errors = app.store.show_errors();
    if ui.checkbox(&mut show_errors, "show errors").changed() {
        app.store.toggle_show_errors();
    }
    ui.add_space(8.0);

    if ui.button("back").clicked() {
        back_to_start(app);
    }
}

fn back_to_start(app: &mut SudokuApp) {
    app.store.back_to_start();
    app.focus.clear();
    app.timer.reset();
    app.dispatch(BackendCommand::Reset {
        counts: shared::protocol::CountFlags::none(),
        hard: true,
    });
}
