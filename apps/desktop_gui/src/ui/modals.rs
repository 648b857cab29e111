//! Modal dialogs. While one is open every other control is disabled; the
//! dialog either dispatches its command or closes without effect.

use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::store::{AppState, OpenModal};
use crate::ui::app::SudokuApp;

pub fn show(app: &mut SudokuApp, ctx: &egui::Context) {
    let modal = app.store.open_modal();
    if modal == OpenModal::None {
        return;
    }

    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("modal_backdrop"),
    ))
    .rect_filled(ctx.screen_rect(), 0.0, egui::Color32::from_black_alpha(140));

    if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
        app.store.close_modal();
        return;
    }

    match modal {
        OpenModal::Generate => show_generate(app, ctx),
        OpenModal::Load => show_load(app, ctx),
        OpenModal::Save => show_save(app, ctx),
        OpenModal::None => {}
    }
}

fn modal_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
}

fn show_generate(app: &mut SudokuApp, ctx: &egui::Context) {
    modal_window("new puzzle").show(ctx, |ui| {
        ui.label("empty cells");
        ui.add(egui::Slider::new(&mut app.gen_difficulty, 20..=57));
        ui.horizontal(|ui| {
            ui.label("seed (0 = random)");
            ui.add(egui::DragValue::new(&mut app.gen_seed));
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("generate").clicked() {
                // The dialog stays up until the engine reports the puzzle.
                let counts = app.store.include_counts();
                let fix_result = app.store.app_state() != AppState::Editing;
                app.dispatch(BackendCommand::Generate {
                    difficulty: app.gen_difficulty,
                    seed: app.gen_seed,
                    counts,
                    fix_result,
                });
            }
            if ui.button("cancel").clicked() {
                app.store.close_modal();
            }
        });
    });
}

fn show_load(app: &mut SudokuApp, ctx: &egui::Context) {
    modal_window("load game").show(ctx, |ui| {
        let mut picked: Option<String> = None;
        if app.savegames.is_empty() {
            ui.label("no saved games");
        } else {
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for entry in &app.savegames {
                    let label = format!(
                        "{}  ({})",
                        entry.name,
                        entry.modified.format("%Y-%m-%d %H:%M")
                    );
                    if ui.button(label).clicked() {
                        picked = Some(entry.name.clone());
                    }
                }
            });
        }
        ui.add_space(8.0);
        if ui.button("cancel").clicked() {
            app.store.close_modal();
        }
        if let Some(name) = picked {
            let counts = app.store.include_counts();
            app.dispatch(BackendCommand::LoadGame { name, counts });
            app.store.close_modal();
        }
    });
}

fn show_save(app: &mut SudokuApp, ctx: &egui::Context) {
    modal_window("save game").show(ctx, |ui| {
        ui.label("name");
        ui.text_edit_singleline(&mut app.save_name);
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let name = app.save_name.trim().to_owned();
            if ui
                .add_enabled(!name.is_empty(), egui::Button::new("save"))
                .clicked()
            {
                app.dispatch(BackendCommand::SaveGame { name });
                app.store.close_modal();
            }
            if ui.button("cancel").clicked() {
                app.store.close_modal();
            }
        });
    });
}
