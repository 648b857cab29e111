//! The 9x9 grid. Cells are painted directly; clicking a cell focuses it
//! and cycles its value through the engine.

use eframe::egui;
use shared::domain::{CellState, GRID_SIZE};

use crate::backend_bridge::commands::BackendCommand;
use crate::board::CellView;
use crate::ui::app::SudokuApp;

const CELL_SIZE: f32 = 54.0;
const BOX_GAP: f32 = 6.0;

pub fn show(app: &mut SudokuApp, ui: &mut egui::Ui) {
    let mut clicked: Option<usize> = None;
    let render_errors = app.store.render_errors();
    let focused = app.focus.focused();

    ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
    ui.vertical(|ui| {
        for row in 0..GRID_SIZE {
            ui.horizontal(|ui| {
                for col in 0..GRID_SIZE {
                    let index = row * GRID_SIZE + col;
                    let (rect, response) = ui.allocate_exact_size(
                        egui::vec2(CELL_SIZE, CELL_SIZE),
                        egui::Sense::click(),
                    );
                    paint_cell(
                        ui,
                        rect,
                        app.board.cell(row, col),
                        focused == Some(index),
                        render_errors,
                    );
                    if response.clicked() {
                        clicked = Some(index);
                    }
                    if col % 3 == 2 && col != GRID_SIZE - 1 {
                        ui.add_space(BOX_GAP);
                    }
                }
            });
            if row % 3 == 2 && row != GRID_SIZE - 1 {
                ui.add_space(BOX_GAP);
            }
        }
    });

    if let Some(index) = clicked {
        app.focus.set(index);
        let counts = app.store.include_counts();
        app.dispatch(BackendCommand::IncrementValue {
            row: (index / GRID_SIZE) as u8,
            col: (index % GRID_SIZE) as u8,
            counts,
        });
    }
}

fn paint_cell(ui: &egui::Ui, rect: egui::Rect, cell: &CellView, focused: bool, render_errors: bool) {
    let visuals = ui.visuals();
    let fill = match cell.state {
        CellState::Fix => visuals.faint_bg_color,
        CellState::Error if render_errors => egui::Color32::from_rgb(90, 30, 30),
        CellState::Hint => egui::Color32::from_rgb(30, 70, 40),
        _ => visuals.extreme_bg_color,
    };
    let painter = ui.painter();
    painter.rect_filled(rect, 3.0, fill);
    if focused {
        painter.rect_stroke(
            rect,
            3.0,
            egui::Stroke::new(2.0, visuals.selection.stroke.color),
            egui::StrokeKind::Inside,
        );
    } else {
        painter.rect_stroke(
            rect,
            3.0,
            egui::Stroke::new(1.0, visuals.weak_text_color()),
            egui::StrokeKind::Inside,
        );
    }

    if cell.value != 0 {
        let color = if cell.state == CellState::Fix {
            visuals.strong_text_color()
        } else {
            visuals.text_color()
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            cell.value.to_string(),
            egui::FontId::proportional(26.0),
            color,
        );
    } else if cell.shows_notes() {
        // 3x3 mini grid of candidate digits.
        let third = rect.width() / 3.0;
        for digit in 1..=GRID_SIZE {
            if !cell.notes[digit - 1] {
                continue;
            }
            let slot = digit - 1;
            let pos = rect.left_top()
                + egui::vec2(
                    ((slot % 3) as f32 + 0.5) * third,
                    ((slot / 3) as f32 + 0.5) * third,
                );
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                digit.to_string(),
                egui::FontId::proportional(11.0),
                visuals.weak_text_color(),
            );
        }
    }
}
