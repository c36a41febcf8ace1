use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_h5import::{Action, Phase};

use crate::state::AppState;

/// Show whichever import dialog the pending workflow needs.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let Some(phase) = state.import.as_ref().map(|w| w.phase()) else {
        return;
    };
    match phase {
        Phase::SelectingDataset => dataset_selection(ctx, state),
        Phase::ConfiguringAxes => axis_order(ctx, state),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Dataset selection
// ---------------------------------------------------------------------------

fn dataset_selection(ctx: &egui::Context, state: &mut AppState) {
    let mut action = None;

    egui::Window::new("Select dataset")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            let Some(workflow) = &state.import else {
                return;
            };
            let entries = workflow.catalog().entries();

            TableBuilder::new(ui)
                .striped(true)
                .sense(egui::Sense::click())
                .column(Column::auto())
                .column(Column::remainder().at_least(160.0))
                .column(Column::auto())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("5D");
                    });
                    header.col(|ui| {
                        ui.strong("Dataset");
                    });
                    header.col(|ui| {
                        ui.strong("Shape");
                    });
                })
                .body(|body| {
                    body.rows(18.0, entries.len(), |mut row| {
                        let entry = &entries[row.index()];
                        row.set_selected(row.index() == state.selected_index);
                        row.col(|ui| {
                            ui.label(if entry.extended_capable() { "+" } else { "-" });
                        });
                        row.col(|ui| {
                            ui.label(&entry.path);
                        });
                        row.col(|ui| {
                            ui.label(entry.shape_text());
                        });
                        if row.response().clicked() {
                            state.selected_index = row.index();
                        }
                    });
                });

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Select").clicked() {
                    action = Some(Action::Select(state.selected_index));
                }
                if ui.button("Cancel").clicked() {
                    action = Some(Action::CancelSelection);
                }
            });
        });

    if let Some(action) = action {
        state.dispatch(action);
    }
}

// ---------------------------------------------------------------------------
// Axis order
// ---------------------------------------------------------------------------

fn axis_order(ctx: &egui::Context, state: &mut AppState) {
    let mut action = None;

    egui::Window::new("Axis order")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            let Some(workflow) = &state.import else {
                return;
            };
            if let Some(entry) = workflow.current_entry() {
                ui.label(format!("Found dataset with dimensions: {}", entry.shape_text()));
            }
            ui.label("Please enter the meaning of those axes:");

            ui.horizontal(|ui: &mut Ui| {
                ui.text_edit_singleline(&mut state.axis_input);
                egui::ComboBox::from_id_salt("axis_suggestions")
                    .selected_text("Suggestions")
                    .show_ui(ui, |ui: &mut Ui| {
                        for suggestion in workflow.suggestions() {
                            let chosen = state.axis_input == *suggestion;
                            if ui.selectable_label(chosen, *suggestion).clicked() {
                                state.axis_input = suggestion.to_string();
                            }
                        }
                    });
            });

            if let Some(err) = workflow.last_error() {
                ui.label(RichText::new(err.to_string()).color(Color32::RED));
            }

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Load Raw").clicked() {
                    action = Some(Action::LoadPlain(state.axis_input.clone()));
                }
                if ui.button("Load and apply LUT").clicked() {
                    action = Some(Action::LoadWithColorTransform(state.axis_input.clone()));
                }
                if ui.button("Cancel").clicked() {
                    action = Some(Action::CancelAxes);
                }
            });
        });

    if let Some(action) = action {
        state.dispatch(action);
    }
}
