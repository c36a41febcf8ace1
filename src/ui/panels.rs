use eframe::egui::{self, Color32, Grid, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – details of the imported image
// ---------------------------------------------------------------------------

/// Render the left details panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Image");
    ui.separator();

    if let Some(workflow) = &state.import {
        ui.label(format!("Import of {} is {}", workflow.file().display(), workflow.phase()));
        ui.separator();
    }

    let image = match &state.image {
        Some(img) => img,
        None => {
            ui.label("No image loaded.");
            return;
        }
    };

    let shape: Vec<String> = image
        .labels
        .chars()
        .zip(image.shape())
        .map(|(axis, len)| format!("{axis}={len}"))
        .collect();

    Grid::new("image_details")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Dataset");
            ui.label(&image.dataset);
            ui.end_row();

            ui.strong("Axis order");
            ui.label(image.source_axes.as_str());
            ui.end_row();

            ui.strong("Shape");
            ui.label(shape.join(", "));
            ui.end_row();

            ui.strong("LUT");
            ui.label(image.lut.as_ref().map_or("Grays", |lut| lut.name));
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let busy = state.loading || state.import.is_some();
            if ui.add_enabled(!busy, egui::Button::new("Import HDF5…")).clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Importing…");
        } else if let Some(img) = &state.image {
            ui.label(format!("{} loaded", img.dataset));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("HDF5 file exported from ilastik")
        .add_filter("HDF5 files", &["h5", "hdf5", "hdf"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Importing {}", path.display());
        state.requested_file = Some(path);
    }
}
