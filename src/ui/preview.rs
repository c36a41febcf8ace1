use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Image preview (central panel)
// ---------------------------------------------------------------------------

/// Render the first plane of the imported image and its histogram.
pub fn image_view(ui: &mut Ui, state: &AppState) {
    let Some(texture) = &state.preview else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Import an HDF5 file to view it  (File → Import HDF5…)");
        });
        return;
    };

    let histogram_height = 160.0;
    let available = ui.available_size() - egui::vec2(0.0, histogram_height + 8.0);

    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(texture)
                .fit_to_exact_size(available.max(egui::vec2(64.0, 64.0)))
                .maintain_aspect_ratio(true),
        );
    });

    histogram(ui, state, histogram_height);
}

fn histogram(ui: &mut Ui, state: &AppState, height: f32) {
    let width = match state.histogram.as_slice() {
        [(a, _), (b, _), ..] => (b - a).abs().max(f64::EPSILON),
        _ => 1.0,
    };
    let bars: Vec<Bar> = state
        .histogram
        .iter()
        .map(|&(centre, count)| Bar::new(centre, count).width(width))
        .collect();

    let chart = BarChart::new(bars)
        .name("intensity")
        .color(Color32::LIGHT_BLUE);

    Plot::new("intensity_histogram")
        .height(height)
        .x_axis_label("Intensity")
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
