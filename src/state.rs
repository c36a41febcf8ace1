use std::path::PathBuf;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use rusty_h5import::container::Hdf5Reader;
use rusty_h5import::image::{histogram, intensity_range, scale_to_u8};
use rusty_h5import::lut::Lut;
use rusty_h5import::workflow::WorkflowResult;
use rusty_h5import::{Action, Completion, ImportConfig, ImportError, ImportedImage, Phase, Workflow};

/// Buckets in the intensity histogram.
const HISTOGRAM_BINS: usize = 64;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ImportConfig,

    /// File chosen in the dialog, waiting to be handed to a command thread.
    pub requested_file: Option<PathBuf>,

    /// Workflow waiting for user input (None when no dialog is open).
    pub import: Option<Workflow<Hdf5Reader>>,

    /// Row highlighted in the dataset list.
    pub selected_index: usize,

    /// Text of the axis-order field.
    pub axis_input: String,

    /// Last successfully imported image.
    pub image: Option<ImportedImage>,

    /// Texture of the image's first plane.
    pub preview: Option<TextureHandle>,

    /// Intensity histogram of the first plane: (bin centre, count).
    pub histogram: Vec<(f64, f64)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether an import is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            requested_file: None,
            import: None,
            selected_index: 0,
            axis_input: String::new(),
            image: None,
            preview: None,
            histogram: Vec::new(),
            status_message: None,
            loading: false,
        }
    }

    /// Take over a workflow delivered by the command thread.
    pub fn begin_interaction(&mut self, workflow: Workflow<Hdf5Reader>) {
        self.selected_index = 0;
        self.axis_input = first_suggestion(&workflow);
        self.import = Some(workflow);
    }

    /// Forward a user action to the pending workflow.
    pub fn dispatch(&mut self, action: Action) {
        let Some(workflow) = self.import.as_mut() else {
            return;
        };
        match workflow.handle(action) {
            Ok(phase) if phase.is_terminal() => self.import = None,
            Ok(Phase::ConfiguringAxes) => {
                self.axis_input = first_suggestion(workflow);
            }
            Ok(_) => {}
            // Shown in the dialog through `Workflow::last_error`.
            Err(err) => log::warn!("{err}"),
        }
    }

    /// Handle the result the command thread got back from the gate.
    pub fn finish_import(&mut self, result: WorkflowResult<ImportedImage>, ctx: &egui::Context) {
        self.loading = false;
        match result {
            Ok(Completion::Loaded(loaded)) => {
                log::info!(
                    "Loaded {} as {} ({})",
                    loaded.dataset,
                    loaded.axes,
                    loaded.intent
                );
                self.set_image(loaded.value, ctx);
                self.status_message = None;
            }
            Ok(Completion::Cancelled) => {
                self.status_message = Some("Import cancelled".to_string());
            }
            Ok(Completion::Interrupted) => {
                self.status_message = Some("Import interrupted".to_string());
            }
            Err(err @ ImportError::OutOfMemory { .. }) => {
                log::error!("{err}");
                self.status_message = Some(format!("Out of memory: {err}"));
            }
            Err(err) => {
                log::error!("Import failed: {err}");
                self.status_message = Some(format!("Error: {err}"));
            }
        }
    }

    /// Ingest a newly imported image, rebuild preview and histogram.
    pub fn set_image(&mut self, image: ImportedImage, ctx: &egui::Context) {
        self.preview = None;
        self.histogram.clear();

        if let Some(plane) = image.first_plane() {
            let range = intensity_range(plane.iter().copied()).unwrap_or((0.0, 0.0));
            let lut = image.lut.clone().unwrap_or_else(Lut::grays);

            let (width, height) = (plane.shape()[0], plane.shape()[1]);
            let mut rgba = Vec::with_capacity(width * height * 4);
            for y in 0..height {
                for x in 0..width {
                    let color = lut.color_for(scale_to_u8(plane[[x, y]], range));
                    rgba.extend_from_slice(&color.to_array());
                }
            }
            let color_image = ColorImage::from_rgba_unmultiplied([width, height], &rgba);
            self.preview = Some(ctx.load_texture("preview", color_image, TextureOptions::NEAREST));

            let (lo, hi) = range;
            let bin_width = f64::from(hi - lo) / HISTOGRAM_BINS as f64;
            self.histogram = histogram(plane.iter().copied(), range, HISTOGRAM_BINS)
                .into_iter()
                .enumerate()
                .map(|(i, count)| (f64::from(lo) + (i as f64 + 0.5) * bin_width, f64::from(count)))
                .collect();
        } else {
            log::warn!("{} has no x/y plane to preview", image.dataset);
        }

        self.image = Some(image);
    }
}

fn first_suggestion(workflow: &Workflow<Hdf5Reader>) -> String {
    workflow
        .suggestions()
        .first()
        .copied()
        .unwrap_or_default()
        .to_string()
}
