use std::path::PathBuf;

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

use rusty_h5import::container::{Hdf5Backend, Hdf5Reader};
use rusty_h5import::workflow::{Presenter, WorkflowResult};
use rusty_h5import::{run_import, ImportConfig, ImportedImage, Workflow};

use crate::state::AppState;
use crate::ui::{dialogs, panels, preview};

// ---------------------------------------------------------------------------
// Presentation: hand started workflows to the UI thread
// ---------------------------------------------------------------------------

struct ChannelPresenter {
    workflows: Sender<Workflow<Hdf5Reader>>,
    ctx: egui::Context,
}

impl Presenter<Hdf5Reader> for ChannelPresenter {
    fn present(&self, workflow: Workflow<Hdf5Reader>) {
        // A failed send drops the workflow, which interrupts the waiting caller.
        if self.workflows.send(workflow).is_err() {
            log::error!("UI is gone, abandoning import");
        }
        self.ctx.request_repaint();
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct H5ImportApp {
    pub state: AppState,
    workflow_tx: Sender<Workflow<Hdf5Reader>>,
    workflow_rx: Receiver<Workflow<Hdf5Reader>>,
    outcome_tx: Sender<WorkflowResult<ImportedImage>>,
    outcome_rx: Receiver<WorkflowResult<ImportedImage>>,
}

impl H5ImportApp {
    pub fn new(config: ImportConfig) -> Self {
        let (workflow_tx, workflow_rx) = unbounded();
        let (outcome_tx, outcome_rx) = unbounded();
        Self {
            state: AppState::new(config),
            workflow_tx,
            workflow_rx,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Run the import of `path` on its own command thread.
    fn start_import(&mut self, path: PathBuf, ctx: &egui::Context) {
        let presenter = ChannelPresenter {
            workflows: self.workflow_tx.clone(),
            ctx: ctx.clone(),
        };
        let outcomes = self.outcome_tx.clone();
        let config = self.state.config.clone();
        let repaint = ctx.clone();

        let spawned = std::thread::Builder::new()
            .name("hdf5-import".to_string())
            .spawn(move || {
                let reader = Hdf5Reader::new(&config);
                let result = run_import(&path, &Hdf5Backend, reader, &presenter, &config);
                if outcomes.send(result).is_err() {
                    log::debug!("UI closed before import of {} finished", path.display());
                }
                repaint.request_repaint();
            });

        match spawned {
            Ok(_) => {
                self.state.loading = true;
                self.state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to start import thread: {e}");
                self.state.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    fn poll_import(&mut self, ctx: &egui::Context) {
        while let Ok(workflow) = self.workflow_rx.try_recv() {
            self.state.begin_interaction(workflow);
        }
        while let Ok(result) = self.outcome_rx.try_recv() {
            self.state.finish_import(result, ctx);
        }
    }
}

impl eframe::App for H5ImportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_import(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: image details ----
        egui::SidePanel::left("details_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            preview::image_view(ui, &self.state);
        });

        // ---- Import dialogs ----
        dialogs::show(ctx, &mut self.state);

        if let Some(path) = self.state.requested_file.take() {
            self.start_import(path, ctx);
        }
    }
}
