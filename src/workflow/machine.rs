use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::gate::CompletionGate;
use crate::config::ImportConfig;
use crate::container::{Container, ContainerBackend};
use crate::data::{
    discover, resolve, suggestions, ArrayReader, AxisOrder, DatasetCatalog, DatasetEntry,
    ReadIntent, ReadRequest,
};
use crate::error::ImportError;

// ---------------------------------------------------------------------------
// States and actions
// ---------------------------------------------------------------------------

/// Where an import workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    SingleDataset,
    SelectingDataset,
    ConfiguringAxes,
    Reading,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Reading | Phase::Cancelled)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Opening => "opening",
            Phase::SingleDataset => "single dataset",
            Phase::SelectingDataset => "selecting dataset",
            Phase::ConfiguringAxes => "configuring axes",
            Phase::Reading => "reading",
            Phase::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A user action delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Pick the catalog entry at this index.
    Select(usize),
    CancelSelection,
    /// Read with this axis order.
    LoadPlain(String),
    /// Read with this axis order and attach the colour transform.
    LoadWithColorTransform(String),
    CancelAxes,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Select(_) => "SELECT",
            Action::CancelSelection => "CANCEL_SELECTION",
            Action::LoadPlain(_) => "LOAD_PLAIN",
            Action::LoadWithColorTransform(_) => "LOAD_WITH_COLOR_TRANSFORM",
            Action::CancelAxes => "CANCEL_AXES",
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A successful read.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub dataset: String,
    pub axes: AxisOrder,
    pub intent: ReadIntent,
}

/// How a workflow ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    Loaded(Loaded<T>),
    Cancelled,
    /// The caller stopped waiting before the workflow finished.
    Interrupted,
}

pub type WorkflowResult<T> = Result<Completion<T>, ImportError>;

// ---------------------------------------------------------------------------
// Workflow – one import, from open to read or cancel
// ---------------------------------------------------------------------------

/// The state of a single import.
///
/// Created on the caller's thread by [`Workflow::open`], then driven by
/// [`Workflow::handle`] from whichever thread delivers user actions. Reaching
/// a terminal phase releases the gate exactly once; dropping a workflow that
/// has not finished interrupts it instead.
pub struct Workflow<R: ArrayReader> {
    file: PathBuf,
    container: Option<Box<dyn Container + Send>>,
    catalog: DatasetCatalog,
    phase: Phase,
    /// The dataset whose axes are being configured, with fresh metadata.
    current: Option<DatasetEntry>,
    axis_order: Option<AxisOrder>,
    last_error: Option<ImportError>,
    extra_axis_token: Option<char>,
    reader: R,
    gate: Arc<CompletionGate<WorkflowResult<R::Output>>>,
}

impl<R: ArrayReader> Workflow<R> {
    /// Open `file`, discover its datasets and move to the first interactive phase.
    ///
    /// On error nothing is signalled; the caller owns the gate at that point.
    pub fn open(
        file: &Path,
        backend: &dyn ContainerBackend,
        reader: R,
        config: &ImportConfig,
        gate: Arc<CompletionGate<WorkflowResult<R::Output>>>,
    ) -> Result<Self, ImportError> {
        log::info!("opening {}", file.display());
        let container = backend
            .open_for_reading(file)
            .map_err(|reason| ImportError::Open {
                path: file.to_path_buf(),
                reason,
            })?;

        let catalog = discover(container.as_ref(), &config.root_path).map_err(|reason| {
            ImportError::Discovery {
                path: file.to_path_buf(),
                reason,
            }
        })?;
        if catalog.is_empty() {
            return Err(ImportError::EmptyCatalog {
                path: file.to_path_buf(),
            });
        }
        log::info!("found {} dataset(s) in {}", catalog.size(), file.display());

        let mut workflow = Self {
            file: file.to_path_buf(),
            container: Some(container),
            catalog,
            phase: Phase::Opening,
            current: None,
            axis_order: None,
            last_error: None,
            extra_axis_token: config.extra_axis_token,
            reader,
            gate,
        };

        if workflow.catalog.size() == 1 {
            workflow.transition(Phase::SingleDataset);
            workflow.configure(0);
        } else {
            workflow.transition(Phase::SelectingDataset);
        }
        Ok(workflow)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    /// The dataset chosen for axis configuration, if any.
    pub fn current_entry(&self) -> Option<&DatasetEntry> {
        self.current.as_ref()
    }

    /// Axis orders to pre-fill the prompt with.
    pub fn suggestions(&self) -> &'static [&'static str] {
        suggestions(self.current.as_ref().map_or(0, DatasetEntry::rank))
    }

    /// The axis order that was accepted for reading.
    pub fn axis_order(&self) -> Option<&AxisOrder> {
        self.axis_order.as_ref()
    }

    /// The most recent recoverable error, cleared by the next accepted action.
    pub fn last_error(&self) -> Option<&ImportError> {
        self.last_error.as_ref()
    }

    /// Apply a user action.
    ///
    /// Recoverable problems (rank mismatch, bad index, an action that does not
    /// fit the phase) come back as `Err` and leave the phase unchanged. Read
    /// failures are fatal: they end the workflow and travel through the gate.
    pub fn handle(&mut self, action: Action) -> Result<Phase, ImportError> {
        log::debug!("{} while {}", action.name(), self.phase);
        let result = match (self.phase, action) {
            (Phase::SelectingDataset, Action::Select(index)) => self.select(index),
            (Phase::SelectingDataset, Action::CancelSelection)
            | (Phase::ConfiguringAxes, Action::CancelAxes) => Ok(self.cancel()),
            (Phase::ConfiguringAxes, Action::LoadPlain(spec)) => {
                self.load(&spec, ReadIntent::Plain)
            }
            (Phase::ConfiguringAxes, Action::LoadWithColorTransform(spec)) => {
                self.load(&spec, ReadIntent::WithColorTransform)
            }
            (phase, action) => Err(ImportError::InvalidAction {
                action: action.name(),
                phase,
            }),
        };
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => self.last_error = Some(err.clone()),
        }
        result
    }

    fn select(&mut self, index: usize) -> Result<Phase, ImportError> {
        if index >= self.catalog.size() {
            return Err(ImportError::InvalidSelection {
                index,
                len: self.catalog.size(),
            });
        }
        self.configure(index);
        Ok(self.phase)
    }

    /// Enter axis configuration for catalog entry `index`.
    fn configure(&mut self, index: usize) {
        let Some(entry) = self.catalog.entry_at(index).cloned() else {
            return;
        };
        log::info!("selected dataset {}", entry.path);

        let entry = match self.container.as_ref().map(|c| c.dataset_info(&entry.path)) {
            Some(Ok(info)) => DatasetEntry::new(entry.path, info.dimensions),
            Some(Err(err)) => {
                log::warn!("could not refresh {}: {err}, using discovered shape", entry.path);
                entry
            }
            None => entry,
        };
        log::info!("Found dataset with dimensions: {}", entry.shape_text());

        self.current = Some(entry);
        self.transition(Phase::ConfiguringAxes);
    }

    fn load(&mut self, spec: &str, intent: ReadIntent) -> Result<Phase, ImportError> {
        let Some(entry) = self.current.clone() else {
            return Err(ImportError::InvalidAction {
                action: "LOAD",
                phase: self.phase,
            });
        };
        let axes = resolve(spec, &entry, self.extra_axis_token)?;

        self.axis_order = Some(axes.clone());
        self.transition(Phase::Reading);

        let request = ReadRequest {
            file: self.file.clone(),
            dataset: entry.path.clone(),
            axes: axes.clone(),
            intent,
        };
        let start = Instant::now();
        let read = self.reader.read(&request);
        log::info!(
            "Loading HDF5 dataset took: {} ms",
            start.elapsed().as_millis()
        );

        let result = match read {
            Ok(value) => Ok(Completion::Loaded(Loaded {
                value,
                dataset: entry.path,
                axes,
                intent,
            })),
            Err(err) => {
                let err = ImportError::from_read(&entry.path, err);
                log::error!("{err}");
                Err(err)
            }
        };
        self.finish(result);
        Ok(Phase::Reading)
    }

    fn cancel(&mut self) -> Phase {
        self.transition(Phase::Cancelled);
        self.finish(Ok(Completion::Cancelled));
        Phase::Cancelled
    }

    fn finish(&mut self, result: WorkflowResult<R::Output>) {
        self.container = None;
        self.gate.signal(result);
    }

    fn transition(&mut self, to: Phase) {
        log::info!("{}: {} -> {}", self.file.display(), self.phase, to);
        self.phase = to;
    }
}

impl<R: ArrayReader> Drop for Workflow<R> {
    fn drop(&mut self) {
        // A reader that panics leaves the phase at `Reading` with no result.
        if self.gate.interrupt() {
            log::warn!(
                "import of {} abandoned while {}",
                self.file.display(),
                self.phase
            );
        }
    }
}
