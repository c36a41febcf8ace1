use std::path::Path;
use std::sync::Arc;

use super::gate::{CompletionGate, GateWait};
use super::machine::{Completion, Workflow, WorkflowResult};
use crate::config::ImportConfig;
use crate::container::ContainerBackend;
use crate::data::ArrayReader;

/// Shows a started workflow to the user and feeds it their actions.
///
/// `present` must not block on the workflow: it hands it to whichever thread
/// delivers user input and returns.
pub trait Presenter<R: ArrayReader> {
    fn present(&self, workflow: Workflow<R>);
}

impl<R, F> Presenter<R> for F
where
    R: ArrayReader,
    F: Fn(Workflow<R>),
{
    fn present(&self, workflow: Workflow<R>) {
        self(workflow)
    }
}

/// Run one import and block until it resolves.
///
/// Returns the read value, `Cancelled`, `Interrupted` if the wait was cut
/// short, or the fatal error that ended the workflow.
pub fn run_import<R, P>(
    file: &Path,
    backend: &dyn ContainerBackend,
    reader: R,
    presenter: &P,
    config: &ImportConfig,
) -> WorkflowResult<R::Output>
where
    R: ArrayReader,
    P: Presenter<R> + ?Sized,
{
    let gate = Arc::new(CompletionGate::new());
    run_import_with_gate(file, backend, reader, presenter, config, gate)
}

/// [`run_import`] with a caller-provided gate, so the caller can observe it.
pub fn run_import_with_gate<R, P>(
    file: &Path,
    backend: &dyn ContainerBackend,
    reader: R,
    presenter: &P,
    config: &ImportConfig,
    gate: Arc<CompletionGate<WorkflowResult<R::Output>>>,
) -> WorkflowResult<R::Output>
where
    R: ArrayReader,
    P: Presenter<R> + ?Sized,
{
    match Workflow::open(file, backend, reader, config, Arc::clone(&gate)) {
        Ok(workflow) => presenter.present(workflow),
        Err(err) => {
            log::error!("{err}");
            gate.signal(Err(err));
        }
    }

    let result = match gate.wait() {
        GateWait::Released(result) => result,
        GateWait::Interrupted | GateWait::AlreadyDelivered => {
            log::warn!("Execution of HDF5 loading got interrupted");
            Ok(Completion::Interrupted)
        }
    };
    log::info!("Done loading HDF5 file!");
    result
}
