use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::unbounded;

use rusty_h5import::container::{
    Container, ContainerBackend, DatasetInfo, MemoryBackend, MemoryContainer, Node, NodeKind,
};
use rusty_h5import::data::{ArrayReader, ReadRequest};
use rusty_h5import::workflow::{run_import_with_gate, CompletionGate, WorkflowResult};
use rusty_h5import::{
    Action, Completion, ContainerError, ImportConfig, ImportError, Phase, ReadError, Workflow,
};

/// Records every request; answers with `dataset:axes` or a fixed error.
#[derive(Clone, Default)]
struct RecordingReader {
    requests: Arc<Mutex<Vec<ReadRequest>>>,
    fail_with: Option<ReadError>,
}

impl RecordingReader {
    fn failing(err: ReadError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<ReadRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ArrayReader for RecordingReader {
    type Output = String;

    fn read(&self, request: &ReadRequest) -> Result<String, ReadError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(format!("{}:{}", request.dataset, request.axes)),
        }
    }
}

/// A reader that blows up mid-read.
struct PanickingReader;

impl ArrayReader for PanickingReader {
    type Output = String;

    fn read(&self, request: &ReadRequest) -> Result<String, ReadError> {
        panic!("decoder crashed on {}", request.dataset);
    }
}

/// Opens fine, then fails to list any group.
struct UnlistableContainer;

impl Container for UnlistableContainer {
    fn link_info(&self, path: &str) -> Result<Node, ContainerError> {
        Ok(Node::new(path, NodeKind::Group))
    }

    fn group_members(&self, path: &str) -> Result<Vec<Node>, ContainerError> {
        Err(ContainerError::Backend(format!("cannot iterate {path}")))
    }

    fn dataset_info(&self, path: &str) -> Result<DatasetInfo, ContainerError> {
        Err(ContainerError::NotADataset(path.to_string()))
    }
}

struct UnlistableBackend;

impl ContainerBackend for UnlistableBackend {
    fn open_for_reading(&self, _path: &Path) -> Result<Box<dyn Container + Send>, ContainerError> {
        Ok(Box::new(UnlistableContainer))
    }
}

struct Run {
    result: WorkflowResult<String>,
    gate: Arc<CompletionGate<WorkflowResult<String>>>,
    presented: bool,
}

/// Run an import from this thread while `script` plays the user on a UI thread.
fn import_with<F>(backend: &dyn ContainerBackend, reader: RecordingReader, script: F) -> Run
where
    F: FnOnce(&mut Workflow<RecordingReader>) + Send + 'static,
{
    let (tx, rx) = unbounded::<Workflow<RecordingReader>>();
    let ui = thread::spawn(move || {
        if let Ok(mut workflow) = rx.recv() {
            script(&mut workflow);
        }
    });

    let presented = Arc::new(AtomicBool::new(false));
    let seen = Arc::clone(&presented);
    let presenter = move |workflow: Workflow<RecordingReader>| {
        seen.store(true, Ordering::SeqCst);
        tx.send(workflow).unwrap();
    };

    let gate = Arc::new(CompletionGate::new());
    let result = run_import_with_gate(
        Path::new("file.h5"),
        backend,
        reader,
        &presenter,
        &ImportConfig::default(),
        Arc::clone(&gate),
    );
    drop(presenter);
    ui.join().expect("UI script panicked");

    Run {
        result,
        gate,
        presented: presented.load(Ordering::SeqCst),
    }
}

fn single() -> MemoryBackend {
    MemoryBackend::new().with_file(
        "file.h5",
        MemoryContainer::new().with_dataset("/exported_data", &[100, 200, 3]),
    )
}

fn pair() -> MemoryBackend {
    MemoryBackend::new().with_file(
        "file.h5",
        MemoryContainer::new()
            .with_dataset("/exported_data", &[100, 200, 3])
            .with_dataset("/volumes/raw", &[4, 10, 64, 64, 1])
            .with_soft_link("/volumes/parent", "/"),
    )
}

#[test]
fn single_dataset_skips_selection() {
    let reader = RecordingReader::default();
    let run = import_with(&single(), reader.clone(), |wf| {
        assert_eq!(wf.phase(), Phase::ConfiguringAxes);
        let suggestion = wf.suggestions()[0];
        assert_eq!(suggestion, "xyc");
        wf.handle(Action::LoadPlain(suggestion.to_string())).unwrap();
    });

    match run.result {
        Ok(Completion::Loaded(loaded)) => {
            assert_eq!(loaded.value, "/exported_data:xyc");
            assert_eq!(loaded.axes.as_str(), "xyc");
        }
        other => panic!("unexpected {other:?}"),
    }
    let calls = reader.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].dataset, "/exported_data");
    assert_eq!(calls[0].file, Path::new("file.h5"));
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn selection_drives_axis_configuration() {
    let reader = RecordingReader::default();
    let run = import_with(&pair(), reader.clone(), |wf| {
        assert_eq!(wf.phase(), Phase::SelectingDataset);
        assert_eq!(wf.catalog().size(), 2);
        assert!(wf.catalog().entry_at(1).unwrap().extended_capable());

        wf.handle(Action::Select(1)).unwrap();
        assert_eq!(wf.current_entry().unwrap().rank(), 5);
        assert_eq!(wf.suggestions(), ["tzyxc", "txyzc"]);

        // Rank 3 order is wrong for this dataset.
        assert!(matches!(
            wf.handle(Action::LoadPlain("xyc".into())),
            Err(ImportError::AxisRankMismatch { rank: 5, found: 3, .. })
        ));
        wf.handle(Action::LoadWithColorTransform("tzyxc".into())).unwrap();
    });

    assert!(matches!(run.result, Ok(Completion::Loaded(ref l)) if l.value == "/volumes/raw:tzyxc"));
    assert_eq!(reader.calls().len(), 1);
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn cancel_at_selection_reads_nothing() {
    let reader = RecordingReader::default();
    let run = import_with(&pair(), reader.clone(), |wf| {
        wf.handle(Action::CancelSelection).unwrap();
    });
    assert_eq!(run.result, Ok(Completion::Cancelled));
    assert!(reader.calls().is_empty());
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn cancel_at_axes_reads_nothing() {
    let reader = RecordingReader::default();
    let run = import_with(&single(), reader.clone(), |wf| {
        wf.handle(Action::CancelAxes).unwrap();
    });
    assert_eq!(run.result, Ok(Completion::Cancelled));
    assert!(reader.calls().is_empty());
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn open_failure_unblocks_without_presenting() {
    let run = import_with(&MemoryBackend::new(), RecordingReader::default(), |_| {
        panic!("nothing should be presented");
    });
    assert!(matches!(
        run.result,
        Err(ImportError::Open {
            reason: ContainerError::NotFound(_),
            ..
        })
    ));
    assert!(!run.presented);
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn empty_container_unblocks_with_error() {
    let backend = MemoryBackend::new().with_file(
        "file.h5",
        MemoryContainer::new()
            .with_group("/empty")
            .with_soft_link("/alias", "/empty"),
    );
    let run = import_with(&backend, RecordingReader::default(), |_| {});
    assert!(matches!(run.result, Err(ImportError::EmptyCatalog { .. })));
    assert!(!run.presented);
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn read_failure_is_propagated() {
    let reader = RecordingReader::failing(ReadError::Format("truncated chunk".into()));
    let run = import_with(&single(), reader.clone(), |wf| {
        assert_eq!(wf.handle(Action::LoadPlain("xyc".into())), Ok(Phase::Reading));
    });
    assert_eq!(
        run.result,
        Err(ImportError::Read {
            dataset: "/exported_data".into(),
            reason: ReadError::Format("truncated chunk".into()),
        })
    );
    assert_eq!(reader.calls().len(), 1);
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn out_of_memory_is_distinct() {
    let reader = RecordingReader::failing(ReadError::OutOfMemory {
        requested_bytes: 240_000,
    });
    let run = import_with(&single(), reader, |wf| {
        wf.handle(Action::LoadPlain("xyc".into())).unwrap();
    });
    assert!(matches!(
        run.result,
        Err(ImportError::OutOfMemory {
            requested_bytes: 240_000,
            ..
        })
    ));
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn abandoned_workflow_interrupts_the_caller() {
    let reader = RecordingReader::default();
    let run = import_with(&pair(), reader.clone(), |wf| {
        wf.handle(Action::Select(0)).unwrap();
        // The UI goes away without answering.
    });
    assert_eq!(run.result, Ok(Completion::Interrupted));
    assert!(reader.calls().is_empty());
    assert_eq!(run.gate.signal_count(), 0);
}

#[test]
fn discovery_failure_unblocks_with_error() {
    let run = import_with(&UnlistableBackend, RecordingReader::default(), |_| {
        panic!("nothing should be presented");
    });
    assert_eq!(
        run.result,
        Err(ImportError::Discovery {
            path: "file.h5".into(),
            reason: ContainerError::Backend("cannot iterate /".into()),
        })
    );
    assert!(!run.presented);
    assert_eq!(run.gate.signal_count(), 1);
}

#[test]
fn panicking_reader_still_releases_the_caller() {
    let (done_tx, done_rx) = unbounded();

    let caller = thread::spawn(move || {
        let (tx, rx) = unbounded::<Workflow<PanickingReader>>();
        let ui = thread::spawn(move || {
            let mut workflow = rx.recv().unwrap();
            let _ = workflow.handle(Action::LoadPlain("xyc".into()));
        });
        let presenter = move |workflow: Workflow<PanickingReader>| tx.send(workflow).unwrap();

        let gate = Arc::new(CompletionGate::new());
        let result = run_import_with_gate(
            Path::new("file.h5"),
            &single(),
            PanickingReader,
            &presenter,
            &ImportConfig::default(),
            Arc::clone(&gate),
        );
        let ui_panicked = ui.join().is_err();
        done_tx
            .send((result, gate.signal_count(), ui_panicked))
            .unwrap();
    });

    let (result, signals, ui_panicked) = done_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("caller stayed blocked after the reader panicked");
    caller.join().unwrap();

    assert!(ui_panicked);
    assert_eq!(result, Ok(Completion::Interrupted));
    assert_eq!(signals, 0);
}
