//! The import workflow: a state machine driven by user actions on one thread,
//! and a completion gate the calling thread blocks on.
//!
//! ```text
//!  caller thread                     UI thread
//!  ─────────────                     ─────────
//!  run_import
//!    open + discover
//!    present(workflow) ────────────▶ render dialogs
//!    gate.wait()                     handle(SELECT / LOAD_* / CANCEL_*)
//!        ◀──────────── gate.signal(result) on a terminal phase
//!    return result
//! ```

pub mod gate;
pub mod machine;
pub mod session;

pub use gate::{CompletionGate, GateWait};
pub use machine::{Action, Completion, Loaded, Phase, Workflow, WorkflowResult};
pub use session::{run_import, run_import_with_gate, Presenter};
