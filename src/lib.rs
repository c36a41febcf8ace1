//! Import array datasets from HDF5 exports into an image viewer.
//!
//! The import runs in three steps: every array dataset in the container is
//! discovered, the user picks one and declares what its axes mean, and the
//! dataset is read in the viewer's `x y c z t` layout. The calling thread
//! blocks on a [`workflow::CompletionGate`] while the user decides on another
//! thread.

pub mod config;
pub mod container;
pub mod data;
pub mod error;
pub mod image;
pub mod lut;
pub mod workflow;

pub use config::ImportConfig;
pub use error::{ContainerError, ImportError, ReadError};
pub use image::ImportedImage;
pub use workflow::{run_import, Action, Completion, Phase, Workflow};
