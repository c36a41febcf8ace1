use std::path::PathBuf;

use thiserror::Error;

use crate::workflow::Phase;

// ---------------------------------------------------------------------------
// Collaborator errors
// ---------------------------------------------------------------------------

/// Failures reported by a container backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("no object at '{0}'")]
    NotFound(String),

    #[error("'{0}' is not a group")]
    NotAGroup(String),

    #[error("'{0}' is not an array dataset")]
    NotADataset(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Backend(String),
}

/// Failures reported by an array reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("{0}")]
    Format(String),

    #[error("out of memory: {requested_bytes} bytes requested")]
    OutOfMemory { requested_bytes: u64 },

    #[error("unsupported: {0}")]
    Unsupported(String),
}

// ---------------------------------------------------------------------------
// Workflow errors
// ---------------------------------------------------------------------------

/// Everything that can end or interrupt an import.
///
/// Only [`ImportError::AxisRankMismatch`], [`ImportError::InvalidSelection`] and
/// [`ImportError::InvalidAction`] are recoverable: the workflow stays where it
/// was. All other variants are fatal and are delivered through the completion
/// gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("error while opening '{}': {reason}", path.display())]
    Open { path: PathBuf, reason: ContainerError },

    #[error("no array datasets found in '{}'", path.display())]
    EmptyCatalog { path: PathBuf },

    #[error("failed to list the contents of '{}': {reason}", path.display())]
    Discovery { path: PathBuf, reason: ContainerError },

    #[error("axis order '{spec}' names {found} axes but the dataset has rank {rank}")]
    AxisRankMismatch {
        spec: String,
        rank: usize,
        found: usize,
    },

    #[error("no dataset at index {index} (catalog holds {len})")]
    InvalidSelection { index: usize, len: usize },

    #[error("{action} is not valid while {phase}")]
    InvalidAction { action: &'static str, phase: Phase },

    #[error("failed to read '{dataset}': {reason}")]
    Read { dataset: String, reason: ReadError },

    #[error("out of memory while loading '{dataset}' ({requested_bytes} bytes)")]
    OutOfMemory {
        dataset: String,
        requested_bytes: u64,
    },
}

impl ImportError {
    /// Wrap a reader failure, keeping out-of-memory distinct from other read errors.
    pub fn from_read(dataset: &str, err: ReadError) -> Self {
        match err {
            ReadError::OutOfMemory { requested_bytes } => Self::OutOfMemory {
                dataset: dataset.to_string(),
                requested_bytes,
            },
            reason => Self::Read {
                dataset: dataset.to_string(),
                reason,
            },
        }
    }

    /// Whether the workflow can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AxisRankMismatch { .. }
                | Self::InvalidSelection { .. }
                | Self::InvalidAction { .. }
        )
    }
}
