//! Container access: the boundary between the import workflow and the file format.
//!
//! ```text
//!   ContainerBackend::open_for_reading(path)
//!        │
//!        ▼
//!   ┌────────────┐   link_info / group_members / dataset_info
//!   │ Container  │ ─────────────────────────────────────────▶ walker
//!   └────────────┘
//! ```
//!
//! Two backends ship with the crate: an in-memory tree and HDF5 files.

pub mod hdf5_file;
pub mod memory;

use std::fmt;
use std::path::Path;

use crate::error::ContainerError;

pub use hdf5_file::{Hdf5Backend, Hdf5Reader};
pub use memory::{MemoryBackend, MemoryContainer};

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// How a member of a group is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ArrayDataset,
    Group,
    SoftLink,
    /// External links, named datatypes and anything else the walker ignores.
    Other,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::ArrayDataset => "DATASET",
            NodeKind::Group => "GROUP",
            NodeKind::SoftLink => "SOFT_LINK",
            NodeKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// A single named object inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Absolute path, e.g. `/volumes/raw`.
    pub path: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(path: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Shape metadata of an array dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub dimensions: Vec<u64>,
}

impl DatasetInfo {
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// An open, read-only hierarchical container.
pub trait Container {
    /// Resolve `path` itself (without following soft links).
    fn link_info(&self, path: &str) -> Result<Node, ContainerError>;

    /// Direct members of the group at `path`, in a stable order.
    fn group_members(&self, path: &str) -> Result<Vec<Node>, ContainerError>;

    /// Shape of the array dataset at `path`.
    fn dataset_info(&self, path: &str) -> Result<DatasetInfo, ContainerError>;
}

/// Something that can open containers by file path.
pub trait ContainerBackend {
    fn open_for_reading(&self, path: &Path) -> Result<Box<dyn Container + Send>, ContainerError>;
}

/// Canonical absolute form of `path`: one leading slash, no trailing slash.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// The group holding `path`, which must already be normalized.
pub fn parent_path(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some(("", _)) | None => "/",
        Some((parent, _)) => parent,
    }
}

/// Join a group path and a member name.
pub fn join_path(group: &str, name: &str) -> String {
    if group.ends_with('/') {
        format!("{group}{name}")
    } else {
        format!("{group}/{name}")
    }
}
