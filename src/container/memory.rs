use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::{
    normalize_path, parent_path, Container, ContainerBackend, DatasetInfo, Node, NodeKind,
};
use crate::error::ContainerError;

// ---------------------------------------------------------------------------
// MemoryContainer – an in-memory hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    dimensions: Vec<u64>,
    /// Member paths, in insertion order (groups only).
    members: Vec<String>,
}

impl MemoryNode {
    fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            dimensions: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// A container held entirely in memory. Parent groups are created on demand.
///
/// ```
/// use rusty_h5import::container::MemoryContainer;
///
/// let container = MemoryContainer::new()
///     .with_dataset("/exported_data", &[100, 200, 3])
///     .with_soft_link("/volumes/back", "/");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    nodes: BTreeMap<String, MemoryNode>,
}

impl Default for MemoryContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContainer {
    /// An empty container holding only the root group.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), MemoryNode::leaf(NodeKind::Group));
        Self { nodes }
    }

    pub fn with_group(mut self, path: &str) -> Self {
        self.insert(path, MemoryNode::leaf(NodeKind::Group));
        self
    }

    pub fn with_dataset(mut self, path: &str, dimensions: &[u64]) -> Self {
        let mut node = MemoryNode::leaf(NodeKind::ArrayDataset);
        node.dimensions = dimensions.to_vec();
        self.insert(path, node);
        self
    }

    /// A soft link. The target is only recorded for readability; it is never resolved.
    pub fn with_soft_link(mut self, path: &str, _target: &str) -> Self {
        self.insert(path, MemoryNode::leaf(NodeKind::SoftLink));
        self
    }

    /// A node of a kind the walker does not descend into (external link, named type).
    pub fn with_other(mut self, path: &str) -> Self {
        self.insert(path, MemoryNode::leaf(NodeKind::Other));
        self
    }

    fn insert(&mut self, path: &str, node: MemoryNode) {
        let path = normalize_path(path);
        if path == "/" {
            return;
        }
        let parent = parent_path(&path).to_string();
        if !self.nodes.contains_key(&parent) {
            self.insert(&parent, MemoryNode::leaf(NodeKind::Group));
        }
        if self.nodes.insert(path.clone(), node).is_none() {
            if let Some(parent) = self.nodes.get_mut(&parent) {
                parent.members.push(path);
            }
        }
    }

    fn node(&self, path: &str) -> Result<&MemoryNode, ContainerError> {
        self.nodes
            .get(&normalize_path(path))
            .ok_or_else(|| ContainerError::NotFound(path.to_string()))
    }
}

impl Container for MemoryContainer {
    fn link_info(&self, path: &str) -> Result<Node, ContainerError> {
        let node = self.node(path)?;
        Ok(Node::new(normalize_path(path), node.kind))
    }

    fn group_members(&self, path: &str) -> Result<Vec<Node>, ContainerError> {
        let node = self.node(path)?;
        if node.kind != NodeKind::Group {
            return Err(ContainerError::NotAGroup(path.to_string()));
        }
        node.members
            .iter()
            .map(|member| self.link_info(member))
            .collect()
    }

    fn dataset_info(&self, path: &str) -> Result<DatasetInfo, ContainerError> {
        let node = self.node(path)?;
        if node.kind != NodeKind::ArrayDataset {
            return Err(ContainerError::NotADataset(path.to_string()));
        }
        Ok(DatasetInfo {
            dimensions: node.dimensions.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// MemoryBackend – file path → container
// ---------------------------------------------------------------------------

/// Serves [`MemoryContainer`]s by file path; unknown paths fail to open.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    files: HashMap<PathBuf, MemoryContainer>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, container: MemoryContainer) -> Self {
        self.files.insert(path.into(), container);
        self
    }
}

impl ContainerBackend for MemoryBackend {
    fn open_for_reading(&self, path: &Path) -> Result<Box<dyn Container + Send>, ContainerError> {
        self.files
            .get(path)
            .cloned()
            .map(|c| Box::new(c) as Box<dyn Container + Send>)
            .ok_or_else(|| ContainerError::NotFound(path.display().to_string()))
    }
}
