use std::collections::HashSet;

use super::catalog::{DatasetCatalog, DatasetEntry};
use crate::container::{Container, NodeKind};
use crate::error::ContainerError;

// ---------------------------------------------------------------------------
// Hierarchy walker
// ---------------------------------------------------------------------------

/// Collect every array dataset below `root`.
///
/// Groups are visited depth-first in pre-order, following the container's
/// member order, so repeated calls produce the same catalog. Soft links are
/// never followed and no path is visited twice.
pub fn discover(container: &dyn Container, root: &str) -> Result<DatasetCatalog, ContainerError> {
    let root = container.link_info(root)?;
    let mut catalog = DatasetCatalog::new();
    let mut visited = HashSet::new();
    visited.insert(root.path.clone());

    match root.kind {
        NodeKind::Group => walk(container, &root.path, &mut catalog, &mut visited)?,
        NodeKind::ArrayDataset => {
            let info = container.dataset_info(&root.path)?;
            catalog.push(DatasetEntry::new(root.path, info.dimensions));
        }
        NodeKind::SoftLink | NodeKind::Other => {
            log::info!("{}: {} (not descending)", root.path, root.kind);
        }
    }
    Ok(catalog)
}

fn walk(
    container: &dyn Container,
    group: &str,
    catalog: &mut DatasetCatalog,
    visited: &mut HashSet<String>,
) -> Result<(), ContainerError> {
    for node in container.group_members(group)? {
        log::info!("{}: {}", node.path, node.kind);
        if !visited.insert(node.path.clone()) {
            log::debug!("{} already visited, skipping", node.path);
            continue;
        }
        match node.kind {
            NodeKind::ArrayDataset => {
                let info = container.dataset_info(&node.path)?;
                catalog.push(DatasetEntry::new(node.path, info.dimensions));
            }
            NodeKind::Group => walk(container, &node.path, catalog, visited)?,
            NodeKind::SoftLink | NodeKind::Other => {}
        }
    }
    Ok(())
}
