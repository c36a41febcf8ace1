use std::path::Path;

use ndarray::ArrayD;

use super::{Container, ContainerBackend};
use crate::config::ImportConfig;
use crate::data::{to_hyperstack, ArrayReader, ReadIntent, ReadRequest};
use crate::error::{ContainerError, ReadError};
use crate::image::ImportedImage;
use crate::lut::Lut;

#[cfg(not(feature = "hdf5"))]
const NO_HDF5: &str = "this build has no HDF5 support (enable the `hdf5` feature)";

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Opens HDF5 files read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hdf5Backend;

impl ContainerBackend for Hdf5Backend {
    #[cfg(feature = "hdf5")]
    fn open_for_reading(&self, path: &Path) -> Result<Box<dyn Container + Send>, ContainerError> {
        let file = ::hdf5::File::open(path).map_err(imp::backend_error)?;
        Ok(Box::new(imp::Hdf5Container { file }))
    }

    #[cfg(not(feature = "hdf5"))]
    fn open_for_reading(&self, _path: &Path) -> Result<Box<dyn Container + Send>, ContainerError> {
        Err(ContainerError::Unsupported(NO_HDF5.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Reads a whole dataset as `f32` and rearranges it into host order.
#[derive(Debug, Clone, Default)]
pub struct Hdf5Reader {
    #[cfg_attr(not(feature = "hdf5"), allow(dead_code))]
    max_read_bytes: Option<u64>,
}

impl Hdf5Reader {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            max_read_bytes: config.max_read_bytes,
        }
    }
}

impl ArrayReader for Hdf5Reader {
    type Output = ImportedImage;

    #[cfg(feature = "hdf5")]
    fn read(&self, request: &ReadRequest) -> Result<ImportedImage, ReadError> {
        let file = ::hdf5::File::open(&request.file).map_err(imp::format_error)?;
        let dataset = file.dataset(&request.dataset).map_err(imp::format_error)?;

        let elements: u64 = dataset.shape().iter().map(|&d| d as u64).product();
        ensure_fits(elements, self.max_read_bytes)?;

        let data: ArrayD<f32> = dataset.read_dyn::<f32>().map_err(imp::format_error)?;
        into_image(request, data)
    }

    #[cfg(not(feature = "hdf5"))]
    fn read(&self, _request: &ReadRequest) -> Result<ImportedImage, ReadError> {
        Err(ReadError::Unsupported(NO_HDF5.to_string()))
    }
}

/// Fail with `OutOfMemory` when `elements` f32 values exceed the limit or
/// cannot be allocated at all.
#[cfg_attr(not(feature = "hdf5"), allow(dead_code))]
fn ensure_fits(elements: u64, limit: Option<u64>) -> Result<(), ReadError> {
    let requested_bytes = elements.saturating_mul(std::mem::size_of::<f32>() as u64);
    let out_of_memory = ReadError::OutOfMemory { requested_bytes };

    if limit.is_some_and(|max| requested_bytes > max) {
        return Err(out_of_memory);
    }
    let Ok(len) = usize::try_from(elements) else {
        return Err(out_of_memory);
    };
    let mut probe: Vec<f32> = Vec::new();
    probe.try_reserve_exact(len).map_err(|_| out_of_memory)?;
    Ok(())
}

#[cfg_attr(not(feature = "hdf5"), allow(dead_code))]
fn into_image(request: &ReadRequest, data: ArrayD<f32>) -> Result<ImportedImage, ReadError> {
    let stack = to_hyperstack(data, &request.axes)?;
    let lut = match request.intent {
        ReadIntent::Plain => None,
        ReadIntent::WithColorTransform => Some(Lut::rgb332()),
    };
    Ok(ImportedImage {
        dataset: request.dataset.clone(),
        data: stack.data,
        labels: stack.labels,
        source_axes: request.axes.clone(),
        lut,
    })
}

// ---------------------------------------------------------------------------
// libhdf5-backed container
// ---------------------------------------------------------------------------

#[cfg(feature = "hdf5")]
mod imp {
    use ::hdf5::{File, Group, LinkType, LocationType};

    use crate::container::{
        join_path, normalize_path, parent_path, Container, DatasetInfo, Node, NodeKind,
    };
    use crate::error::{ContainerError, ReadError};

    pub(super) fn backend_error(err: ::hdf5::Error) -> ContainerError {
        ContainerError::Backend(err.to_string())
    }

    pub(super) fn format_error(err: ::hdf5::Error) -> ReadError {
        ReadError::Format(err.to_string())
    }

    pub(super) struct Hdf5Container {
        pub(super) file: File,
    }

    impl Hdf5Container {
        fn group(&self, path: &str) -> Result<Group, ContainerError> {
            self.file
                .group(path)
                .map_err(|_| ContainerError::NotAGroup(path.to_string()))
        }

        /// Members of `group` with their link types, in name order.
        fn links(group: &Group) -> Result<Vec<(String, LinkType)>, ContainerError> {
            group
                .iter_visit_default(Vec::new(), |_, name, info, links| {
                    links.push((name.to_string(), info.link_type));
                    true
                })
                .map_err(backend_error)
        }

        fn classify(
            group: &Group,
            group_path: &str,
            name: &str,
            link: LinkType,
        ) -> Result<Node, ContainerError> {
            let kind = match link {
                LinkType::Soft => NodeKind::SoftLink,
                LinkType::External => NodeKind::Other,
                LinkType::Hard => match group.loc_type_by_name(name).map_err(backend_error)? {
                    LocationType::Group => NodeKind::Group,
                    LocationType::Dataset => NodeKind::ArrayDataset,
                    _ => NodeKind::Other,
                },
            };
            Ok(Node::new(join_path(group_path, name), kind))
        }
    }

    impl Container for Hdf5Container {
        fn link_info(&self, path: &str) -> Result<Node, ContainerError> {
            let path = normalize_path(path);
            if path == "/" {
                return Ok(Node::new("/", NodeKind::Group));
            }
            let parent = parent_path(&path);
            let name = path[parent.len()..].trim_start_matches('/');
            let group = self.group(parent)?;
            let (_, link) = Self::links(&group)?
                .into_iter()
                .find(|(member, _)| member == name)
                .ok_or_else(|| ContainerError::NotFound(path.clone()))?;
            Self::classify(&group, parent, name, link)
        }

        fn group_members(&self, path: &str) -> Result<Vec<Node>, ContainerError> {
            let path = normalize_path(path);
            let group = self.group(&path)?;
            Self::links(&group)?
                .into_iter()
                .map(|(name, link)| Self::classify(&group, &path, &name, link))
                .collect()
        }

        fn dataset_info(&self, path: &str) -> Result<DatasetInfo, ContainerError> {
            let dataset = self
                .file
                .dataset(path)
                .map_err(|_| ContainerError::NotADataset(path.to_string()))?;
            Ok(DatasetInfo {
                dimensions: dataset.shape().into_iter().map(|d| d as u64).collect(),
            })
        }
    }
}
