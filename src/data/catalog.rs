use std::fmt;

// ---------------------------------------------------------------------------
// DatasetEntry – one discovered array dataset
// ---------------------------------------------------------------------------

/// An array dataset found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    /// Absolute path inside the container.
    pub path: String,
    /// Extent of each dimension, slowest-varying first.
    pub dimensions: Vec<u64>,
}

impl DatasetEntry {
    pub fn new(path: impl Into<String>, dimensions: Vec<u64>) -> Self {
        Self {
            path: path.into(),
            dimensions,
        }
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Rank-5 datasets get a marker in the selection list.
    pub fn extended_capable(&self) -> bool {
        self.rank() == 5
    }

    /// `(100, 200, 3)`-style shape text.
    pub fn shape_text(&self) -> String {
        let dims: Vec<String> = self.dimensions.iter().map(u64::to_string).collect();
        format!("({})", dims.join(", "))
    }
}

impl fmt::Display for DatasetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.extended_capable() { '+' } else { '-' };
        write!(f, "{marker} {} {}", self.path, self.shape_text())
    }
}

// ---------------------------------------------------------------------------
// DatasetCatalog – discovery result
// ---------------------------------------------------------------------------

/// Datasets in discovery order (depth-first, pre-order over groups).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCatalog {
    entries: Vec<DatasetEntry>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: DatasetEntry) {
        self.entries.push(entry);
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_at(&self, index: usize) -> Option<&DatasetEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }
}

impl FromIterator<DatasetEntry> for DatasetCatalog {
    fn from_iter<I: IntoIterator<Item = DatasetEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
