//! Data layer: discovery, catalog, axis orders and reading.
//!
//! Architecture:
//! ```text
//!   Container
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  walker   │  depth-first walk → DatasetCatalog
//!   └──────────┘
//!        │  user picks an entry, types an axis order
//!        ▼
//!   ┌──────────┐
//!   │   axes    │  rank check → AxisOrder
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  reader   │  ArrayReader::read → hyperstack (x y c z t)
//!   └──────────┘
//! ```

pub mod axes;
pub mod catalog;
pub mod hyperstack;
pub mod reader;
pub mod walker;

pub use axes::{resolve, suggestions, AxisOrder, AxisToken};
pub use catalog::{DatasetCatalog, DatasetEntry};
pub use hyperstack::{to_hyperstack, Hyperstack};
pub use reader::{ArrayReader, ReadIntent, ReadRequest};
pub use walker::discover;
