use std::fmt;
use std::path::PathBuf;

use super::axes::AxisOrder;
use crate::error::ReadError;

/// Which load button the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadIntent {
    Plain,
    WithColorTransform,
}

impl fmt::Display for ReadIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadIntent::Plain => f.write_str("raw"),
            ReadIntent::WithColorTransform => f.write_str("with LUT"),
        }
    }
}

/// Everything a reader needs to load one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub file: PathBuf,
    pub dataset: String,
    pub axes: AxisOrder,
    pub intent: ReadIntent,
}

/// Decodes an array dataset. Called at most once per workflow.
pub trait ArrayReader: Send {
    type Output: Send;

    fn read(&self, request: &ReadRequest) -> Result<Self::Output, ReadError>;
}
