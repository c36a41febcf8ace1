use std::fmt;

use super::catalog::DatasetEntry;
use crate::error::ImportError;

// ---------------------------------------------------------------------------
// Axis tokens
// ---------------------------------------------------------------------------

/// The meaning of one character in an axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisToken {
    Time,
    Channel,
    X,
    Y,
    Z,
    /// The application-specific extra token, when one is configured.
    Extra(char),
    /// Anything else. Passed through to the reader untouched.
    Unrecognized(char),
}

impl AxisToken {
    pub fn parse(c: char, extra: Option<char>) -> Self {
        match c {
            't' => AxisToken::Time,
            'c' => AxisToken::Channel,
            'x' => AxisToken::X,
            'y' => AxisToken::Y,
            'z' => AxisToken::Z,
            other if Some(other) == extra => AxisToken::Extra(other),
            other => AxisToken::Unrecognized(other),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            AxisToken::Time => 't',
            AxisToken::Channel => 'c',
            AxisToken::X => 'x',
            AxisToken::Y => 'y',
            AxisToken::Z => 'z',
            AxisToken::Extra(c) | AxisToken::Unrecognized(c) => c,
        }
    }
}

// ---------------------------------------------------------------------------
// AxisOrder – a validated axis order
// ---------------------------------------------------------------------------

/// An axis order whose length matches the rank of its dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisOrder {
    spec: String,
    tokens: Vec<AxisToken>,
}

impl AxisOrder {
    /// The text exactly as it will be handed to the reader.
    pub fn as_str(&self) -> &str {
        &self.spec
    }

    pub fn tokens(&self) -> &[AxisToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

/// Check a user-supplied axis order against the chosen dataset.
///
/// Only the length is enforced: it must equal the dataset's rank. Surrounding
/// whitespace is ignored; token content is not validated beyond a warning.
pub fn resolve(
    spec: &str,
    entry: &DatasetEntry,
    extra: Option<char>,
) -> Result<AxisOrder, ImportError> {
    let spec = spec.trim();
    let found = spec.chars().count();
    if found != entry.rank() {
        log::warn!(
            "axis order '{spec}' rejected for {}: rank is {}",
            entry.path,
            entry.rank()
        );
        return Err(ImportError::AxisRankMismatch {
            spec: spec.to_string(),
            rank: entry.rank(),
            found,
        });
    }

    let tokens: Vec<AxisToken> = spec.chars().map(|c| AxisToken::parse(c, extra)).collect();
    for token in &tokens {
        if let AxisToken::Unrecognized(c) = token {
            log::warn!("unrecognized axis token '{c}' in '{spec}', passing it through");
        }
    }
    Ok(AxisOrder {
        spec: spec.to_string(),
        tokens,
    })
}

/// Pre-filled choices for the axis-order prompt, most likely first.
pub fn suggestions(rank: usize) -> &'static [&'static str] {
    match rank {
        5 => &["tzyxc", "txyzc"],
        4 => &["xyzc", "txyz", "txyc"],
        3 => &["xyc", "xyz", "txy"],
        _ => &["xy", "yx"],
    }
}
