use ndarray::{ArrayD, Axis};

use super::axes::{AxisOrder, AxisToken};
use crate::error::ReadError;

/// Axis order of the host's image model.
pub const HOST_ORDER: [AxisToken; 5] = [
    AxisToken::X,
    AxisToken::Y,
    AxisToken::Channel,
    AxisToken::Z,
    AxisToken::Time,
];

/// An array rearranged into host order, with one label per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperstack<A> {
    pub data: ArrayD<A>,
    /// `xyczt`, followed by any axes the host has no name for.
    pub labels: String,
}

/// Reorder `array`, whose axes are described by `order`, into `x y c z t`.
///
/// Host axes missing from `order` are inserted with length 1. Axes the host
/// does not know keep their relative order and follow the host axes.
pub fn to_hyperstack<A>(array: ArrayD<A>, order: &AxisOrder) -> Result<Hyperstack<A>, ReadError> {
    if array.ndim() != order.len() {
        return Err(ReadError::Format(format!(
            "array has {} dimensions but axis order '{order}' names {}",
            array.ndim(),
            order.len()
        )));
    }

    let tokens = order.tokens();
    for (i, token) in tokens.iter().enumerate() {
        if tokens[..i].contains(token) {
            return Err(ReadError::Format(format!(
                "axis '{}' appears more than once in '{order}'",
                token.as_char()
            )));
        }
    }

    let host_positions: Vec<Option<usize>> = HOST_ORDER
        .iter()
        .map(|axis| tokens.iter().position(|t| t == axis))
        .collect();

    let mut permutation: Vec<usize> = host_positions.iter().flatten().copied().collect();
    let trailing: Vec<usize> = (0..tokens.len())
        .filter(|i| !permutation.contains(i))
        .collect();
    permutation.extend(&trailing);

    let mut data = array.permuted_axes(permutation);
    for (k, position) in host_positions.iter().enumerate() {
        if position.is_none() {
            data = data.insert_axis(Axis(k));
        }
    }

    let mut labels: String = HOST_ORDER.iter().map(|t| t.as_char()).collect();
    labels.extend(trailing.iter().map(|&i| tokens[i].as_char()));

    Ok(Hyperstack { data, labels })
}
