use ndarray::{ArrayD, ArrayView2, Axis, Ix2};

use crate::data::AxisOrder;
use crate::lut::Lut;

// ---------------------------------------------------------------------------
// ImportedImage – the host's view of a loaded dataset
// ---------------------------------------------------------------------------

/// A dataset loaded into the host's `x y c z t` layout.
#[derive(Debug, Clone)]
pub struct ImportedImage {
    /// Path of the source dataset inside the container.
    pub dataset: String,
    /// Voxel data, axes labelled by `labels`.
    pub data: ArrayD<f32>,
    /// One character per axis of `data`.
    pub labels: String,
    /// The axis order the user declared for the source dataset.
    pub source_axes: AxisOrder,
    /// Colour table to render with (grays when absent).
    pub lut: Option<Lut>,
}

impl ImportedImage {
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// The x/y plane at index 0 of every other axis.
    pub fn first_plane(&self) -> Option<ArrayView2<'_, f32>> {
        let mut view = self.data.view();
        while view.ndim() > 2 {
            if view.len_of(Axis(2)) == 0 {
                return None;
            }
            view = view.index_axis_move(Axis(2), 0);
        }
        view.into_dimensionality::<Ix2>().ok()
    }
}

/// Minimum and maximum of the finite values, if any.
pub fn intensity_range(values: impl IntoIterator<Item = f32>) -> Option<(f32, f32)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Min-max scale `value` into `0..=255`.
pub fn scale_to_u8(value: f32, (lo, hi): (f32, f32)) -> u8 {
    let range = hi - lo;
    if !value.is_finite() || range.abs() < f32::EPSILON {
        return 0;
    }
    (((value - lo) / range).clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Count values into `bins` equal-width buckets spanning `range`.
pub fn histogram(
    values: impl IntoIterator<Item = f32>,
    (lo, hi): (f32, f32),
    bins: usize,
) -> Vec<u32> {
    let mut counts = vec![0u32; bins];
    if bins == 0 {
        return counts;
    }
    let width = (hi - lo) / bins as f32;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        let bin = if width > 0.0 {
            (((v - lo) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{resolve, DatasetEntry};
    use ndarray::IxDyn;

    fn image(shape: &[usize]) -> ImportedImage {
        let n: usize = shape.iter().product();
        let entry = DatasetEntry::new("/d", vec![1; 5]);
        ImportedImage {
            dataset: "/d".into(),
            data: ArrayD::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f32).collect()).unwrap(),
            labels: "xyczt".into(),
            source_axes: resolve("xyczt", &entry, None).unwrap(),
            lut: None,
        }
    }

    #[test]
    fn first_plane_drops_trailing_axes() {
        let img = image(&[4, 3, 2, 1, 1]);
        let plane = img.first_plane().unwrap();
        assert_eq!(plane.shape(), &[4, 3]);
        // Channel 0 of voxel (x=1, y=2)
        assert_eq!(plane[[1, 2]], img.data[[1, 2, 0, 0, 0]]);
    }

    #[test]
    fn first_plane_of_empty_axis_is_none() {
        assert!(image(&[4, 3, 0, 1, 1]).first_plane().is_none());
    }

    #[test]
    fn range_ignores_non_finite() {
        assert_eq!(intensity_range([3.0, f32::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(intensity_range(Vec::<f32>::new()), None);
    }

    #[test]
    fn histogram_buckets_values() {
        let counts = histogram([0.0, 1.0, 2.0, 3.0, 4.0, f32::NAN], (0.0, 4.0), 4);
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(histogram([5.0, 5.0], (5.0, 5.0), 3), vec![2, 0, 0]);
        assert!(histogram([1.0], (0.0, 1.0), 0).is_empty());
    }

    #[test]
    fn scaling_is_min_max() {
        assert_eq!(scale_to_u8(0.0, (0.0, 10.0)), 0);
        assert_eq!(scale_to_u8(10.0, (0.0, 10.0)), 255);
        assert_eq!(scale_to_u8(5.0, (5.0, 5.0)), 0);
        assert_eq!(scale_to_u8(20.0, (0.0, 10.0)), 255);
    }
}
