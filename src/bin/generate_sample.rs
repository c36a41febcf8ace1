use anyhow::{Context, Result};
use ndarray::{Array, Array3, Array5};

fn gaussian(d2: f32, sigma: f32, amplitude: f32) -> f32 {
    amplitude * (-d2 / (2.0 * sigma * sigma)).exp()
}

/// Blob intensity at (x, y, z) for a few fixed spots.
fn blobs(x: usize, y: usize, z: usize) -> f32 {
    const SPOTS: [(f32, f32, f32, f32); 3] = [
        (30.0, 50.0, 2.0, 1.0),
        (70.0, 140.0, 5.0, 0.7),
        (50.0, 100.0, 8.0, 0.4),
    ];
    SPOTS
        .iter()
        .map(|&(sx, sy, sz, amp)| {
            let (dx, dy, dz) = (x as f32 - sx, y as f32 - sy, z as f32 - sz);
            let d2 = dx * dx + dy * dy + 16.0 * dz * dz;
            gaussian(d2, 12.0, amp)
        })
        .sum()
}

fn main() -> Result<()> {
    let output_path = "sample_data.h5";
    let file = hdf5::File::create(output_path).context("creating output file")?;

    // Rank 3: x, y, c (three class probabilities)
    let exported: Array3<f32> = Array::from_shape_fn((100, 200, 3), |(x, y, c)| {
        let p = blobs(x, y, 0);
        match c {
            0 => p,
            1 => 1.0 - p.min(1.0),
            _ => (x as f32 / 100.0) * 0.2,
        }
    });
    file.new_dataset_builder()
        .with_data(&exported)
        .create("exported_data")
        .context("writing /exported_data")?;

    // Rank 5: t, z, y, x, c
    let raw: Array5<f32> = Array::from_shape_fn((4, 10, 64, 64, 1), |(t, z, y, x, _)| {
        blobs(x + t * 4, y, z) * 255.0
    });
    let volumes = file.create_group("volumes").context("creating /volumes")?;
    volumes
        .new_dataset_builder()
        .with_data(&raw)
        .create("raw")
        .context("writing /volumes/raw")?;

    // Nested group and a soft link back to its parent.
    let nested = volumes.create_group("segmentation").context("creating /volumes/segmentation")?;
    let labels: Array3<f32> = exported.mapv(|p| if p > 0.5 { 1.0 } else { 0.0 });
    nested
        .new_dataset_builder()
        .with_data(&labels)
        .create("labels")
        .context("writing /volumes/segmentation/labels")?;
    nested
        .link_soft("/volumes", "parent")
        .context("linking /volumes/segmentation/parent")?;

    println!("Wrote 3 datasets (and one soft link) to {output_path}");
    Ok(())
}
