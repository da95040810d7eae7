//! Synthetic planar point grids and their images under a known homography.

use super::noise::{unit_direction, UniformPixelNoise};
use crate::{to_homogeneous, Correspondence, Mat3, Pt2, Real, Vec2};
use anyhow::Result;
use std::ops::RangeInclusive;

/// Generate a planar grid of 2D points with `nx * ny` points.
///
/// Points are ordered deterministically in row-major order (Y major):
/// `(x = 0..nx-1, y = 0..ny-1)`.
pub fn grid_points_2d(nx: usize, ny: usize, spacing: Real) -> Vec<Pt2> {
    grid_points_range_2d(
        0..=(nx as i32 - 1),
        0..=(ny as i32 - 1),
        spacing,
    )
}

/// Generate a planar grid of 2D points over integer index ranges.
///
/// The output order is deterministic in row-major order (Y major).
pub fn grid_points_range_2d(
    x: RangeInclusive<i32>,
    y: RangeInclusive<i32>,
    spacing: Real,
) -> Vec<Pt2> {
    let nx = (*x.end() as i64 - *x.start() as i64 + 1).max(0) as usize;
    let ny = (*y.end() as i64 - *y.start() as i64 + 1).max(0) as usize;
    let mut points = Vec::with_capacity(nx.saturating_mul(ny));

    for j in y {
        for i in x.clone() {
            points.push(Pt2::new(i as Real * spacing, j as Real * spacing));
        }
    }
    points
}

/// Map `points` through `h` and pair each with its image.
///
/// Target point `i` is perturbed by `noise.sample(i)`.
///
/// # Errors
///
/// Fails if any point maps to infinity.
pub fn project_through(
    h: &Mat3,
    points: &[Pt2],
    noise: &UniformPixelNoise,
) -> Result<Vec<Correspondence>> {
    let mut set = Vec::with_capacity(points.len());
    for (idx, p) in points.iter().enumerate() {
        let v = h * to_homogeneous(p);
        if v.z.abs() < 1e-12 {
            anyhow::bail!("point {idx} maps to infinity (w={:.3e})", v.z);
        }
        let uv = noise.apply(idx, Vec2::new(v.x / v.z, v.y / v.z));
        set.push(Correspondence::new(*p, Pt2::from(uv)));
    }
    Ok(set)
}

/// Turn the listed correspondences into outliers by moving their targets
/// exactly `offset_px` pixels in a deterministic pseudo-random direction.
///
/// # Panics
///
/// Panics if any index is out of bounds.
pub fn displace_targets(set: &mut [Correspondence], indices: &[usize], offset_px: Real, seed: u64) {
    for &idx in indices {
        set[idx].target += unit_direction(seed, idx) * offset_px;
    }
}
