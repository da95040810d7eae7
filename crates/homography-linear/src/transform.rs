//! Applying, rescaling and inverting 3×3 projective transforms.

use crate::HomographyError;
use homography_core::{
    from_homogeneous, to_homogeneous, Correspondence, Mat3, Pt2, Real, ReprojectionStats,
};

/// Homogeneous depth at or below which a point is considered to map to infinity.
const DEPTH_EPS: Real = 1e-12;
/// Bottom-right entry at or below this fraction of the matrix norm cannot fix the scale.
const SCALE_EPS: Real = 1e-12;
/// Smallest-to-largest singular value ratio at or below which a matrix is singular.
const INVERTIBILITY_EPS: Real = 1e-12;

/// Apply a 3×3 homogeneous transform to a point, with perspective division.
///
/// # Errors
///
/// [`HomographyError::DegenerateTransform`] if the point maps to infinity
/// (third homogeneous component zero) or to a non-finite value.
pub fn transform_point(h: &Mat3, p: &Pt2) -> Result<Pt2, HomographyError> {
    let v = h * to_homogeneous(p);
    if !v.z.is_finite() || v.z.abs() <= DEPTH_EPS {
        return Err(HomographyError::DegenerateTransform(format!(
            "point ({}, {}) maps to infinity (w={:e})",
            p.x, p.y, v.z
        )));
    }
    Ok(from_homogeneous(&v))
}

/// Rescale `h` so that its bottom-right entry equals 1.
///
/// # Errors
///
/// [`HomographyError::DegenerateTransform`] if that entry is numerically zero
/// or the matrix is not finite.
pub fn fix_scale(h: Mat3) -> Result<Mat3, HomographyError> {
    let scale = h[(2, 2)];
    let norm = h.norm();
    if !scale.is_finite() || !norm.is_finite() || scale.abs() <= SCALE_EPS * norm {
        return Err(HomographyError::DegenerateTransform(format!(
            "bottom-right entry {scale:e} cannot fix the scale"
        )));
    }
    Ok(h / scale)
}

/// Check that `h` is numerically invertible.
pub fn ensure_invertible(h: &Mat3) -> Result<(), HomographyError> {
    let sv = h.singular_values();
    let (sv_min, sv_max) = (sv.min(), sv.max());
    if !sv_min.is_finite() || !sv_max.is_finite() || sv_min <= INVERTIBILITY_EPS * sv_max {
        return Err(HomographyError::DegenerateTransform(format!(
            "singular transform (singular values {sv_min:e} .. {sv_max:e})"
        )));
    }
    Ok(())
}

/// Inverse homography, rescaled so that its bottom-right entry equals 1.
///
/// # Errors
///
/// [`HomographyError::DegenerateTransform`] if `h` is singular or its inverse
/// has a zero bottom-right entry.
pub fn invert_homography(h: &Mat3) -> Result<Mat3, HomographyError> {
    ensure_invertible(h)?;
    let inv = h
        .try_inverse()
        .ok_or_else(|| HomographyError::DegenerateTransform("matrix is not invertible".into()))?;
    fix_scale(inv)
}

/// Euclidean distance between `H * source` and `target`.
pub fn transfer_error(h: &Mat3, c: &Correspondence) -> Result<Real, HomographyError> {
    let mapped = transform_point(h, &c.source)?;
    Ok((mapped - c.target).norm())
}

/// Transfer-error statistics of `h` over a correspondence set.
///
/// Correspondences whose source maps to infinity are skipped.
///
/// # Errors
///
/// [`HomographyError::DegenerateTransform`] if no correspondence could be
/// mapped (including an empty set).
pub fn reprojection_stats(
    h: &Mat3,
    set: &[Correspondence],
) -> Result<ReprojectionStats, HomographyError> {
    let errors: Vec<Real> = set
        .iter()
        .filter_map(|c| transfer_error(h, c).ok())
        .collect();
    ReprojectionStats::from_errors(&errors).ok_or_else(|| {
        HomographyError::DegenerateTransform(
            "no correspondence maps to a finite point".into(),
        )
    })
}
