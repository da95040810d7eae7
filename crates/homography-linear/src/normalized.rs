//! Normalized DLT: condition both point sets, solve, then undo the conditioning.

use crate::{
    dlt_homography, ensure_invertible, fix_scale, normalization_transform, transform_point,
    HomographyError, MIN_CORRESPONDENCES,
};
use homography_core::{Correspondence, Mat3, Side};
use serde::{Deserialize, Serialize};

/// Full output of the normalized DLT.
///
/// Only [`homography`](Self::homography) maps source pixels to target pixels;
/// the remaining fields are kept for diagnostics and testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDlt {
    /// `T'⁻¹ · Ĥ · T`, scaled so that `H[2,2] == 1`.
    pub homography: Mat3,
    /// `Ĥ`: the homography between the normalized point sets.
    pub normalized_homography: Mat3,
    /// `T`: normalizer of the source points.
    pub source_normalizer: Mat3,
    /// `T'`: normalizer of the target points.
    pub target_normalizer: Mat3,
}

/// Estimate `H` such that `target ~ H * source` using the normalized DLT.
///
/// This uses Hartley-style point normalization (zero mean, mean distance
/// `√2`) on each side, solves the DLT on the normalized correspondences and
/// de-normalizes the result.
///
/// # Errors
///
/// - [`HomographyError::Precision`] for fewer than 4 correspondences.
/// - Any error of [`normalization_transform`], [`transform_point`] or
///   [`dlt_homography`], unchanged.
/// - [`HomographyError::DegenerateTransform`] if the de-normalized matrix
///   cannot be rescaled or is singular.
pub fn normalized_dlt(set: &[Correspondence]) -> Result<NormalizedDlt, HomographyError> {
    let n = set.len();
    if n < MIN_CORRESPONDENCES {
        return Err(HomographyError::Precision(n));
    }

    let t_src = normalization_transform(set, Side::Source)?;
    let t_dst = normalization_transform(set, Side::Target)?;

    let normalized = set
        .iter()
        .map(|c| {
            Ok(Correspondence::new(
                transform_point(&t_src, &c.source)?,
                transform_point(&t_dst, &c.target)?,
            ))
        })
        .collect::<Result<Vec<_>, HomographyError>>()?;

    let h_norm = dlt_homography(&normalized)?;

    let t_dst_inv = t_dst.try_inverse().ok_or_else(|| {
        HomographyError::DegenerateInput("target normalizer is not invertible".into())
    })?;
    let h = fix_scale(t_dst_inv * h_norm * t_src)?;
    ensure_invertible(&h)?;

    Ok(NormalizedDlt {
        homography: h,
        normalized_homography: h_norm,
        source_normalizer: t_src,
        target_normalizer: t_dst,
    })
}

/// Convenience wrapper returning only the de-normalized homography.
pub fn normalized_homography(set: &[Correspondence]) -> Result<Mat3, HomographyError> {
    normalized_dlt(set).map(|res| res.homography)
}

/// The normalized DLT as a [`HomographyEstimator`](crate::HomographyEstimator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedSolver;
