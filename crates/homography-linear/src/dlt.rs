//! Direct Linear Transform on raw coordinates.
//!
//! Each correspondence `(x1, y1) -> (x2, y2)` contributes two rows to the
//! `2N × 9` measurement matrix `A`:
//!
//! ```text
//! [ x1  y1  1   0   0   0  -x2·x1  -x2·y1  -x2 ]
//! [ 0   0   0   x1  y1  1  -y2·x1  -y2·y1  -y2 ]
//! ```
//!
//! The homography (row-major) is the eigenvector of `AᵗA` for its smallest
//! eigenvalue, i.e. the least-squares null vector of `A`. Working on the
//! 9×9 normal matrix keeps the decomposition size fixed even in the minimal
//! 4-point case where `A` has only 8 rows.

use crate::{ensure_invertible, fix_scale, HomographyError};
use homography_core::{Correspondence, Mat3, Real};
use nalgebra::DMatrix;

/// Minimum number of correspondences that determines a homography.
pub const MIN_CORRESPONDENCES: usize = 4;

/// Build the `2N × 9` DLT measurement matrix.
pub fn measurement_matrix(set: &[Correspondence]) -> DMatrix<Real> {
    let mut a = DMatrix::<Real>::zeros(2 * set.len(), 9);

    for (i, c) in set.iter().enumerate() {
        let (x1, y1) = (c.source.x, c.source.y);
        let (x2, y2) = (c.target.x, c.target.y);

        let r0 = 2 * i;
        let r1 = 2 * i + 1;

        a[(r0, 0)] = x1;
        a[(r0, 1)] = y1;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -x2 * x1;
        a[(r0, 7)] = -x2 * y1;
        a[(r0, 8)] = -x2;

        a[(r1, 3)] = x1;
        a[(r1, 4)] = y1;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -y2 * x1;
        a[(r1, 7)] = -y2 * y1;
        a[(r1, 8)] = -y2;
    }

    a
}

/// Estimate `H` such that `target ~ H * source` with the unnormalized DLT.
///
/// The result is scaled so that `H[2,2] == 1`.
///
/// `AᵗA` is badly conditioned once coordinates reach the hundreds of pixels:
/// on full-resolution images this returns `Ok` with a grossly wrong matrix.
/// Use [`normalized_homography`](crate::normalized_homography) for pixel
/// coordinates; this solver is meant for data already near unit scale.
///
/// # Errors
///
/// - [`HomographyError::Precision`] for fewer than 4 correspondences.
/// - [`HomographyError::DegenerateInput`] for non-finite coordinates.
/// - [`HomographyError::DegenerateTransform`] if the null vector has a zero
///   bottom-right entry or describes a singular transform.
pub fn dlt_homography(set: &[Correspondence]) -> Result<Mat3, HomographyError> {
    let n = set.len();
    if n < MIN_CORRESPONDENCES {
        return Err(HomographyError::Precision(n));
    }
    if let Some(idx) = set.iter().position(|c| !c.is_finite()) {
        return Err(HomographyError::DegenerateInput(format!(
            "correspondence {idx} has non-finite coordinates"
        )));
    }

    let a = measurement_matrix(set);
    let ata = a.transpose() * &a;
    let eig = ata.symmetric_eigen();

    // Eigenvalue order is unspecified; search for the minimum explicitly.
    let min_idx = eig
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(idx, _)| idx)
        .ok_or_else(|| HomographyError::DegenerateInput("empty eigen decomposition".into()))?;

    let mut h = Mat3::zeros();
    for r in 0..3 {
        for c in 0..3 {
            h[(r, c)] = eig.eigenvectors[(3 * r + c, min_idx)];
        }
    }

    let h = fix_scale(h)?;
    ensure_invertible(&h)?;
    Ok(h)
}

/// The unnormalized DLT as a [`HomographyEstimator`](crate::HomographyEstimator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectSolver;
