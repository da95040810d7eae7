//! RANSAC homography estimation on top of the normalized DLT.
//!
//! Every iteration fits the normalized DLT to 4 distinct random
//! correspondences and counts the correspondences whose transfer error is
//! strictly below the threshold. The best-supported inlier set is refitted
//! with the normalized DLT to produce the returned homography.
//!
//! Budget policy: each of the `max_iters` iterations consumes its slot,
//! whether its sample is rejected as degenerate, its fit fails, or it is
//! scored. Failed iterations are counted in
//! [`RobustHomography::failed_fits`].

use crate::{normalized_homography, transfer_error, HomographyError, MIN_CORRESPONDENCES};
use homography_core::{
    ransac_fit_with_rng, select_correspondences, Correspondence, Estimator, Mat3, Pt2,
    RansacOptions, Real,
};
use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Sine of the angle below which three sample points count as collinear.
const COLLINEAR_EPS: Real = 1e-9;

/// Result of a robust homography estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustHomography {
    /// Normalized DLT refitted on all inliers, with `H[2,2] == 1`.
    pub homography: Mat3,
    /// Indices (ascending) of the best candidate's inliers; the refit used
    /// exactly these correspondences.
    pub inliers: Vec<usize>,
    /// RMS transfer error of the best candidate over its inliers.
    pub inlier_rms: Real,
    /// Iterations performed (always the full budget).
    pub iters: usize,
    /// Iteration (1-based) that produced the best candidate.
    pub best_iter: usize,
    /// Iterations whose sample was degenerate or whose fit failed.
    pub failed_fits: usize,
    /// Best inlier count after each iteration; non-decreasing.
    pub support_history: Vec<usize>,
}

impl RobustHomography {
    /// Copy the inlier correspondences out of the set the estimate came from.
    ///
    /// # Panics
    ///
    /// Panics if `set` is shorter than that set, i.e. an inlier index is out
    /// of bounds.
    pub fn inlier_correspondences(&self, set: &[Correspondence]) -> Vec<Correspondence> {
        select_correspondences(set, &self.inliers)
    }
}

struct HomographyEst;

impl Estimator for HomographyEst {
    type Datum = Correspondence;
    type Model = Mat3;

    const MIN_SAMPLES: usize = MIN_CORRESPONDENCES;

    fn fit(data: &[Self::Datum], sample_indices: &[usize]) -> Option<Self::Model> {
        let sample = select_correspondences(data, sample_indices);
        match normalized_homography(&sample) {
            Ok(h) => Some(h),
            Err(err) => {
                trace!("sample {sample_indices:?} rejected: {err}");
                None
            }
        }
    }

    fn residual(model: &Self::Model, datum: &Self::Datum) -> Real {
        transfer_error(model, datum).unwrap_or(Real::INFINITY)
    }

    fn is_degenerate(data: &[Self::Datum], sample_indices: &[usize]) -> bool {
        let source: Vec<Pt2> = sample_indices.iter().map(|&i| data[i].source).collect();
        let target: Vec<Pt2> = sample_indices.iter().map(|&i| data[i].target).collect();
        has_collinear_triple(&source) || has_collinear_triple(&target)
    }
}

/// Any three of `points` collinear (or coincident).
fn has_collinear_triple(points: &[Pt2]) -> bool {
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let d1 = points[j] - points[i];
                let d2 = points[k] - points[i];
                let cross = d1.x * d2.y - d1.y * d2.x;
                if cross.abs() <= COLLINEAR_EPS * d1.norm() * d2.norm() {
                    return true;
                }
            }
        }
    }
    false
}

fn validate(set: &[Correspondence], opts: &RansacOptions) -> Result<(), HomographyError> {
    if opts.max_iters == 0 {
        return Err(HomographyError::InsufficientData(
            "iteration budget must be positive".into(),
        ));
    }
    if set.len() < MIN_CORRESPONDENCES {
        return Err(HomographyError::InsufficientData(format!(
            "need at least {MIN_CORRESPONDENCES} point correspondences, got {}",
            set.len()
        )));
    }
    if !opts.thresh.is_finite() || opts.thresh <= 0.0 {
        return Err(HomographyError::InvalidOptions(format!(
            "inlier threshold must be a positive number, got {}",
            opts.thresh
        )));
    }
    Ok(())
}

/// Estimate a homography with RANSAC, seeding [`StdRng`] from `opts.seed`.
///
/// Returns the homography refitted on the best inlier set together with the
/// indices of those inliers.
///
/// # Errors
///
/// - [`HomographyError::InsufficientData`] if `opts.max_iters == 0` or the set
///   has fewer than 4 correspondences.
/// - [`HomographyError::InvalidOptions`] for a non-positive threshold.
/// - [`HomographyError::NoModelFound`] if no iteration produced a model with
///   any support.
/// - Any error of the final [`normalized_homography`] refit, unchanged.
pub fn ransac_homography(
    set: &[Correspondence],
    opts: &RansacOptions,
) -> Result<RobustHomography, HomographyError> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    ransac_homography_with_rng(set, opts, &mut rng)
}

/// Estimate a homography with RANSAC, drawing samples from `rng`.
///
/// `opts.seed` is ignored. Runs on different threads must each own their
/// random source.
pub fn ransac_homography_with_rng<R: Rng + ?Sized>(
    set: &[Correspondence],
    opts: &RansacOptions,
    rng: &mut R,
) -> Result<RobustHomography, HomographyError> {
    validate(set, opts)?;

    let res = ransac_fit_with_rng::<HomographyEst, R>(set, opts, rng);
    if !res.success {
        return Err(HomographyError::NoModelFound { iters: res.iters });
    }

    let inlier_set = select_correspondences(set, &res.inliers);
    let homography = normalized_homography(&inlier_set)?;

    debug!(
        "ransac homography: {} / {} inliers (rms {:.3}), best at iteration {} of {}, {} failed fits",
        res.inliers.len(),
        set.len(),
        res.inlier_rms,
        res.best_iter,
        res.iters,
        res.failed_fits
    );

    Ok(RobustHomography {
        homography,
        inliers: res.inliers,
        inlier_rms: res.inlier_rms,
        iters: res.iters,
        best_iter: res.best_iter,
        failed_fits: res.failed_fits,
        support_history: res.support_history,
    })
}

/// RANSAC over the normalized DLT as a
/// [`HomographyEstimator`](crate::HomographyEstimator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RobustEstimator {
    /// Budget, inlier threshold and seed of every run.
    pub options: RansacOptions,
}

impl RobustEstimator {
    /// Robust estimator running with `options`.
    pub fn new(options: RansacOptions) -> Self {
        Self { options }
    }

    /// Run with a caller-supplied random source instead of `options.seed`.
    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &self,
        set: &[Correspondence],
        rng: &mut R,
    ) -> Result<RobustHomography, HomographyError> {
        ransac_homography_with_rng(set, &self.options, rng)
    }
}
