//! Common interface over the three estimators and its serde configuration.
//!
//! The estimators compose by delegation: [`RobustEstimator`] fits
//! [`NormalizedSolver`] models, which solve the [`DirectSolver`] system on
//! normalized coordinates.

use crate::{
    dlt_homography, normalized_dlt, ransac_homography, DirectSolver, HomographyError,
    NormalizedSolver, RobustEstimator,
};
use homography_core::{Correspondence, Mat3, RansacOptions};
use serde::{Deserialize, Serialize};

/// Homography plus whatever by-products the estimator produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomographyEstimate {
    /// `target ~ H * source`, with `H[2,2] == 1`.
    pub homography: Mat3,
    /// Homography between the normalized point sets (normalized solver only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_homography: Option<Mat3>,
    /// Indices of the inliers used for the final fit (robust estimator only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inliers: Option<Vec<usize>>,
}

impl HomographyEstimate {
    fn from_homography(homography: Mat3) -> Self {
        Self {
            homography,
            normalized_homography: None,
            inliers: None,
        }
    }
}

/// Shared interface of the homography estimators.
pub trait HomographyEstimator {
    /// Estimate `H` such that `target ~ H * source` for the given set.
    fn estimate(&self, set: &[Correspondence]) -> Result<HomographyEstimate, HomographyError>;
}

impl HomographyEstimator for DirectSolver {
    fn estimate(&self, set: &[Correspondence]) -> Result<HomographyEstimate, HomographyError> {
        dlt_homography(set).map(HomographyEstimate::from_homography)
    }
}

impl HomographyEstimator for NormalizedSolver {
    fn estimate(&self, set: &[Correspondence]) -> Result<HomographyEstimate, HomographyError> {
        let res = normalized_dlt(set)?;
        Ok(HomographyEstimate {
            homography: res.homography,
            normalized_homography: Some(res.normalized_homography),
            inliers: None,
        })
    }
}

impl HomographyEstimator for RobustEstimator {
    fn estimate(&self, set: &[Correspondence]) -> Result<HomographyEstimate, HomographyError> {
        let res = ransac_homography(set, &self.options)?;
        Ok(HomographyEstimate {
            homography: res.homography,
            normalized_homography: None,
            inliers: Some(res.inliers),
        })
    }
}

/// Estimator selection, as it appears in configuration files.
///
/// ```
/// use homography_linear::EstimatorConfig;
///
/// let cfg: EstimatorConfig =
///     serde_json::from_str(r#"{"type": "robust", "max_iters": 200, "thresh": 3.0}"#).unwrap();
/// assert!(matches!(cfg, EstimatorConfig::Robust(ref o) if o.max_iters == 200));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorConfig {
    /// Unnormalized DLT.
    Direct,
    /// Hartley-normalized DLT.
    Normalized,
    /// RANSAC over the normalized DLT.
    Robust(RansacOptions),
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::Robust(RansacOptions::default())
    }
}

impl HomographyEstimator for EstimatorConfig {
    fn estimate(&self, set: &[Correspondence]) -> Result<HomographyEstimate, HomographyError> {
        match self {
            EstimatorConfig::Direct => DirectSolver.estimate(set),
            EstimatorConfig::Normalized => NormalizedSolver.estimate(set),
            EstimatorConfig::Robust(options) => RobustEstimator::new(options.clone()).estimate(set),
        }
    }
}
