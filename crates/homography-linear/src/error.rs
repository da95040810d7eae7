use thiserror::Error;

/// Failure modes of the homography estimators.
///
/// Every error is raised where it is detected and returned to the caller;
/// the only failures absorbed internally are per-iteration fit failures
/// inside RANSAC.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HomographyError {
    /// The input points cannot be conditioned (empty, coincident or not finite).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    /// A transform has a zero or undefined scale/depth component, or is singular.
    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),
    /// The linear system is underdetermined.
    #[error("underdetermined system: need at least 4 point correspondences, got {0}")]
    Precision(usize),
    /// RANSAC preconditions are not met.
    #[error("insufficient data for ransac: {0}")]
    InsufficientData(String),
    /// RANSAC exhausted its budget without a supported model.
    #[error("ransac failed to find a consensus homography in {iters} iterations")]
    NoModelFound { iters: usize },
    /// RANSAC options are out of range (e.g. a non-positive threshold).
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
