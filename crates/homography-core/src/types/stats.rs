use crate::Real;
use serde::{Deserialize, Serialize};

/// Transfer-error statistics of a homography over a correspondence set, in
/// target-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReprojectionStats {
    /// Mean Euclidean error.
    pub mean: Real,
    /// Root-mean-square error.
    pub rms: Real,
    /// Largest single error.
    pub max: Real,
    /// Number of correspondences that contributed.
    pub count: usize,
}

impl ReprojectionStats {
    /// Aggregate a list of per-correspondence errors.
    ///
    /// Returns `None` for an empty list.
    pub fn from_errors(errors: &[Real]) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut max: Real = 0.0;
        for &e in errors {
            sum += e;
            sum_sq += e * e;
            max = max.max(e);
        }
        let n = errors.len() as Real;
        Some(Self {
            mean: sum / n,
            rms: (sum_sq / n).sqrt(),
            max,
            count: errors.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_from_errors() {
        let stats = ReprojectionStats::from_errors(&[3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 3.5).abs() < 1e-12);
        assert!((stats.rms - 12.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.max, 4.0);
        assert!(ReprojectionStats::from_errors(&[]).is_none());
    }
}
