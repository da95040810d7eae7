//! Point correspondences between two images.

use crate::Pt2;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Which image of a pair a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The image the homography maps from.
    Source,
    /// The image the homography maps to.
    Target,
}

/// A matched pair of points: `source` in image A depicts the same feature as
/// `target` in image B.
///
/// A correspondence set is an ordered slice of these. Estimators never
/// reorder it, so inlier indices always refer back to the caller's slice.
///
/// # Example
///
/// ```
/// use homography_core::{Correspondence, Pt2, Side};
///
/// let c = Correspondence::new(Pt2::new(10.0, 20.0), Pt2::new(12.0, 19.0));
/// assert_eq!(c.point(Side::Target), Pt2::new(12.0, 19.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    /// Point in the source image.
    pub source: Pt2,
    /// Matching point in the target image.
    pub target: Pt2,
}

impl Correspondence {
    /// Pair a source point with its target.
    pub fn new(source: Pt2, target: Pt2) -> Self {
        Self { source, target }
    }

    /// Point on the requested side of the pair.
    pub fn point(&self, side: Side) -> Pt2 {
        match side {
            Side::Source => self.source,
            Side::Target => self.target,
        }
    }

    /// Both coordinates of both points are finite.
    pub fn is_finite(&self) -> bool {
        self.source.x.is_finite()
            && self.source.y.is_finite()
            && self.target.x.is_finite()
            && self.target.y.is_finite()
    }
}

/// Zip two parallel point lists into a correspondence set.
///
/// # Errors
///
/// Returns an error if the source and target point counts don't match.
pub fn correspondences_from_points(source: &[Pt2], target: &[Pt2]) -> Result<Vec<Correspondence>> {
    ensure!(
        source.len() == target.len(),
        "source / target point counts must match: {} vs {}",
        source.len(),
        target.len()
    );
    Ok(source
        .iter()
        .zip(target.iter())
        .map(|(&s, &t)| Correspondence::new(s, t))
        .collect())
}

/// Collect the points of one side of a correspondence set.
pub fn side_points(set: &[Correspondence], side: Side) -> Vec<Pt2> {
    set.iter().map(|c| c.point(side)).collect()
}

/// Copy the correspondences at `indices`, preserving the index order.
///
/// # Panics
///
/// Panics if any index is out of bounds.
pub fn select_correspondences(set: &[Correspondence], indices: &[usize]) -> Vec<Correspondence> {
    indices.iter().map(|&idx| set[idx]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_points_requires_equal_lengths() {
        let a = vec![Pt2::new(0.0, 0.0), Pt2::new(1.0, 0.0)];
        let b = vec![Pt2::new(5.0, 5.0)];
        assert!(correspondences_from_points(&a, &b).is_err());

        let set = correspondences_from_points(&a, &a).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[1].source, set[1].target);
    }

    #[test]
    fn select_keeps_requested_order() {
        let set: Vec<_> = (0..5)
            .map(|i| Correspondence::new(Pt2::new(i as f64, 0.0), Pt2::new(0.0, i as f64)))
            .collect();
        let picked = select_correspondences(&set, &[3, 0, 4]);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0].source.x, 3.0);
        assert_eq!(picked[1].source.x, 0.0);
        assert_eq!(side_points(&picked, Side::Target)[2].y, 4.0);
    }

    #[test]
    fn correspondence_serde_roundtrip() {
        let c = Correspondence::new(Pt2::new(1.5, 2.5), Pt2::new(-3.0, 4.0));
        let json = serde_json::to_string(&c).unwrap();
        let restored: Correspondence = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, c);

        let side: Side = serde_json::from_str("\"target\"").unwrap();
        assert_eq!(side, Side::Target);
    }

    #[test]
    fn non_finite_points_are_flagged() {
        let good = Correspondence::new(Pt2::new(1.0, 2.0), Pt2::new(3.0, 4.0));
        let bad = Correspondence::new(Pt2::new(f64::NAN, 2.0), Pt2::new(3.0, 4.0));
        assert!(good.is_finite());
        assert!(!bad.is_finite());
    }
}
