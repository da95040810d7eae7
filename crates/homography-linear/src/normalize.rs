//! Hartley point normalization.
//!
//! Normalizing points before the DLT improves numerical stability by
//! centering the data at the origin and scaling it so that the mean distance
//! from the origin is `√2`. Pixel coordinates in the hundreds otherwise make
//! `AᵗA` badly conditioned.
//!
//! # References
//!
//! Hartley & Zisserman, "Multiple View Geometry in Computer Vision", 2nd ed.,
//! Algorithm 4.2 (Normalized DLT)

use crate::HomographyError;
use homography_core::{Correspondence, Mat3, Pt2, Real, Side};

/// Similarity `T` for the selected side of a correspondence set.
///
/// Applying `T` to the selected points yields a cloud centered at the origin
/// with mean distance `√2` from it.
///
/// # Errors
///
/// [`HomographyError::DegenerateInput`] if the set is empty, all selected
/// points coincide, or a coordinate is not finite.
///
/// # Example
///
/// ```
/// use homography_core::{Correspondence, Pt2, Side};
/// use homography_linear::normalization_transform;
///
/// let set = vec![
///     Correspondence::new(Pt2::new(100.0, 200.0), Pt2::new(0.0, 0.0)),
///     Correspondence::new(Pt2::new(200.0, 300.0), Pt2::new(1.0, 1.0)),
/// ];
/// let t = normalization_transform(&set, Side::Source).unwrap();
/// assert!((t[(2, 2)] - 1.0).abs() < 1e-12);
/// ```
pub fn normalization_transform(
    set: &[Correspondence],
    side: Side,
) -> Result<Mat3, HomographyError> {
    similarity_for(set.iter().map(|c| c.point(side)), set.len())
}

/// Hartley normalization for a plain point list.
///
/// # Returns
///
/// The normalized points and the 3×3 transform `T` such that
/// `p_norm = T * p_homogeneous`.
///
/// # Errors
///
/// Same conditions as [`normalization_transform`].
pub fn normalize_points_2d(points: &[Pt2]) -> Result<(Vec<Pt2>, Mat3), HomographyError> {
    let t = similarity_for(points.iter().copied(), points.len())?;
    let norm = points
        .iter()
        .map(|p| Pt2::new(t[(0, 0)] * p.x + t[(0, 2)], t[(1, 1)] * p.y + t[(1, 2)]))
        .collect();
    Ok((norm, t))
}

fn similarity_for<I>(points: I, n: usize) -> Result<Mat3, HomographyError>
where
    I: Iterator<Item = Pt2> + Clone,
{
    if n == 0 {
        return Err(HomographyError::DegenerateInput(
            "cannot normalize an empty point set".into(),
        ));
    }

    let n_real = n as Real;
    let (mut cx, mut cy) = (0.0, 0.0);
    for p in points.clone() {
        cx += p.x;
        cy += p.y;
    }
    cx /= n_real;
    cy /= n_real;

    let mut dist_sum = 0.0;
    for p in points {
        let dx = p.x - cx;
        let dy = p.y - cy;
        dist_sum += (dx * dx + dy * dy).sqrt();
    }

    if !dist_sum.is_finite() || dist_sum <= Real::EPSILON {
        return Err(HomographyError::DegenerateInput(format!(
            "all {n} points coincide or are not finite"
        )));
    }

    // √2 over the mean distance from the centroid.
    let scale = std::f64::consts::SQRT_2 * n_real / dist_sum;
    Ok(Mat3::new(
        scale,
        0.0,
        -scale * cx,
        0.0,
        scale,
        -scale * cy,
        0.0,
        0.0,
        1.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform_point;

    fn centroid_and_mean_dist(points: &[Pt2]) -> (Real, Real, Real) {
        let n = points.len() as Real;
        let cx = points.iter().map(|p| p.x).sum::<Real>() / n;
        let cy = points.iter().map(|p| p.y).sum::<Real>() / n;
        let mean_dist = points
            .iter()
            .map(|p| (p.x * p.x + p.y * p.y).sqrt())
            .sum::<Real>()
            / n;
        (cx, cy, mean_dist)
    }

    #[test]
    fn normalize_2d_centering() {
        let points = vec![
            Pt2::new(100.0, 200.0),
            Pt2::new(200.0, 300.0),
            Pt2::new(150.0, 250.0),
            Pt2::new(640.0, 12.0),
        ];

        let (norm, _t) = normalize_points_2d(&points).unwrap();
        let (cx, cy, mean_dist) = centroid_and_mean_dist(&norm);
        assert!(cx.abs() < 1e-10, "Centroid x not at origin: {}", cx);
        assert!(cy.abs() < 1e-10, "Centroid y not at origin: {}", cy);
        assert!(
            (mean_dist - 2.0_f64.sqrt()).abs() < 1e-10,
            "Mean distance not sqrt(2): {}",
            mean_dist
        );
    }

    #[test]
    fn transform_selects_requested_side() {
        let set = vec![
            Correspondence::new(Pt2::new(0.0, 0.0), Pt2::new(500.0, 500.0)),
            Correspondence::new(Pt2::new(2.0, 0.0), Pt2::new(900.0, 500.0)),
            Correspondence::new(Pt2::new(0.0, 2.0), Pt2::new(500.0, 900.0)),
        ];

        for side in [Side::Source, Side::Target] {
            let t = normalization_transform(&set, side).unwrap();
            let mapped: Vec<Pt2> = set
                .iter()
                .map(|c| transform_point(&t, &c.point(side)).unwrap())
                .collect();
            let (cx, cy, mean_dist) = centroid_and_mean_dist(&mapped);
            assert!(cx.abs() < 1e-10 && cy.abs() < 1e-10, "{side:?}");
            assert!((mean_dist - 2.0_f64.sqrt()).abs() < 1e-10, "{side:?}");
        }

        let t_src = normalization_transform(&set, Side::Source).unwrap();
        let t_dst = normalization_transform(&set, Side::Target).unwrap();
        assert!((t_src[(0, 0)] / t_dst[(0, 0)] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn two_distinct_points_are_enough() {
        let (norm, _) = normalize_points_2d(&[Pt2::new(1.0, 1.0), Pt2::new(3.0, 1.0)]).unwrap();
        assert!((norm[0] - Pt2::new(-2.0_f64.sqrt(), 0.0)).norm() < 1e-12);
        assert!((norm[1] - Pt2::new(2.0_f64.sqrt(), 0.0)).norm() < 1e-12);
    }

    #[test]
    fn mean_distance_is_sqrt2_for_any_count() {
        for n in [3usize, 4, 9, 25] {
            let points: Vec<Pt2> = (0..n)
                .map(|i| Pt2::new(37.0 * i as Real + 500.0, (i * i) as Real * 3.5 - 80.0))
                .collect();
            let (norm, _) = normalize_points_2d(&points).unwrap();
            let (_, _, mean_dist) = centroid_and_mean_dist(&norm);
            assert!((mean_dist - 2.0_f64.sqrt()).abs() < 1e-10, "n={n}: {mean_dist}");

            // Already normalized points need no further conditioning.
            let (_, t_again) = normalize_points_2d(&norm).unwrap();
            assert!((t_again - Mat3::identity()).amax() < 1e-10, "n={n}");
        }
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let p = Pt2::new(42.0, -7.0);
        let set: Vec<_> = (0..5)
            .map(|i| Correspondence::new(p, Pt2::new(i as Real, 0.0)))
            .collect();
        let err = normalization_transform(&set, Side::Source).unwrap_err();
        assert!(matches!(err, HomographyError::DegenerateInput(_)));
        assert!(normalization_transform(&set, Side::Target).is_ok());
    }

    #[test]
    fn empty_and_non_finite_inputs_are_degenerate() {
        assert!(matches!(
            normalize_points_2d(&[]),
            Err(HomographyError::DegenerateInput(_))
        ));
        assert!(matches!(
            normalize_points_2d(&[Pt2::new(0.0, 0.0), Pt2::new(f64::NAN, 1.0)]),
            Err(HomographyError::DegenerateInput(_))
        ));
        assert!(matches!(
            normalize_points_2d(&[Pt2::new(3.0, 3.0)]),
            Err(HomographyError::DegenerateInput(_))
        ));
    }
}
