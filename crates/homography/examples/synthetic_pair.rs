//! Estimate a homography from a synthetic, outlier-contaminated image pair
//! with each estimator variant and compare their transfer errors.
//!
//! Run with `cargo run -p homography --example synthetic_pair`.

use anyhow::Result;
use homography::linear::{reprojection_stats, transform_point};
use homography::prelude::*;
use homography::synthetic::{noise::UniformPixelNoise, planar};

fn main() -> Result<()> {
    let h_true = Mat3::new(
        0.93, -0.11, 64.0, //
        0.09, 1.02, -21.0, //
        1.4e-4, -0.6e-4, 1.0,
    );

    let grid = planar::grid_points_2d(8, 6, 90.0);
    let noise = UniformPixelNoise {
        seed: 42,
        max_abs_px: 0.4,
    };
    let mut set = planar::project_through(&h_true, &grid, &noise)?;
    let outliers: Vec<usize> = (0..set.len()).step_by(7).collect();
    planar::displace_targets(&mut set, &outliers, 45.0, 7);
    let clean: Vec<Correspondence> = set
        .iter()
        .enumerate()
        .filter(|(idx, _)| !outliers.contains(idx))
        .map(|(_, c)| *c)
        .collect();

    println!(
        "{} correspondences, {} outliers",
        set.len(),
        outliers.len()
    );

    let configs = [
        ("direct", EstimatorConfig::Direct),
        ("normalized", EstimatorConfig::Normalized),
        (
            "robust",
            EstimatorConfig::Robust(RansacOptions {
                max_iters: 300,
                thresh: 3.0,
                seed: 1,
            }),
        ),
    ];

    for (name, config) in &configs {
        match config.estimate(&set) {
            Ok(estimate) => {
                let stats = reprojection_stats(&estimate.homography, &clean)?;
                let corner = transform_point(&estimate.homography, &Pt2::new(0.0, 0.0))?;
                println!(
                    "{name:>10}: rms {:.3} px, max {:.3} px over clean points, (0,0) -> ({:.2}, {:.2}){}",
                    stats.rms,
                    stats.max,
                    corner.x,
                    corner.y,
                    estimate
                        .inliers
                        .map(|inl| format!(", {} inliers", inl.len()))
                        .unwrap_or_default()
                );
            }
            Err(err) => println!("{name:>10}: failed: {err}"),
        }
    }

    println!("config: {}", serde_json::to_string(&configs[2].1)?);
    Ok(())
}
