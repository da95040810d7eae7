//! Generic, model-agnostic RANSAC engine.
//!
//! To use this module, implement the [`Estimator`] trait for your model and
//! call [`ransac_fit`] (seeded from [`RansacOptions::seed`]) or
//! [`ransac_fit_with_rng`] (caller-supplied random source).
//!
//! The engine runs exactly `max_iters` iterations. Each iteration draws
//! `MIN_SAMPLES` distinct indices, fits a candidate model and counts the data
//! whose residual is strictly below the threshold. The best-supported
//! candidate and its inlier indices are returned; refitting on the inliers is
//! left to the caller, which knows how its own solver fails.
//!
//! The engine does not panic on failure: when no candidate gathers any
//! support, [`RansacResult::success`] is `false` and the model is `None`.

use crate::Real;
use log::{debug, trace};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration parameters for the generic RANSAC engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacOptions {
    /// Iteration budget. Every iteration consumes one slot, including those
    /// whose sample is degenerate or whose fit fails.
    pub max_iters: usize,
    /// Inlier residual threshold; a datum is an inlier iff its residual is
    /// strictly below it.
    pub thresh: Real,
    /// Random-number generator seed (for reproducibility).
    pub seed: u64,
}

impl Default for RansacOptions {
    fn default() -> Self {
        Self {
            max_iters: 400,
            thresh: 4.0,
            seed: 1_234_567,
        }
    }
}

/// Output of a RANSAC run.
///
/// Check the [`success`](Self::success) flag before using the model; if it is
/// `false`, then [`model`](Self::model) is `None` and `inliers` is empty.
#[derive(Debug, Clone)]
pub struct RansacResult<M> {
    /// Whether any candidate gathered at least one inlier.
    pub success: bool,
    /// Best candidate model (fitted on a minimal sample).
    pub model: Option<M>,
    /// Indices of the best candidate's inliers, ascending.
    pub inliers: Vec<usize>,
    /// Root-mean-square residual over inliers.
    pub inlier_rms: Real,
    /// Number of iterations performed.
    pub iters: usize,
    /// Iteration (1-based) that produced the best model; 0 if none.
    pub best_iter: usize,
    /// Iterations whose sample was rejected as degenerate or whose fit failed.
    pub failed_fits: usize,
    /// Best inlier count after each iteration.
    pub support_history: Vec<usize>,
}

impl<M> Default for RansacResult<M> {
    fn default() -> Self {
        Self {
            success: false,
            model: None,
            inliers: Vec::new(),
            inlier_rms: Real::INFINITY,
            iters: 0,
            best_iter: 0,
            failed_fits: 0,
            support_history: Vec::new(),
        }
    }
}

/// Generic estimator for RANSAC-like methods.
///
/// Implement this for your geometric models: lines, homographies, etc.
pub trait Estimator {
    type Datum;
    type Model;

    /// Minimal number of samples needed to estimate a model.
    const MIN_SAMPLES: usize;

    /// Fit a model from a subset of data indices.
    ///
    /// Return `None` if fitting fails.
    fn fit(data: &[Self::Datum], sample_indices: &[usize]) -> Option<Self::Model>;

    /// Residual/error for one datum (e.g. transfer error, distance).
    ///
    /// This should be a **non-negative scalar** in the same units as
    /// `opts.thresh`. Non-finite residuals never count as inliers.
    fn residual(model: &Self::Model, datum: &Self::Datum) -> Real;

    /// Optional degeneracy check on the sample subset.
    ///
    /// Default: assume non-degenerate.
    fn is_degenerate(_data: &[Self::Datum], _sample_indices: &[usize]) -> bool {
        false
    }
}

fn rms(vals: &[Real]) -> Real {
    if vals.is_empty() {
        return Real::INFINITY;
    }
    let ss: Real = vals.iter().map(|&v| v * v).sum();
    (ss / (vals.len() as Real)).sqrt()
}

/// Run RANSAC with a [`StdRng`] seeded from `opts.seed`.
///
/// Two calls with equal data and options return equal results.
pub fn ransac_fit<E: Estimator>(data: &[E::Datum], opts: &RansacOptions) -> RansacResult<E::Model> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    ransac_fit_with_rng::<E, _>(data, opts, &mut rng)
}

/// Run RANSAC drawing samples from a caller-supplied random source.
///
/// `opts.seed` is ignored. Concurrent runs must each own their `rng`.
///
/// Returns an unsuccessful result immediately (zero iterations) when
/// `max_iters == 0` or there are fewer data than `E::MIN_SAMPLES`.
pub fn ransac_fit_with_rng<E: Estimator, R: Rng + ?Sized>(
    data: &[E::Datum],
    opts: &RansacOptions,
    rng: &mut R,
) -> RansacResult<E::Model> {
    let mut best: RansacResult<E::Model> = RansacResult::default();

    if opts.max_iters == 0 || data.len() < E::MIN_SAMPLES {
        return best;
    }

    let all_indices: Vec<usize> = (0..data.len()).collect();
    let mut sample_idxs = vec![0usize; E::MIN_SAMPLES];

    let mut inliers = Vec::<usize>::with_capacity(data.len());
    let mut inlier_residuals = Vec::<Real>::with_capacity(data.len());
    best.support_history.reserve(opts.max_iters);

    for iter in 1..=opts.max_iters {
        best.iters = iter;

        // Sampling without replacement: the indices are always distinct.
        all_indices
            .as_slice()
            .choose_multiple(rng, E::MIN_SAMPLES)
            .enumerate()
            .for_each(|(k, &idx)| sample_idxs[k] = idx);

        let model = if E::is_degenerate(data, &sample_idxs) {
            trace!("iteration {iter}: degenerate sample {sample_idxs:?}");
            None
        } else {
            E::fit(data, &sample_idxs)
        };

        match model {
            None => best.failed_fits += 1,
            Some(model) => {
                inliers.clear();
                inlier_residuals.clear();
                for (i, datum) in data.iter().enumerate() {
                    let r = E::residual(&model, datum);
                    if r < opts.thresh {
                        inliers.push(i);
                        inlier_residuals.push(r);
                    }
                }

                // Ties keep the earlier model.
                if inliers.len() > best.inliers.len() {
                    debug!(
                        "iteration {iter}: support {} -> {}",
                        best.inliers.len(),
                        inliers.len()
                    );
                    best.success = true;
                    best.model = Some(model);
                    best.inliers.clone_from(&inliers);
                    best.inlier_rms = rms(&inlier_residuals);
                    best.best_iter = iter;
                }
            }
        }

        best.support_history.push(best.inliers.len());
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct LineModel {
        slope: f64,
        intercept: f64,
    }

    struct LineEstimator;

    impl Estimator for LineEstimator {
        type Datum = (f64, f64); // (x, y)
        type Model = LineModel;

        const MIN_SAMPLES: usize = 2;

        fn fit(data: &[Self::Datum], sample_indices: &[usize]) -> Option<Self::Model> {
            let p0 = data[sample_indices[0]];
            let p1 = data[sample_indices[1]];
            let dx = p1.0 - p0.0;
            let dy = p1.1 - p0.1;
            if dx.abs() < 1e-9 {
                return None;
            }
            let slope = dy / dx;
            let intercept = p0.1 - slope * p0.0;
            Some(LineModel { slope, intercept })
        }

        fn residual(model: &Self::Model, datum: &Self::Datum) -> f64 {
            // Perpendicular distance to the line y = m x + b
            let (x, y) = *datum;
            let numer = (model.slope * x - y + model.intercept).abs();
            let denom = (model.slope * model.slope + 1.0).sqrt();
            numer / denom
        }

        fn is_degenerate(_data: &[Self::Datum], sample_indices: &[usize]) -> bool {
            sample_indices.len() >= 2 && sample_indices[0] == sample_indices[1]
        }
    }

    fn default_opts() -> RansacOptions {
        RansacOptions {
            max_iters: 100,
            thresh: 0.05,
            seed: 42,
        }
    }

    fn noisy_line() -> Vec<(f64, f64)> {
        let mut data = Vec::new();
        for i in 0..10 {
            let x = i as f64 * 0.5;
            let y = 2.0 * x + 1.0 + (if i % 2 == 0 { 0.01 } else { -0.01 });
            data.push((x, y));
        }
        // Gross outliers
        data.push((5.0, -3.0));
        data.push((6.0, 10.0));
        data.push((7.0, -8.0));
        data
    }

    #[test]
    fn ransac_handles_insufficient_data() {
        let data = vec![(0.0, 0.0)];
        let res = ransac_fit::<LineEstimator>(&data, &default_opts());
        assert!(!res.success);
        assert!(res.model.is_none());
        assert!(res.inliers.is_empty());
        assert_eq!(res.iters, 0);
    }

    #[test]
    fn ransac_zero_budget_runs_nothing() {
        let opts = RansacOptions {
            max_iters: 0,
            ..default_opts()
        };
        let res = ransac_fit::<LineEstimator>(&noisy_line(), &opts);
        assert!(!res.success);
        assert_eq!(res.iters, 0);
        assert!(res.support_history.is_empty());
    }

    #[test]
    fn ransac_recovers_line_with_outliers() {
        let data = noisy_line();
        let opts = default_opts();
        let res = ransac_fit::<LineEstimator>(&data, &opts);

        assert!(res.success);
        let model = res.model.expect("model should be present");
        assert!((model.slope - 2.0).abs() < 0.05);
        assert!((model.intercept - 1.0).abs() < 0.1);
        assert!(res.inliers.iter().all(|&i| i < 10));
        assert!(res.inliers.len() >= 6);
        assert_eq!(res.iters, opts.max_iters);
    }

    #[test]
    fn support_history_is_monotonic_and_complete() {
        let opts = default_opts();
        let res = ransac_fit::<LineEstimator>(&noisy_line(), &opts);
        assert_eq!(res.support_history.len(), opts.max_iters);
        assert!(res.support_history.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*res.support_history.last().unwrap(), res.inliers.len());
        assert_eq!(res.support_history[res.best_iter - 1], res.inliers.len());
    }

    #[test]
    fn failed_fits_consume_budget() {
        // Vertical points: every fit is rejected by the line estimator.
        let data: Vec<(f64, f64)> = (0..6).map(|i| (1.0, i as f64)).collect();
        let opts = default_opts();
        let res = ransac_fit::<LineEstimator>(&data, &opts);
        assert!(!res.success);
        assert_eq!(res.iters, opts.max_iters);
        assert_eq!(res.failed_fits, opts.max_iters);
        assert!(res.support_history.iter().all(|&s| s == 0));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let data = noisy_line();
        let opts = default_opts();
        let a = ransac_fit::<LineEstimator>(&data, &opts);
        let b = ransac_fit::<LineEstimator>(&data, &opts);
        assert_eq!(a.inliers, b.inliers);
        assert_eq!(a.best_iter, b.best_iter);
        assert_eq!(a.support_history, b.support_history);

        let mut rng = StdRng::seed_from_u64(opts.seed);
        let c = ransac_fit_with_rng::<LineEstimator, _>(&data, &opts, &mut rng);
        assert_eq!(a.inliers, c.inliers);
        assert_eq!(a.best_iter, c.best_iter);
    }

    #[test]
    fn options_serde_defaults() {
        let opts: RansacOptions = serde_json::from_str(r#"{"thresh": 3.0}"#).unwrap();
        assert_eq!(opts.thresh, 3.0);
        assert_eq!(opts.max_iters, RansacOptions::default().max_iters);

        let json = serde_json::to_string_pretty(&opts).unwrap();
        let restored: RansacOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, opts);
    }
}
