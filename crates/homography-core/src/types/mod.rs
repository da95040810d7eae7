//! Common types shared across the homography workspace.
//!
//! This module provides the correspondence data model consumed by every
//! estimator and the reprojection statistics they report.

mod correspondence;
mod stats;

pub use correspondence::*;
pub use stats::*;
