//! Rising-water sweeps: one [`FloodReport`] per water height.
//!
//! Heights are independent, so with the `threading` feature they are
//! evaluated on the rayon pool. Output order always follows input order.
use tracing::info;

use crate::analytics::{flood_report, FloodReport};
use crate::terrain::Terrain;

/// Slack for the final step so `0.1`-style increments still land on `to`.
const STEP_EPSILON: f64 = 1e-9;
/// Longest sweep `sweep_heights` will produce.
pub const MAX_SWEEP_STEPS: usize = 100_000;

/// Heights `from, from + step, …` up to and including `to`.
///
/// Empty when `step` is not a positive finite number, when either bound is
/// not finite, when `to < from`, or when the range would need more than
/// [`MAX_SWEEP_STEPS`] heights.
pub fn sweep_heights(from: f64, to: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) || !from.is_finite() || !to.is_finite() || to < from {
        return Vec::new();
    }
    let steps = ((to - from) / step + STEP_EPSILON).floor();
    if steps >= MAX_SWEEP_STEPS as f64 {
        return Vec::new();
    }
    let n = steps as usize;
    (0..=n).map(|i| from + i as f64 * step).collect()
}

/// Flood report for each height in `heights`.
pub fn flood_sweep(terrain: &Terrain, heights: &[f64]) -> Vec<FloodReport> {
    #[cfg(feature = "threading")]
    let reports: Vec<FloodReport> = {
        use rayon::prelude::*;
        heights.par_iter().map(|&h| flood_report(terrain, h)).collect()
    };
    #[cfg(not(feature = "threading"))]
    let reports: Vec<FloodReport> = heights.iter().map(|&h| flood_report(terrain, h)).collect();

    info!(heights = heights.len(), "flood sweep complete");
    reports
}
