//! Seeded synthetic terrain for demos and tests.
//!
//! Elevation is fractional Brownian motion over Perlin noise: a sum of
//! octaves with amplitude gain^i and frequency lacunarity^i, where
//! gain = lacunarity^(−H). The field is rescaled to `[0, relief]` and water
//! sources are picked among the lowest border cells, so the sea creeps in
//! from the edge as the water rises.
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::coords::GridLocation;
use crate::error::{Result, TidesError};
use crate::terrain::Terrain;

/// Parameters for [`generate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticParams {
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    /// Elevation of the highest cell; the lowest is always 0.
    pub relief: f64,
    /// Hurst exponent, 0-1. Higher values give smoother terrain.
    pub hurst: f64,
    pub octaves: u32,
    /// Number of water sources on the border.
    pub sources: usize,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 48,
            seed: 42,
            relief: 100.0,
            hurst: 0.75,
            octaves: 6,
            sources: 3,
        }
    }
}

/// Lowest fraction of border cells eligible to hold a source.
const SOURCE_POOL_FRACTION: f64 = 0.25;
/// Noise cycles across the longer side of the grid.
const BASE_CYCLES: f64 = 4.0;

/// Octave sum over Perlin noise, gain = lacunarity^(−H) with lacunarity 2.
fn fbm(noise: &Perlin, x: f64, y: f64, hurst: f64, octaves: u32) -> f64 {
    let gain = 2f64.powf(-hurst);
    (0..octaves)
        .fold((0.0, 1.0, 1.0), |(sum, amp, freq), _| {
            (sum + amp * noise.get([x * freq, y * freq]), amp * gain, freq * 2.0)
        })
        .0
}

/// Build a terrain from `params`. The same parameters always give the same
/// terrain.
pub fn generate(params: &SyntheticParams) -> Result<Terrain> {
    let SyntheticParams { rows, cols, .. } = *params;
    if rows == 0 || cols == 0 {
        return Err(TidesError::invalid(format!("synthetic grid {rows}x{cols} is empty")));
    }
    if params.sources == 0 {
        return Err(TidesError::invalid("synthetic terrain needs at least one source"));
    }
    if !(params.relief.is_finite() && params.relief >= 0.0) {
        return Err(TidesError::invalid(format!("relief {} must be finite and >= 0", params.relief)));
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let noise = Perlin::new(rng.gen());
    let hurst = params.hurst.clamp(0.0, 1.0);
    let octaves = params.octaves.max(1);
    let freq = BASE_CYCLES / rows.max(cols) as f64;

    let raw: Vec<f64> = (0..rows * cols)
        .map(|i| fbm(&noise, (i % cols) as f64 * freq, (i / cols) as f64 * freq, hurst, octaves))
        .collect();
    let lo = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    let scale = if span > 0.0 { params.relief / span } else { 0.0 };
    let heights: Vec<Vec<f64>> = raw
        .chunks(cols)
        .map(|row| row.iter().map(|&z| (z - lo) * scale).collect())
        .collect();

    // ── Sources: random picks among the lowest border cells ─────────────────
    let mut border: Vec<GridLocation> = (0..rows * cols)
        .map(|i| GridLocation::new(i / cols, i % cols))
        .filter(|l| l.row == 0 || l.col == 0 || l.row == rows - 1 || l.col == cols - 1)
        .collect();
    border.sort_by(|a, b| heights[a.row][a.col].total_cmp(&heights[b.row][b.col]));

    let n_sources = params.sources.min(border.len());
    let pool_len = ((border.len() as f64 * SOURCE_POOL_FRACTION).ceil() as usize)
        .clamp(n_sources, border.len());
    let mut sources: Vec<GridLocation> = border[..pool_len]
        .choose_multiple(&mut rng, n_sources)
        .copied()
        .collect();
    sources.sort();

    Terrain::new(heights, sources)
}
