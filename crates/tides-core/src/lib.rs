//! Rising-water analysis over a static elevation grid.
//!
//! A [`Terrain`] is built once and borrowed by every query. Each query that
//! depends on the water level runs a fresh flood pass; nothing is cached.
pub mod analytics;
pub mod coords;
pub mod error;
pub mod flood;
pub mod mask;
pub mod sweep;
pub mod synthetic;
pub mod terrain;

pub use analytics::{
    count_islands, elevation_extrema, flood_report, height_above_water, is_flooded, label_islands,
    land_delta, total_visible_land, FloodReport, IslandMap,
};
pub use coords::GridLocation;
pub use error::{Result, TidesError};
pub use flood::{flooded_regions, reaches};
pub use mask::FloodedMask;
pub use sweep::{flood_sweep, sweep_heights, MAX_SWEEP_STEPS};
pub use synthetic::SyntheticParams;
pub use terrain::{Terrain, TerrainFile};
