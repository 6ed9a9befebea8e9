//! Padded atlas construction.
//!
//! - `grid` - tile counts, atlas size and per-tile rectangles
//! - `mask` - colour-key transparency applied to every source read
//! - `bleed` - edge replication into each tile's padding
//! - `builder` - the full source-to-atlas pass

pub mod bleed;
mod builder;
mod grid;
mod mask;

pub use builder::{build, build_with};
pub use grid::{compute_atlas_size, compute_grid, GridGeometry, TileCoord};
pub use mask::mask;
