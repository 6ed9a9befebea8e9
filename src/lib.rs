//! tilepad - padded tile atlases from gridded sprite sheets
//!
//! Splits a sprite sheet into a regular grid, copies every tile into its own
//! padded cell of a new atlas with the tile's edges bled into the padding,
//! and describes each tile as a named slice for sprite importers.

pub mod atlas;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod png;
pub mod sheet;
pub mod slice;
pub mod types;

pub use atlas::{build, compute_atlas_size, compute_grid, mask, GridGeometry, TileCoord};
pub use error::{Result, TilepadError};
pub use manifest::{Manifest, TileSize, MANIFEST_FILENAME};
pub use pipeline::{process, TileSheet};
pub use png::{read_png, write_png};
pub use sheet::{sheet_json, write_sheet_json};
pub use slice::{generate, SliceDescriptor};
pub use types::{
    Alignment, Colour, EmptyTileBehavior, NamingScheme, Pivot, PixelBuffer, Rect, TileGridConfig,
    TransparencyMode,
};
