//! The full source-to-sheet pass: build the atlas, then slice it.

use crate::atlas::{self, GridGeometry};
use crate::error::Result;
use crate::slice::{self, SliceDescriptor};
use crate::types::{PixelBuffer, TileGridConfig};

/// A padded atlas together with its slices.
#[derive(Debug, Clone)]
pub struct TileSheet {
    pub geometry: GridGeometry,
    pub atlas: PixelBuffer,
    pub slices: Vec<SliceDescriptor>,
}

impl TileSheet {
    /// Tiles dropped because they were empty.
    pub fn removed(&self) -> usize {
        self.geometry.tile_count() - self.slices.len()
    }
}

/// Build the atlas for `source` and generate its slices.
///
/// Either both steps succeed or nothing is returned.
pub fn process(
    source: &PixelBuffer,
    base_name: &str,
    config: &TileGridConfig,
) -> Result<TileSheet> {
    let geometry = GridGeometry::new(source.width(), source.height(), config)?;
    let atlas = atlas::build_with(source, &geometry, config)?;
    let slices = slice::generate_with(&atlas, &geometry, base_name, config)?;

    Ok(TileSheet {
        geometry,
        atlas,
        slices,
    })
}
