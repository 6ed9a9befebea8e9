//! Slice generation.
//!
//! Produces one descriptor per tile, in the same row-major order the atlas
//! was built in. Rectangles use a bottom-left origin, the convention sprite
//! importers expect, so the top grid row gets the largest `y`.
//!
//! Tiles are evaluated in parallel; the running index is the tile's
//! row-major position, so it never depends on scheduling.

use rayon::prelude::*;
use serde::Serialize;

use crate::atlas::GridGeometry;
use crate::error::{Result, TilepadError};
use crate::types::{Alignment, EmptyTileBehavior, Pivot, PixelBuffer, Rect, TileGridConfig};

use super::naming::tile_name;

/// A named tile region of the atlas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceDescriptor {
    pub name: String,
    /// Atlas pixels, bottom-left origin.
    pub rect: Rect,
    pub alignment: Alignment,
    pub pivot: Pivot,
    pub is_empty: bool,
}

/// Generate slices for an atlas built from a source of `source_size`.
///
/// The grid is recomputed from `source_size` and `config`, which must be
/// the same values the atlas was built with.
pub fn generate(
    atlas: &PixelBuffer,
    source_size: (u32, u32),
    base_name: &str,
    config: &TileGridConfig,
) -> Result<Vec<SliceDescriptor>> {
    let geometry = GridGeometry::new(source_size.0, source_size.1, config)?;
    generate_with(atlas, &geometry, base_name, config)
}

/// Generate slices for an already resolved grid.
pub fn generate_with(
    atlas: &PixelBuffer,
    geometry: &GridGeometry,
    base_name: &str,
    config: &TileGridConfig,
) -> Result<Vec<SliceDescriptor>> {
    let slices = (0..geometry.tile_count())
        .into_par_iter()
        .map(|index| slice_at(atlas, geometry, index, base_name, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(slices.into_iter().flatten().collect())
}

/// The descriptor for the tile at row-major `index`, or `None` if removed.
fn slice_at(
    atlas: &PixelBuffer,
    geometry: &GridGeometry,
    index: usize,
    base_name: &str,
    config: &TileGridConfig,
) -> Result<Option<SliceDescriptor>> {
    let coord = geometry.coord_at(index);
    let rect = geometry.slice_rect(coord);

    let region = rect
        .flip_y(geometry.atlas_height)
        .ok_or_else(|| {
            TilepadError::out_of_bounds(format!(
                "slice for tile ({}, {}) lies outside the atlas",
                coord.col, coord.row
            ))
        })?;
    atlas.check_rect(region)?;

    if config.empty_tile_behavior == EmptyTileBehavior::Remove
        && atlas.is_region_transparent(region)?
    {
        return Ok(None);
    }

    Ok(Some(SliceDescriptor {
        name: tile_name(
            base_name,
            index,
            coord,
            geometry.cols,
            geometry.rows,
            config.naming_scheme,
        ),
        rect,
        alignment: config.alignment,
        pivot: config.pivot,
        is_empty: false,
    }))
}
