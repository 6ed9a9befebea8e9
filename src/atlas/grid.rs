//! Grid arithmetic: tile counts, atlas size and per-tile rectangles.
//!
//! The grid only covers whole tiles. Pixels to the right of the last full
//! column or below the last full row are never read; [`GridGeometry::remainder`]
//! reports how many there are so callers can warn about them.

use crate::error::{Result, TilepadError};
use crate::types::{Rect, TileGridConfig};

/// Position of a tile in the source grid. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub col: u32,
    pub row: u32,
}

impl TileCoord {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Number of whole tiles along each axis, as `(cols, rows)`.
pub fn compute_grid(
    source_width: u32,
    source_height: u32,
    tile_width: u32,
    tile_height: u32,
) -> Result<(u32, u32)> {
    if tile_width == 0 || tile_height == 0 {
        return Err(TilepadError::invalid_config(
            format!("tile size must be positive, got {}x{}", tile_width, tile_height),
            Some("Set both tile dimensions to at least 1"),
        ));
    }
    Ok((source_width / tile_width, source_height / tile_height))
}

/// Atlas dimensions for a grid, as `(width, height)`.
pub fn compute_atlas_size(
    cols: u32,
    rows: u32,
    tile_width: u32,
    tile_height: u32,
    padding: u32,
) -> Result<(u32, u32)> {
    let cell = |tile: u32| {
        padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(tile))
    };
    let width = cell(tile_width).and_then(|c| c.checked_mul(cols));
    let height = cell(tile_height).and_then(|c| c.checked_mul(rows));

    width.zip(height).ok_or_else(|| {
        TilepadError::invalid_config(
            format!(
                "a {}x{} grid of {}x{} tiles with padding {} is too large",
                cols, rows, tile_width, tile_height, padding
            ),
            None,
        )
    })
}

/// The resolved layout of one source sheet and its atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub source_width: u32,
    pub source_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub padding: u32,
    pub cols: u32,
    pub rows: u32,
    pub atlas_width: u32,
    pub atlas_height: u32,
}

impl GridGeometry {
    /// Resolve the grid for a source of the given size.
    ///
    /// Fails with `InvalidConfig` when the config is invalid or the source
    /// is smaller than a single tile.
    pub fn new(source_width: u32, source_height: u32, config: &TileGridConfig) -> Result<Self> {
        config.validate()?;

        let (tile_width, tile_height, padding) =
            (config.tile_width, config.tile_height, config.padding);
        let (cols, rows) = compute_grid(source_width, source_height, tile_width, tile_height)?;

        if cols == 0 || rows == 0 {
            return Err(TilepadError::invalid_config(
                format!(
                    "{}x{} source is smaller than one {}x{} tile",
                    source_width, source_height, tile_width, tile_height
                ),
                Some("Check the tile size against the image dimensions"),
            ));
        }

        let (atlas_width, atlas_height) =
            compute_atlas_size(cols, rows, tile_width, tile_height, padding)?;

        Ok(Self {
            source_width,
            source_height,
            tile_width,
            tile_height,
            padding,
            cols,
            rows,
            atlas_width,
            atlas_height,
        })
    }

    pub fn cell_width(&self) -> u32 {
        self.tile_width + 2 * self.padding
    }

    pub fn cell_height(&self) -> u32 {
        self.tile_height + 2 * self.padding
    }

    pub fn atlas_size(&self) -> (u32, u32) {
        (self.atlas_width, self.atlas_height)
    }

    pub fn tile_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Source pixels outside the grid, as `(columns, rows)`.
    pub fn remainder(&self) -> (u32, u32) {
        (
            self.source_width % self.tile_width,
            self.source_height % self.tile_height,
        )
    }

    /// Tile at a row-major index.
    pub fn coord_at(&self, index: usize) -> TileCoord {
        let cols = self.cols as usize;
        TileCoord::new((index % cols) as u32, (index / cols) as u32)
    }

    /// Tiles of one grid row, left to right.
    pub fn row_coords(&self, row: u32) -> impl Iterator<Item = TileCoord> {
        (0..self.cols).map(move |col| TileCoord::new(col, row))
    }

    /// The tile's pixels in the source image.
    pub fn source_rect(&self, coord: TileCoord) -> Rect {
        Rect::new(
            coord.col * self.tile_width,
            coord.row * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    /// The tile's interior in the atlas, top-left origin.
    pub fn dest_rect(&self, coord: TileCoord) -> Rect {
        Rect::new(
            coord.col * self.cell_width() + self.padding,
            coord.row * self.cell_height() + self.padding,
            self.tile_width,
            self.tile_height,
        )
    }

    /// The tile's interior in the atlas, bottom-left origin.
    ///
    /// Row 0 is the top of the atlas, so it gets the largest `y`.
    pub fn slice_rect(&self, coord: TileCoord) -> Rect {
        Rect::new(
            coord.col * self.cell_width() + self.padding,
            self.atlas_height - (coord.row + 1) * self.cell_height() + self.padding,
            self.tile_width,
            self.tile_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_grid_floors() {
        assert_eq!(compute_grid(4, 4, 2, 2).unwrap(), (2, 2));
        assert_eq!(compute_grid(35, 17, 16, 8).unwrap(), (2, 2));
        assert_eq!(compute_grid(3, 3, 4, 4).unwrap(), (0, 0));
    }

    #[test]
    fn test_compute_grid_zero_tile() {
        assert!(matches!(
            compute_grid(4, 4, 0, 2),
            Err(TilepadError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_compute_atlas_size() {
        assert_eq!(compute_atlas_size(2, 2, 2, 2, 1).unwrap(), (8, 8));
        assert_eq!(compute_atlas_size(3, 1, 16, 8, 0).unwrap(), (48, 8));
        assert_eq!(compute_atlas_size(4, 3, 8, 8, 2).unwrap(), (48, 36));
        assert!(compute_atlas_size(u32::MAX, 1, 2, 2, 1).is_err());
    }

    #[test]
    fn test_geometry_matches_formulas() {
        for padding in 0..4 {
            let config = TileGridConfig::new(5, 3).with_padding(padding);
            let g = GridGeometry::new(23, 10, &config).unwrap();
            assert_eq!((g.cols, g.rows), (4, 3));
            assert_eq!(g.atlas_width, 4 * (5 + 2 * padding));
            assert_eq!(g.atlas_height, 3 * (3 + 2 * padding));
            assert_eq!(g.remainder(), (3, 1));
        }
    }

    #[test]
    fn test_geometry_source_smaller_than_tile() {
        let config = TileGridConfig::new(8, 8);
        assert!(matches!(
            GridGeometry::new(7, 16, &config),
            Err(TilepadError::InvalidConfig { .. })
        ));
        assert!(GridGeometry::new(16, 7, &config).is_err());
    }

    #[test]
    fn test_coords_are_row_major() {
        let g = GridGeometry::new(6, 4, &TileGridConfig::new(2, 2)).unwrap();
        let coords: Vec<_> = (0..g.tile_count())
            .map(|i| g.coord_at(i))
            .map(|c| (c.row, c.col))
            .collect();
        assert_eq!(
            coords,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_rects() {
        let g = GridGeometry::new(4, 4, &TileGridConfig::new(2, 2)).unwrap();
        let c = TileCoord::new(1, 0);
        assert_eq!(g.source_rect(c), Rect::new(2, 0, 2, 2));
        assert_eq!(g.dest_rect(c), Rect::new(5, 1, 2, 2));
        assert_eq!(g.slice_rect(c), Rect::new(5, 5, 2, 2));
        assert_eq!(g.slice_rect(TileCoord::new(0, 1)), Rect::new(1, 1, 2, 2));
    }

    #[test]
    fn test_slice_rect_is_flipped_dest_rect() {
        let g = GridGeometry::new(40, 30, &TileGridConfig::new(8, 6).with_padding(2)).unwrap();
        for coord in (0..g.tile_count()).map(|i| g.coord_at(i)) {
            assert_eq!(
                g.slice_rect(coord).flip_y(g.atlas_height),
                Some(g.dest_rect(coord))
            );
        }
    }
}
