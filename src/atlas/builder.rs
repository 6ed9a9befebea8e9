//! Atlas construction.
//!
//! Every tile of the source grid is copied into its own padded cell of the
//! atlas and its edges are bled into the padding. Cells never overlap, so
//! each grid row is written by its own rayon task into a disjoint band of
//! the atlas.

use rayon::prelude::*;

use crate::error::Result;
use crate::types::{PixelBuffer, PixelSink, Rect, TileGridConfig};

use super::bleed;
use super::grid::GridGeometry;
use super::mask::read_masked;

/// Build the padded atlas for a source sheet.
///
/// Fails with `InvalidConfig` before allocating anything when the config is
/// invalid or the source holds less than one whole tile.
pub fn build(source: &PixelBuffer, config: &TileGridConfig) -> Result<PixelBuffer> {
    let geometry = GridGeometry::new(source.width(), source.height(), config)?;
    build_with(source, &geometry, config)
}

/// Build the atlas for an already resolved grid.
pub fn build_with(
    source: &PixelBuffer,
    geometry: &GridGeometry,
    config: &TileGridConfig,
) -> Result<PixelBuffer> {
    let (width, height) = geometry.atlas_size();
    let cell_height = geometry.cell_height();
    let mut atlas = PixelBuffer::new(width, height);

    atlas.bands_mut(cell_height)?.try_for_each(|mut band| -> Result<()> {
        let row = band.first_row() / cell_height;
        for coord in geometry.row_coords(row) {
            let from = geometry.source_rect(coord);
            let to = geometry.dest_rect(coord);
            source.check_rect(from)?;
            copy_tile(source, &mut band, from, to, config)?;
            bleed::fill(source, &mut band, from, to, config)?;
        }
        Ok(())
    })?;

    Ok(atlas)
}

/// Copy the masked pixels of `from` into `to` (same size).
fn copy_tile<S: PixelSink>(
    source: &PixelBuffer,
    atlas: &mut S,
    from: Rect,
    to: Rect,
    config: &TileGridConfig,
) -> Result<()> {
    for dy in 0..from.h {
        for dx in 0..from.w {
            let colour = read_masked(source, from.x + dx, from.y + dy, config)?;
            atlas.put(to.x + dx, to.y + dy, colour)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TilepadError;
    use crate::types::Colour;

    /// Every pixel distinct: r = x, g = y.
    fn gradient(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| Colour::rgb(x as u8, y as u8, 100))
    }

    #[test]
    fn test_four_by_four_example() {
        let source = gradient(4, 4);
        let atlas = build(&source, &TileGridConfig::new(2, 2)).unwrap();

        assert_eq!(atlas.size(), (8, 8));
        // tile (0, 0) interior
        for (ax, ay, sx, sy) in [(1, 1, 0, 0), (2, 1, 1, 0), (1, 2, 0, 1), (2, 2, 1, 1)] {
            assert_eq!(atlas.get(ax, ay).unwrap(), source.get(sx, sy).unwrap());
        }
        // left band
        assert_eq!(atlas.get(0, 1).unwrap(), source.get(0, 0).unwrap());
        assert_eq!(atlas.get(0, 2).unwrap(), source.get(0, 1).unwrap());
        // top-left corner
        assert_eq!(atlas.get(0, 0).unwrap(), source.get(0, 0).unwrap());
        // tile (1, 1) sits in the bottom-right cell
        assert_eq!(atlas.get(5, 5).unwrap(), source.get(2, 2).unwrap());
        assert_eq!(atlas.get(7, 7).unwrap(), source.get(3, 3).unwrap());
    }

    #[test]
    fn test_every_band_replicates_its_edge() {
        let source = gradient(9, 8);
        let config = TileGridConfig::new(3, 4).with_padding(2);
        let geometry = GridGeometry::new(9, 8, &config).unwrap();
        let atlas = build(&source, &config).unwrap();
        let p = config.padding;

        for coord in (0..geometry.tile_count()).map(|i| geometry.coord_at(i)) {
            let from = geometry.source_rect(coord);
            let to = geometry.dest_rect(coord);
            let src = |x, y| source.get(x, y).unwrap();
            for layer in 0..p {
                for dy in 0..from.h {
                    assert_eq!(atlas.get(to.x - layer - 1, to.y + dy).unwrap(), src(from.x, from.y + dy));
                    assert_eq!(atlas.get(to.x_max() + layer, to.y + dy).unwrap(), src(from.x_max() - 1, from.y + dy));
                }
                for dx in 0..from.w {
                    assert_eq!(atlas.get(to.x + dx, to.y - layer - 1).unwrap(), src(from.x + dx, from.y));
                    assert_eq!(atlas.get(to.x + dx, to.y_max() + layer).unwrap(), src(from.x + dx, from.y_max() - 1));
                }
            }
            for x in 0..p {
                for y in 0..p {
                    assert_eq!(atlas.get(to.x - x - 1, to.y - y - 1).unwrap(), src(from.x, from.y));
                    assert_eq!(atlas.get(to.x_max() + x, to.y_max() + y).unwrap(), src(from.x_max() - 1, from.y_max() - 1));
                }
            }
        }
    }

    #[test]
    fn test_no_transparent_pixels_left_with_opaque_source() {
        let source = gradient(6, 6);
        let atlas = build(&source, &TileGridConfig::new(3, 2).with_padding(1)).unwrap();
        assert!(atlas.pixels().iter().all(|c| c.a == 255));
    }

    #[test]
    fn test_remainder_pixels_are_ignored() {
        // 5x3 source, 2x2 tiles: the last column and row never reach the atlas
        let mut source = PixelBuffer::from_fn(5, 3, |_, _| Colour::WHITE);
        for y in 0..3 {
            source.set(4, y, Colour::rgb(255, 0, 0)).unwrap();
        }
        for x in 0..5 {
            source.set(x, 2, Colour::rgb(255, 0, 0)).unwrap();
        }
        let atlas = build(&source, &TileGridConfig::new(2, 2)).unwrap();
        assert_eq!(atlas.size(), (8, 4));
        assert!(atlas.pixels().iter().all(|&c| c == Colour::WHITE));
    }

    #[test]
    fn test_masking_reaches_bands_and_corners() {
        let key = Colour::MAGENTA;
        let source = PixelBuffer::from_fn(2, 2, |_, _| key);
        let config = TileGridConfig::new(2, 2).with_padding(2).with_mask(key);
        let atlas = build(&source, &config).unwrap();
        assert!(atlas.pixels().iter().all(|&c| c == Colour::TRANSPARENT));
    }

    #[test]
    fn test_source_smaller_than_tile() {
        let source = gradient(3, 3);
        assert!(matches!(
            build(&source, &TileGridConfig::new(4, 2)),
            Err(TilepadError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_tile_size() {
        let source = gradient(3, 3);
        assert!(matches!(
            build(&source, &TileGridConfig::new(0, 1)),
            Err(TilepadError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_padding_larger_than_tile_stays_in_cell() {
        let source = gradient(2, 1);
        let atlas = build(&source, &TileGridConfig::new(1, 1).with_padding(3)).unwrap();
        assert_eq!(atlas.size(), (14, 7));
        // the whole first cell is the first source pixel
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(atlas.get(x, y).unwrap(), source.get(0, 0).unwrap());
                assert_eq!(atlas.get(7 + x, y).unwrap(), source.get(1, 0).unwrap());
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let source = gradient(32, 24);
        let config = TileGridConfig::new(4, 4).with_padding(2);
        assert_eq!(build(&source, &config).unwrap(), build(&source, &config).unwrap());
    }
}
