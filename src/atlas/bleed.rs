//! Edge bleed: replicate a tile's border into its padding.
//!
//! Each tile's outermost source pixels are copied outward into the padding
//! band that surrounds it in the atlas, so linear filtering and mipmapping
//! sample the tile's own colours instead of the neighbouring tile.
//!
//! For `layer` in `0..padding`, counting outward from the tile:
//!
//! ```text
//!   corner | top row      | corner
//!   -------+--------------+-------
//!   left   |   interior   | right
//!   column |              | column
//!   -------+--------------+-------
//!   corner | bottom row   | corner
//! ```
//!
//! Corners are filled flat with the single matching corner pixel.

use crate::error::{Result, TilepadError};
use crate::types::{PixelBuffer, PixelSink, Rect, TileGridConfig};

use super::mask::read_masked;

/// Atlas coordinate `layer + 1` pixels before `start`.
fn before(start: u32, layer: u32) -> Result<u32> {
    start.checked_sub(layer + 1).ok_or_else(|| {
        TilepadError::out_of_bounds(format!("padding layer {} runs past the atlas edge", layer))
    })
}

/// Fill the padding around one tile whose interior sits at `dest` in the atlas.
///
/// `from` is the tile in source coordinates. Both rectangles must be the
/// same size; any write that falls outside `atlas` fails with `OutOfBounds`.
pub fn fill<S: PixelSink>(
    source: &PixelBuffer,
    atlas: &mut S,
    from: Rect,
    dest: Rect,
    config: &TileGridConfig,
) -> Result<()> {
    let padding = config.padding;
    if padding == 0 || from.w == 0 || from.h == 0 {
        return Ok(());
    }

    let (left, right) = (from.x, from.x_max() - 1);
    let (top, bottom) = (from.y, from.y_max() - 1);

    for layer in 0..padding {
        let (lx, rx) = (before(dest.x, layer)?, dest.x_max() + layer);
        for dy in 0..from.h {
            atlas.put(lx, dest.y + dy, read_masked(source, left, top + dy, config)?)?;
            atlas.put(rx, dest.y + dy, read_masked(source, right, top + dy, config)?)?;
        }
    }

    for layer in 0..padding {
        let (ty, by) = (before(dest.y, layer)?, dest.y_max() + layer);
        for dx in 0..from.w {
            atlas.put(dest.x + dx, ty, read_masked(source, left + dx, top, config)?)?;
            atlas.put(dest.x + dx, by, read_masked(source, left + dx, bottom, config)?)?;
        }
    }

    let top_left = read_masked(source, left, top, config)?;
    let top_right = read_masked(source, right, top, config)?;
    let bottom_left = read_masked(source, left, bottom, config)?;
    let bottom_right = read_masked(source, right, bottom, config)?;

    for x in 0..padding {
        for y in 0..padding {
            let (lx, rx) = (before(dest.x, x)?, dest.x_max() + x);
            let (ty, by) = (before(dest.y, y)?, dest.y_max() + y);
            atlas.put(lx, ty, top_left)?;
            atlas.put(rx, ty, top_right)?;
            atlas.put(lx, by, bottom_left)?;
            atlas.put(rx, by, bottom_right)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    /// 2x2 source with four distinct opaque colours.
    fn quad() -> PixelBuffer {
        PixelBuffer::from_fn(2, 2, |x, y| Colour::rgb(10 + x as u8, 20 + y as u8, 0))
    }

    #[test]
    fn test_single_layer() {
        let source = quad();
        let config = TileGridConfig::new(2, 2);
        let mut atlas = PixelBuffer::new(4, 4);
        fill(&source, &mut atlas, Rect::new(0, 0, 2, 2), Rect::new(1, 1, 2, 2), &config).unwrap();

        let src = |x, y| source.get(x, y).unwrap();
        // left and right columns
        assert_eq!(atlas.get(0, 1).unwrap(), src(0, 0));
        assert_eq!(atlas.get(0, 2).unwrap(), src(0, 1));
        assert_eq!(atlas.get(3, 1).unwrap(), src(1, 0));
        assert_eq!(atlas.get(3, 2).unwrap(), src(1, 1));
        // top and bottom rows
        assert_eq!(atlas.get(1, 0).unwrap(), src(0, 0));
        assert_eq!(atlas.get(2, 0).unwrap(), src(1, 0));
        assert_eq!(atlas.get(1, 3).unwrap(), src(0, 1));
        assert_eq!(atlas.get(2, 3).unwrap(), src(1, 1));
        // corners
        assert_eq!(atlas.get(0, 0).unwrap(), src(0, 0));
        assert_eq!(atlas.get(3, 0).unwrap(), src(1, 0));
        assert_eq!(atlas.get(0, 3).unwrap(), src(0, 1));
        assert_eq!(atlas.get(3, 3).unwrap(), src(1, 1));
        // interior untouched
        assert_eq!(atlas.get(1, 1).unwrap(), Colour::TRANSPARENT);
    }

    #[test]
    fn test_corners_are_flat() {
        let source = quad();
        let config = TileGridConfig::new(2, 2).with_padding(3);
        let mut atlas = PixelBuffer::new(8, 8);
        fill(&source, &mut atlas, Rect::new(0, 0, 2, 2), Rect::new(3, 3, 2, 2), &config).unwrap();

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(atlas.get(x, y).unwrap(), source.get(0, 0).unwrap());
                assert_eq!(atlas.get(5 + x, y).unwrap(), source.get(1, 0).unwrap());
                assert_eq!(atlas.get(x, 5 + y).unwrap(), source.get(0, 1).unwrap());
                assert_eq!(atlas.get(5 + x, 5 + y).unwrap(), source.get(1, 1).unwrap());
            }
        }
        // every band layer repeats the edge
        for layer in 0..3 {
            assert_eq!(atlas.get(2 - layer, 4).unwrap(), source.get(0, 1).unwrap());
            assert_eq!(atlas.get(5 + layer, 3).unwrap(), source.get(1, 0).unwrap());
            assert_eq!(atlas.get(4, 2 - layer).unwrap(), source.get(1, 0).unwrap());
            assert_eq!(atlas.get(3, 5 + layer).unwrap(), source.get(0, 1).unwrap());
        }
    }

    #[test]
    fn test_reads_are_masked() {
        let key = Colour::rgb(0, 255, 0);
        let source = PixelBuffer::from_fn(1, 1, |_, _| key);
        let config = TileGridConfig::new(1, 1).with_mask(key);
        let mut atlas = PixelBuffer::from_fn(3, 3, |_, _| Colour::WHITE);
        fill(&source, &mut atlas, Rect::new(0, 0, 1, 1), Rect::new(1, 1, 1, 1), &config).unwrap();

        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
            assert_eq!(atlas.get(x, y).unwrap(), Colour::TRANSPARENT);
        }
        assert_eq!(atlas.get(1, 1).unwrap(), Colour::WHITE);
    }

    #[test]
    fn test_zero_padding_writes_nothing() {
        let source = quad();
        let config = TileGridConfig::new(2, 2).with_padding(0);
        let mut atlas = PixelBuffer::new(2, 2);
        fill(&source, &mut atlas, Rect::new(0, 0, 2, 2), Rect::new(0, 0, 2, 2), &config).unwrap();
        assert_eq!(atlas, PixelBuffer::new(2, 2));
    }

    #[test]
    fn test_padding_past_atlas_edge_fails() {
        let source = quad();
        let config = TileGridConfig::new(2, 2).with_padding(2);
        let mut atlas = PixelBuffer::new(4, 4);
        let result = fill(&source, &mut atlas, Rect::new(0, 0, 2, 2), Rect::new(1, 1, 2, 2), &config);
        assert!(matches!(result, Err(TilepadError::OutOfBounds { .. })));
    }
}
