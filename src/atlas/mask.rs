//! Colour-key transparency.

use crate::error::Result;
use crate::types::{Colour, PixelBuffer, TileGridConfig, TransparencyMode};

/// Replace the configured colour key with fully transparent black.
///
/// All four channels are zeroed, not just alpha. Other colours, and every
/// colour when masking is off, pass through unchanged.
pub fn mask(colour: Colour, config: &TileGridConfig) -> Colour {
    match config.transparency_mode {
        TransparencyMode::Mask if colour == config.transparent_colour => Colour::TRANSPARENT,
        _ => colour,
    }
}

/// Read a source pixel with masking applied.
pub(crate) fn read_masked(
    source: &PixelBuffer,
    x: u32,
    y: u32,
    config: &TileGridConfig,
) -> Result<Colour> {
    source.get(x, y).map(|c| mask(c, config))
}
