//! Core domain types for tilepad.
//!
//! - `Colour` - RGBA8 colour values
//! - `PixelBuffer` / `Rect` - top-left origin images and rectangles
//! - `TileGridConfig` - grid, masking, naming and slice presentation settings

mod buffer;
mod colour;
mod config;

pub use buffer::{PixelBand, PixelBuffer, PixelSink, Rect};
pub use colour::Colour;
pub use config::{
    Alignment, EmptyTileBehavior, NamingScheme, Pivot, TileGridConfig, TransparencyMode,
};
