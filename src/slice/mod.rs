//! Named slice descriptors for a built atlas.

mod generator;
mod naming;

pub use generator::{generate, generate_with, SliceDescriptor};
pub use naming::{pad_width, row_col_name, tile_name};
