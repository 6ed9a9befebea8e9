//! Deterministic tile names.

use crate::atlas::TileCoord;
use crate::types::NamingScheme;

/// Digits used for indices along an axis with `count` tiles.
///
/// Counts of exactly 10 and 100 still use the narrower width.
pub fn pad_width(count: u32) -> usize {
    if count > 100 {
        3
    } else if count > 10 {
        2
    } else {
        1
    }
}

/// `{base}_{row}_{col}` with each index zero-padded for its axis.
pub fn row_col_name(base: &str, coord: TileCoord, cols: u32, rows: u32) -> String {
    format!(
        "{}_{:0rw$}_{:0cw$}",
        base,
        coord.row,
        coord.col,
        rw = pad_width(rows),
        cw = pad_width(cols)
    )
}

/// Name for the tile visited at row-major position `index`.
///
/// `index` counts every tile, including ones later removed as empty, so
/// sequential names keep their gaps and stay stable across runs.
pub fn tile_name(
    base: &str,
    index: usize,
    coord: TileCoord,
    cols: u32,
    rows: u32,
    scheme: NamingScheme,
) -> String {
    match scheme {
        NamingScheme::Sequential => format!("{}_{}", base, index),
        NamingScheme::RowCol => row_col_name(base, coord, cols, rows),
    }
}
