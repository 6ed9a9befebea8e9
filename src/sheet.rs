//! Sheet metadata output.
//!
//! Writes the slice list as JSON for sprite importers. Besides the slices
//! the `meta` block carries the import settings a padded pixel-art atlas
//! needs: point filtering, no mipmaps, no compression, multiple sprites.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TilepadError};
use crate::pipeline::TileSheet;
use crate::slice::SliceDescriptor;
use crate::types::{Alignment, Pivot, Rect};

#[derive(Serialize)]
struct SheetJson<'a> {
    meta: MetaJson<'a>,
    slices: Vec<SliceJson<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetaJson<'a> {
    app: &'static str,
    version: &'static str,
    image: &'a str,
    size: SizeJson,
    pixels_per_unit: f32,
    filter_mode: &'static str,
    mipmaps: bool,
    compression: &'static str,
    sprite_mode: &'static str,
}

#[derive(Serialize)]
struct SizeJson {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct SliceJson<'a> {
    name: &'a str,
    rect: Rect,
    alignment: Alignment,
    pivot: Pivot,
}

impl<'a> From<&'a SliceDescriptor> for SliceJson<'a> {
    fn from(s: &'a SliceDescriptor) -> Self {
        Self {
            name: &s.name,
            rect: s.rect,
            alignment: s.alignment,
            pivot: s.pivot,
        }
    }
}

/// Render sheet metadata as pretty-printed JSON.
///
/// `image` is the atlas file name the metadata refers to.
pub fn sheet_json(sheet: &TileSheet, image: &str, pixels_per_unit: f32) -> Result<String> {
    let (w, h) = sheet.atlas.size();
    let doc = SheetJson {
        meta: MetaJson {
            app: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            image,
            size: SizeJson { w, h },
            pixels_per_unit,
            filter_mode: "point",
            mipmaps: false,
            compression: "none",
            sprite_mode: "multiple",
        },
        slices: sheet.slices.iter().map(SliceJson::from).collect(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| TilepadError::Build {
        message: format!("Failed to serialize sheet metadata: {}", e),
        help: None,
    })
}

/// Write sheet metadata next to its atlas.
pub fn write_sheet_json(
    sheet: &TileSheet,
    image: &str,
    pixels_per_unit: f32,
    path: &Path,
) -> Result<()> {
    let json = sheet_json(sheet, image, pixels_per_unit)?;
    fs::write(path, json).map_err(|e| TilepadError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })
}
