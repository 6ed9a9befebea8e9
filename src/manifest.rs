//! Project configuration (tilepad.yaml) parsing.
//!
//! Every field is optional. Values left out fall back to the defaults of
//! [`TileGridConfig`]; command-line flags override both.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilepadError};
use crate::types::{
    Alignment, Colour, EmptyTileBehavior, NamingScheme, Pivot, TileGridConfig, TransparencyMode,
};

/// File name looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "tilepad.yaml";

/// Tile dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for TileSize {
    type Err = TilepadError;

    /// Parse `WxH`, e.g. `16x16` or `8X12`.
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(|| TilepadError::Parse {
            message: format!("Invalid tile size '{}': expected WxH (e.g. 16x16)", s),
            help: Some("Use the format WxH, for example: 16x16, 8x16".to_string()),
        })?;

        let width: u32 = w.trim().parse().map_err(|_| TilepadError::Parse {
            message: format!("Invalid width '{}' in tile size '{}'", w, s),
            help: Some("Width must be a positive integer".to_string()),
        })?;
        let height: u32 = h.trim().parse().map_err(|_| TilepadError::Parse {
            message: format!("Invalid height '{}' in tile size '{}'", h, s),
            help: Some("Height must be a positive integer".to_string()),
        })?;

        if width == 0 || height == 0 {
            return Err(TilepadError::invalid_config(
                format!("Tile size must be non-zero, got {}x{}", width, height),
                Some("Both width and height must be at least 1"),
            ));
        }

        Ok(Self { width, height })
    }
}

/// Project configuration loaded from tilepad.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub tile: Option<TileSize>,
    pub padding: Option<u32>,
    pub transparency: Option<TransparencyMode>,
    pub transparent_colour: Option<Colour>,
    pub naming: Option<NamingScheme>,
    pub empty_tiles: Option<EmptyTileBehavior>,
    pub pixels_per_unit: Option<f32>,
    pub alignment: Option<Alignment>,
    pub pivot: Option<Pivot>,

    /// Directory that receives one folder per processed sheet.
    /// Defaults to the directory of each input.
    pub output: Option<PathBuf>,
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TilepadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| TilepadError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `tilepad.yaml` from `dir` if there is one.
    pub fn find(dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        let path = dir.join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }
        let manifest = Self::load(&path)?;
        Ok(Some((path, manifest)))
    }

    /// Grid config with every value this manifest sets applied over the defaults.
    pub fn tile_config(&self) -> TileGridConfig {
        let mut config = TileGridConfig::default();
        if let Some(tile) = self.tile {
            config.tile_width = tile.width;
            config.tile_height = tile.height;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(mode) = self.transparency {
            config.transparency_mode = mode;
        }
        if let Some(colour) = self.transparent_colour {
            config.transparent_colour = colour;
        }
        if let Some(scheme) = self.naming {
            config.naming_scheme = scheme;
        }
        if let Some(behavior) = self.empty_tiles {
            config.empty_tile_behavior = behavior;
        }
        if let Some(ppu) = self.pixels_per_unit {
            config.pixels_per_unit = ppu;
        }
        if let Some(alignment) = self.alignment {
            config.alignment = alignment;
        }
        if let Some(pivot) = self.pivot {
            config.pivot = pivot;
        }
        config
    }
}

/// Commented starting point written by `tilepad init`.
pub const MANIFEST_TEMPLATE: &str = r##"# tilepad project configuration
#
# Every setting is optional; command-line flags take precedence.

# Size of one tile in the source sheet.
tile:
  width: 16
  height: 16

# Pixels of edge bleed around each tile in the atlas.
padding: 1

# none | mask. With mask, pixels exactly matching transparent_colour
# become fully transparent.
transparency: none
transparent_colour: "#FF00FF"

# sequential (name_0, name_1, ...) | row_col (name_<row>_<col>)
naming: sequential

# keep | remove. Removed tiles still advance the sequential index.
empty_tiles: keep

pixels_per_unit: 100
alignment: center
pivot:
  x: 0.5
  y: 0.5

# Output root; each sheet gets <output>/<name>/. Defaults to the
# directory of the input file.
# output: dist
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.tile_config(), TileGridConfig::default());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r##"
tile:
  width: 8
  height: 12
padding: 2
transparency: mask
transparent_colour: "#00FF00"
naming: row_col
empty_tiles: remove
pixels_per_unit: 32
alignment: bottom_center
pivot:
  x: 0.5
  y: 0
output: dist/tiles
"##;
        let manifest = Manifest::parse(yaml).unwrap();
        assert_eq!(manifest.output, Some(PathBuf::from("dist/tiles")));

        let config = manifest.tile_config();
        assert_eq!((config.tile_width, config.tile_height), (8, 12));
        assert_eq!(config.padding, 2);
        assert_eq!(config.transparency_mode, TransparencyMode::Mask);
        assert_eq!(config.transparent_colour, Colour::rgb(0, 255, 0));
        assert_eq!(config.naming_scheme, NamingScheme::RowCol);
        assert_eq!(config.empty_tile_behavior, EmptyTileBehavior::Remove);
        assert_eq!(config.pixels_per_unit, 32.0);
        assert_eq!(config.alignment, Alignment::BottomCenter);
        assert_eq!(config.pivot, Pivot::new(0.5, 0.0));
    }

    #[test]
    fn test_partial_manifest_keeps_defaults() {
        let config = Manifest::parse("padding: 0").unwrap().tile_config();
        assert_eq!(config.padding, 0);
        assert_eq!((config.tile_width, config.tile_height), (16, 16));
        assert_eq!(config.naming_scheme, NamingScheme::Sequential);
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        assert!(Manifest::parse("tile_size: 16").is_err());
    }

    #[test]
    fn test_bad_colour_is_an_error() {
        assert!(Manifest::parse("transparent_colour: nope").is_err());
    }

    #[test]
    fn test_template_matches_defaults() {
        let manifest = Manifest::parse(MANIFEST_TEMPLATE).unwrap();
        assert_eq!(manifest.tile_config(), TileGridConfig::default());
        assert_eq!(manifest.output, None);
    }

    #[test]
    fn test_parse_tile_size() {
        let size: TileSize = "16x16".parse().unwrap();
        assert_eq!((size.width, size.height), (16, 16));
        let size: TileSize = "8X12".parse().unwrap();
        assert_eq!((size.width, size.height), (8, 12));
    }

    #[test]
    fn test_parse_tile_size_invalid() {
        assert!("16".parse::<TileSize>().is_err());
        assert!("axb".parse::<TileSize>().is_err());
        assert!(matches!(
            "0x16".parse::<TileSize>(),
            Err(TilepadError::InvalidConfig { .. })
        ));
        assert!("16x0".parse::<TileSize>().is_err());
    }

    #[test]
    fn test_find() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Manifest::find(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(MANIFEST_FILENAME), "padding: 3").unwrap();
        let (path, manifest) = Manifest::find(dir.path()).unwrap().unwrap();
        assert_eq!(path, dir.path().join(MANIFEST_FILENAME));
        assert_eq!(manifest.padding, Some(3));
    }
}
