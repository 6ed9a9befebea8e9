//! Tile grid settings shared by atlas building and slicing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilepadError};

use super::Colour;

/// Whether a colour key is turned into transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyMode {
    #[default]
    None,
    Mask,
}

/// How slices are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `{base}_{index}` with a row-major running index.
    #[default]
    Sequential,
    /// `{base}_{row}_{col}`, zero-padded per axis.
    RowCol,
}

/// What happens to tiles whose atlas region is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTileBehavior {
    #[default]
    Keep,
    Remove,
}

/// Sprite anchor point, passed through to the slice consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Use the explicit pivot.
    Custom,
}

/// Normalized pivot, (0, 0) at the bottom-left of the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub x: f32,
    pub y: f32,
}

impl Pivot {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Pivot {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl FromStr for Pivot {
    type Err = TilepadError;

    /// Parse `X,Y`, e.g. `0.5,0`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TilepadError::Parse {
            message: format!("Invalid pivot '{}'", s),
            help: Some("Use X,Y with normalized coordinates, for example 0.5,0".to_string()),
        };
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(x, y))
    }
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Everything needed to turn a gridded sheet into a padded atlas and slices.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGridConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Bleed pixels on each side of every tile.
    pub padding: u32,
    pub transparency_mode: TransparencyMode,
    /// Colour key, only consulted in [`TransparencyMode::Mask`].
    pub transparent_colour: Colour,
    pub naming_scheme: NamingScheme,
    pub empty_tile_behavior: EmptyTileBehavior,
    pub pixels_per_unit: f32,
    pub alignment: Alignment,
    pub pivot: Pivot,
}

impl TileGridConfig {
    pub const DEFAULT_PADDING: u32 = 1;
    pub const DEFAULT_PIXELS_PER_UNIT: f32 = 100.0;

    /// A config with the given tile size and defaults everywhere else.
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            padding: Self::DEFAULT_PADDING,
            transparency_mode: TransparencyMode::None,
            transparent_colour: Colour::MAGENTA,
            naming_scheme: NamingScheme::Sequential,
            empty_tile_behavior: EmptyTileBehavior::Keep,
            pixels_per_unit: Self::DEFAULT_PIXELS_PER_UNIT,
            alignment: Alignment::Center,
            pivot: Pivot::default(),
        }
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Turn on colour-key masking.
    pub fn with_mask(mut self, colour: Colour) -> Self {
        self.transparency_mode = TransparencyMode::Mask;
        self.transparent_colour = colour;
        self
    }

    pub fn with_naming(mut self, scheme: NamingScheme) -> Self {
        self.naming_scheme = scheme;
        self
    }

    pub fn with_empty_tiles(mut self, behavior: EmptyTileBehavior) -> Self {
        self.empty_tile_behavior = behavior;
        self
    }

    /// Reject settings no grid can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(TilepadError::invalid_config(
                format!(
                    "tile size must be positive, got {}x{}",
                    self.tile_width, self.tile_height
                ),
                Some("Set both tile dimensions to at least 1"),
            ));
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(TilepadError::invalid_config(
                format!(
                    "pixels per unit must be a positive finite number, got {}",
                    self.pixels_per_unit
                ),
                None,
            ));
        }
        Ok(())
    }
}

impl Default for TileGridConfig {
    fn default() -> Self {
        Self::new(16, 16)
    }
}
