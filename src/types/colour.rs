//! RGBA8 colour value and hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilepadError};

/// An RGBA colour with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// All four channels zero.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// The conventional colour key for sheets without an alpha channel.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let invalid = || TilepadError::Parse {
            message: format!("Invalid hex colour: '{}'", trimmed),
            help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
        };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channels: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d as u8) * 0x11))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        let a = channels.get(3).copied().unwrap_or(255);
        Ok(Self::new(channels[0], channels[1], channels[2], a))
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True when alpha is exactly zero.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl From<[u8; 4]> for Colour {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<image::Rgba<u8>> for Colour {
    fn from(px: image::Rgba<u8>) -> Self {
        px.0.into()
    }
}

impl From<Colour> for image::Rgba<u8> {
    fn from(c: Colour) -> Self {
        image::Rgba(c.to_rgba())
    }
}

impl FromStr for Colour {
    type Err = TilepadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = TilepadError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Colour> for String {
    fn from(c: Colour) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}
