//! Pixel buffers and integer rectangles.
//!
//! A [`PixelBuffer`] stores RGBA8 colours row-major with the origin at the
//! top-left corner. Every access is bounds-checked and reports
//! [`TilepadError::OutOfBounds`] instead of clamping or wrapping.

use image::RgbaImage;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Result, TilepadError};

use super::Colour;

/// An axis-aligned integer rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the rightmost column.
    pub const fn x_max(&self) -> u32 {
        self.x + self.w
    }

    /// One past the lowest row (in top-left space).
    pub const fn y_max(&self) -> u32 {
        self.y + self.h
    }

    /// Mirror the rectangle vertically inside a space `height` pixels tall.
    ///
    /// Converts between top-left and bottom-left origin conventions; the
    /// conversion is its own inverse. Returns `None` when the rectangle
    /// does not fit in `height`.
    pub fn flip_y(self, height: u32) -> Option<Self> {
        let y_max = self.y.checked_add(self.h)?;
        height.checked_sub(y_max).map(|y| Self { y, ..self })
    }

    /// True when the rectangle lies entirely inside a `width` x `height` area.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x.checked_add(self.w).is_some_and(|m| m <= width)
            && self.y.checked_add(self.h).is_some_and(|m| m <= height)
    }
}

/// Anything the atlas can be written into.
pub trait PixelSink {
    fn put(&mut self, x: u32, y: u32, colour: Colour) -> Result<()>;
}

/// A row-major RGBA8 image with a top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel fully transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Colour::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Colour) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(TilepadError::out_of_bounds(format!(
                "pixel ({}, {}) outside {}x{} buffer",
                x, y, self.width, self.height
            )));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Colour> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u32, y: u32, colour: Colour) -> Result<()> {
        let i = self.index(x, y)?;
        self.pixels[i] = colour;
        Ok(())
    }

    /// Fail unless `rect` lies inside the buffer.
    pub fn check_rect(&self, rect: Rect) -> Result<()> {
        if rect.fits_within(self.width, self.height) {
            Ok(())
        } else {
            Err(TilepadError::out_of_bounds(format!(
                "rect {}x{} at ({}, {}) outside {}x{} buffer",
                rect.w, rect.h, rect.x, rect.y, self.width, self.height
            )))
        }
    }

    /// True when every pixel in `rect` has alpha exactly zero.
    pub fn is_region_transparent(&self, rect: Rect) -> Result<bool> {
        self.check_rect(rect)?;
        let width = self.width as usize;
        let transparent = (rect.y..rect.y_max()).all(|y| {
            let start = y as usize * width + rect.x as usize;
            self.pixels[start..start + rect.w as usize]
                .iter()
                .all(|c| c.is_transparent())
        });
        Ok(transparent)
    }

    /// Split the buffer into disjoint horizontal bands `band_height` rows tall.
    ///
    /// The last band is shorter when the height is not a multiple of
    /// `band_height`. Bands can be written from different threads.
    pub fn bands_mut(
        &mut self,
        band_height: u32,
    ) -> Result<impl IndexedParallelIterator<Item = PixelBand<'_>>> {
        if band_height == 0 || self.width == 0 {
            return Err(TilepadError::invalid_config(
                format!(
                    "cannot split a {}x{} buffer into bands {} rows tall",
                    self.width, self.height, band_height
                ),
                None,
            ));
        }

        let width = self.width;
        let chunk = band_height as usize * width as usize;
        Ok(self
            .pixels
            .par_chunks_mut(chunk)
            .enumerate()
            .map(move |(i, pixels)| PixelBand {
                width,
                y0: i as u32 * band_height,
                height: (pixels.len() / width as usize) as u32,
                pixels,
            }))
    }

    /// Convert to an `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.width as usize;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            self.pixels[y as usize * width + x as usize].into()
        })
    }
}

impl From<&RgbaImage> for PixelBuffer {
    fn from(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|&px| px.into()).collect(),
        }
    }
}

impl PixelSink for PixelBuffer {
    fn put(&mut self, x: u32, y: u32, colour: Colour) -> Result<()> {
        self.set(x, y, colour)
    }
}

/// A mutable horizontal slice of a [`PixelBuffer`], addressed in the
/// coordinates of the whole buffer.
pub struct PixelBand<'a> {
    width: u32,
    y0: u32,
    height: u32,
    pixels: &'a mut [Colour],
}

impl PixelBand<'_> {
    /// Buffer row the band starts at.
    pub fn first_row(&self) -> u32 {
        self.y0
    }

    pub fn rows(&self) -> u32 {
        self.height
    }
}

impl PixelSink for PixelBand<'_> {
    fn put(&mut self, x: u32, y: u32, colour: Colour) -> Result<()> {
        let local = y.checked_sub(self.y0).filter(|&ly| ly < self.height);
        match local {
            Some(ly) if x < self.width => {
                self.pixels[ly as usize * self.width as usize + x as usize] = colour;
                Ok(())
            }
            _ => Err(TilepadError::out_of_bounds(format!(
                "pixel ({}, {}) outside band of rows {}..{}",
                x,
                y,
                self.y0,
                self.y0 + self.height
            ))),
        }
    }
}
