//! sRGB to CIE-Lab conversion.

use crate::source::{Image, Rgb};
use palette::{IntoColor, Lab, Srgb};
use rayon::prelude::*;

/// Lab pixels parallel to an [`Image`], row-major.
#[derive(Debug, Clone)]
pub struct LabImage {
    width: u32,
    height: u32,
    pixels: Vec<Lab>,
}

impl LabImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Lab] {
        &self.pixels
    }

    /// Lab color at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Lab> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate pixel rows. Yields nothing for an empty image.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Lab]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    pub(crate) fn par_rows(&self) -> impl IndexedParallelIterator<Item = &[Lab]> {
        self.pixels.par_chunks(self.width.max(1) as usize)
    }
}

/// Standard D65 sRGB to Lab for one 8-bit color.
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let srgb = Srgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    );
    srgb.into_color()
}

/// Convert every pixel of `image` to Lab, optionally across the rayon pool.
pub fn to_lab(image: &Image, parallel: bool) -> LabImage {
    let channels = image.channels();
    let samples = image.samples();

    let pixels: Vec<Lab> = if parallel {
        samples
            .par_chunks_exact(channels)
            .map(|px| rgb_to_lab(Rgb::from_samples(px)))
            .collect()
    } else {
        samples
            .chunks_exact(channels)
            .map(|px| rgb_to_lab(Rgb::from_samples(px)))
            .collect()
    };

    LabImage {
        width: image.width(),
        height: image.height(),
        pixels,
    }
}
