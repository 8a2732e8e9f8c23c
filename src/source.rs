//! Image ingestion from local files or HTTP(S) URLs.
//!
//! Everything that can go wrong while turning a source identifier into a
//! pixel buffer collapses into [`Error::SourceUnreadable`].

use crate::config::ScoringConfig;
use crate::error::{Error, Result, SourceError};
use crate::utils::expand_tilde;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Cursor, Seek};
use std::time::Duration;
use tracing::{debug, info};

/// Where an image is loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Local,
    Remote,
}

impl Origin {
    /// Classify a source identifier by its scheme prefix.
    pub fn of(location: &str) -> Self {
        let lower = location.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Origin::Remote
        } else {
            Origin::Local
        }
    }
}

/// Channel layout of the decoded image, before promotion to RGB(A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    L,
    La,
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::L => "L",
            ColorMode::La => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
        }
    }

    fn has_alpha(&self) -> bool {
        matches!(self, ColorMode::La | ColorMode::Rgba)
    }
}

impl TryFrom<ColorType> for ColorMode {
    type Error = SourceError;

    fn try_from(color: ColorType) -> Result<Self, SourceError> {
        match color {
            ColorType::L8 | ColorType::L16 => Ok(ColorMode::L),
            ColorType::La8 | ColorType::La16 => Ok(ColorMode::La),
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => Ok(ColorMode::Rgb),
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => Ok(ColorMode::Rgba),
            other => Err(SourceError::MalformedColorSample {
                reason: format!("unsupported color type {:?}", other),
            }),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An 8-bit sRGB color; alpha is dropped on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub(crate) fn from_samples(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2])
    }
}

/// A decoded image: immutable 8-bit RGB or RGBA samples in row-major order.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
    mode: ColorMode,
    format: Option<ImageFormat>,
}

impl Image {
    /// Wrap raw interleaved samples with 3 (RGB) or 4 (RGBA) channels per pixel.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, SourceError> {
        let mode = match channels {
            3 => ColorMode::Rgb,
            4 => ColorMode::Rgba,
            n => {
                return Err(SourceError::MalformedColorSample {
                    reason: format!("{} channels per pixel, expected 3 or 4", n),
                })
            }
        };

        let expected = width as usize * height as usize * channels;
        if samples.len() != expected {
            return Err(SourceError::MalformedColorSample {
                reason: format!(
                    "{} samples for a {}x{} image with {} channels (expected {})",
                    samples.len(),
                    width,
                    height,
                    channels,
                    expected
                ),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
            mode,
            format: None,
        })
    }

    /// Promote any supported decoded layout to 8-bit RGB(A).
    pub fn from_dynamic(img: DynamicImage, format: Option<ImageFormat>) -> Result<Self, SourceError> {
        let mode = ColorMode::try_from(img.color())?;
        let (width, height) = (img.width(), img.height());
        let (channels, samples) = if mode.has_alpha() {
            (4, img.into_rgba8().into_raw())
        } else {
            (3, img.into_rgb8().into_raw())
        };

        let mut image = Self::from_raw(width, height, channels, samples)?;
        image.mode = mode;
        image.format = format;
        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Color at column `x`, row `y`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        Some(Rgb::from_samples(&self.samples[start..start + self.channels]))
    }

    pub(crate) fn channels(&self) -> usize {
        self.channels
    }

    pub(crate) fn samples(&self) -> &[u8] {
        &self.samples
    }
}

/// Resolves source identifiers into decoded images.
#[derive(Debug, Clone)]
pub struct ImageSource {
    verbose: bool,
    timeout: Duration,
}

impl ImageSource {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            verbose: config.verbose,
            timeout: config.fetch_timeout(),
        }
    }

    /// Load a local path or fetch a URL, then decode it. Single attempt.
    pub fn load(&self, location: &str) -> Result<Image> {
        let origin = Origin::of(location);
        let decoded = match origin {
            Origin::Remote => {
                if self.verbose {
                    info!(url = %location, "reading from url");
                }
                self.fetch(location).and_then(|bytes| {
                    debug!(bytes = bytes.len(), "fetched remote image");
                    decode(ImageReader::new(Cursor::new(bytes)))
                })
            }
            Origin::Local => {
                let path = expand_tilde(location);
                if self.verbose {
                    info!(path = %path.display(), "reading from local file");
                }
                ImageReader::open(&path)
                    .map_err(SourceError::from)
                    .and_then(decode)
            }
        };

        decoded.map_err(|cause| Error::unreadable(location, cause))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("wallpaper-entropy/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()?;

        let response = client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status));
        }

        Ok(response.bytes()?.to_vec())
    }
}

fn decode<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<Image, SourceError> {
    let reader = reader.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode()?;
    Image::from_dynamic(img, format)
}
