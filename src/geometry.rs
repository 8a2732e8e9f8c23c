use crate::config::ScoringConfig;
use crate::screen::ScreenGeometry;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How the image size compares to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeComparison {
    /// Narrower or shorter than the screen
    Smaller,
    AtLeastAsLarge,
}

impl SizeComparison {
    pub fn between(image: (u32, u32), screen: ScreenGeometry) -> Self {
        if image.0 < screen.width || image.1 < screen.height {
            SizeComparison::Smaller
        } else {
            SizeComparison::AtLeastAsLarge
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            SizeComparison::Smaller => "The image is smaller than the screen resolution.",
            SizeComparison::AtLeastAsLarge => {
                "The image is at least as big as the screen resolution."
            }
        }
    }
}

impl fmt::Display for SizeComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence())
    }
}

/// Resolution and aspect mismatch between an image and the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryPenalty {
    /// Screen pixels minus image pixels (negative when the image is larger)
    pub pixel_diff: i64,
    /// Absolute difference of the two aspect ratios, each rounded to 2 places
    pub aspect_diff: f64,
    pub resolution_penalty: f64,
    pub aspect_penalty: f64,
    pub comparison: SizeComparison,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Width over height, rounded to two decimal places.
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    if height == 0 {
        return 0.0;
    }
    round2(width as f64 / height as f64)
}

/// Screen pixels minus image pixels, saturated to the `i64` range.
pub fn pixel_diff(image: (u32, u32), screen: ScreenGeometry) -> i64 {
    let diff = screen.pixel_count() as i128 - image.0 as i128 * image.1 as i128;
    diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

pub fn aspect_diff(image: (u32, u32), screen: ScreenGeometry) -> f64 {
    // Both ratios have two decimals; rounding the difference keeps 2.78 - 1.78
    // at exactly 1.0 instead of 0.999...
    round2((screen.aspect_ratio() - aspect_ratio(image.0, image.1)).abs())
}

/// Penalties for showing an image of size `image` on `screen`.
///
/// Only whole units of aspect difference are charged; the fraction is
/// dropped, so a 0.45 difference costs nothing.
pub fn score_geometry(
    image: (u32, u32),
    screen: ScreenGeometry,
    config: &ScoringConfig,
) -> GeometryPenalty {
    let pixel_diff = pixel_diff(image, screen);
    let aspect_diff = aspect_diff(image, screen);

    let resolution_penalty = if pixel_diff > 0 {
        pixel_diff as f64 * config.resolution_penalty
    } else {
        0.0
    };
    let aspect_penalty = aspect_diff.trunc() * config.aspect_penalty;

    debug!(
        pixel_diff,
        aspect_diff, resolution_penalty, aspect_penalty, "scored geometry"
    );

    GeometryPenalty {
        pixel_diff,
        aspect_diff,
        resolution_penalty,
        aspect_penalty,
        comparison: SizeComparison::between(image, screen),
    }
}
