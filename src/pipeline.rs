//! One scoring run: load, convert, estimate, score geometry, aggregate.

use crate::color::{self, LabImage};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::geometry::{self, GeometryPenalty};
use crate::score::{self, ScoreBreakdown};
use crate::screen::ScreenGeometry;
use crate::source::{ColorMode, Image, ImageSource, Origin, Rgb};
use crate::temperature;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Pixels reported as diagnostic samples in verbose runs.
const SAMPLE_COORDS: [(u32, u32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

/// Per-pixel diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub rgb: Rgb,
    /// L, a, b
    pub lab: [f32; 3],
    pub rating: f64,
}

/// What was loaded, for the report header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub location: String,
    pub origin: Origin,
    pub mode: ColorMode,
    pub format: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    fn describe(location: &str, image: &Image) -> Self {
        Self {
            location: location.to_string(),
            origin: Origin::of(location),
            mode: image.mode(),
            format: image.format().map(|f| format!("{:?}", f).to_uppercase()),
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Scoring outcome for an already decoded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub geometry: GeometryPenalty,
    pub breakdown: ScoreBreakdown,
    /// Empty unless the run is verbose
    pub samples: Vec<PixelSample>,
}

/// Full result of rating one source against one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub image: ImageInfo,
    pub screen: ScreenGeometry,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

impl Rating {
    pub fn score(&self) -> f64 {
        self.evaluation.breakdown.score
    }
}

/// Rates wallpapers with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
    source: ImageSource,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        let source = ImageSource::new(&config);
        Self { config, source }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Load `location` and rate it against `screen`.
    pub fn rate(&self, location: &str, screen: ScreenGeometry) -> Result<Rating> {
        let start = Instant::now();
        let image = self.source.load(location)?;
        debug!(
            width = image.width(),
            height = image.height(),
            mode = %image.mode(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded image"
        );

        let evaluation = self.evaluate(&image, screen)?;
        Ok(Rating {
            image: ImageInfo::describe(location, &image),
            screen,
            evaluation,
        })
    }

    /// Score a decoded image. Pure function of the image, screen and config.
    pub fn evaluate(&self, image: &Image, screen: ScreenGeometry) -> Result<Evaluation> {
        let start = Instant::now();
        let lab = color::to_lab(image, self.config.parallel);
        let temperature = temperature::average_temperature(&lab, self.config.parallel)?;
        debug!(
            temperature,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "estimated temperature"
        );

        let geometry = geometry::score_geometry(image.dimensions(), screen, &self.config);
        let breakdown = score::aggregate(temperature, &geometry, self.config.max_score);

        let samples = if self.config.verbose {
            samples(image, &lab)
        } else {
            Vec::new()
        };

        Ok(Evaluation {
            geometry,
            breakdown,
            samples,
        })
    }

    /// Just the breakdown for a decoded image.
    pub fn score(&self, image: &Image, screen: ScreenGeometry) -> Result<ScoreBreakdown> {
        self.evaluate(image, screen).map(|e| e.breakdown)
    }
}

fn samples(image: &Image, lab: &LabImage) -> Vec<PixelSample> {
    SAMPLE_COORDS
        .iter()
        .filter_map(|&(x, y)| {
            let rgb = image.pixel(x, y)?;
            let lab = lab.pixel(x, y)?;
            Some(PixelSample {
                x,
                y,
                rgb,
                lab: [lab.l, lab.a, lab.b],
                rating: temperature::pixel_rating(lab),
            })
        })
        .collect()
}
