//! Rate candidate wallpapers.
//!
//! A wallpaper's score starts from its perceptual color temperature (the mean
//! of per-pixel ratings over normalized CIE-Lab channels) and loses points when
//! the image has fewer pixels than the screen or a noticeably different aspect
//! ratio. Scores are clamped to 0-10 and rounded to one decimal.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod report;
pub mod score;
pub mod screen;
pub mod source;
pub mod temperature;
mod utils;

pub use config::ScoringConfig;
pub use error::{Error, Result, SourceError};
pub use pipeline::{Rating, Scorer};
pub use score::ScoreBreakdown;
pub use screen::ScreenGeometry;
pub use source::Image;
