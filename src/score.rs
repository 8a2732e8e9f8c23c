use crate::geometry::GeometryPenalty;
use serde::{Deserialize, Serialize};

/// Final rating with the signals that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Clamped to [0, max_score], one decimal place
    pub score: f64,
    pub max_score: f64,
    /// Average per-pixel temperature rating
    pub temperature: f64,
    pub resolution_penalty: f64,
    pub aspect_penalty: f64,
}

impl ScoreBreakdown {
    pub fn total_penalty(&self) -> f64 {
        self.resolution_penalty + self.aspect_penalty
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Subtract geometry penalties from the temperature rating and clamp.
///
/// A negative or NaN `max_score` collapses the range to zero.
pub fn aggregate(temperature: f64, geometry: &GeometryPenalty, max_score: f64) -> ScoreBreakdown {
    let raw = temperature - geometry.resolution_penalty - geometry.aspect_penalty;
    // f64::max ignores NaN, so both bounds stay finite and ordered
    let upper = max_score.max(0.0);
    ScoreBreakdown {
        score: round1(raw.max(0.0).min(upper)),
        max_score,
        temperature,
        resolution_penalty: geometry.resolution_penalty,
        aspect_penalty: geometry.aspect_penalty,
    }
}
