//! Console rendering of a [`Rating`].

use crate::pipeline::{PixelSample, Rating};
use crossterm::style::{Color, Stylize};
use std::fmt;
use std::io::IsTerminal;

const SAMPLE_COLORS: [Color; 4] = [Color::Magenta, Color::Blue, Color::Red, Color::Yellow];

/// Text form of a rating; the verbose form adds the full breakdown.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    rating: &'a Rating,
    verbose: bool,
    color: bool,
}

impl<'a> TextReport<'a> {
    /// Styling is on only when stdout is a terminal.
    pub fn new(rating: &'a Rating, verbose: bool) -> Self {
        Self {
            rating,
            verbose,
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn write_sample(&self, f: &mut fmt::Formatter<'_>, sample: &PixelSample, color: Color) -> fmt::Result {
        let label = format!("Pixel ({},{})", sample.x, sample.y);
        if self.color {
            write!(f, "{}", label.with(color))?;
        } else {
            f.write_str(&label)?;
        }
        writeln!(
            f,
            "\trgb({}, {}, {})\tlab({:.2}, {:.2}, {:.2})\trating: {:.4}",
            sample.rgb.r,
            sample.rgb.g,
            sample.rgb.b,
            sample.lab[0],
            sample.lab[1],
            sample.lab[2],
            sample.rating
        )
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rating = self.rating;
        let breakdown = &rating.evaluation.breakdown;

        if self.verbose {
            let image = &rating.image;
            let geometry = &rating.evaluation.geometry;

            writeln!(f, "We're processing the image: {}", image.location)?;
            writeln!(
                f,
                "This {} image is in the {} format",
                image.mode,
                image.format.as_deref().unwrap_or("unknown")
            )?;
            writeln!(f, "Image Size: {}, {}", image.width, image.height)?;

            for (sample, color) in rating.evaluation.samples.iter().zip(SAMPLE_COLORS.iter().cycle()) {
                self.write_sample(f, sample, *color)?;
            }

            writeln!(f, "Average Image Temperature: {:.4}", breakdown.temperature)?;
            writeln!(
                f,
                "Screen Resolution: width = {}, height = {}",
                rating.screen.width, rating.screen.height
            )?;
            writeln!(f, "Aspect ratio Comparison: {:.2}", geometry.aspect_diff)?;
            writeln!(f, "Screen Size vs. Image Size: {}", geometry.comparison)?;
            writeln!(
                f,
                "Resolution penalty: {:.4} ({} pixels)",
                breakdown.resolution_penalty,
                geometry.pixel_diff.max(0)
            )?;
            writeln!(f, "Aspect penalty: {:.4}", breakdown.aspect_penalty)?;
        }

        writeln!(f, "Image Score: {:.1} / {}", breakdown.score, breakdown.max_score)
    }
}

/// Render the text report for stdout.
pub fn render_text(rating: &Rating, verbose: bool) -> String {
    TextReport::new(rating, verbose).to_string()
}

/// Pretty JSON of the whole rating.
pub fn render_json(rating: &Rating) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::pipeline::{ImageInfo, Scorer};
    use crate::screen::ScreenGeometry;
    use crate::source::{ColorMode, Image, Origin};

    fn rating(verbose: bool) -> Rating {
        let img = Image::from_raw(2, 2, 3, vec![0; 12]).unwrap();
        let screen = ScreenGeometry::new(4, 2);
        let scorer = Scorer::new(ScoringConfig::default().with_verbose(verbose));
        Rating {
            image: ImageInfo {
                location: "/walls/black.png".into(),
                origin: Origin::Local,
                mode: ColorMode::Rgb,
                format: Some("PNG".into()),
                width: 2,
                height: 2,
            },
            screen,
            evaluation: scorer.evaluate(&img, screen).unwrap(),
        }
    }

    #[test]
    fn test_quiet_report_is_one_line() {
        let text = render_text(&rating(false), false);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Image Score: "));
        assert!(text.trim_end().ends_with("/ 10"));
    }

    #[test]
    fn test_verbose_report_contains_breakdown() {
        let rating = rating(true);
        let text = TextReport::new(&rating, true).with_color(false).to_string();
        assert!(text.contains("We're processing the image: /walls/black.png"));
        assert!(text.contains("This RGB image is in the PNG format"));
        assert!(text.contains("Image Size: 2, 2"));
        assert!(text.contains("Screen Resolution: width = 4, height = 2"));
        assert!(text.contains("Aspect ratio Comparison: 1.00"));
        assert!(text.contains("The image is smaller than the screen resolution."));
        assert!(text.contains("Resolution penalty: 0.0004 (4 pixels)"));
        assert!(text.contains("Aspect penalty: 1.0000"));
        assert_eq!(text.matches("Pixel (").count(), 4);
    }

    #[test]
    fn test_plain_report_has_no_escape_codes() {
        let rating = rating(true);
        let text = TextReport::new(&rating, true).with_color(false).to_string();
        assert!(!text.contains('\x1b'));
        assert!(text.contains("Pixel (0,0)\trgb(0, 0, 0)"));
    }

    #[test]
    fn test_colored_report_keeps_content() {
        let rating = rating(true);
        let plain = TextReport::new(&rating, true).with_color(false).to_string();
        let colored = TextReport::new(&rating, true).with_color(true).to_string();
        assert_eq!(plain.lines().count(), colored.lines().count());
        assert!(colored.contains("Image Score:"));
    }

    #[test]
    fn test_json_round_trips_score() {
        let rating = rating(false);
        let json = render_json(&rating).unwrap();
        let parsed: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.score(), rating.score());
        assert!(json.contains("\"resolution_penalty\""));
        assert!(json.contains("\"geometry\""));
    }
}
