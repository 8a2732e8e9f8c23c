//! Perceptual color temperature from normalized Lab channels.
//!
//! Each channel is clamped to its native range, mapped linearly onto 0-10 and
//! weighted by one third, so a pixel rates somewhere in [0, 10]. The image
//! temperature is the plain mean of all pixel ratings.

use crate::color::LabImage;
use crate::error::{Error, Result};
use palette::Lab;
use rayon::prelude::*;

const L_RANGE: (f32, f32) = (0.0, 100.0);
const AB_RANGE: (f32, f32) = (-128.0, 127.0);
/// Each channel's 0-10 value is divided by this before summing.
const CHANNEL_DIVISOR: f64 = 3.333;

/// Clamp into `range` and map linearly onto 0-10.
fn normalize(value: f32, (min, max): (f32, f32)) -> f64 {
    let clamped = value.clamp(min, max) as f64;
    (clamped - min as f64) / (max as f64 - min as f64) * 10.0
}

/// Rating of a single Lab pixel.
pub fn pixel_rating(lab: Lab) -> f64 {
    normalize(lab.l, L_RANGE) / CHANNEL_DIVISOR
        + normalize(lab.a, AB_RANGE) / CHANNEL_DIVISOR
        + normalize(lab.b, AB_RANGE) / CHANNEL_DIVISOR
}

fn row_sum(row: &[Lab]) -> f64 {
    row.iter().copied().map(pixel_rating).sum()
}

/// Mean pixel rating over the whole image.
///
/// Row sums are computed independently (on the rayon pool when `parallel`)
/// and then added in row order, so the result does not depend on scheduling.
pub fn average_temperature(image: &LabImage, parallel: bool) -> Result<f64> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidImageDimensions { width, height });
    }

    let row_sums: Vec<f64> = if parallel {
        image.par_rows().map(row_sum).collect()
    } else {
        image.rows().map(row_sum).collect()
    };

    let total: f64 = row_sums.iter().sum();
    Ok(total / (width as f64 * height as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_lab;
    use crate::source::Image;

    const EPS: f64 = 1e-9;

    fn lab(l: f32, a: f32, b: f32) -> Lab {
        Lab::new(l, a, b)
    }

    #[test]
    fn test_black_lab_rating() {
        // L contributes 0; a and b sit at 128/255 of their range.
        let expected = 2.0 * ((128.0 / 255.0) * 10.0 / 3.333);
        assert!((pixel_rating(lab(0.0, 0.0, 0.0)) - expected).abs() < EPS);
        assert!((expected - 3.012_065_8).abs() < 1e-6);
    }

    #[test]
    fn test_extremes() {
        assert!(pixel_rating(lab(0.0, -128.0, -128.0)).abs() < EPS);
        let max = 3.0 * (10.0 / 3.333);
        assert!((pixel_rating(lab(100.0, 127.0, 127.0)) - max).abs() < EPS);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(
            pixel_rating(lab(250.0, 400.0, 300.0)),
            pixel_rating(lab(100.0, 127.0, 127.0))
        );
        assert_eq!(
            pixel_rating(lab(-5.0, -300.0, -129.0)),
            pixel_rating(lab(0.0, -128.0, -128.0))
        );
    }

    #[test]
    fn test_rating_is_bounded() {
        for l in [-10.0, 0.0, 25.0, 50.0, 99.9, 100.0, 140.0] {
            for a in [-500.0, -128.0, -3.5, 0.0, 64.0, 127.0, 300.0] {
                for b in [-200.0, -128.0, 0.0, 12.0, 127.0, 999.0] {
                    let rating = pixel_rating(lab(l, a, b));
                    assert!((0.0..=10.0).contains(&rating), "{} out of range", rating);
                }
            }
        }
    }

    #[test]
    fn test_average_of_black_image() {
        let img = Image::from_raw(5, 4, 3, vec![0; 5 * 4 * 3]).unwrap();
        let avg = average_temperature(&to_lab(&img, false), false).unwrap();
        assert!((avg - pixel_rating(lab(0.0, 0.0, 0.0))).abs() < 1e-4);
    }

    #[test]
    fn test_average_is_mean_of_pixels() {
        // One black and one white pixel
        let img = Image::from_raw(2, 1, 3, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let lab_img = to_lab(&img, false);
        let expected = (pixel_rating(lab_img.pixels()[0]) + pixel_rating(lab_img.pixels()[1])) / 2.0;
        let avg = average_temperature(&lab_img, false).unwrap();
        assert!((avg - expected).abs() < EPS);
    }

    #[test]
    fn test_parallel_average_matches_sequential() {
        let samples: Vec<u8> = (0..(33 * 17 * 3)).map(|i| (i * 31 % 256) as u8).collect();
        let img = Image::from_raw(33, 17, 3, samples).unwrap();
        let lab_img = to_lab(&img, true);
        let seq = average_temperature(&lab_img, false).unwrap();
        let par = average_temperature(&lab_img, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let img = Image::from_raw(w, h, 3, Vec::new()).unwrap();
            let err = average_temperature(&to_lab(&img, true), true).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidImageDimensions { width, height } if width == w && height == h
            ));
        }
    }
}
