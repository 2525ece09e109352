use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Brightness cutoff between "overlay light text" and "overlay dark text"
const DARK_BRIGHTNESS_THRESHOLD: f64 = 130.0;

/// A composite color with 8-bit channels
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

    /// CSS-style hex notation, handy for logs and JSON output
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Styling hints derived from a poster's overall color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosterTheme {
    pub average_color: Rgb,
    pub brightness: f64,
    /// True when overlaid text should be light to stay readable
    pub is_dark: bool,
}

impl PosterTheme {
    pub fn from_image(image: &DynamicImage) -> DomainResult<Self> {
        let average_color = average_color(image)?;
        let brightness = brightness(average_color);
        Ok(Self {
            average_color,
            brightness,
            is_dark: brightness < DARK_BRIGHTNESS_THRESHOLD,
        })
    }
}

/// Arithmetic mean of the red, green and blue channels over every pixel.
/// Alpha is ignored; fully transparent pixels still count toward the mean.
///
/// Defined only for images with at least one pixel.
pub fn average_color(image: &DynamicImage) -> DomainResult<Rgb> {
    let (width, height) = image.dimensions();
    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count == 0 {
        return Err(DomainError::EmptyImage);
    }

    let mut r_sum: u64 = 0;
    let mut g_sum: u64 = 0;
    let mut b_sum: u64 = 0;
    for (_, _, pixel) in image.pixels() {
        r_sum += u64::from(pixel[0]);
        g_sum += u64::from(pixel[1]);
        b_sum += u64::from(pixel[2]);
    }

    Ok(Rgb {
        r: (r_sum / pixel_count) as u8,
        g: (g_sum / pixel_count) as u8,
        b: (b_sum / pixel_count) as u8,
    })
}

/// Perceptual brightness of a color on a 0..=255 scale, weighting green
/// heaviest and blue lightest to match human sensitivity.
pub fn brightness(color: Rgb) -> f64 {
    let r = f64::from(color.r);
    let g = f64::from(color.g);
    let b = f64::from(color.b);
    (0.241 * r * r + 0.691 * g * g + 0.068 * b * b).sqrt()
}
