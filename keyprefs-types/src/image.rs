//! Pixel buffers for chromagram rendering.

use std::fmt;

use crate::theme::Rgb;

/// What the bytes of an [`IndexedImage`] mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelEncoding {
    /// Each byte is a key index (0..24). Larger values mean "no key".
    KeyIndex,
    /// Each byte is a magnitude, 0 = silent, 255 = loudest.
    Intensity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    DimensionMismatch { width: usize, height: usize, len: usize },
    /// `width * height` does not fit in `usize`.
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { width, height, len } => match width.checked_mul(*height) {
                Some(needed) => {
                    write!(f, "{}x{} image needs {} pixels, got {}", width, height, needed, len)
                }
                None => write!(f, "{}x{} image is too large, got {} pixels", width, height, len),
            },
            Self::TooLarge { width, height } => {
                write!(f, "{}x{} image has more pixels than fit in memory", width, height)
            }
        }
    }
}

impl std::error::Error for ImageError {}

fn pixel_count(width: usize, height: usize) -> Result<usize, ImageError> {
    width
        .checked_mul(height)
        .ok_or(ImageError::TooLarge { width, height })
}

/// Row-major image whose pixels are indices or intensities, not colours yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: usize,
    height: usize,
    encoding: PixelEncoding,
    pixels: Vec<u8>,
}

impl IndexedImage {
    pub fn new(
        width: usize,
        height: usize,
        encoding: PixelEncoding,
        pixels: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let needed = pixel_count(width, height)?;
        if needed != pixels.len() {
            return Err(ImageError::DimensionMismatch { width, height, len: pixels.len() });
        }
        Ok(Self { width, height, encoding, pixels })
    }

    pub fn filled(
        width: usize,
        height: usize,
        encoding: PixelEncoding,
        value: u8,
    ) -> Result<Self, ImageError> {
        let needed = pixel_count(width, height)?;
        Ok(Self { width, height, encoding, pixels: vec![value; needed] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// Fully resolved colour image, same layout as the [`IndexedImage`] it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgb>,
}

impl RgbImage {
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Packed `r g b` bytes, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_pixel_count() {
        let err = IndexedImage::new(3, 2, PixelEncoding::KeyIndex, vec![0; 5]).unwrap_err();
        assert_eq!(err, ImageError::DimensionMismatch { width: 3, height: 2, len: 5 });
        assert_eq!(err.to_string(), "3x2 image needs 6 pixels, got 5");
    }

    #[test]
    fn overflowing_dimensions_are_reported_not_panicked() {
        let err = IndexedImage::new(usize::MAX, 2, PixelEncoding::KeyIndex, vec![0; 4]).unwrap_err();
        assert_eq!(err, ImageError::TooLarge { width: usize::MAX, height: 2 });
        assert!(err.to_string().contains("more pixels than fit"));

        let hand_built = ImageError::DimensionMismatch { width: usize::MAX, height: 2, len: 4 };
        assert!(hand_built.to_string().contains("too large"));

        assert!(IndexedImage::filled(usize::MAX, 3, PixelEncoding::Intensity, 0).is_err());
    }

    #[test]
    fn filled_covers_every_pixel() {
        let image = IndexedImage::filled(4, 3, PixelEncoding::KeyIndex, 7).unwrap();
        assert_eq!(image.pixels().len(), 12);
        assert!(image.pixels().iter().all(|&p| p == 7));
    }

    #[test]
    fn get_is_row_major() {
        let image = IndexedImage::new(3, 2, PixelEncoding::Intensity, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(image.get(2, 0), Some(2));
        assert_eq!(image.get(0, 1), Some(3));
        assert_eq!(image.get(3, 0), None);
    }
}
