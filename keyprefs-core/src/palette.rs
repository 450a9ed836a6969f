//! Key swatch colours and chromagram recolouring.
//!
//! Every theme defines one sine wave per RGB channel, sampled at the key index.
//! One channel per theme (the lead) runs at frequency 0.1 inside a single
//! monotone half-period of the sine for indices 0..24, so its values strictly
//! increase (or decrease) by at least 4 per step and no two keys share a colour.
//! The other channels run faster with their own phase so neighbouring keys differ
//! in more than one channel.
//!
//! Everything here is a pure function of its arguments.

use keyprefs_types::{
    ChromaTheme, IndexedImage, KeyCodeError, PixelEncoding, Rgb, RgbImage, KEY_COUNT,
};

/// Parameters of `sin(index * frequency + phase) * amplitude + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub frequency: f64,
    pub phase: f64,
    pub amplitude: f64,
    pub offset: f64,
}

impl Wave {
    pub const fn new(frequency: f64, phase: f64, amplitude: f64, offset: f64) -> Self {
        Self { frequency, phase, amplitude, offset }
    }

    /// A channel that stays at zero.
    pub const OFF: Wave = Wave::new(0.0, 0.0, 0.0, 0.0);
}

/// Sample `wave` at `index`, clamped to a colour channel.
pub fn scaled_sine(index: usize, wave: Wave) -> u8 {
    let value = (index as f64 * wave.frequency + wave.phase).sin() * wave.amplitude + wave.offset;
    value.clamp(0.0, 255.0) as u8
}

// Lead waves. Over indices 0..24 the argument spans 2.3 radians:
// [-1.15, 1.15] rising and [1.99, 4.29] falling, both inside one half-period.
const RISING: Wave = Wave::new(0.1, -1.15, 127.0, 128.0);
const FALLING: Wave = Wave::new(0.1, 1.99, 100.0, 110.0);

struct ThemeSpec {
    red: Wave,
    green: Wave,
    blue: Wave,
    low: Rgb,
    high: Rgb,
}

fn theme_spec(theme: ChromaTheme) -> ThemeSpec {
    match theme {
        ChromaTheme::Izo => ThemeSpec {
            red: RISING,
            green: Wave::new(0.55, 0.9, 110.0, 130.0),
            blue: Wave::new(0.35, 2.6, 110.0, 130.0),
            low: Rgb::new(0, 0, 24),
            high: Rgb::new(255, 236, 140),
        },
        ChromaTheme::Mono => ThemeSpec {
            red: RISING,
            green: RISING,
            blue: RISING,
            low: Rgb::BLACK,
            high: Rgb::WHITE,
        },
        ChromaTheme::Predator => ThemeSpec {
            red: RISING,
            green: Wave::new(0.45, -1.0, 90.0, 100.0),
            blue: FALLING,
            low: Rgb::new(0, 0, 64),
            high: Rgb::new(255, 220, 0),
        },
        ChromaTheme::VirtualBoy => ThemeSpec {
            red: RISING,
            green: Wave::OFF,
            blue: Wave::OFF,
            low: Rgb::BLACK,
            high: Rgb::new(255, 0, 0),
        },
        ChromaTheme::Hacker => ThemeSpec {
            red: Wave::new(0.5, 0.3, 40.0, 40.0),
            green: RISING,
            blue: Wave::OFF,
            low: Rgb::BLACK,
            high: Rgb::new(0, 255, 64),
        },
    }
}

fn sample(spec: &ThemeSpec, index: usize) -> Rgb {
    Rgb::new(
        scaled_sine(index, spec.red),
        scaled_sine(index, spec.green),
        scaled_sine(index, spec.blue),
    )
}

/// Swatch colour of the key at `index` (0..24).
pub fn key_colour(index: usize, theme: ChromaTheme) -> Result<Rgb, KeyCodeError> {
    if index >= KEY_COUNT {
        return Err(KeyCodeError::IndexNotFound(index));
    }
    Ok(sample(&theme_spec(theme), index))
}

/// All 24 swatches in key index order.
pub fn key_palette(theme: ChromaTheme) -> [Rgb; KEY_COUNT] {
    let spec = theme_spec(theme);
    std::array::from_fn(|index| sample(&spec, index))
}

/// Colours for silence (`low`) and full intensity (`high`).
pub fn anchors(theme: ChromaTheme) -> (Rgb, Rgb) {
    let spec = theme_spec(theme);
    (spec.low, spec.high)
}

fn lerp(low: u8, high: u8, level: u8) -> u8 {
    let (low, high, level) = (u32::from(low), u32::from(high), u32::from(level));
    ((low * (255 - level) + high * level + 127) / 255) as u8
}

/// Colour for an intensity pixel, linear between the theme's anchors.
pub fn intensity_colour(level: u8, theme: ChromaTheme) -> Rgb {
    let (low, high) = anchors(theme);
    Rgb::new(
        lerp(low.r, high.r, level),
        lerp(low.g, high.g, level),
        lerp(low.b, high.b, level),
    )
}

/// Resolve every pixel of `image` to a colour under `theme`.
///
/// Key-index pixels take their key's swatch; values past the last key (no key
/// detected) take the theme's low anchor. Intensity pixels are interpolated.
pub fn recolour(image: &IndexedImage, theme: ChromaTheme) -> RgbImage {
    let table: Vec<Rgb> = match image.encoding() {
        PixelEncoding::KeyIndex => {
            let (low, _) = anchors(theme);
            let palette = key_palette(theme);
            (0..=u8::MAX)
                .map(|value| palette.get(value as usize).copied().unwrap_or(low))
                .collect()
        }
        PixelEncoding::Intensity => (0..=u8::MAX)
            .map(|value| intensity_colour(value, theme))
            .collect(),
    };

    RgbImage {
        width: image.width(),
        height: image.height(),
        pixels: image.pixels().iter().map(|&p| table[p as usize]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn palettes_are_deterministic() {
        for &theme in ChromaTheme::ALL {
            assert_eq!(key_palette(theme), key_palette(theme));
            for index in 0..KEY_COUNT {
                assert_eq!(key_colour(index, theme), key_colour(index, theme));
            }
        }
    }

    #[test]
    fn every_theme_has_24_distinct_colours() {
        for &theme in ChromaTheme::ALL {
            let distinct: HashSet<Rgb> = key_palette(theme).into_iter().collect();
            assert_eq!(distinct.len(), KEY_COUNT, "{} repeats a colour", theme);
        }
    }

    #[test]
    fn lead_channel_steps_are_wide() {
        for index in 1..KEY_COUNT {
            let step = scaled_sine(index, RISING) as i32 - scaled_sine(index - 1, RISING) as i32;
            assert!(step >= 4, "rising step {} at {}", step, index);
            let step = scaled_sine(index - 1, FALLING) as i32 - scaled_sine(index, FALLING) as i32;
            assert!(step >= 4, "falling step {} at {}", step, index);
        }
    }

    #[test]
    fn mono_is_grey() {
        for colour in key_palette(ChromaTheme::Mono) {
            assert_eq!(colour.r, colour.g);
            assert_eq!(colour.g, colour.b);
        }
    }

    #[test]
    fn key_colour_matches_palette_and_rejects_out_of_range() {
        let palette = key_palette(ChromaTheme::Predator);
        assert_eq!(key_colour(5, ChromaTheme::Predator), Ok(palette[5]));
        assert_eq!(
            key_colour(KEY_COUNT, ChromaTheme::Predator),
            Err(KeyCodeError::IndexNotFound(KEY_COUNT))
        );
    }

    #[test]
    fn scaled_sine_clamps() {
        assert_eq!(scaled_sine(0, Wave::new(0.0, 1.0, 500.0, 200.0)), 255);
        assert_eq!(scaled_sine(0, Wave::new(0.0, -1.0, 500.0, 0.0)), 0);
        assert_eq!(scaled_sine(3, Wave::OFF), 0);
    }

    #[test]
    fn intensity_hits_both_anchors() {
        for &theme in ChromaTheme::ALL {
            let (low, high) = anchors(theme);
            assert_eq!(intensity_colour(0, theme), low);
            assert_eq!(intensity_colour(255, theme), high);
        }
        assert_eq!(intensity_colour(128, ChromaTheme::Mono), Rgb::new(128, 128, 128));
    }

    #[test]
    fn all_zero_image_uses_only_the_first_key_colour() {
        let image = IndexedImage::filled(16, 12, PixelEncoding::KeyIndex, 0).unwrap();
        let out = recolour(&image, ChromaTheme::Izo);
        let first = key_colour(0, ChromaTheme::Izo).unwrap();
        assert_eq!(out.pixels.len(), 16 * 12);
        assert!(out.pixels.iter().all(|&c| c == first));
    }

    #[test]
    fn recolouring_is_byte_identical() {
        let pixels: Vec<u8> = (0..40u8).map(|i| i.wrapping_mul(37)).collect();
        for encoding in [PixelEncoding::KeyIndex, PixelEncoding::Intensity] {
            let image = IndexedImage::new(8, 5, encoding, pixels.clone()).unwrap();
            for &theme in ChromaTheme::ALL {
                let first = recolour(&image, theme);
                let second = recolour(&image, theme);
                assert_eq!(first.to_bytes(), second.to_bytes());
                assert_eq!((first.width, first.height), (8, 5));
            }
        }
    }

    #[test]
    fn keyless_pixels_use_low_anchor() {
        let image = IndexedImage::new(2, 1, PixelEncoding::KeyIndex, vec![3, 200]).unwrap();
        let out = recolour(&image, ChromaTheme::Hacker);
        assert_eq!(out.get(0, 0), key_colour(3, ChromaTheme::Hacker).ok());
        assert_eq!(out.get(1, 0), Some(anchors(ChromaTheme::Hacker).0));
    }

    #[test]
    fn concurrent_recolouring_matches_serial() {
        let image = IndexedImage::new(4, 4, PixelEncoding::Intensity, (0..16).map(|v| v * 16).collect()).unwrap();
        let serial: Vec<RgbImage> = ChromaTheme::ALL.iter().map(|&t| recolour(&image, t)).collect();

        let parallel: Vec<RgbImage> = std::thread::scope(|scope| {
            let handles: Vec<_> = ChromaTheme::ALL
                .iter()
                .map(|&theme| {
                    let image = &image;
                    scope.spawn(move || recolour(image, theme))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(serial, parallel);
    }
}
