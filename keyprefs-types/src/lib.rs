//! # keyprefs-types
//!
//! Plain data shared by the preference store, the palette generator and any
//! front-end: persisted enumerations with explicit ordinals, the parameter record
//! for the key-detection engine, key code labels, colours and pixel buffers.

#[macro_use]
pub mod ordinal;

pub mod engine;
pub mod image;
pub mod key_code;
pub mod metadata;
pub mod theme;

pub use engine::*;
pub use image::{ImageError, IndexedImage, PixelEncoding, RgbImage};
pub use key_code::{KeyCodeCatalog, KeyCodeError, DEFAULT_KEY_CODES, KEY_COUNT};
pub use metadata::*;
pub use ordinal::Ordinal;
pub use theme::{ChromaTheme, Rgb};
