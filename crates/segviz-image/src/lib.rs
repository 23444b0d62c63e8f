#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// image representation with a runtime number of bands.
pub mod image;

/// per-pixel segment labels.
pub mod label;

/// packed 8-bit rgb color helpers.
pub mod color;

/// image operations.
pub mod ops;

pub use crate::color::Rgb8;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
pub use crate::label::LabelMap;
