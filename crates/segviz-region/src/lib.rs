#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the region module.
pub mod error;

/// execution strategies for the pixel passes.
pub mod parallel;

/// per-region pixel counts and mean colors.
pub mod stats;

/// seeded region palettes.
pub mod palette;

/// rendering of label maps to rgb rasters.
pub mod render;

/// segmentation algorithm interface and configuration.
pub mod segmentation;

/// destinations for the rendered rasters.
pub mod sink;

/// end to end segmentation and visualization pass.
pub mod pipeline;

pub use crate::error::RegionError;
pub use crate::palette::{Palette, PaletteGenerator, DEFAULT_PALETTE_SEED};
pub use crate::parallel::ExecutionStrategy;
pub use crate::pipeline::{
    process, visualize_regions, SegmentationConfig, SegmentationOutput, SegmentationReport,
};
pub use crate::segmentation::{ImageSegmentation, SegmentationError, SegmentationVariant};
pub use crate::stats::{RegionColors, RegionStats};
