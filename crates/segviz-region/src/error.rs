use segviz_image::{ImageError, ImageSize};

use crate::{parallel::ParallelError, segmentation::SegmentationError};

/// Errors that can occur while computing region statistics and visualizations.
#[derive(thiserror::Error, Debug)]
pub enum RegionError {
    /// The label map and the image do not have the same size.
    #[error("Label map size {labels} does not match the image size {image}")]
    DimensionMismatch {
        /// Size of the image.
        image: ImageSize,
        /// Size of the label map.
        labels: ImageSize,
    },

    /// A label lies outside `[0, num_regions)`.
    #[error("Label {label} at ({x}, {y}) is out of range for {num_regions} regions")]
    LabelOutOfRange {
        /// The offending label.
        label: i32,
        /// The declared number of regions.
        num_regions: usize,
        /// Column of the pixel.
        x: usize,
        /// Row of the pixel.
        y: usize,
    },

    /// The renderer only maps 1 or 3 bands to rgb.
    #[error("Unsupported number of bands ({0}), expected 1 or 3")]
    UnsupportedBandCount(usize),

    /// The segmentation collaborator failed.
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    /// The output sink failed to accept a raster.
    #[error("Output sink failed: {0}")]
    Sink(String),

    /// Error related to the execution strategy.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// Error related to image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
