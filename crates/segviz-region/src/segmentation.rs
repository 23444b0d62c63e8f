use segviz_image::{Image, ImageError, LabelMap};

/// Errors reported by a segmentation algorithm.
#[derive(thiserror::Error, Debug)]
pub enum SegmentationError {
    /// The algorithm failed to segment the image.
    #[error("Segmentation failed: {0}")]
    Failed(String),

    /// The requested variant is not provided by the factory.
    #[error("Segmentation variant {0} is not available")]
    UnsupportedVariant(String),

    /// Error related to image.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// An image segmentation algorithm.
///
/// Implementations assign every pixel of the input to one of
/// [`ImageSegmentation::total_segments`] regions. The label map returned by
/// [`ImageSegmentation::segment`] must have the size of the input and hold
/// labels in `[0, total_segments())`.
pub trait ImageSegmentation<T> {
    /// Segment `src` and return the label of every pixel.
    fn segment(&mut self, src: &Image<T>) -> Result<LabelMap, SegmentationError>;

    /// Number of regions found by the last call to [`ImageSegmentation::segment`].
    fn total_segments(&self) -> usize;
}

impl<T, S: ImageSegmentation<T> + ?Sized> ImageSegmentation<T> for Box<S> {
    fn segment(&mut self, src: &Image<T>) -> Result<LabelMap, SegmentationError> {
        (**self).segment(src)
    }

    fn total_segments(&self) -> usize {
        (**self).total_segments()
    }
}

/// Builds segmentation algorithms from a configured variant.
pub trait SegmentationFactory<T> {
    /// Create the algorithm for `variant`.
    fn create(
        &self,
        variant: &SegmentationVariant,
    ) -> Result<Box<dyn ImageSegmentation<T>>, SegmentationError>;
}

/// Pixel connectivity used when growing regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectRule {
    /// Horizontal and vertical neighbors.
    Four,
    /// Horizontal, vertical and diagonal neighbors.
    #[default]
    Eight,
}

/// Parameters of clustering based superpixels (SLIC).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlicConfig {
    /// Target number of regions.
    pub num_superpixels: usize,
    /// Weight of the spatial distance against the color distance.
    pub spatial_weight: f32,
    /// Number of clustering iterations.
    pub total_iterations: usize,
    /// Connectivity used to enforce contiguous regions.
    pub connect_rule: ConnectRule,
}

impl Default for SlicConfig {
    fn default() -> Self {
        Self {
            num_superpixels: 800,
            spatial_weight: 200.0,
            total_iterations: 10,
            connect_rule: ConnectRule::Eight,
        }
    }
}

/// Parameters of density based mode seeking (mean-shift).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeanShiftConfig {
    /// Radius of the spatial window in pixels.
    pub spatial_radius: usize,
    /// Radius of the color window.
    pub color_radius: f32,
    /// Regions smaller than this are merged into a neighbor.
    pub min_region_size: usize,
    /// Use the approximate, faster kernel.
    pub fast: bool,
    /// Connectivity used when merging modes into regions.
    pub connect_rule: ConnectRule,
}

impl Default for MeanShiftConfig {
    fn default() -> Self {
        Self {
            spatial_radius: 6,
            color_radius: 15.0,
            min_region_size: 20,
            fast: true,
            connect_rule: ConnectRule::Eight,
        }
    }
}

/// Parameters of graph based region merging (Felzenszwalb-Huttenlocher 2004).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Fh04Config {
    /// Scale of the merge threshold, larger values give larger regions.
    pub k: f32,
    /// Regions smaller than this are merged into a neighbor.
    pub min_region_size: usize,
    /// Number of bins of the approximate edge sort, zero for an exact sort.
    pub approximate_sort_bins: usize,
    /// Connectivity of the pixel graph.
    pub connect_rule: ConnectRule,
}

impl Default for Fh04Config {
    fn default() -> Self {
        Self {
            k: 300.0,
            min_region_size: 20,
            approximate_sort_bins: 2000,
            connect_rule: ConnectRule::Eight,
        }
    }
}

/// The segmentation algorithm selected in the configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SegmentationVariant {
    /// Clustering based superpixels.
    Slic(SlicConfig),
    /// Density based mode seeking.
    MeanShift(MeanShiftConfig),
    /// Graph based region merging.
    Fh04(Fh04Config),
}

impl SegmentationVariant {
    /// SLIC with `num_superpixels` target regions and default parameters.
    pub fn slic(num_superpixels: usize) -> Self {
        Self::Slic(SlicConfig {
            num_superpixels,
            ..Default::default()
        })
    }

    /// Short name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Slic(_) => "slic",
            Self::MeanShift(_) => "mean_shift",
            Self::Fh04(_) => "fh04",
        }
    }
}

impl Default for SegmentationVariant {
    fn default() -> Self {
        Self::Slic(SlicConfig::default())
    }
}

impl std::fmt::Display for SegmentationVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segviz_image::ImageSize;

    struct Constant(usize);

    impl ImageSegmentation<u8> for Constant {
        fn segment(&mut self, src: &Image<u8>) -> Result<LabelMap, SegmentationError> {
            self.0 = 1;
            Ok(LabelMap::from_size_val(src.size(), 0))
        }

        fn total_segments(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn test_boxed_segmentation() -> Result<(), Box<dyn std::error::Error>> {
        let image = Image::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            1,
            0u8,
        )?;
        let mut alg: Box<dyn ImageSegmentation<u8>> = Box::new(Constant(0));
        let labels = alg.segment(&image)?;
        assert_eq!(labels.size(), image.size());
        assert_eq!(alg.total_segments(), 1);
        Ok(())
    }

    #[test]
    fn test_variant_defaults() {
        let variant = SegmentationVariant::default();
        assert_eq!(variant, SegmentationVariant::slic(800));
        assert_eq!(variant.name(), "slic");
        assert_eq!(
            SegmentationVariant::MeanShift(MeanShiftConfig::default()).to_string(),
            "mean_shift"
        );
        assert_eq!(Fh04Config::default().min_region_size, 20);
    }
}
