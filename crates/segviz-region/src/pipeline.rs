use std::time::{Duration, Instant};

use segviz_image::{Image, ImageDtype, LabelMap};

use crate::{
    error::RegionError,
    palette::{Palette, PaletteGenerator, DEFAULT_PALETTE_SEED},
    parallel::ExecutionStrategy,
    render::{render_mean_color, render_palette},
    segmentation::{ImageSegmentation, SegmentationFactory, SegmentationVariant},
    sink::{RasterSink, REGIONS_TITLE, SEGMENT_COLORS_TITLE},
    stats::RegionStats,
};

/// Configuration of a segmentation and visualization pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentationConfig {
    /// The segmentation algorithm and its parameters.
    pub variant: SegmentationVariant,
    /// Seed of the region palette.
    pub palette_seed: u64,
    /// How to run the aggregation and render passes.
    pub strategy: ExecutionStrategy,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            variant: SegmentationVariant::default(),
            palette_seed: DEFAULT_PALETTE_SEED,
            strategy: ExecutionStrategy::Serial,
        }
    }
}

/// Timing and region count of a segmentation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationReport {
    /// Wall-clock duration of the segmentation call.
    pub elapsed: Duration,
    /// Number of regions reported by the algorithm.
    pub num_regions: usize,
}

impl SegmentationReport {
    /// The segmentation time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Region statistics with the two rasters rendered from them.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionVisualization {
    /// Pixel counts and mean colors.
    pub stats: RegionStats,
    /// The palette used for `regions`.
    pub palette: Palette,
    /// Every pixel colored with the palette color of its region.
    pub regions: Image<u8>,
    /// Every pixel colored with the mean color of its region.
    pub segment_colors: Image<u8>,
}

/// Everything produced by [`process`].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationOutput {
    /// The label map returned by the algorithm.
    pub labels: LabelMap,
    /// The statistics and rasters.
    pub visualization: RegionVisualization,
    /// Timing and region count.
    pub report: SegmentationReport,
}

/// Aggregate region statistics and render both visualizations.
///
/// # Arguments
///
/// * `src` - The segmented image, with 1 or 3 bands.
/// * `labels` - The per-pixel region labels.
/// * `num_regions` - The declared number of regions.
/// * `config` - Palette seed and execution strategy.
///
/// # Errors
///
/// Any aggregation or render error aborts the pass without partial output.
pub fn visualize_regions<T: ImageDtype>(
    src: &Image<T>,
    labels: &LabelMap,
    num_regions: usize,
    config: &SegmentationConfig,
) -> Result<RegionVisualization, RegionError> {
    let stats = RegionStats::compute(src, labels, num_regions, config.strategy)?;
    let palette = PaletteGenerator::new(config.palette_seed).generate(num_regions);

    let regions = render_palette(labels, &palette, config.strategy)?;
    let segment_colors = render_mean_color(labels, &stats.colors, config.strategy)?;

    Ok(RegionVisualization {
        stats,
        palette,
        regions,
        segment_colors,
    })
}

/// Segment an image, visualize its regions and hand the result to a sink.
///
/// The segmentation call is timed on its own. The rasters are shown under
/// [`REGIONS_TITLE`] and [`SEGMENT_COLORS_TITLE`], then the report is sent.
///
/// # Errors
///
/// Fails if the algorithm fails, if its label map violates the declared size
/// or region count, if the image band count cannot be rendered, or if the sink
/// rejects the output.
pub fn process<T, S, K>(
    alg: &mut S,
    src: &Image<T>,
    config: &SegmentationConfig,
    sink: &mut K,
) -> Result<SegmentationOutput, RegionError>
where
    T: ImageDtype,
    S: ImageSegmentation<T> + ?Sized,
    K: RasterSink + ?Sized,
{
    let start = Instant::now();
    let labels = alg.segment(src)?;
    let elapsed = start.elapsed();

    let num_regions = alg.total_segments();
    log::debug!(
        "{} segmented {} in {:?} into {} regions",
        config.variant,
        src.size(),
        elapsed,
        num_regions
    );

    let visualization = visualize_regions(src, &labels, num_regions, config)?;

    sink.show(&visualization.regions, REGIONS_TITLE)?;
    sink.show(&visualization.segment_colors, SEGMENT_COLORS_TITLE)?;

    let report = SegmentationReport {
        elapsed,
        num_regions,
    };
    sink.report(&report)?;

    Ok(SegmentationOutput {
        labels,
        visualization,
        report,
    })
}

/// Build the configured algorithm with `factory` and run [`process`] with it.
pub fn run<T, F, K>(
    factory: &F,
    src: &Image<T>,
    config: &SegmentationConfig,
    sink: &mut K,
) -> Result<SegmentationOutput, RegionError>
where
    T: ImageDtype,
    F: SegmentationFactory<T> + ?Sized,
    K: RasterSink + ?Sized,
{
    let mut alg = factory.create(&config.variant)?;
    process(&mut alg, src, config, sink)
}
