use segviz_image::Image;

use crate::{error::RegionError, pipeline::SegmentationReport};

/// Title of the raster colored with the region palette.
pub const REGIONS_TITLE: &str = "Regions";

/// Title of the raster colored with the region mean colors.
pub const SEGMENT_COLORS_TITLE: &str = "Color of Segments";

/// Receives the rendered rasters and the report of a segmentation pass.
///
/// A sink decides what to do with the output, e.g. showing it in a window or
/// writing it to disk. Failures are reported as [`RegionError::Sink`].
pub trait RasterSink {
    /// Accept a rendered 3-band raster.
    fn show(&mut self, raster: &Image<u8>, title: &str) -> Result<(), RegionError>;

    /// Accept the timing and region count of the pass.
    fn report(&mut self, report: &SegmentationReport) -> Result<(), RegionError>;
}

/// A sink that logs what it receives and drops the rasters.
#[derive(Debug, Default)]
pub struct LogSink;

impl RasterSink for LogSink {
    fn show(&mut self, raster: &Image<u8>, title: &str) -> Result<(), RegionError> {
        log::debug!("{title}: {}", raster.size());
        Ok(())
    }

    fn report(&mut self, report: &SegmentationReport) -> Result<(), RegionError> {
        log::info!("Time MS {}", report.elapsed_ms());
        log::info!("Total regions: {}", report.num_regions);
        Ok(())
    }
}

/// A sink that keeps everything in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    /// The rasters with their titles, in the order they were shown.
    pub rasters: Vec<(String, Image<u8>)>,
    /// The last report received.
    pub report: Option<SegmentationReport>,
}

impl CollectSink {
    /// Find a raster by title.
    pub fn get(&self, title: &str) -> Option<&Image<u8>> {
        self.rasters
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, raster)| raster)
    }
}

impl RasterSink for CollectSink {
    fn show(&mut self, raster: &Image<u8>, title: &str) -> Result<(), RegionError> {
        self.rasters.push((title.to_string(), raster.clone()));
        Ok(())
    }

    fn report(&mut self, report: &SegmentationReport) -> Result<(), RegionError> {
        self.report = Some(report.clone());
        Ok(())
    }
}
