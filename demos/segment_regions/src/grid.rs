use segviz::image::{Image, LabelMap};
use segviz::region::segmentation::{
    ImageSegmentation, SegmentationError, SegmentationFactory, SegmentationVariant,
};

/// Splits the image into square blocks, one region per block.
///
/// Stands in for a real segmentation algorithm so the demo runs without one.
pub struct GridSegmentation {
    target_regions: Option<usize>,
    cell_size: usize,
    total: usize,
}

impl GridSegmentation {
    /// Blocks of `cell_size x cell_size` pixels.
    pub fn with_cell_size(cell_size: usize) -> Self {
        Self {
            target_regions: None,
            cell_size: cell_size.max(1),
            total: 0,
        }
    }

    /// Blocks sized so the image holds about `target_regions` of them.
    pub fn with_target_regions(target_regions: usize) -> Self {
        Self {
            target_regions: Some(target_regions.max(1)),
            cell_size: 1,
            total: 0,
        }
    }
}

impl<T> ImageSegmentation<T> for GridSegmentation {
    fn segment(&mut self, src: &Image<T>) -> Result<LabelMap, SegmentationError> {
        if let Some(target) = self.target_regions {
            let area = src.size().num_pixels() as f64 / target as f64;
            self.cell_size = (area.sqrt().round() as usize).max(1);
        }

        let cell = self.cell_size;
        let cols = src.width().div_ceil(cell);
        let rows = src.height().div_ceil(cell);
        self.total = cols * rows;

        let mut labels = LabelMap::from_size_val(src.size(), 0);
        let width = src.width();
        for (i, label) in labels.as_slice_mut().iter_mut().enumerate() {
            let (x, y) = (i % width, i / width);
            *label = i32::try_from((y / cell) * cols + x / cell)
                .map_err(|e| SegmentationError::Failed(e.to_string()))?;
        }

        Ok(labels)
    }

    fn total_segments(&self) -> usize {
        self.total
    }
}

/// Builds a [`GridSegmentation`] for every variant.
pub struct GridFactory {
    /// Block size used by variants without a target region count.
    pub cell_size: usize,
}

impl<T> SegmentationFactory<T> for GridFactory {
    fn create(
        &self,
        variant: &SegmentationVariant,
    ) -> Result<Box<dyn ImageSegmentation<T>>, SegmentationError> {
        match variant {
            SegmentationVariant::Slic(config) => Ok(Box::new(
                GridSegmentation::with_target_regions(config.num_superpixels),
            )),
            other => {
                log::warn!(
                    "{other} is not bundled with the demo, using a {}px grid",
                    self.cell_size
                );
                Ok(Box::new(GridSegmentation::with_cell_size(self.cell_size)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segviz::image::ImageSize;

    #[test]
    fn grid_labels() -> Result<(), Box<dyn std::error::Error>> {
        let image = Image::from_size_val(
            ImageSize {
                width: 5,
                height: 3,
            },
            1,
            0u8,
        )?;
        let mut alg = GridSegmentation::with_cell_size(2);
        let labels = alg.segment(&image)?;

        assert_eq!(ImageSegmentation::<u8>::total_segments(&alg), 6);
        assert_eq!(
            labels.as_slice(),
            &[0, 0, 1, 1, 2, 0, 0, 1, 1, 2, 3, 3, 4, 4, 5]
        );
        Ok(())
    }

    #[test]
    fn grid_target_regions() -> Result<(), Box<dyn std::error::Error>> {
        let image = Image::from_size_val(
            ImageSize {
                width: 40,
                height: 40,
            },
            3,
            0.0f32,
        )?;
        let factory = GridFactory { cell_size: 8 };
        let mut alg: Box<dyn ImageSegmentation<f32>> =
            factory.create(&SegmentationVariant::slic(16))?;
        alg.segment(&image)?;
        assert_eq!(alg.total_segments(), 16);
        Ok(())
    }
}
