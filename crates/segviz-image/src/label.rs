use crate::{error::ImageError, image::ImageSize};

/// Per-pixel segment indices produced by a segmentation algorithm.
///
/// The map has the same width and height as the image it was computed from and
/// stores one signed label per pixel, row-major. Labels are expected to lie in
/// `[0, N)` for the declared number of regions `N`, which is checked by the
/// consumers of the map and not on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMap {
    size: ImageSize,
    data: Vec<i32>,
}

impl LabelMap {
    /// Create a label map from row-major label data.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use segviz_image::{ImageSize, LabelMap};
    ///
    /// let labels = LabelMap::new(
    ///     ImageSize { width: 2, height: 2 },
    ///     vec![0, 0, 1, 1],
    /// ).unwrap();
    ///
    /// assert_eq!(labels.as_slice()[2], 1);
    /// ```
    pub fn new(size: ImageSize, data: Vec<i32>) -> Result<Self, ImageError> {
        if data.len() != size.num_pixels() {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.num_pixels(),
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a label map with every pixel assigned to `label`.
    pub fn from_size_val(size: ImageSize, label: i32) -> Self {
        Self {
            size,
            data: vec![label; size.num_pixels()],
        }
    }

    /// Get the size of the label map in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the label map in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the label map in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the row-major labels.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Get the row-major labels mutably.
    pub fn as_slice_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_map_smoke() -> Result<(), ImageError> {
        let mut labels = LabelMap::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;
        assert_eq!(labels.width(), 3);
        assert_eq!(labels.height(), 2);
        assert_eq!(labels.size().num_pixels(), 6);

        labels.as_slice_mut()[3] = 7;
        assert_eq!(labels.as_slice(), &[0, 1, 2, 7, 4, 5]);

        Ok(())
    }

    #[test]
    fn label_map_invalid() {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        assert_eq!(
            LabelMap::new(size, vec![0; 4]),
            Err(ImageError::InvalidChannelShape(4, 9))
        );

        let labels = LabelMap::from_size_val(size, -1);
        assert!(labels.as_slice().iter().all(|&l| l == -1));
    }
}
