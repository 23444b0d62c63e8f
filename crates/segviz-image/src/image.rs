use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use segviz_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Total number of pixels covered by this size.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

/// Trait for image data types.
///
/// Send and Sync is required for the rayon based passes over the pixels.
pub trait ImageDtype: Copy + Default + Into<f64> + Send + Sync {}

impl ImageDtype for u8 {}

impl ImageDtype for f32 {}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major and interleaved, every pixel holding exactly
/// `num_bands` values. The band count is a runtime property so grayscale and
/// color images share the same type.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    num_bands: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `num_bands` - The number of bands per pixel.
    /// * `data` - The interleaved pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the number of bands is zero or the length of the pixel data does not
    /// match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use segviz_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    3,
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_bands(), 3);
    /// ```
    pub fn new(size: ImageSize, num_bands: usize, data: Vec<T>) -> Result<Self, ImageError> {
        if num_bands == 0 {
            return Err(ImageError::InvalidBandCount(num_bands));
        }

        // check if the data length matches the image size
        let expected = size.num_pixels() * num_bands;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            num_bands,
            data,
        })
    }

    /// Create a new image with the given size and every value set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use segviz_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   },
    ///   1,
    ///   0.0,
    /// ).unwrap();
    ///
    /// assert_eq!(image.num_bands(), 1);
    /// assert_eq!(image.as_slice().len(), 200);
    /// ```
    pub fn from_size_val(size: ImageSize, num_bands: usize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.num_pixels() * num_bands];
        Image::new(size, num_bands, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of bands of each pixel.
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Number of values in one row of the image, `width * num_bands`.
    pub fn row_stride(&self) -> usize {
        self.size.width * self.num_bands
    }

    /// Get the interleaved pixel data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the interleaved pixel data mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * self.num_bands)
    }

    /// Get all the band values of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        let offset = self.check_bounds(x, y)?;
        Ok(&self.data[offset..offset + self.num_bands])
    }
}
