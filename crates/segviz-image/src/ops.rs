use crate::{Image, ImageError};

/// Cast the pixel data of an image to a different type.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, with the same size and number of bands.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use segviz_image::{Image, ImageSize};
/// use segviz_image::ops::cast_and_scale;
///
/// let image = Image::<u8>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     1,
///     vec![0u8, 255],
/// ).unwrap();
///
/// let mut image_f32 = Image::from_size_val(image.size(), 1, 0.0f32).unwrap();
///
/// cast_and_scale(&image, &mut image_f32, 1. / 255.0).unwrap();
///
/// assert_eq!(image_f32.pixel(0, 0).unwrap(), &[0.0f32]);
/// assert_eq!(image_f32.pixel(1, 0).unwrap(), &[1.0f32]);
/// ```
pub fn cast_and_scale<T, U>(src: &Image<T>, dst: &mut Image<U>, scale: U) -> Result<(), ImageError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast + std::ops::Mul<U, Output = U>,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    if src.num_bands() != dst.num_bands() {
        return Err(ImageError::InvalidChannelShape(
            dst.as_slice().len(),
            src.as_slice().len(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            let x = U::from(inp).ok_or(ImageError::CastError(
                std::any::type_name::<U>().to_string(),
            ))?;
            *out = x * scale;
            Ok::<(), ImageError>(())
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageSize;

    #[test]
    fn test_cast_and_scale() -> Result<(), ImageError> {
        let image = Image::<u8>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            3,
            vec![0u8, 0, 255, 0, 0, 255],
        )?;

        let mut image_f32 = Image::from_size_val(image.size(), 3, 0.0f32)?;

        super::cast_and_scale(&image, &mut image_f32, 1.0)?;

        assert_eq!(image_f32.as_slice(), &[0.0, 0.0, 255.0, 0.0, 0.0, 255.0]);

        Ok(())
    }

    #[test]
    fn test_cast_and_scale_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            0,
        )?;
        let mut wrong_size = Image::<f32>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            1,
            0.0,
        )?;
        assert_eq!(
            cast_and_scale(&image, &mut wrong_size, 1.0),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );

        let mut wrong_bands = Image::<f32>::from_size_val(image.size(), 3, 0.0)?;
        assert!(cast_and_scale(&image, &mut wrong_bands, 1.0).is_err());

        Ok(())
    }
}
