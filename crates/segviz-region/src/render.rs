use rayon::prelude::*;

use segviz_image::{Image, LabelMap, Rgb8};

use crate::{
    error::RegionError,
    palette::Palette,
    parallel::{self, ExecutionStrategy},
    stats::{region_index, RegionColors},
};

/// Number of bands of every rendered raster.
pub const RASTER_BANDS: usize = 3;

/// Clamp a band value to `[0, 255]` and truncate it to a byte.
///
/// NaN maps to zero.
///
/// # Examples
///
/// ```
/// use segviz_region::render::clamp_to_byte;
///
/// assert_eq!(clamp_to_byte(15.9), 15);
/// assert_eq!(clamp_to_byte(-3.0), 0);
/// assert_eq!(clamp_to_byte(300.0), 255);
/// ```
pub fn clamp_to_byte(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Render every pixel with the palette color of its region.
///
/// # Arguments
///
/// * `labels` - The per-pixel region labels.
/// * `palette` - One color per region.
/// * `strategy` - How to run the pass.
///
/// # Returns
///
/// A 3-band `u8` raster with the size of the label map.
///
/// # Errors
///
/// Fails with [`RegionError::LabelOutOfRange`] if a label has no palette entry.
///
/// # Example
///
/// ```
/// use segviz_image::{ImageSize, LabelMap, Rgb8};
/// use segviz_region::palette::Palette;
/// use segviz_region::parallel::ExecutionStrategy;
/// use segviz_region::render::render_palette;
///
/// let labels = LabelMap::new(ImageSize { width: 2, height: 1 }, vec![1, 0]).unwrap();
/// let palette = Palette::new(vec![Rgb8([1, 2, 3]), Rgb8([4, 5, 6])]);
///
/// let raster = render_palette(&labels, &palette, ExecutionStrategy::Serial).unwrap();
/// assert_eq!(raster.as_slice(), &[4, 5, 6, 1, 2, 3]);
/// ```
pub fn render_palette(
    labels: &LabelMap,
    palette: &Palette,
    strategy: ExecutionStrategy,
) -> Result<Image<u8>, RegionError> {
    render_lut(labels, palette.as_slice(), strategy)
}

/// Render every pixel with the mean color of its region.
///
/// A single band mean is replicated to the three output bands, three band
/// means map to red, green and blue. Values are clamped and truncated to bytes.
///
/// # Arguments
///
/// * `labels` - The per-pixel region labels.
/// * `colors` - The mean color of each region.
/// * `strategy` - How to run the pass.
///
/// # Errors
///
/// Fails with [`RegionError::UnsupportedBandCount`] if the colors do not have 1
/// or 3 bands, and with [`RegionError::LabelOutOfRange`] if a label has no
/// color entry.
pub fn render_mean_color(
    labels: &LabelMap,
    colors: &RegionColors,
    strategy: ExecutionStrategy,
) -> Result<Image<u8>, RegionError> {
    let lut = match colors.num_bands() {
        1 => colors
            .iter()
            .map(|c| Rgb8::gray(clamp_to_byte(c[0])))
            .collect::<Vec<_>>(),
        3 => colors
            .iter()
            .map(|c| Rgb8([clamp_to_byte(c[0]), clamp_to_byte(c[1]), clamp_to_byte(c[2])]))
            .collect::<Vec<_>>(),
        num_bands => return Err(RegionError::UnsupportedBandCount(num_bands)),
    };

    render_lut(labels, &lut, strategy)
}

/// Fill a raster by looking up the color of each pixel label.
fn render_lut(
    labels: &LabelMap,
    lut: &[Rgb8],
    strategy: ExecutionStrategy,
) -> Result<Image<u8>, RegionError> {
    let size = labels.size();
    let width = size.width;
    let mut dst = vec![0u8; size.num_pixels() * RASTER_BANDS];

    if size.num_pixels() > 0 {
        let fill_row = |(y, (dst_row, label_row)): (usize, (&mut [u8], &[i32]))| {
            dst_row
                .chunks_exact_mut(RASTER_BANDS)
                .zip(label_row.iter())
                .enumerate()
                .try_for_each(|(x, (dst_pixel, &label))| {
                    let index = region_index(label, lut.len(), x, y)?;
                    dst_pixel.copy_from_slice(&lut[index].0);
                    Ok::<_, RegionError>(())
                })
        };

        parallel::run(strategy, |is_parallel| {
            if is_parallel {
                dst.par_chunks_exact_mut(width * RASTER_BANDS)
                    .zip(labels.as_slice().par_chunks_exact(width))
                    .enumerate()
                    .try_for_each(fill_row)
            } else {
                dst.chunks_exact_mut(width * RASTER_BANDS)
                    .zip(labels.as_slice().chunks_exact(width))
                    .enumerate()
                    .try_for_each(fill_row)
            }
        })??;
    }

    Ok(Image::new(size, RASTER_BANDS, dst)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use segviz_image::ImageSize;

    fn labels_2x2() -> Result<LabelMap, RegionError> {
        Ok(LabelMap::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 0, 1, 1],
        )?)
    }

    #[test]
    fn test_render_palette() -> Result<(), RegionError> {
        let labels = labels_2x2()?;
        let a = Rgb8::from_packed(0x00aa_bbcc);
        let b = Rgb8::from_packed(0x0011_2233);
        let palette = Palette::new(vec![a, b]);

        let raster = render_palette(&labels, &palette, ExecutionStrategy::Serial)?;
        assert_eq!(raster.num_bands(), 3);
        assert_eq!(raster.pixel(0, 0)?, &a.0);
        assert_eq!(raster.pixel(1, 0)?, &a.0);
        assert_eq!(raster.pixel(0, 1)?, &b.0);
        assert_eq!(raster.pixel(1, 1)?, &b.0);
        Ok(())
    }

    #[test]
    fn test_render_mean_color_gray() -> Result<(), RegionError> {
        let labels = labels_2x2()?;
        let colors = RegionColors::new(1, vec![15.0, 35.0])?;

        let raster = render_mean_color(&labels, &colors, ExecutionStrategy::ParallelRows)?;
        assert_eq!(raster.size(), labels.size());
        assert_eq!(
            raster.as_slice(),
            &[15, 15, 15, 15, 15, 15, 35, 35, 35, 35, 35, 35]
        );
        Ok(())
    }

    #[test]
    fn test_render_mean_color_rgb_clamps() -> Result<(), RegionError> {
        let labels = labels_2x2()?;
        let colors = RegionColors::new(3, vec![-4.0, 127.6, 300.0, 1.0, 2.0, 3.0])?;

        let raster = render_mean_color(&labels, &colors, ExecutionStrategy::Serial)?;
        assert_eq!(raster.pixel(1, 0)?, &[0, 127, 255]);
        assert_eq!(raster.pixel(0, 1)?, &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_render_unsupported_bands() -> Result<(), RegionError> {
        let labels = labels_2x2()?;
        let colors = RegionColors::new(2, vec![0.0; 4])?;
        let res = render_mean_color(&labels, &colors, ExecutionStrategy::Serial);
        assert!(matches!(res, Err(RegionError::UnsupportedBandCount(2))));
        Ok(())
    }

    #[test]
    fn test_render_label_without_color() -> Result<(), RegionError> {
        let labels = labels_2x2()?;
        let palette = Palette::new(vec![Rgb8::gray(1)]);
        let res = render_palette(&labels, &palette, ExecutionStrategy::ParallelRows);
        assert!(matches!(
            res,
            Err(RegionError::LabelOutOfRange {
                label: 1,
                num_regions: 1,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_render_empty() -> Result<(), RegionError> {
        let labels = LabelMap::from_size_val(
            ImageSize {
                width: 0,
                height: 4,
            },
            0,
        );
        let raster = render_palette(&labels, &Palette::default(), ExecutionStrategy::Serial)?;
        assert!(raster.as_slice().is_empty());
        assert_eq!(raster.height(), 4);
        Ok(())
    }
}
