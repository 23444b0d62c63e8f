use rayon::prelude::*;

use segviz_image::{Image, ImageDtype, ImageError, ImageSize, LabelMap};

use crate::{error::RegionError, parallel, parallel::ExecutionStrategy};

/// Mean color of every region, stored as a flat `num_regions x num_bands` table.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionColors {
    num_bands: usize,
    data: Vec<f32>,
}

impl RegionColors {
    /// Create a color table from flat per-region band values.
    ///
    /// # Errors
    ///
    /// If `num_bands` is zero or the data does not hold a whole number of
    /// colors, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use segviz_region::stats::RegionColors;
    ///
    /// let colors = RegionColors::new(3, vec![255.0, 0.0, 0.0, 0.0, 0.0, 255.0]).unwrap();
    /// assert_eq!(colors.num_regions(), 2);
    /// assert_eq!(colors.get(1), Some(&[0.0, 0.0, 255.0][..]));
    /// ```
    pub fn new(num_bands: usize, data: Vec<f32>) -> Result<Self, RegionError> {
        if num_bands == 0 {
            return Err(ImageError::InvalidBandCount(num_bands).into());
        }
        if data.len() % num_bands != 0 {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                data.len() / num_bands * num_bands,
            )
            .into());
        }
        Ok(Self { num_bands, data })
    }

    /// Create a table of `num_regions` zero colors.
    pub fn zeros(num_regions: usize, num_bands: usize) -> Self {
        Self {
            num_bands,
            data: vec![0.0; num_regions * num_bands],
        }
    }

    /// The number of regions in the table.
    pub fn num_regions(&self) -> usize {
        if self.num_bands == 0 {
            0
        } else {
            self.data.len() / self.num_bands
        }
    }

    /// The number of bands of each color.
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// The mean color of region `index`.
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.num_bands)?;
        self.data.get(start..start + self.num_bands)
    }

    /// Iterate over the colors in region order.
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.num_bands.max(1))
    }

    /// The flat table, region-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Pixel count and mean color of every region of a label map.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionStats {
    /// Number of pixels assigned to each region.
    pub counts: Vec<usize>,
    /// Mean color of each region, zero for regions without pixels.
    pub colors: RegionColors,
}

impl RegionStats {
    /// Compute the pixel counts and mean colors in a single fused pass.
    ///
    /// # Arguments
    ///
    /// * `src` - The image the label map was computed from.
    /// * `labels` - The per-pixel region labels.
    /// * `num_regions` - The declared number of regions `N`.
    /// * `strategy` - How to run the pass.
    ///
    /// # Errors
    ///
    /// Fails with [`RegionError::DimensionMismatch`] if the sizes differ and
    /// with [`RegionError::LabelOutOfRange`] if a label is not in `[0, N)`.
    pub fn compute<T: ImageDtype>(
        src: &Image<T>,
        labels: &LabelMap,
        num_regions: usize,
        strategy: ExecutionStrategy,
    ) -> Result<Self, RegionError> {
        check_size(src.size(), labels)?;

        let num_bands = src.num_bands();
        let acc = accumulate(labels, num_regions, num_bands, strategy, |acc, y| {
            acc.push_pixels(y, label_row(labels, y), pixel_row(src, y))
        })?;

        let colors = acc.mean_colors(&acc.counts);
        log::debug!(
            "aggregated {} pixels into {} regions with {} bands",
            labels.size().num_pixels(),
            num_regions,
            num_bands
        );

        Ok(Self {
            counts: acc.counts,
            colors,
        })
    }

    /// The number of regions.
    pub fn num_regions(&self) -> usize {
        self.counts.len()
    }

    /// The number of regions without any pixel.
    pub fn num_empty_regions(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }
}

/// Count the number of pixels assigned to each region.
///
/// # Arguments
///
/// * `image_size` - The size of the segmented image.
/// * `labels` - The per-pixel region labels.
/// * `num_regions` - The declared number of regions `N`.
/// * `strategy` - How to run the pass.
///
/// # Returns
///
/// A vector of `N` counts summing to the number of pixels.
///
/// # Errors
///
/// Fails with [`RegionError::DimensionMismatch`] if the sizes differ and with
/// [`RegionError::LabelOutOfRange`] if a label is not in `[0, N)`.
///
/// # Example
///
/// ```
/// use segviz_image::{ImageSize, LabelMap};
/// use segviz_region::parallel::ExecutionStrategy;
/// use segviz_region::stats::count_region_pixels;
///
/// let size = ImageSize { width: 2, height: 2 };
/// let labels = LabelMap::new(size, vec![0, 0, 1, 2]).unwrap();
///
/// let counts = count_region_pixels(size, &labels, 4, ExecutionStrategy::Serial).unwrap();
/// assert_eq!(counts, vec![2, 1, 1, 0]);
/// ```
pub fn count_region_pixels(
    image_size: ImageSize,
    labels: &LabelMap,
    num_regions: usize,
    strategy: ExecutionStrategy,
) -> Result<Vec<usize>, RegionError> {
    check_size(image_size, labels)?;

    let acc = accumulate(labels, num_regions, 0, strategy, |acc, y| {
        acc.push_labels(y, label_row(labels, y))
    })?;

    Ok(acc.counts)
}

/// Compute the mean color of each region.
///
/// The band values are summed in `f64` regardless of the pixel type and divided
/// by the region count at the end. A region with a zero count gets the zero
/// color.
///
/// # Arguments
///
/// * `src` - The image the label map was computed from.
/// * `labels` - The per-pixel region labels.
/// * `counts` - The pixel count of each region, one entry per region.
/// * `strategy` - How to run the pass.
///
/// # Errors
///
/// Fails with [`RegionError::DimensionMismatch`] if the sizes differ and with
/// [`RegionError::LabelOutOfRange`] if a label is not in `[0, counts.len())`.
pub fn compute_region_mean_color<T: ImageDtype>(
    src: &Image<T>,
    labels: &LabelMap,
    counts: &[usize],
    strategy: ExecutionStrategy,
) -> Result<RegionColors, RegionError> {
    check_size(src.size(), labels)?;

    let acc = accumulate(labels, counts.len(), src.num_bands(), strategy, |acc, y| {
        acc.push_pixels(y, label_row(labels, y), pixel_row(src, y))
    })?;

    Ok(acc.mean_colors(counts))
}

fn check_size(image_size: ImageSize, labels: &LabelMap) -> Result<(), RegionError> {
    if image_size != labels.size() {
        return Err(RegionError::DimensionMismatch {
            image: image_size,
            labels: labels.size(),
        });
    }
    Ok(())
}

fn label_row(labels: &LabelMap, y: usize) -> &[i32] {
    let width = labels.width();
    &labels.as_slice()[y * width..(y + 1) * width]
}

fn pixel_row<T>(src: &Image<T>, y: usize) -> &[T] {
    let stride = src.row_stride();
    &src.as_slice()[y * stride..(y + 1) * stride]
}

/// Map a label to a region index, checking it lies in `[0, num_regions)`.
pub(crate) fn region_index(
    label: i32,
    num_regions: usize,
    x: usize,
    y: usize,
) -> Result<usize, RegionError> {
    match usize::try_from(label) {
        Ok(index) if index < num_regions => Ok(index),
        _ => Err(RegionError::LabelOutOfRange {
            label,
            num_regions,
            x,
            y,
        }),
    }
}

/// Per-worker counts and band sums.
struct RegionAccumulator {
    num_regions: usize,
    num_bands: usize,
    counts: Vec<usize>,
    sums: Vec<f64>,
}

impl RegionAccumulator {
    fn new(num_regions: usize, num_bands: usize) -> Self {
        Self {
            num_regions,
            num_bands,
            counts: vec![0; num_regions],
            sums: vec![0.0; num_regions * num_bands],
        }
    }

    fn push_labels(&mut self, y: usize, labels: &[i32]) -> Result<(), RegionError> {
        for (x, &label) in labels.iter().enumerate() {
            let index = region_index(label, self.num_regions, x, y)?;
            self.counts[index] += 1;
        }
        Ok(())
    }

    fn push_pixels<T: ImageDtype>(
        &mut self,
        y: usize,
        labels: &[i32],
        pixels: &[T],
    ) -> Result<(), RegionError> {
        let num_bands = self.num_bands;
        for (x, (&label, pixel)) in labels
            .iter()
            .zip(pixels.chunks_exact(num_bands))
            .enumerate()
        {
            let index = region_index(label, self.num_regions, x, y)?;
            self.counts[index] += 1;

            let sum = &mut self.sums[index * num_bands..(index + 1) * num_bands];
            sum.iter_mut()
                .zip(pixel.iter())
                .for_each(|(s, &p)| {
                    let value: f64 = p.into();
                    *s += value;
                });
        }
        Ok(())
    }

    fn merge(mut self, other: Self) -> Self {
        self.counts
            .iter_mut()
            .zip(other.counts.iter())
            .for_each(|(a, b)| *a += b);
        self.sums
            .iter_mut()
            .zip(other.sums.iter())
            .for_each(|(a, b)| *a += b);
        self
    }

    fn mean_colors(&self, counts: &[usize]) -> RegionColors {
        let num_bands = self.num_bands;
        let mut colors = RegionColors::zeros(self.num_regions, num_bands);
        if num_bands == 0 {
            return colors;
        }

        colors
            .data
            .chunks_exact_mut(num_bands)
            .zip(self.sums.chunks_exact(num_bands))
            .zip(counts.iter())
            .filter(|(_, &count)| count > 0)
            .for_each(|((mean, sum), &count)| {
                mean.iter_mut()
                    .zip(sum.iter())
                    .for_each(|(m, &s)| *m = (s / count as f64) as f32);
            });

        colors
    }
}

/// Visit every row of `labels` with `push_row`, accumulating per region.
fn accumulate<F>(
    labels: &LabelMap,
    num_regions: usize,
    num_bands: usize,
    strategy: ExecutionStrategy,
    push_row: F,
) -> Result<RegionAccumulator, RegionError>
where
    F: Fn(&mut RegionAccumulator, usize) -> Result<(), RegionError> + Send + Sync,
{
    let height = labels.height();

    parallel::run(strategy, |is_parallel| -> Result<RegionAccumulator, RegionError> {
        if !is_parallel {
            let mut acc = RegionAccumulator::new(num_regions, num_bands);
            for y in 0..height {
                push_row(&mut acc, y)?;
            }
            return Ok(acc);
        }

        (0..height)
            .into_par_iter()
            .try_fold(
                || RegionAccumulator::new(num_regions, num_bands),
                |mut acc, y| {
                    push_row(&mut acc, y)?;
                    Ok::<_, RegionError>(acc)
                },
            )
            .try_reduce(
                || RegionAccumulator::new(num_regions, num_bands),
                |a, b| Ok(a.merge(b)),
            )
    })?
}
