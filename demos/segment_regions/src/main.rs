use argh::FromArgs;
use image::{ImageBuffer, Pixel};
use std::path::{Path, PathBuf};

use segviz::image::{ops, Image, ImageDtype, ImageSize};
use segviz::region::{
    pipeline::{self, SegmentationConfig, SegmentationReport},
    sink::RasterSink,
    ExecutionStrategy, RegionError,
};

mod grid;

#[derive(FromArgs)]
/// Segment an image and render its regions with random and mean colors
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory where the rendered images are written (default: output)
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// path to a json segmentation config
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// palette seed, overrides the config
    #[argh(option)]
    seed: Option<u64>,

    /// segment the grayscale version of the image
    #[argh(switch)]
    grayscale: bool,

    /// segment f32 pixels instead of u8
    #[argh(switch)]
    float: bool,

    /// block size for variants without a region count (default: 16)
    #[argh(option, default = "16")]
    cell_size: usize,

    /// run the aggregation and render passes on the rayon thread pool
    #[argh(switch)]
    parallel: bool,

    /// sigma of the gaussian blur applied before segmenting, 0 disables it (default: 0.5)
    #[argh(option, default = "0.5")]
    blur_sigma: f32,
}

/// Writes every raster as a png file named after its title.
struct PngSink {
    output_dir: PathBuf,
}

impl PngSink {
    fn path_for(&self, title: &str) -> PathBuf {
        let name = title.to_lowercase().replace(' ', "_");
        self.output_dir.join(format!("{name}.png"))
    }
}

impl RasterSink for PngSink {
    fn show(&mut self, raster: &Image<u8>, title: &str) -> Result<(), RegionError> {
        let path = self.path_for(title);
        let buffer = image::RgbImage::from_raw(
            raster.width() as u32,
            raster.height() as u32,
            raster.as_slice().to_vec(),
        )
        .ok_or_else(|| RegionError::Sink(format!("{title} is not an rgb raster")))?;

        buffer
            .save(&path)
            .map_err(|e| RegionError::Sink(format!("{}: {e}", path.display())))?;
        log::info!("{title} written to {}", path.display());

        Ok(())
    }

    fn report(&mut self, report: &SegmentationReport) -> Result<(), RegionError> {
        println!("Time MS {}", report.elapsed_ms());
        println!("Total regions: {}", report.num_regions);
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<SegmentationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(SegmentationConfig::default()),
    }
}

/// Gaussian blur of the decoded pixels, skipped for a non-positive sigma.
fn pre_blur<P>(buffer: ImageBuffer<P, Vec<u8>>, sigma: f32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    if sigma > 0.0 {
        image::imageops::blur(&buffer, sigma)
    } else {
        buffer
    }
}

fn read_image(
    path: &Path,
    grayscale: bool,
    blur_sigma: f32,
) -> Result<Image<u8>, Box<dyn std::error::Error>> {
    let decoded = image::open(path)?;
    let size = ImageSize {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
    };

    let image = if grayscale {
        let luma = pre_blur(decoded.to_luma8(), blur_sigma);
        Image::new(size, 1, luma.into_raw())?
    } else {
        let rgb = pre_blur(decoded.to_rgb8(), blur_sigma);
        Image::new(size, 3, rgb.into_raw())?
    };

    Ok(image)
}

fn segment<T: ImageDtype>(
    image: &Image<T>,
    config: &SegmentationConfig,
    cell_size: usize,
    sink: &mut PngSink,
) -> Result<(), RegionError> {
    let factory = grid::GridFactory { cell_size };
    let output = pipeline::run(&factory, image, config, sink)?;
    log::info!(
        "{} of {} regions are empty",
        output.visualization.stats.num_empty_regions(),
        output.report.num_regions
    );
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.palette_seed = seed;
    }
    if args.parallel {
        config.strategy = ExecutionStrategy::ParallelRows;
    }
    log::info!(
        "segmenting with {:?}, blur sigma {}",
        config.variant,
        args.blur_sigma
    );

    // read and blur the image
    let image = read_image(&args.image_path, args.grayscale, args.blur_sigma)?;

    std::fs::create_dir_all(&args.output_dir)?;
    let mut sink = PngSink {
        output_dir: args.output_dir,
    };

    if args.float {
        let mut image_f32 = Image::from_size_val(image.size(), image.num_bands(), 0.0f32)?;
        ops::cast_and_scale(&image, &mut image_f32, 1.0)?;
        segment(&image_f32, &config, args.cell_size, &mut sink)?;
    } else {
        segment(&image, &config, args.cell_size, &mut sink)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    run(argh::from_env())
}
