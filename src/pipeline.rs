use crate::buffer::PixelBuffer;
use crate::config::{BinarizeParams, PipelineConfig, Stage};
use crate::error::{Error, Result};
use crate::{gradient, relax, sharpen, thin};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, info};
use rand::Rng;
use std::path::Path;
use std::time::Instant;

/// Decodes `path` and resizes it to the working resolution.
pub fn load<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let path = path.as_ref();
    let source = image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?
        .into_rgba8();
    info!(
        "loaded {} ({}x{}) -> {}x{}",
        path.display(),
        source.width(),
        source.height(),
        width,
        height
    );
    Ok(resize(&source, width, height))
}

/// Lanczos3 resample to the working resolution.
pub fn resize(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Nearest-neighbor magnification, which keeps pixel edges hard.
pub fn upscale(image: &RgbaImage, factor: u32) -> Result<RgbaImage> {
    if factor <= 1 {
        return Ok(image.clone());
    }
    let (width, height) = image.dimensions();
    match (width.checked_mul(factor), height.checked_mul(factor)) {
        (Some(new_width), Some(new_height)) => Ok(imageops::resize(
            image,
            new_width,
            new_height,
            FilterType::Nearest,
        )),
        _ => Err(Error::InvalidParameter(format!(
            "upscale x{} overflows {}x{}",
            factor, width, height
        ))),
    }
}

/// Encodes by file extension.
pub fn save<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path)?;
    info!("saved {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

/// Maps every pixel to opaque white or black by mean intensity. Transparent
/// pixels become black.
pub fn binarize(image: &RgbaImage, params: &BinarizeParams) -> RgbaImage {
    imageproc::map::map_colors(image, |pixel: Rgba<u8>| {
        let [r, g, b, a] = pixel.0;
        let mean = (r as f32 + g as f32 + b as f32) / (3.0 * 255.0);
        if a != 0 && mean > params.threshold {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// Applies a single stage. Only `relax` consumes randomness.
pub fn apply<R: Rng + ?Sized>(stage: &Stage, image: RgbaImage, rng: &mut R) -> RgbaImage {
    match stage {
        Stage::Relax(params) => relax::relax(image, params, rng),
        Stage::SurfaceChange => gradient::surface_change(&image),
        Stage::EdgeMap(params) => gradient::edge_map(&image, params),
        Stage::Thin(params) => {
            let mut image = image;
            for _ in 0..params.repetitions {
                image = thin::thin(&image);
            }
            image
        }
        Stage::Sharpen(params) => sharpen::sharpen(&image, params),
        Stage::Binarize(params) => binarize(&image, params),
    }
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Threads `image` through every stage in order, then upscales.
    pub fn run<R: Rng + ?Sized>(&self, image: RgbaImage, rng: &mut R) -> Result<RgbaImage> {
        let (width, height) = (PixelBuffer::width(&image), PixelBuffer::height(&image));
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let mut image = image;
        for (i, stage) in self.config.stages.iter().enumerate() {
            let now = Instant::now();
            image = apply(stage, image, rng);
            info!(
                "stage {}/{} {:?} took {:.2?}",
                i + 1,
                self.config.stages.len(),
                stage,
                now.elapsed()
            );
        }

        debug!("upscale x{}", self.config.upscale);
        upscale(&image, self.config.upscale)
    }

    /// Load, run, save.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>, R: Rng + ?Sized>(
        &self,
        input: P,
        output: Q,
        rng: &mut R,
    ) -> Result<RgbaImage> {
        let image = load(input, self.config.width, self.config.height)?;
        let result = self.run(image, rng)?;
        save(&result, output)?;
        Ok(result)
    }
}
