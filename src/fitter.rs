use crate::fit::{apply_plan, FitPlan};
use crate::fit_config::FitConfig;
use crate::types::Size;
use crate::{Error, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// File extensions picked up by [`SlideFitter::fit_dir`].
pub const SCREENSHOT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A screenshot fitted to the slide canvas and encoded as PNG.
#[derive(Debug, Clone)]
pub struct FittedSlide {
    /// 1-based position among the successfully fitted inputs.
    pub slide_number: u32,
    pub source: String,
    pub original_size: Size,
    pub png: Vec<u8>,
}

/// An input that could not be fitted.
#[derive(Debug, Clone)]
pub struct SkippedInput {
    pub source: String,
    pub reason: String,
}

/// Outcome of a batch run. Slides keep the order of their inputs.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub slides: Vec<FittedSlide>,
    pub skipped: Vec<SkippedInput>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decodes screenshots, fits them onto the configured canvas and encodes the result.
#[derive(Debug, Clone, Default)]
pub struct SlideFitter {
    pub config: FitConfig,
}

impl SlideFitter {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    /// Plans the fit for a source of the given size and enforces the pixel budget.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for zero-sized sources or targets.
    /// - [`Error::ResourceLimit`] when the intermediate resize exceeds `max_resized_pixels`.
    pub fn plan(&self, source: Size) -> Result<FitPlan> {
        let plan = FitPlan::compute(source, self.config.target)?;
        if let Some(limit) = self.config.max_resized_pixels {
            let pixels = plan.resized.pixels();
            if pixels > limit {
                return Err(Error::ResourceLimit { pixels, limit });
            }
        }
        Ok(plan)
    }

    /// Fits an already decoded image.
    pub fn fit_image(&self, image: &RgbImage) -> Result<RgbImage> {
        let plan = self.plan(Size::from(image.dimensions()))?;
        Ok(apply_plan(image, &plan, self.config.fill_color, self.config.filter))
    }

    /// Decodes `data` (any format the `image` crate recognizes) and fits it.
    pub fn fit_bytes(&self, data: &[u8]) -> Result<RgbImage> {
        let image = image::load_from_memory(data)?.to_rgb8();
        self.fit_image(&image)
    }

    pub fn fit_file(&self, path: &Path) -> Result<RgbImage> {
        let data = fs::read(path)?;
        self.fit_bytes(&data)
    }

    /// Encodes an RGB image as PNG.
    pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgb8,
        )?;
        Ok(png)
    }

    /// Fits a batch of encoded screenshots in parallel.
    ///
    /// Each input is a `(label, bytes)` pair. Inputs that fail to decode or fit
    /// are logged and reported as skipped; the others are numbered from 1 in
    /// input order.
    pub fn fit_all(&self, inputs: Vec<(String, Vec<u8>)>) -> BatchReport {
        self.fit_batch(inputs.into_iter().map(|(source, data)| (source, Ok(data))).collect())
    }

    /// Fits inputs that may already have failed to load, keeping every entry
    /// (fitted or skipped) in input order.
    fn fit_batch(&self, inputs: Vec<(String, Result<Vec<u8>>)>) -> BatchReport {
        let results: Vec<(String, Result<(Size, Vec<u8>)>)> = inputs
            .into_par_iter()
            .map(|(source, data)| {
                let fitted = data.and_then(|data| self.fit_encoded(&data));
                (source, fitted)
            })
            .collect();

        let mut report = BatchReport::default();
        for (source, result) in results {
            match result {
                Ok((original_size, png)) => {
                    let slide_number = report.slides.len() as u32 + 1;
                    report.slides.push(FittedSlide { slide_number, source, original_size, png });
                }
                Err(e) => {
                    log::warn!("skipping {}: {}", source, e);
                    report.skipped.push(SkippedInput { source, reason: e.to_string() });
                }
            }
        }

        log::info!(
            "fitted {} screenshot(s) to {}, skipped {}",
            report.slides.len(),
            self.config.target,
            report.skipped.len()
        );
        report
    }

    /// Fits every screenshot in `dir`, ordered by file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the directory cannot be listed. Unreadable
    /// files are reported as skipped rather than failing the batch.
    pub fn fit_dir(&self, dir: &Path) -> Result<BatchReport> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_screenshot_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let inputs = paths
            .into_iter()
            .map(|path| {
                let data = fs::read(&path).map_err(Error::from);
                (path.display().to_string(), data)
            })
            .collect();

        Ok(self.fit_batch(inputs))
    }

    fn fit_encoded(&self, data: &[u8]) -> Result<(Size, Vec<u8>)> {
        let image = image::load_from_memory(data)?.to_rgb8();
        let original_size = Size::from(image.dimensions());
        let fitted = self.fit_image(&image)?;
        Ok((original_size, Self::encode_png(&fitted)?))
    }
}

fn has_screenshot_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SCREENSHOT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
