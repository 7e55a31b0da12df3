//! The image-fit transform.
//!
//! A source image is scaled so that one axis matches the target canvas exactly,
//! the overflowing axis is cropped (centered horizontally, from the top
//! vertically) and any rounding shortfall is padded with a fill color.

use crate::types::{CropRect, Size};
use crate::{Error, Result};
use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Default fill color for padded areas.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Geometry of a single fit, computed from sizes alone.
///
/// Every step of [`fit_image`] is derived from this plan, so the plan can be
/// inspected (or checked against a pixel budget) before any pixel is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    pub source: Size,
    pub target: Size,
    pub resized: Size,
    pub crop: CropRect,
    /// Top-left corner where the cropped image lands on a padded canvas.
    /// `None` when the crop already has the target size.
    pub paste: Option<(u32, u32)>,
}

impl FitPlan {
    /// Computes the resize, crop and paste geometry for fitting `source` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either size has a zero dimension.
    pub fn compute(source: Size, target: Size) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::InvalidInput { width: source.width, height: source.height });
        }
        if target.is_empty() {
            return Err(Error::InvalidInput { width: target.width, height: target.height });
        }

        let source_ratio = source.aspect_ratio();
        let target_ratio = target.aspect_ratio();

        let resized = if source_ratio > target_ratio {
            let width = (target.height as f64 * source_ratio).round() as u32;
            Size::new(width.max(1), target.height)
        } else {
            let height = (target.width as f64 / source_ratio).round() as u32;
            Size::new(target.width, height.max(1))
        };

        let (left, right) = if resized.width > target.width {
            let left = (resized.width - target.width) / 2;
            (left, left + target.width)
        } else {
            (0, target.width)
        };

        let (top, bottom) = if resized.height > target.height {
            (0, target.height)
        } else {
            (0, resized.height)
        };

        // The horizontal window may extend past a narrower resized image;
        // cropping only ever keeps pixels that exist.
        let crop = CropRect {
            left,
            top,
            right: right.min(resized.width),
            bottom: bottom.min(resized.height),
        };

        let cropped = crop.size();
        let paste = (cropped != target).then(|| {
            (
                (target.width - cropped.width) / 2,
                (target.height - cropped.height) / 2,
            )
        });

        Ok(Self { source, target, resized, crop, paste })
    }

    /// True when the resize step is a no-op.
    pub fn is_identity_resize(&self) -> bool {
        self.resized == self.source
    }
}

/// Fits `source` into a `target` canvas with Lanczos3 resampling.
///
/// See [`fit_image_with`] for the full contract.
pub fn fit_image(source: &RgbImage, target: Size, fill_color: Rgb<u8>) -> Result<RgbImage> {
    fit_image_with(source, target, fill_color, FilterType::Lanczos3)
}

/// Fits `source` into a `target` canvas without distorting it.
///
/// The result always has exactly the `target` dimensions. Content that does
/// not fit is discarded from the bottom (tall sources) or equally from both
/// sides (wide sources). When rounding leaves the scaled image short of the
/// target on one axis, the remainder is filled with `fill_color` and the image
/// is centered on the canvas.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `source` or `target` has a zero
/// dimension. No other error is possible.
pub fn fit_image_with(
    source: &RgbImage,
    target: Size,
    fill_color: Rgb<u8>,
    filter: FilterType,
) -> Result<RgbImage> {
    let plan = FitPlan::compute(Size::from(source.dimensions()), target)?;
    Ok(apply_plan(source, &plan, fill_color, filter))
}

/// Executes a precomputed plan. `plan.source` must match `source`.
pub(crate) fn apply_plan(
    source: &RgbImage,
    plan: &FitPlan,
    fill_color: Rgb<u8>,
    filter: FilterType,
) -> RgbImage {
    log::debug!(
        "fit {} -> {}: resized {}, crop ({}, {}, {}, {}), paste {:?}",
        plan.source,
        plan.target,
        plan.resized,
        plan.crop.left,
        plan.crop.top,
        plan.crop.right,
        plan.crop.bottom,
        plan.paste
    );

    let crop = plan.crop;
    let cropped = if !plan.is_identity_resize() {
        resample_window(source, plan, filter)
    } else if crop.size() == plan.source {
        source.clone()
    } else {
        imageops::crop_imm(source, crop.left, crop.top, crop.width(), crop.height()).to_image()
    };

    match plan.paste {
        None => cropped,
        Some((x, y)) => {
            let mut canvas = RgbImage::from_pixel(plan.target.width, plan.target.height, fill_color);
            imageops::replace(&mut canvas, &cropped, x as i64, y as i64);
            canvas
        }
    }
}

/// Resamples only the part of `source` that lands inside the crop window.
///
/// The full `plan.resized` image is never materialized, so memory stays
/// proportional to the target even for extreme aspect ratios.
fn resample_window(source: &RgbImage, plan: &FitPlan, filter: FilterType) -> RgbImage {
    let crop = plan.crop;
    let scale_x = plan.resized.width as f64 / plan.source.width as f64;
    let scale_y = plan.resized.height as f64 / plan.source.height as f64;

    let left = crop.left as f64 / scale_x;
    let top = crop.top as f64 / scale_y;
    let width = (crop.width() as f64 / scale_x).min(plan.source.width as f64 - left);
    let height = (crop.height() as f64 / scale_y).min(plan.source.height as f64 - top);

    match resample_region(source, (left, top, width, height), crop.size(), filter) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("fast resample of {} failed ({}), using imageops", plan.source, e);
            let x0 = left.floor() as u32;
            let y0 = top.floor() as u32;
            let x1 = ((left + width).ceil() as u32).clamp(x0 + 1, plan.source.width);
            let y1 = ((top + height).ceil() as u32).clamp(y0 + 1, plan.source.height);
            let band = imageops::crop_imm(source, x0, y0, x1 - x0, y1 - y0).to_image();
            imageops::resize(&band, crop.width(), crop.height(), filter)
        }
    }
}

fn resample_region(
    source: &RgbImage,
    (left, top, width, height): (f64, f64, f64, f64),
    output: Size,
    filter: FilterType,
) -> std::result::Result<RgbImage, String> {
    let src_image = fr::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| e.to_string())?;

    let mut dst_image = fr::images::Image::new(output.width, output.height, fr::PixelType::U8x3);

    let options = fr::ResizeOptions::new()
        .resize_alg(to_resize_alg(filter))
        .crop(left, top, width, height);
    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| e.to_string())?;

    RgbImage::from_raw(output.width, output.height, dst_image.into_vec())
        .ok_or_else(|| "resampled buffer has the wrong length".to_string())
}

fn to_resize_alg(filter: FilterType) -> fr::ResizeAlg {
    match filter {
        FilterType::Nearest => fr::ResizeAlg::Nearest,
        FilterType::Triangle => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        FilterType::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
        FilterType::Gaussian => fr::ResizeAlg::Convolution(fr::FilterType::Mitchell),
        FilterType::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
    }
}
