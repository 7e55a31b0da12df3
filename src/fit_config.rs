use crate::fit::WHITE;
use crate::types::Size;
use image::imageops::FilterType;
use image::Rgb;

/// Slide canvas used when no target is configured.
pub const DEFAULT_TARGET: Size = Size::new(1920, 1080);

/// Upper bound for the intermediate resized buffer (256 megapixels).
pub const DEFAULT_MAX_RESIZED_PIXELS: u64 = 256 * 1024 * 1024;

/// Configuration options for fitting screenshots onto slides.
///
/// Use [`FitConfig::builder()`] to create a configuration instance.
/// Only the desired fields need to be set, everything else falls back to the defaults.
///
/// # Configuration Options
///
/// | Parameter | Type | Default | Description |
/// |-----------|------|---------|-------------|
/// | `target` | `Size` | `1920x1080` | Output canvas every image is fitted to |
/// | `fill_color` | `Rgb<u8>` | white | Color of padded areas |
/// | `filter` | `FilterType` | `Lanczos3` | Resampling filter used for the resize step |
/// | `max_resized_pixels` | `Option<u64>` | `Some(256 MP)` | Rejects inputs whose intermediate resize would exceed this many pixels |
///
/// # Example
///
/// ```
/// use slidefit::{FitConfig, Size};
///
/// let config = FitConfig::builder()
///     .target(Size::new(1280, 720))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub target: Size,
    pub fill_color: Rgb<u8>,
    pub filter: FilterType,
    pub max_resized_pixels: Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            fill_color: WHITE,
            filter: FilterType::Lanczos3,
            max_resized_pixels: Some(DEFAULT_MAX_RESIZED_PIXELS),
        }
    }
}

impl FitConfig {
    pub fn builder() -> FitConfigBuilder {
        FitConfigBuilder::default()
    }
}

/// Builder for [`FitConfig`].
///
/// Allows setting individual configuration fields while falling back to defaults for any unspecified values
#[derive(Debug, Default)]
pub struct FitConfigBuilder {
    target: Option<Size>,
    fill_color: Option<Rgb<u8>>,
    filter: Option<FilterType>,
    max_resized_pixels: Option<Option<u64>>,
}

impl FitConfigBuilder {
    /// Sets the output canvas size.
    pub fn target(mut self, value: Size) -> Self {
        self.target = Some(value);
        self
    }

    /// Sets the color used to pad images that fall short of the canvas.
    pub fn fill_color(mut self, value: Rgb<u8>) -> Self {
        self.fill_color = Some(value);
        self
    }

    pub fn filter(mut self, value: FilterType) -> Self {
        self.filter = Some(value);
        self
    }

    /// Sets the pixel budget for the resize step. `None` disables the check.
    pub fn max_resized_pixels(mut self, value: Option<u64>) -> Self {
        self.max_resized_pixels = Some(value);
        self
    }

    /// Builds the final [`FitConfig`] instance, applying default values for any fields that were not set.
    pub fn build(self) -> FitConfig {
        let defaults = FitConfig::default();
        FitConfig {
            target: self.target.unwrap_or(defaults.target),
            fill_color: self.fill_color.unwrap_or(defaults.fill_color),
            filter: self.filter.unwrap_or(defaults.filter),
            max_resized_pixels: self.max_resized_pixels.unwrap_or(defaults.max_resized_pixels),
        }
    }
}
