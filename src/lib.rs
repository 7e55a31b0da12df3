//! Fit slide screenshots onto a fixed canvas and pack them into pptx decks.
//!
//! The core is [`fit_image`]: it scales a screenshot so one axis matches the
//! canvas, crops the other (from the top for tall pages, centered for wide
//! ones) and pads rounding shortfalls. [`SlideFitter`] runs it over batches of
//! encoded screenshots, [`DeckWriter`] writes the results as full-bleed picture
//! slides and [`PptxContainer`] reads such decks back.

mod constants;
mod container;
mod deck_writer;
mod fit;
mod fit_config;
mod fitter;
pub mod html;
mod parse_rels;
mod parse_xml;
mod slide;
mod types;

pub use container::{PptxContainer, SlideIterator};
pub use deck_writer::DeckWriter;
pub use fit::{fit_image, fit_image_with, FitPlan, WHITE};
pub use fit_config::{FitConfig, FitConfigBuilder, DEFAULT_MAX_RESIZED_PIXELS, DEFAULT_TARGET};
pub use fitter::{BatchReport, FittedSlide, SkippedInput, SlideFitter, SCREENSHOT_EXTENSIONS};
pub use parse_rels::parse_slide_rels;
pub use parse_xml::parse_slide_xml;
pub use slide::DeckSlide;
pub use types::*;

pub use image::imageops::FilterType;
pub use image::{Rgb, RgbImage};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid image size {width}x{height}")]
    InvalidInput { width: u32, height: u32 },

    #[error("Resized image would have {pixels} pixels, limit is {limit}")]
    ResourceLimit { pixels: u64, limit: u64 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(&'static str),

    #[error("Slide not found")]
    SlideNotFound,

    #[error("Image not found")]
    ImageNotFound,

    #[error("Deck has no slides")]
    EmptyDeck,
}

pub type Result<T> = std::result::Result<T, Error>;
