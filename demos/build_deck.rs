//! Builds a deck from a folder of page screenshots
//!
//! Every PNG/JPEG in the folder becomes one full-bleed slide, in file name order.
//! Screenshots that cannot be decoded are skipped and listed at the end.
//!
//! Run with: cargo run --example build_deck <screenshot_dir> <output.pptx>

use slidefit::{DeckWriter, FitConfig, Result, SlideFitter};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --example build_deck <screenshot_dir> <output.pptx>");
        return Ok(());
    }

    let config = FitConfig::builder().build();
    let target = config.target;
    let fitter = SlideFitter::new(config);

    let report = fitter.fit_dir(Path::new(&args[1]))?;
    if report.slides.is_empty() {
        eprintln!("No screenshots found in {}", args[1]);
        return Ok(());
    }

    let mut deck = DeckWriter::new(target);
    for slide in report.slides {
        println!("Slide {}: {} ({})", slide.slide_number, slide.source, slide.original_size);
        deck.add_slide(slide.png);
    }
    deck.save(Path::new(&args[2]))?;

    for skipped in &report.skipped {
        eprintln!("Skipped {}: {}", skipped.source, skipped.reason);
    }

    Ok(())
}
