//! Lists the slides of a picture deck and the size of each background
//!
//! Run with: cargo run --example inspect_deck <path/to/deck.pptx>

use slidefit::{PptxContainer, Result};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let pptx_path = if args.len() > 1 {
        &args[1]
    } else {
        eprintln!("Usage: cargo run --example inspect_deck <path/to/deck.pptx>");
        return Ok(());
    };

    let mut container = PptxContainer::open(Path::new(pptx_path))?;
    let slide_size = container.presentation_size()?;
    println!("{} slide(s), {}x{} EMU", container.slide_count, slide_size.0, slide_size.1);

    for slide in container.iter_slides() {
        let slide = slide?;
        for picture in &slide.pictures {
            let bleed = if picture.is_full_bleed(slide_size) { "full-bleed" } else { "placed" };
            println!("  slide {}: {} -> {} ({})", slide.slide_number, picture.name, picture.target, bleed);
        }
        if let Some(size) = slide.background_size()? {
            println!("  slide {}: background {}", slide.slide_number, size);
        }
    }

    Ok(())
}
