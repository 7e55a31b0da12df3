//! Fits a single screenshot onto a slide canvas
//!
//! Run with: cargo run --example fit_image <input.png> <output.png> [width] [height]

use slidefit::{FitConfig, Result, Size, SlideFitter};
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --example fit_image <input.png> <output.png> [width] [height]");
        return Ok(());
    }

    let width = args.get(3).and_then(|w| w.parse().ok()).unwrap_or(1920);
    let height = args.get(4).and_then(|h| h.parse().ok()).unwrap_or(1080);

    let config = FitConfig::builder()
        .target(Size::new(width, height))
        .build();
    let fitter = SlideFitter::new(config);

    let fitted = fitter.fit_file(Path::new(&args[1]))?;
    fs::write(&args[2], SlideFitter::encode_png(&fitted)?)?;

    println!("Wrote {} ({}x{})", args[2], fitted.width(), fitted.height());
    Ok(())
}
