use slidefit::{fit_image, Error, FitConfig, FitPlan, Rgb, RgbImage, Size, SlideFitter, WHITE};

const SLIDE: Size = Size::new(1920, 1080);

fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Top half red, bottom half blue.
fn two_band(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| if y < height / 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) })
}

#[test]
fn test_landscape_screenshot_is_width_driven() {
    let src = solid(800, 600, [10, 20, 30]);
    let plan = FitPlan::compute(Size::new(800, 600), SLIDE).unwrap();
    assert_eq!(plan.resized, Size::new(1920, 1440));
    assert_eq!(plan.crop.top, 0);
    assert_eq!(plan.crop.bottom, 1080);

    let out = fit_image(&src, SLIDE, WHITE).unwrap();
    assert_eq!(out.dimensions(), (1920, 1080));
}

#[test]
fn test_panorama_is_height_driven() {
    let plan = FitPlan::compute(Size::new(2000, 500), SLIDE).unwrap();
    assert_eq!(plan.resized, Size::new(4320, 1080));
    assert_eq!(plan.crop.left, 1200);
    assert_eq!(plan.crop.right, 3120);
    assert_eq!(plan.paste, None);
}

#[test]
fn test_tall_page_keeps_its_top() {
    // A long page: the top band must fill the slide, the bottom band is cut.
    let src = two_band(192, 400);
    let out = fit_image(&src, Size::new(192, 108), WHITE).unwrap();
    assert_eq!(out.dimensions(), (192, 108));
    assert_eq!(out.get_pixel(96, 0), &Rgb([255, 0, 0]));
    assert_eq!(out.get_pixel(96, 107), &Rgb([255, 0, 0]));
}

#[test]
fn test_same_size_is_untouched() {
    let src = RgbImage::from_fn(160, 90, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
    let out = fit_image(&src, Size::new(160, 90), WHITE).unwrap();
    assert_eq!(out, src);
}

#[test]
fn test_zero_sized_source_is_invalid() {
    for (w, h) in [(0, 600), (800, 0)] {
        let err = fit_image(&RgbImage::new(w, h), SLIDE, WHITE).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { width, height } if width == w && height == h));
    }
}

#[test]
fn test_fitter_uses_configured_canvas() {
    let fitter = SlideFitter::new(FitConfig::builder().target(Size::new(320, 180)).build());
    let out = fitter.fit_image(&solid(1000, 3000, [0, 255, 0])).unwrap();
    assert_eq!(out.dimensions(), (320, 180));
}

#[test]
fn test_fitter_enforces_pixel_budget() {
    let fitter = SlideFitter::new(
        FitConfig::builder()
            .target(Size::new(100, 100))
            .max_resized_pixels(Some(100 * 150))
            .build(),
    );
    // 1x2 -> 100x200 resized, over budget
    let err = fitter.fit_image(&solid(1, 2, [0, 0, 0])).unwrap_err();
    assert!(matches!(err, Error::ResourceLimit { pixels: 20_000, limit: 15_000 }));

    // 2x3 -> 100x150 resized, exactly at the budget
    assert!(fitter.fit_image(&solid(2, 3, [0, 0, 0])).is_ok());
}

#[test]
fn test_fitter_decodes_png_bytes() {
    let png = SlideFitter::encode_png(&solid(40, 30, [1, 2, 3])).unwrap();
    let fitter = SlideFitter::new(FitConfig::builder().target(Size::new(16, 9)).build());
    let out = fitter.fit_bytes(&png).unwrap();
    assert_eq!(out.dimensions(), (16, 9));
}

#[test]
fn test_fitter_rejects_garbage_bytes() {
    let fitter = SlideFitter::default();
    assert!(matches!(fitter.fit_bytes(b"definitely not an image"), Err(Error::Image(_))));
}
