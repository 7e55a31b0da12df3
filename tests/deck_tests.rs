use slidefit::{DeckWriter, Error, FitConfig, PptxContainer, Rgb, RgbImage, Size, SlideFitter};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

const CANVAS: Size = Size::new(192, 108);

fn fitter() -> SlideFitter {
    SlideFitter::new(FitConfig::builder().target(CANVAS).build())
}

fn screenshot(width: u32, height: u32, shade: u8) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([shade, shade, shade]));
    SlideFitter::encode_png(&img).unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("slidefit-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Unable to create scratch directory");
    dir
}

#[test]
fn test_batch_keeps_order_and_skips_broken_inputs() {
    let inputs = vec![
        ("01.png".to_string(), screenshot(800, 600, 10)),
        ("02.png".to_string(), b"broken".to_vec()),
        ("03.png".to_string(), screenshot(2000, 500, 30)),
    ];

    let report = fitter().fit_all(inputs);

    assert!(!report.is_complete());
    assert_eq!(report.slides.len(), 2);
    assert_eq!(report.slides[0].source, "01.png");
    assert_eq!(report.slides[0].slide_number, 1);
    assert_eq!(report.slides[0].original_size, Size::new(800, 600));
    assert_eq!(report.slides[1].source, "03.png");
    assert_eq!(report.slides[1].slide_number, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].source, "02.png");
}

#[test]
fn test_deck_round_trip() {
    let report = fitter().fit_all(vec![
        ("a".to_string(), screenshot(800, 600, 50)),
        ("b".to_string(), screenshot(300, 900, 100)),
        ("c".to_string(), screenshot(1920, 1080, 150)),
    ]);
    assert!(report.is_complete());

    let mut deck = DeckWriter::new(CANVAS);
    for slide in report.slides {
        deck.add_slide(slide.png);
    }
    let slide_size = deck.slide_size_emu();
    let cursor = deck.write_to(Cursor::new(Vec::new())).unwrap();

    let mut container = PptxContainer::from_reader(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(container.slide_count, 3);
    assert_eq!(container.presentation_size().unwrap(), slide_size);

    let slides = container.parse_all().unwrap();
    for (index, slide) in slides.iter().enumerate() {
        assert_eq!(slide.slide_number as usize, index + 1);
        assert_eq!(slide.pictures.len(), 1);

        let picture = &slide.pictures[0];
        assert!(picture.is_full_bleed(slide_size));
        assert_eq!(picture.target, format!("../media/image{}.png", index + 1));

        let background = slide.decode_background().unwrap().unwrap();
        assert_eq!(background.dimensions(), (CANVAS.width, CANVAS.height));
    }
}

#[test]
fn test_iterator_and_index_access() {
    let mut deck = DeckWriter::new(CANVAS);
    for shade in [0u8, 255] {
        let fitted = fitter().fit_bytes(&screenshot(50, 50, shade)).unwrap();
        deck.add_slide(SlideFitter::encode_png(&fitted).unwrap());
    }
    let bytes = deck.write_to(Cursor::new(Vec::new())).unwrap().into_inner();

    let mut container = PptxContainer::from_reader(Cursor::new(bytes)).unwrap();
    let numbers: Vec<u32> = container.iter_slides().map(|s| s.unwrap().slide_number).collect();
    assert_eq!(numbers, vec![1, 2]);

    let second = container.slide_at(1).unwrap();
    let background = second.decode_background().unwrap().unwrap();
    assert!(background.get_pixel(0, 0).0.iter().all(|&c| c >= 250));

    assert!(matches!(container.slide_at(2), Err(Error::SlideNotFound)));
}

#[test]
fn test_fit_dir_and_save() {
    let dir = scratch_dir("fit-dir");
    fs::write(dir.join("02.png"), screenshot(640, 480, 20)).unwrap();
    fs::write(dir.join("01.PNG"), screenshot(480, 640, 40)).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let report = fitter().fit_dir(&dir).unwrap();
    assert!(report.is_complete());
    let names: Vec<_> = report
        .slides
        .iter()
        .map(|s| PathBuf::from(&s.source).file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["01.PNG", "02.png"]);

    let mut deck = DeckWriter::new(CANVAS);
    for slide in report.slides {
        deck.add_slide(slide.png);
    }
    let output = dir.join("deck.pptx");
    deck.save(&output).unwrap();

    let container = PptxContainer::open(&output).unwrap();
    assert_eq!(container.slide_count, 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_fit_dir_missing_directory() {
    let missing = std::env::temp_dir().join("slidefit-does-not-exist-7c1e");
    assert!(matches!(fitter().fit_dir(&missing), Err(Error::Io(_))));
}
