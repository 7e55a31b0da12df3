//! Page height heuristics for screenshot capture.
//!
//! A headless browser captures a page at a fixed width; the height has to be
//! chosen up front. These helpers estimate it from the markup and make the page
//! stretch to it, so long pages are not clipped before the fit step.

use crate::types::Size;
use once_cell::sync::Lazy;
use regex::Regex;

/// Height of a page with no content beyond its frame.
pub const BASE_HEIGHT: u32 = 800;
pub const MIN_HEIGHT: u32 = 1080;
pub const MAX_HEIGHT: u32 = 2160;

const PX_PER_CHAR: f64 = 0.5;
const PX_PER_IMAGE: f64 = 200.0;
const PX_PER_TABLE: f64 = 150.0;

static SCRIPT_OR_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]*);").unwrap());
static IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img\b").unwrap());
static TABLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<table\b").unwrap());
static HEAD_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</head\s*>").unwrap());
static HTML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html\b[^>]*>").unwrap());

/// What the height estimate was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentEstimate {
    pub text_length: usize,
    pub image_count: usize,
    pub table_count: usize,
    /// Estimated page height in pixels, clamped to `MIN_HEIGHT..=MAX_HEIGHT`.
    pub height: u32,
}

/// Estimates how tall `html` renders, from its visible text length and the
/// number of images and tables it contains.
pub fn estimate_content_height(html: &str) -> ContentEstimate {
    let without_scripts = SCRIPT_OR_STYLE.replace_all(html, "");
    let without_comments = COMMENT.replace_all(&without_scripts, "");
    let text = decode_entities(&TAG.replace_all(&without_comments, ""));

    let text_length = text.chars().count();
    let image_count = IMG_TAG.find_iter(&without_comments).count();
    let table_count = TABLE_TAG.find_iter(&without_comments).count();

    let estimated = BASE_HEIGHT as f64
        + text_length as f64 * PX_PER_CHAR
        + image_count as f64 * PX_PER_IMAGE
        + table_count as f64 * PX_PER_TABLE;
    let height = (estimated as u64).clamp(MIN_HEIGHT as u64, MAX_HEIGHT as u64) as u32;

    log::debug!(
        "content estimate: {} chars, {} image(s), {} table(s) -> {}px",
        text_length,
        image_count,
        table_count,
        height
    );

    ContentEstimate { text_length, image_count, table_count, height }
}

/// Replaces character references with the characters they stand for.
/// Unknown named references are kept verbatim.
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                match name {
                    "nbsp" => Some('\u{a0}'),
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "copy" => Some('\u{a9}'),
                    "reg" => Some('\u{ae}'),
                    "hellip" => Some('\u{2026}'),
                    "mdash" => Some('\u{2014}'),
                    "ndash" => Some('\u{2013}'),
                    _ => None,
                }
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Capture viewport for `html` at the given page width.
pub fn viewport_for(html: &str, width: u32) -> Size {
    Size::new(width, estimate_content_height(html).height)
}

/// Returns `html` with a style block that makes the page at least `height_px` tall.
pub fn inject_min_height(html: &str, height_px: u32) -> String {
    let style = min_height_style(height_px);

    if let Some(m) = HEAD_CLOSE.find(html) {
        let mut out = String::with_capacity(html.len() + style.len());
        out.push_str(&html[..m.start()]);
        out.push_str(&style);
        out.push_str(&html[m.start()..]);
        return out;
    }

    if let Some(m) = HTML_OPEN.find(html) {
        let mut out = String::with_capacity(html.len() + style.len());
        out.push_str(&html[..m.end()]);
        out.push_str(&style);
        out.push_str(&html[m.end()..]);
        return out;
    }

    format!("{}{}", style, html)
}

fn min_height_style(height_px: u32) -> String {
    format!(
        "<style>\n\
         html, body {{ height: auto !important; min-height: {h}px !important; \
         overflow-x: hidden; overflow-y: visible; margin: 0; padding: 0; }}\n\
         .page-body, .page {{ height: auto !important; min-height: {h}px !important; \
         margin: 0; padding: 20px; box-sizing: border-box; }}\n\
         div, section, article, main, table {{ height: auto !important; min-height: fit-content; }}\n\
         img {{ max-width: 100%; height: auto; }}\n\
         </style>\n",
        h = height_px
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_uses_minimum() {
        let estimate = estimate_content_height("<html><body></body></html>");
        assert_eq!(estimate.text_length, 0);
        assert_eq!(estimate.height, MIN_HEIGHT);
    }

    #[test]
    fn test_counts_images_and_tables() {
        let html = "<body><IMG src=a.png><img src=b.png><table></table><p>hi</p></body>";
        let estimate = estimate_content_height(html);
        assert_eq!(estimate.image_count, 2);
        assert_eq!(estimate.table_count, 1);
        assert_eq!(estimate.text_length, 2);
        // 800 + 1 + 400 + 150
        assert_eq!(estimate.height, 1351);
    }

    #[test]
    fn test_ignores_scripts_styles_and_comments() {
        let html = "<head><style>body { color: red; }</style><script>let x = 1;</script></head>\
                    <body><!-- <img src=x> -->abc</body>";
        let estimate = estimate_content_height(html);
        assert_eq!(estimate.text_length, 3);
        assert_eq!(estimate.image_count, 0);
    }

    #[test]
    fn test_entities_count_as_one_character() {
        let estimate = estimate_content_height("<p>a&nbsp;&amp;&lt;b&#39;&#x2014;</p>");
        assert_eq!(estimate.text_length, 7);

        assert_eq!(decode_entities("&quot;x&quot; &copy;"), "\"x\" \u{a9}");
        assert_eq!(decode_entities("&bogus; & &#xZZ;"), "&bogus; & &#xZZ;");
    }

    #[test]
    fn test_height_is_capped() {
        let html = format!("<body>{}</body>", "가".repeat(10_000));
        let estimate = estimate_content_height(&html);
        assert_eq!(estimate.text_length, 10_000);
        assert_eq!(estimate.height, MAX_HEIGHT);
    }

    #[test]
    fn test_viewport_for() {
        assert_eq!(viewport_for("<p>x</p>", 1920), Size::new(1920, MIN_HEIGHT));
    }

    #[test]
    fn test_inject_before_head_close() {
        let out = inject_min_height("<html><head><title>t</title></head><body></body></html>", 1500);
        let style_at = out.find("<style>").unwrap();
        assert!(style_at < out.find("</head>").unwrap());
        assert!(out.contains("min-height: 1500px !important"));
    }

    #[test]
    fn test_inject_without_head() {
        let out = inject_min_height("<html lang=\"ko\"><body></body></html>", 1200);
        assert!(out.starts_with("<html lang=\"ko\"><style>"));

        let out = inject_min_height("<p>bare</p>", 1200);
        assert!(out.starts_with("<style>"));
        assert!(out.ends_with("<p>bare</p>"));
    }
}
