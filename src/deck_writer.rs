use crate::constants::*;
use crate::types::Size;
use crate::{Error, Result};
use std::fmt::Write as _;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Writes a PowerPoint (pptx) package where every slide is one full-bleed picture.
///
/// The slide size follows the pixel canvas at 96 DPI, so a 1920x1080 canvas
/// produces a 20in x 11.25in slide and every picture covers it exactly.
///
/// # Example
///
/// ```no_run
/// use slidefit::{DeckWriter, Size};
/// use std::path::Path;
///
/// # fn main() -> slidefit::Result<()> {
/// let png = std::fs::read("slide1.png")?;
/// let mut deck = DeckWriter::new(Size::new(1920, 1080));
/// deck.add_slide(png);
/// deck.save(Path::new("deck.pptx"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeckWriter {
    slide_size: Size,
    images: Vec<Vec<u8>>,
}

impl DeckWriter {
    pub fn new(slide_size: Size) -> Self {
        Self { slide_size, images: Vec::new() }
    }

    /// Appends a slide showing the given PNG data.
    pub fn add_slide(&mut self, png: Vec<u8>) {
        self.images.push(png);
    }

    pub fn slide_count(&self) -> usize {
        self.images.len()
    }

    /// Slide dimensions in EMU.
    pub fn slide_size_emu(&self) -> (i64, i64) {
        (
            self.slide_size.width as i64 * EMU_PER_PIXEL,
            self.slide_size.height as i64 * EMU_PER_PIXEL,
        )
    }

    /// Creates `path` and writes the package into it.
    pub fn save(self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let count = self.slide_count();
        self.write_to(file)?;
        log::info!("saved {} slide(s) to {}", count, path.display());
        Ok(())
    }

    /// Writes the package and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDeck`] when no slide was added.
    /// - [`Error::Zip`] / [`Error::Io`] on write failures.
    pub fn write_to<W: Write + Seek>(self, writer: W) -> Result<W> {
        if self.images.is_empty() {
            return Err(Error::EmptyDeck);
        }

        let xml = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let media = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let count = self.images.len();
        let (cx, cy) = self.slide_size_emu();

        let mut zip = ZipWriter::new(writer);

        put(&mut zip, "[Content_Types].xml", &content_types(count), xml)?;
        put(&mut zip, "_rels/.rels", &package_rels(), xml)?;
        put(&mut zip, PRESENTATION_PATH, &presentation(count, cx, cy), xml)?;
        put(&mut zip, "ppt/_rels/presentation.xml.rels", &presentation_rels(count), xml)?;
        put(&mut zip, "ppt/slideMasters/slideMaster1.xml", &slide_master(), xml)?;
        put(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", &slide_master_rels(), xml)?;
        put(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &slide_layout(), xml)?;
        put(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", &slide_layout_rels(), xml)?;
        put(&mut zip, "ppt/theme/theme1.xml", &theme(), xml)?;

        for (index, png) in self.images.iter().enumerate() {
            let number = index + 1;
            put(&mut zip, &format!("ppt/slides/slide{}.xml", number), &slide(number, cx, cy), xml)?;
            put(&mut zip, &format!("ppt/slides/_rels/slide{}.xml.rels", number), &slide_rels(number), xml)?;
            zip.start_file(format!("ppt/media/image{}.png", number), media)?;
            zip.write_all(png)?;
        }

        Ok(zip.finish()?)
    }
}

fn put<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, body: &str, options: SimpleFileOptions) -> Result<()> {
    zip.start_file(name, options)?;
    zip.write_all(body.as_bytes())?;
    Ok(())
}

fn relationships(entries: &[(String, &str, String)]) -> String {
    let mut out = format!("{}<Relationships xmlns=\"{}\">", XML_HEADER, PACKAGE_RELS_NAMESPACE);
    for (id, rel_type, target) in entries {
        let _ = write!(out, r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#, id, rel_type, target);
    }
    out.push_str("</Relationships>");
    out
}

fn content_types(slide_count: usize) -> String {
    let mut out = format!("{}<Types xmlns=\"{}\">", XML_HEADER, CONTENT_TYPES_NAMESPACE);
    let _ = write!(out, r#"<Default Extension="rels" ContentType="{}"/>"#, RELS_CT);
    out.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    out.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
    let _ = write!(out, r#"<Override PartName="/{}" ContentType="{}"/>"#, PRESENTATION_PATH, PRESENTATION_CT);
    let _ = write!(out, r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{}"/>"#, SLIDE_MASTER_CT);
    let _ = write!(out, r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{}"/>"#, SLIDE_LAYOUT_CT);
    let _ = write!(out, r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="{}"/>"#, THEME_CT);
    for number in 1..=slide_count {
        let _ = write!(out, r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#, number, SLIDE_CT);
    }
    out.push_str("</Types>");
    out
}

fn package_rels() -> String {
    relationships(&[("rId1".to_string(), OFFICE_DOCUMENT_REL, PRESENTATION_PATH.to_string())])
}

fn namespaces() -> String {
    format!(r#"xmlns:a="{}" xmlns:r="{}" xmlns:p="{}""#, A_NAMESPACE, RELS_NAMESPACE, P_NAMESPACE)
}

// rId1 is the master, rId2 the theme, slides start at rId3.
fn presentation(slide_count: usize, cx: i64, cy: i64) -> String {
    let mut out = format!("{}<p:presentation {}>", XML_HEADER, namespaces());
    out.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    out.push_str("<p:sldIdLst>");
    for index in 0..slide_count {
        let _ = write!(out, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + index, index + 3);
    }
    out.push_str("</p:sldIdLst>");
    let _ = write!(out, r#"<p:sldSz cx="{}" cy="{}"/>"#, cx, cy);
    out.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    out.push_str("</p:presentation>");
    out
}

fn presentation_rels(slide_count: usize) -> String {
    let mut entries = vec![
        ("rId1".to_string(), SLIDE_MASTER_REL, "slideMasters/slideMaster1.xml".to_string()),
        ("rId2".to_string(), THEME_REL, "theme/theme1.xml".to_string()),
    ];
    for index in 0..slide_count {
        entries.push((format!("rId{}", index + 3), SLIDE_REL, format!("slides/slide{}.xml", index + 1)));
    }
    relationships(&entries)
}

const EMPTY_TREE: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

fn slide_master() -> String {
    format!(
        concat!(
            "{header}<p:sldMaster {ns}><p:cSld><p:spTree>{tree}</p:spTree></p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
            r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        header = XML_HEADER,
        ns = namespaces(),
        tree = EMPTY_TREE
    )
}

fn slide_master_rels() -> String {
    relationships(&[
        ("rId1".to_string(), SLIDE_LAYOUT_REL, "../slideLayouts/slideLayout1.xml".to_string()),
        ("rId2".to_string(), THEME_REL, "../theme/theme1.xml".to_string()),
    ])
}

fn slide_layout() -> String {
    format!(
        concat!(
            r#"{header}<p:sldLayout {ns} type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{tree}</p:spTree></p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"
        ),
        header = XML_HEADER,
        ns = namespaces(),
        tree = EMPTY_TREE
    )
}

fn slide_layout_rels() -> String {
    relationships(&[("rId1".to_string(), SLIDE_MASTER_REL, "../slideMasters/slideMaster1.xml".to_string())])
}

// rId1 is the layout, rId2 the picture.
fn slide(number: usize, cx: i64, cy: i64) -> String {
    format!(
        concat!(
            "{header}<p:sld {ns}><p:cSld><p:spTree>{tree}",
            "<p:pic><p:nvPicPr>",
            r#"<p:cNvPr id="2" name="Slide Image {number}"/>"#,
            r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            r#"<p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            "</p:pic></p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
        ),
        header = XML_HEADER,
        ns = namespaces(),
        tree = EMPTY_TREE,
        number = number,
        cx = cx,
        cy = cy
    )
}

fn slide_rels(number: usize) -> String {
    relationships(&[
        ("rId1".to_string(), SLIDE_LAYOUT_REL, "../slideLayouts/slideLayout1.xml".to_string()),
        ("rId2".to_string(), IMAGE_NAMESPACE, format!("../media/image{}.png", number)),
    ])
}

fn theme() -> String {
    let colors = [
        ("dk1", "000000"),
        ("lt1", "FFFFFF"),
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ];

    let mut out = format!(
        r#"{}<a:theme xmlns:a="{}" name="Office Theme"><a:themeElements><a:clrScheme name="Office">"#,
        XML_HEADER, A_NAMESPACE
    );
    for (name, rgb) in colors {
        let _ = write!(out, r#"<a:{name}><a:srgbClr val="{rgb}"/></a:{name}>"#, name = name, rgb = rgb);
    }
    out.push_str("</a:clrScheme>");
    out.push_str(concat!(
        r#"<a:fontScheme name="Office">"#,
        r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
        r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
        "</a:fontScheme>",
        r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        "</a:fillStyleLst><a:lnStyleLst>",
        r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
        r#"<a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
        r#"<a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
        "</a:lnStyleLst><a:effectStyleLst>",
        "<a:effectStyle><a:effectLst/></a:effectStyle>",
        "<a:effectStyle><a:effectLst/></a:effectStyle>",
        "<a:effectStyle><a:effectLst/></a:effectStyle>",
        "</a:effectStyleLst><a:bgFillStyleLst>",
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        "</a:bgFillStyleLst></a:fmtScheme>",
        "</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_slide_size_at_96_dpi() {
        let deck = DeckWriter::new(Size::new(1920, 1080));
        assert_eq!(deck.slide_size_emu(), (18_288_000, 10_287_000));
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let deck = DeckWriter::new(Size::new(1920, 1080));
        assert!(matches!(deck.write_to(Cursor::new(Vec::new())), Err(Error::EmptyDeck)));
    }

    #[test]
    fn test_generated_parts_are_well_formed() {
        for part in [
            content_types(2),
            package_rels(),
            presentation(2, 100, 50),
            presentation_rels(2),
            slide_master(),
            slide_master_rels(),
            slide_layout(),
            slide_layout_rels(),
            slide(1, 100, 50),
            slide_rels(1),
            theme(),
        ] {
            assert!(roxmltree::Document::parse(&part).is_ok(), "malformed part: {}", part);
        }
    }

    #[test]
    fn test_presentation_lists_slides() {
        let xml = presentation(3, 100, 50);
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId5"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="100" cy="50"/>"#));
    }
}
