use crate::constants::IMAGE_NAMESPACE;
use crate::types::ImageReference;
use crate::Result;
use roxmltree::Document;

/// Parses relationship (`.rels`) XML data from a PPTX slide, extracting image references.
///
/// Slide relationships map resource IDs (as used by `r:embed` on a picture) to
/// package paths. Only relationships of the image type are returned.
///
/// # Errors
///
/// An error is returned if:
/// - The XML data is not valid UTF-8.
/// - Malformed or invalid XML structure is detected.
pub fn parse_slide_rels(xml_data: &[u8]) -> Result<Vec<ImageReference>> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();

    let images = root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
        .filter(|rel| rel.attribute("Type") == Some(IMAGE_NAMESPACE))
        .filter_map(|rel| {
            let id = rel.attribute("Id")?;
            let target = rel.attribute("Target")?;
            Some(ImageReference { id: id.to_string(), target: target.to_string() })
        })
        .collect();

    Ok(images)
}
