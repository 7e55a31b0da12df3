use crate::constants::{A_NAMESPACE, P_NAMESPACE, RELS_NAMESPACE};
use crate::types::PictureElement;
use crate::{Error, Result};
use roxmltree::{Document, Node};

/// Parses raw XML slide data and extracts every picture placed on the slide.
///
/// Only direct children of `<p:spTree>` are considered; text shapes, group
/// shapes and graphic frames are skipped. The returned pictures carry the
/// relationship id of their image, the media `target` is left empty until the
/// slide links its relationships.
///
/// # Errors
///
/// - [`Error::Utf8`] / [`Error::Xml`] for undecodable or malformed data.
/// - [`Error::ParseError`] when `<p:cSld>` or `<p:spTree>` is missing.
/// - [`Error::ImageNotFound`] when a `<p:pic>` has no `<a:blip r:embed>`.
pub fn parse_slide_xml(xml_data: &[u8]) -> Result<Vec<PictureElement>> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();

    let c_sld = root
        .children()
        .find(|n| is_element(n, P_NAMESPACE, "cSld"))
        .ok_or(Error::ParseError("No <p:cSld> tag was found"))?;

    let sp_tree = c_sld
        .children()
        .find(|n| is_element(n, P_NAMESPACE, "spTree"))
        .ok_or(Error::ParseError("No <p:spTree> tag was found"))?;

    sp_tree
        .children()
        .filter(|n| is_element(n, P_NAMESPACE, "pic"))
        .map(|pic| parse_pic(&pic))
        .collect()
}

/// Reads the slide size (`<p:sldSz cx cy>`) from `ppt/presentation.xml`.
pub fn parse_presentation_size(xml_data: &[u8]) -> Result<(i64, i64)> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;

    let sld_sz = doc
        .root_element()
        .children()
        .find(|n| is_element(n, P_NAMESPACE, "sldSz"))
        .ok_or(Error::ParseError("No <p:sldSz> tag was found"))?;

    let cx = emu_attribute(&sld_sz, "cx").ok_or(Error::ParseError("Invalid slide width"))?;
    let cy = emu_attribute(&sld_sz, "cy").ok_or(Error::ParseError("Invalid slide height"))?;
    Ok((cx, cy))
}

/// Parses a picture node (`<p:pic>`).
///
/// The image reference is taken from `<a:blip r:embed>`, the name from
/// `<p:cNvPr name>` and the placement from `<p:spPr><a:xfrm>`. A picture
/// without a transform is reported at the origin with zero extent.
fn parse_pic(pic_node: &Node) -> Result<PictureElement> {
    let blip_node = pic_node
        .descendants()
        .find(|n| is_element(n, A_NAMESPACE, "blip"))
        .ok_or(Error::ImageNotFound)?;

    let rel_id = blip_node
        .attribute((RELS_NAMESPACE, "embed"))
        .ok_or(Error::ImageNotFound)?;

    let name = pic_node
        .descendants()
        .find(|n| is_element(n, P_NAMESPACE, "cNvPr"))
        .and_then(|n| n.attribute("name"))
        .unwrap_or_default();

    let xfrm = pic_node
        .children()
        .find(|n| is_element(n, P_NAMESPACE, "spPr"))
        .and_then(|sp_pr| sp_pr.children().find(|n| is_element(n, A_NAMESPACE, "xfrm")));

    let (offset, extent) = match xfrm {
        Some(xfrm) => (
            point(&xfrm, "off", "x", "y").unwrap_or((0, 0)),
            point(&xfrm, "ext", "cx", "cy").unwrap_or((0, 0)),
        ),
        None => ((0, 0), (0, 0)),
    };

    Ok(PictureElement {
        rel_id: rel_id.to_string(),
        target: String::new(),
        name: name.to_string(),
        offset,
        extent,
    })
}

fn point(xfrm: &Node, tag: &str, x_attr: &str, y_attr: &str) -> Option<(i64, i64)> {
    let node = xfrm.children().find(|n| is_element(n, A_NAMESPACE, tag))?;
    Some((emu_attribute(&node, x_attr)?, emu_attribute(&node, y_attr)?))
}

fn emu_attribute(node: &Node, name: &str) -> Option<i64> {
    node.attribute(name)?.parse::<i64>().ok()
}

fn is_element(node: &Node, namespace: &str, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(namespace)
}
