use crate::types::{ImageReference, PictureElement, Size};
use crate::Result;
use image::RgbImage;
use std::collections::HashMap;

/// A slide read back from a pptx package.
#[derive(Debug)]
pub struct DeckSlide {
    pub rel_path: String,
    pub slide_number: u32,
    pub pictures: Vec<PictureElement>,
    pub images: Vec<ImageReference>,
    /// Raw media bytes keyed by relationship id.
    pub image_data: HashMap<String, Vec<u8>>,
}

impl DeckSlide {
    pub fn new(
        rel_path: String,
        slide_number: u32,
        pictures: Vec<PictureElement>,
        images: Vec<ImageReference>,
        image_data: HashMap<String, Vec<u8>>,
    ) -> Self {
        Self { rel_path, slide_number, pictures, images, image_data }
    }

    /// Extracts the number from a path like `ppt/slides/slide12.xml`.
    pub fn extract_slide_number(path: &str) -> Option<u32> {
        path.split('/')
            .last()
            .and_then(|filename| filename.strip_prefix("slide").and_then(|s| s.strip_suffix(".xml")))
            .and_then(|num_str| num_str.parse::<u32>().ok())
    }

    /// Copies the media target of each relationship onto the pictures that use it.
    pub fn link_images(&mut self) {
        let id_to_target: HashMap<&str, &str> = self
            .images
            .iter()
            .map(|img_ref| (img_ref.id.as_str(), img_ref.target.as_str()))
            .collect();

        for picture in &mut self.pictures {
            if let Some(target) = id_to_target.get(picture.rel_id.as_str()) {
                picture.target = target.to_string();
            }
        }
    }

    /// Media bytes of a picture, if they were loaded.
    pub fn picture_data(&self, picture: &PictureElement) -> Option<&[u8]> {
        self.image_data.get(&picture.rel_id).map(Vec::as_slice)
    }

    /// Decodes the first picture on the slide.
    ///
    /// Returns `Ok(None)` when the slide has no picture with loaded media.
    pub fn decode_background(&self) -> Result<Option<RgbImage>> {
        let Some(data) = self.pictures.first().and_then(|p| self.picture_data(p)) else {
            return Ok(None);
        };
        Ok(Some(image::load_from_memory(data)?.to_rgb8()))
    }

    /// Pixel size of the first picture's media without keeping the decoded image.
    pub fn background_size(&self) -> Result<Option<Size>> {
        Ok(self.decode_background()?.map(|img| Size::from(img.dimensions())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(DeckSlide::extract_slide_number("ppt/slides/slide12.xml"), Some(12));
        assert_eq!(DeckSlide::extract_slide_number("ppt/slides/notes.xml"), None);
    }

    #[test]
    fn test_link_images() {
        let picture = PictureElement {
            rel_id: "rId2".into(),
            target: String::new(),
            name: "Slide Image 1".into(),
            offset: (0, 0),
            extent: (10, 10),
        };
        let mut slide = DeckSlide::new(
            "ppt/slides/slide1.xml".into(),
            1,
            vec![picture],
            vec![ImageReference { id: "rId2".into(), target: "../media/image1.png".into() }],
            HashMap::new(),
        );
        slide.link_images();
        assert_eq!(slide.pictures[0].target, "../media/image1.png");
        assert!(slide.decode_background().unwrap().is_none());
    }
}
