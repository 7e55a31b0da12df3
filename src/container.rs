use crate::constants::PRESENTATION_PATH;
use crate::parse_rels::parse_slide_rels;
use crate::parse_xml::{parse_presentation_size, parse_slide_xml};
use crate::slide::DeckSlide;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Read access to a PowerPoint (pptx) package.
///
/// `PptxContainer` indexes the slides of a package on open and loads them on
/// demand, together with the media their pictures reference.
pub struct PptxContainer<R = File> {
    archive: zip::ZipArchive<R>,
    pub slide_paths: Vec<String>,
    pub slide_count: u32,
}

impl PptxContainer<File> {
    /// Opens a pptx file from disk.
    ///
    /// # Errors
    ///
    /// Errors are returned on file access problems or when the file is not a zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> PptxContainer<R> {
    /// Indexes the slides of a package read from any seekable source.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;

        let mut slide_paths: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .map(str::to_string)
            .collect();

        // slide10 sorts after slide9, not after slide1
        slide_paths.sort_by_key(|path| DeckSlide::extract_slide_number(path).unwrap_or(u32::MAX));
        let slide_count = slide_paths.len() as u32;

        Ok(Self { archive, slide_paths, slide_count })
    }

    /// Slide size from `ppt/presentation.xml`, in EMU.
    pub fn presentation_size(&mut self) -> Result<(i64, i64)> {
        let data = self.read_file_from_archive(PRESENTATION_PATH)?;
        parse_presentation_size(&data)
    }

    /// Loads every slide in order.
    pub fn parse_all(&mut self) -> Result<Vec<DeckSlide>> {
        let slide_paths = self.slide_paths.clone();
        slide_paths.iter().map(|path| self.load_slide(path)).collect()
    }

    pub fn iter_slides(&mut self) -> SlideIterator<'_, R> {
        SlideIterator::new(self)
    }

    /// Loads the slide at the given zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SlideNotFound`] when the index is out of bounds.
    pub fn slide_at(&mut self, index: usize) -> Result<DeckSlide> {
        let path = self.slide_paths.get(index).cloned().ok_or(Error::SlideNotFound)?;
        self.load_slide(&path)
    }

    /// Loads a slide by its package path, its relationships and the media of its pictures.
    ///
    /// Media that a relationship points at but the package lacks is left out of
    /// `image_data` instead of failing the slide.
    pub fn load_slide(&mut self, slide_path: &str) -> Result<DeckSlide> {
        let slide_data = self.read_file_from_archive(slide_path)?;

        let rels_path = Self::get_slide_rels_path(slide_path);
        let rels_data = self.read_file_from_archive(&rels_path).ok();

        let slide_number = DeckSlide::extract_slide_number(slide_path).unwrap_or(0);
        let pictures = parse_slide_xml(&slide_data)?;

        let images = match rels_data {
            Some(ref rels_bytes) => parse_slide_rels(rels_bytes)?,
            None => Vec::new(),
        };

        let mut image_data = HashMap::new();
        for img_ref in &images {
            let img_path = Self::get_full_image_path(slide_path, &img_ref.target);
            match self.read_file_from_archive(&img_path) {
                Ok(data) => {
                    image_data.insert(img_ref.id.clone(), data);
                }
                Err(e) => log::warn!("{}: missing media {}: {}", slide_path, img_path, e),
            }
        }

        let mut slide = DeckSlide::new(slide_path.to_string(), slide_number, pictures, images, image_data);
        slide.link_images();
        Ok(slide)
    }

    /// Reads a file from the archive by its internal path.
    pub fn read_file_from_archive(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(path)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Path of the relationships part for a slide.
    ///
    /// `ppt/slides/slide1.xml` becomes `ppt/slides/_rels/slide1.xml.rels`.
    pub fn get_slide_rels_path(slide_path: &str) -> String {
        let mut rels_path = slide_path.to_string();
        if let Some(pos) = rels_path.rfind('/') {
            rels_path.insert_str(pos + 1, "_rels/");
        }
        rels_path.push_str(".rels");
        rels_path
    }

    /// Resolves a relationship target relative to the slide that declares it.
    pub fn get_full_image_path(slide_path: &str, target: &str) -> String {
        if let Some(adjusted_target) = target.strip_prefix("../") {
            format!("ppt/{}", adjusted_target)
        } else {
            let slide_dir = slide_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
            format!("{}/{}", slide_dir, target)
        }
    }
}

/// Streams slides one by one instead of loading the whole deck.
pub struct SlideIterator<'a, R> {
    container: &'a mut PptxContainer<R>,
    current_paths: Vec<String>,
    current_index: usize,
}

impl<'a, R: Read + Seek> SlideIterator<'a, R> {
    fn new(container: &'a mut PptxContainer<R>) -> Self {
        let current_paths = container.slide_paths.clone();
        Self { container, current_paths, current_index: 0 }
    }
}

impl<R: Read + Seek> Iterator for SlideIterator<'_, R> {
    type Item = Result<DeckSlide>;

    fn next(&mut self) -> Option<Self::Item> {
        let slide_path = self.current_paths.get(self.current_index)?;
        self.current_index += 1;
        Some(self.container.load_slide(slide_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_slide_rels_path() {
        assert_eq!(
            PptxContainer::<Cursor<Vec<u8>>>::get_slide_rels_path("ppt/slides/slide1.xml"),
            "ppt/slides/_rels/slide1.xml.rels"
        );
    }

    #[test]
    fn test_full_image_path() {
        assert_eq!(
            PptxContainer::<Cursor<Vec<u8>>>::get_full_image_path("ppt/slides/slide1.xml", "../media/image1.png"),
            "ppt/media/image1.png"
        );
        assert_eq!(
            PptxContainer::<Cursor<Vec<u8>>>::get_full_image_path("ppt/slides/slide1.xml", "image1.png"),
            "ppt/slides/image1.png"
        );
    }

    #[test]
    fn test_not_a_zip() {
        let result = PptxContainer::from_reader(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(Error::Zip(_))));
    }
}
