use std::fmt;

/// Pixel dimensions of an image or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Crop window in the coordinates of the resized image.
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Relationship entry that points a slide at one of its media parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub id: String,
    pub target: String,
}

/// A `<p:pic>` found on a slide. Geometry is in EMU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureElement {
    pub rel_id: String,
    pub target: String,
    pub name: String,
    pub offset: (i64, i64),
    pub extent: (i64, i64),
}

impl PictureElement {
    /// True when the picture starts at the slide origin and covers `slide_size`.
    pub fn is_full_bleed(&self, slide_size: (i64, i64)) -> bool {
        self.offset == (0, 0) && self.extent == slide_size
    }
}
