pub const P_NAMESPACE: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const A_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const RELS_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const PACKAGE_RELS_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const CONTENT_TYPES_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const IMAGE_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub const OFFICE_DOCUMENT_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const SLIDE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const SLIDE_MASTER_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
pub const SLIDE_LAYOUT_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const THEME_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

pub const PRESENTATION_CT: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const SLIDE_CT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub const SLIDE_MASTER_CT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
pub const SLIDE_LAYOUT_CT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
pub const THEME_CT: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
pub const RELS_CT: &str = "application/vnd.openxmlformats-package.relationships+xml";

pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// Screenshots are laid out at 96 DPI, so one pixel is 9525 EMU.
pub const EMU_PER_PIXEL: i64 = EMU_PER_INCH / 96;
