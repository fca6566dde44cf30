//! Reading the line-extraction JSON.
//!
//! The extractor emits one object per document:
//!
//! ```json
//! {
//!   "page_height": 792.0,
//!   "data": [
//!     {"text": "EDUCATION", "x0": 50.0, "y0": 700.0, "x1": 130.0, "y1": 714.0,
//!      "font_size": 14.0, "fonts": ["Helvetica-Bold"]}
//!   ]
//! }
//! ```
//!
//! `page_width` and the per-line `page` index are optional. Boxes are
//! PDF-style with the origin at the bottom-left unless [`Origin::TopLeft`]
//! says they are already top-down.

use crate::config::{DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::{Document, Line};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Where the extractor's coordinate origin sits.
///
/// The extractor reports PDF user-space boxes, so [`Origin::BottomLeft`] is
/// the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// y grows downward from the top edge
    TopLeft,
    /// y grows upward from the bottom edge (PDF user space)
    #[default]
    BottomLeft,
}

#[derive(Debug, Deserialize)]
struct ExtractedFile {
    #[serde(default = "default_page_height")]
    page_height: f32,
    #[serde(default = "default_page_width")]
    page_width: f32,
    #[serde(default)]
    data: Vec<ExtractedLine>,
}

#[derive(Debug, Deserialize)]
struct ExtractedLine {
    text: String,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    #[serde(default)]
    font_size: f32,
    #[serde(default)]
    fonts: Vec<String>,
    #[serde(default)]
    page: usize,
}

fn default_page_height() -> f32 {
    DEFAULT_PAGE_HEIGHT
}

fn default_page_width() -> f32 {
    DEFAULT_PAGE_WIDTH
}

impl ExtractedLine {
    fn into_line(self, origin: Origin, page_height: f32) -> Line {
        let (top, bottom) = match origin {
            Origin::TopLeft => (self.y0, self.y1),
            Origin::BottomLeft => (page_height - self.y1, page_height - self.y0),
        };
        Line::new(
            self.text.trim(),
            Rect::from_points(self.x0, top, self.x1, bottom),
            self.font_size,
        )
        .with_fonts(self.fonts)
        .on_page(self.page)
    }
}

/// Parse extractor JSON into a document.
///
/// Lines whose text is blank are skipped. Geometry is not validated here;
/// the pipeline does that before segmenting.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) when the input is not valid
/// extractor JSON.
///
/// # Examples
///
/// ```
/// use section_oxide::ingest::{parse_extracted_json, Origin};
///
/// let json = r#"{"page_height": 800, "data": [
///     {"text": "SKILLS", "x0": 50, "y0": 700, "x1": 110, "y1": 714, "font_size": 14, "fonts": []}
/// ]}"#;
/// let doc = parse_extracted_json(json, Origin::BottomLeft).unwrap();
/// assert_eq!(doc.pages[0].lines[0].y0(), 86.0);
/// ```
pub fn parse_extracted_json(json: &str, origin: Origin) -> Result<Document> {
    let file: ExtractedFile = serde_json::from_str(json)?;
    let total = file.data.len();
    let page_height = file.page_height;

    let lines: Vec<Line> = file
        .data
        .into_iter()
        .filter(|l| !l.text.trim().is_empty())
        .map(|l| l.into_line(origin, page_height))
        .collect();

    log::debug!(
        "Ingested {} line(s) ({} blank skipped), page {}x{}, origin {:?}",
        lines.len(),
        total - lines.len(),
        file.page_width,
        page_height,
        origin
    );

    Ok(Document::from_lines(lines, file.page_width, page_height))
}

/// Read and parse an extractor JSON file.
pub fn read_extracted_file(path: impl AsRef<Path>, origin: Origin) -> Result<Document> {
    let json = fs::read_to_string(path)?;
    parse_extracted_json(&json, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pipeline::SegmentationPipeline;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "page_height": 1000,
        "page_width": 612,
        "data": [
            {"text": "  EDUCATION ", "x0": 50, "y0": 40, "x1": 150, "y1": 54, "font_size": 14, "fonts": ["Bold"]},
            {"text": "   ", "x0": 50, "y0": 60, "x1": 60, "y1": 70, "font_size": 10, "fonts": []},
            {"text": "State University", "x0": 50, "y0": 60, "x1": 200, "y1": 72, "font_size": 10, "fonts": ["Regular", "Italic"]},
            {"text": "Page two", "x0": 50, "y0": 10, "x1": 120, "y1": 22, "font_size": 10, "fonts": [], "page": 1}
        ]
    }"#;

    #[test]
    fn test_parse_top_left() {
        let doc = parse_extracted_json(SAMPLE, Origin::TopLeft).unwrap();

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.page_width(), 612.0);
        assert_eq!(doc.page_height(), 1000.0);
        assert_eq!(doc.line_count(), 3);

        let first = &doc.pages[0].lines[0];
        assert_eq!(first.text, "EDUCATION");
        assert_eq!((first.y0(), first.y1()), (40.0, 54.0));
        assert!(first.fonts.contains("Bold"));
        assert_eq!(doc.pages[0].lines[1].fonts.len(), 2);
        assert_eq!(doc.pages[1].lines[0].page, 1);
    }

    #[test]
    fn test_parse_bottom_left_flips_y() {
        let doc = parse_extracted_json(SAMPLE, Origin::BottomLeft).unwrap();
        let first = &doc.pages[0].lines[0];
        assert_eq!((first.y0(), first.y1()), (946.0, 960.0));
        assert_eq!((first.x0(), first.x1()), (50.0, 150.0));
    }

    #[test]
    fn test_default_origin_puts_header_first() {
        // PDF user space: the header sits near page_height, the footer near 0.
        let json = r#"{
            "page_height": 792.0,
            "data": [
                {"text": "Page 1 of 1", "x0": 50, "y0": 20, "x1": 120, "y1": 28, "font_size": 8, "fonts": []},
                {"text": "State University", "x0": 50, "y0": 720, "x1": 200, "y1": 732, "font_size": 10, "fonts": []},
                {"text": "EDUCATION", "x0": 50, "y0": 740, "x1": 150, "y1": 754, "font_size": 14, "fonts": []}
            ]
        }"#;

        let doc = parse_extracted_json(json, Origin::default()).unwrap();
        let result = SegmentationPipeline::new().segment(doc).unwrap();

        let texts: Vec<&str> = result.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["EDUCATION", "State University", "Page 1 of 1"]);
        assert_eq!(result.lines[0].y0(), 38.0);
    }

    #[test]
    fn test_huge_page_index() {
        let json = r#"{"data": [
            {"text": "far away", "x0": 0, "y0": 0, "x1": 10, "y1": 10, "font_size": 10, "page": 18446744073709551615},
            {"text": "nearby", "x0": 0, "y0": 0, "x1": 10, "y1": 10, "font_size": 10, "page": 10000000}
        ]}"#;

        let doc = parse_extracted_json(json, Origin::TopLeft).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].lines[0].text, "nearby");
    }

    #[test]
    fn test_missing_dimensions_fall_back() {
        let doc = parse_extracted_json(r#"{"data": []}"#, Origin::TopLeft).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.page_height(), DEFAULT_PAGE_HEIGHT);
        assert_eq!(doc.page_width(), DEFAULT_PAGE_WIDTH);
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_extracted_json("{\"data\": [", Origin::TopLeft).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let doc = read_extracted_file(file.path(), Origin::TopLeft).unwrap();
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_extracted_file(dir.path().join("absent.json"), Origin::TopLeft).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
