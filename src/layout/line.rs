//! Line, page and document representation for layout segmentation.
//!
//! A [`Line`] is one positioned text fragment as produced by the extraction
//! collaborator. The segmentation stages annotate it in place with its
//! column, heading score and block id.

use crate::config::{DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

lazy_static! {
    /// Month names, bare years (year ranges match twice) and "Present".
    static ref DATE_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?|present)\b|\b(?:19|20)\d{2}\b"
    )
    .unwrap();
}

/// Returns true if `text` looks like it carries a date.
///
/// # Examples
///
/// ```
/// use section_oxide::layout::line::has_date;
///
/// assert!(has_date("Jan 2020 - Present"));
/// assert!(has_date("2016-2019"));
/// assert!(!has_date("Rust, Go, SQL"));
/// ```
pub fn has_date(text: &str) -> bool {
    DATE_PATTERN.is_match(text)
}

/// One fragment of text on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The text content (non-empty)
    pub text: String,
    /// Bounding box, top-down coordinates
    pub bbox: Rect,
    /// Largest glyph size in the line
    pub font_size: f32,
    /// Distinct font names used in the line
    #[serde(default)]
    pub fonts: BTreeSet<String>,
    /// Zero-based page index
    #[serde(default)]
    pub page: usize,
    /// Zero-based column band, assigned by the column assigner
    #[serde(default)]
    pub column: usize,
    /// Heading likelihood, assigned by the heading scorer
    #[serde(default)]
    pub heading_score: u32,
    /// Block id; 0 means unassigned
    #[serde(default)]
    pub block: usize,
    /// Whether the text matches a date-like pattern
    #[serde(default)]
    pub contains_date: bool,
}

impl Line {
    /// Create a line on page 0 with no font names.
    ///
    /// # Examples
    ///
    /// ```
    /// use section_oxide::geometry::Rect;
    /// use section_oxide::layout::Line;
    ///
    /// let line = Line::new("EXPERIENCE", Rect::from_points(50.0, 140.0, 160.0, 154.0), 14.0);
    /// assert_eq!(line.word_count(), 1);
    /// assert_eq!(line.block, 0);
    /// ```
    pub fn new(text: impl Into<String>, bbox: Rect, font_size: f32) -> Self {
        let text = text.into();
        let contains_date = has_date(&text);
        Self {
            text,
            bbox,
            font_size,
            fonts: BTreeSet::new(),
            page: 0,
            column: 0,
            heading_score: 0,
            block: 0,
            contains_date,
        }
    }

    /// Attach font names.
    pub fn with_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    /// Place the line on a page.
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Left edge.
    pub fn x0(&self) -> f32 {
        self.bbox.left()
    }

    /// Top edge.
    pub fn y0(&self) -> f32 {
        self.bbox.top()
    }

    /// Right edge.
    pub fn x1(&self) -> f32 {
        self.bbox.right()
    }

    /// Bottom edge.
    pub fn y1(&self) -> f32 {
        self.bbox.bottom()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Check the fields the engine relies on.
    pub(crate) fn validate(&self, page: usize, index: usize) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidLine {
            page,
            index,
            reason: reason.to_string(),
        };

        if self.text.trim().is_empty() {
            return Err(invalid("text is empty"));
        }
        if !self.bbox.is_well_formed() {
            return Err(invalid("bounding box is not finite or is inverted"));
        }
        if !self.font_size.is_finite() || self.font_size < 0.0 {
            return Err(invalid("font size must be finite and non-negative"));
        }
        Ok(())
    }
}

/// A page: its dimensions and its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Lines in extraction order
    pub lines: Vec<Line>,
}

impl Page {
    /// Create an empty page.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
        }
    }

    /// Builder-style line insertion.
    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    pub(crate) fn validate(&self, page: usize) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidPage {
                    page,
                    reason: format!("{} must be finite and positive, got {}", name, value),
                });
            }
        }
        self.lines
            .iter()
            .enumerate()
            .try_for_each(|(index, line)| line.validate(page, index))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT)
    }
}

/// A whole document, one entry per page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Group a flat line list into pages by `Line::page`.
    ///
    /// Every page gets the given dimensions. Only page indices that carry a
    /// line produce a page, in ascending index order, so gaps in the
    /// numbering collapse: lines on pages 0 and 7 end up on pages 0 and 1.
    pub fn from_lines(lines: Vec<Line>, width: f32, height: f32) -> Self {
        let mut grouped: BTreeMap<usize, Vec<Line>> = BTreeMap::new();
        for line in lines {
            grouped.entry(line.page).or_default().push(line);
        }

        let pages = grouped
            .into_values()
            .map(|lines| Page::new(width, height).with_lines(lines))
            .collect();
        Self { pages }
    }

    /// Height of the first page, or the fallback height.
    pub fn page_height(&self) -> f32 {
        self.pages
            .first()
            .map(|p| p.height)
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    /// Width of the first page, or the fallback width.
    pub fn page_width(&self) -> f32 {
        self.pages
            .first()
            .map(|p| p.width)
            .unwrap_or(DEFAULT_PAGE_WIDTH)
    }

    /// Total number of lines across pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// True when no page carries a line.
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}
