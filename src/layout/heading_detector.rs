//! Heading scoring from typographic and positional cues.
//!
//! Each line gets an integer "heading likelihood". The score is a rank
//! signal, not a probability: later stages only look at relative ordering
//! and at the document-wide maximum.

use crate::config::SegmenterConfig;
use crate::layout::document_analyzer::FontHierarchy;
use crate::layout::line::Line;

/// Section titles that commonly head a resume block.
const SECTION_VOCABULARY: &[&str] = &[
    "about",
    "about me",
    "achievements",
    "activities",
    "awards",
    "certifications",
    "certificates",
    "contact",
    "courses",
    "coursework",
    "details",
    "education",
    "employment",
    "employment history",
    "experience",
    "extra-curricular activities",
    "hobbies",
    "honors",
    "interests",
    "internships",
    "languages",
    "objective",
    "personal information",
    "profile",
    "projects",
    "publications",
    "qualifications",
    "references",
    "skills",
    "summary",
    "technical skills",
    "training",
    "volunteering",
    "work experience",
];

/// Font-size tier of a line relative to its page hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeTier {
    /// Within a point of the largest size
    Title,
    /// Within a point of the second level
    Heading,
    /// Within a point of the body level
    Body,
    /// Smaller than the body level
    Small,
}

impl SizeTier {
    /// Classify a font size against a hierarchy.
    pub fn classify(font_size: f32, hierarchy: &FontHierarchy) -> Self {
        if font_size >= hierarchy.title - 1.0 {
            SizeTier::Title
        } else if font_size >= hierarchy.heading - 1.0 {
            SizeTier::Heading
        } else if font_size >= hierarchy.body - 1.0 {
            SizeTier::Body
        } else {
            SizeTier::Small
        }
    }

    /// Points contributed to the heading score.
    pub fn points(&self) -> i32 {
        match self {
            SizeTier::Title => 3,
            SizeTier::Heading => 2,
            SizeTier::Body => 1,
            SizeTier::Small => 0,
        }
    }
}

/// Lower-case `text` and trim surrounding punctuation and whitespace.
///
/// # Examples
///
/// ```
/// use section_oxide::layout::heading_detector::normalize_heading;
///
/// assert_eq!(normalize_heading("  EDUCATION: "), "education");
/// assert_eq!(normalize_heading("- Work Experience -"), "work experience");
/// ```
pub fn normalize_heading(text: &str) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .to_lowercase()
}

/// Whether the normalized text is a known section title.
pub fn is_section_keyword(text: &str) -> bool {
    let normalized = normalize_heading(text);
    SECTION_VOCABULARY.contains(&normalized.as_str())
}

/// True when the text has at least one cased letter and no lower-case ones.
fn is_all_caps(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase()) && !text.chars().any(|c| c.is_lowercase())
}

/// Score one line.
///
/// # Arguments
///
/// * `line` - The line to score
/// * `hierarchy` - Font hierarchy of the line's page
/// * `config` - Supplies the header zone and short-line limit
pub fn score_line(line: &Line, hierarchy: &FontHierarchy, config: &SegmenterConfig) -> u32 {
    let text = line.text.trim();
    let words = line.word_count();
    let mut score = SizeTier::classify(line.font_size, hierarchy).points();

    if is_section_keyword(text) {
        score += 2;
    }
    if is_all_caps(text) {
        score += 1;
    }
    if text.ends_with(':') || text.ends_with('-') {
        score += 1;
    }
    if line.y0() <= config.header_zone {
        score += 1;
    }
    if words <= config.max_heading_words {
        score += 1;
    }
    // An isolated oversized word is usually a logo or stray glyph.
    if words <= 1 && line.font_size > hierarchy.title - 1.0 {
        score -= 1;
    }

    score.max(0) as u32
}

/// Score every line of one page in place.
pub fn score_headings(lines: &mut [Line], hierarchy: &FontHierarchy, config: &SegmenterConfig) {
    for line in lines.iter_mut() {
        line.heading_score = score_line(line, hierarchy, config);
        log::trace!("Heading score {} for {:?}", line.heading_score, line.text);
    }
}
