//! Integration tests for the segmentation pipeline.
//!
//! These tests build mock resume pages from positioned lines and check the
//! block structure the pipeline produces.

use proptest::prelude::*;
use section_oxide::config::SegmenterConfig;
use section_oxide::geometry::Rect;
use section_oxide::layout::{detect_columns, Document, Line, Page};
use section_oxide::pipeline::{SegmentationPipeline, SegmentedDocument};
use section_oxide::Error;
use std::collections::BTreeSet;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

/// A line whose height equals its font size.
fn mock_heading(text: &str, x: f32, y: f32, size: f32) -> Line {
    let width = text.len() as f32 * size * 0.6;
    Line::new(text, Rect::from_points(x, y, x + width, y + size), size)
}

/// A body line 12 units tall.
fn mock_body(text: &str, x0: f32, x1: f32, y: f32) -> Line {
    Line::new(text, Rect::from_points(x0, y, x1, y + 12.0), 10.0)
}

fn texts(result: &SegmentedDocument) -> Vec<&str> {
    result.lines.iter().map(|l| l.text.as_str()).collect()
}

/// Check the structural guarantees every segmentation must hold.
fn assert_well_formed(input_len: usize, result: &SegmentedDocument, config: &SegmenterConfig) {
    assert_eq!(result.lines.len(), input_len, "every line is kept");

    if input_len == 0 {
        assert_eq!(result.block_count, 0);
        return;
    }

    let ids: BTreeSet<usize> = result.lines.iter().map(|l| l.block).collect();
    let expected: BTreeSet<usize> = (1..=result.block_count).collect();
    assert_eq!(ids, expected, "block ids are contiguous from 1");
    assert!(result.block_count <= config.max_blocks);
    assert!(
        result.lines.windows(2).all(|w| w[0].block <= w[1].block),
        "lines are grouped by ascending block id"
    );

    for block in result.blocks() {
        let best = block.lines.iter().map(|l| l.heading_score).max().unwrap();
        assert_eq!(
            block.heading().heading_score,
            best,
            "block {} leads with its heading",
            block.id
        );
        if result.block_count > 1 {
            assert!(
                block.word_count() >= config.min_block_words,
                "block {} is too small",
                block.id
            );
        }
    }
}

// ============================================================================
// Column Detection
// ============================================================================

#[test]
fn test_two_separated_lines_detect_two_columns() {
    let lines = vec![
        mock_body("left", 0.0, 100.0, 50.0),
        mock_body("right", 300.0, 400.0, 50.0),
    ];
    let bands = detect_columns(&lines, 600.0, &SegmenterConfig::default());
    assert_eq!(bands.len(), 2);
}

#[test]
fn test_continuous_lines_detect_one_column() {
    let lines: Vec<Line> = (0..4)
        .map(|i| {
            let x = i as f32 * 100.0;
            mock_body("text", x, x + 100.0, 50.0)
        })
        .collect();
    let bands = detect_columns(&lines, 400.0, &SegmenterConfig::default());
    assert_eq!(bands.len(), 1);
}

// ============================================================================
// End-to-End Segmentation
// ============================================================================

#[test]
fn test_education_experience_yields_two_blocks() {
    let lines = vec![
        mock_heading("EDUCATION", 50.0, 40.0, 14.0),
        mock_body("State University", 50.0, 300.0, 60.0),
        mock_body("B.Sc. Computer Science", 50.0, 300.0, 75.0),
        mock_body("Graduated with honours", 50.0, 300.0, 90.0),
        mock_heading("EXPERIENCE", 50.0, 140.0, 14.0),
        mock_body("Engineer at Acme Corp", 50.0, 300.0, 160.0),
        mock_body("Built the billing system", 50.0, 300.0, 175.0),
    ];

    let result = SegmentationPipeline::new().segment_lines(lines).unwrap();

    assert_eq!(result.block_count, 2);
    assert_eq!(
        texts(&result),
        vec![
            "EDUCATION",
            "State University",
            "B.Sc. Computer Science",
            "Graduated with honours",
            "EXPERIENCE",
            "Engineer at Acme Corp",
            "Built the billing system",
        ]
    );

    let blocks: Vec<_> = result.blocks().collect();
    assert_eq!(blocks[0].section_key(), "education");
    assert_eq!(blocks[1].section_key(), "experience");
    for block in &blocks {
        let tops: Vec<f32> = block.lines[1..].iter().map(|l| l.y0()).collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
    }
    assert!(!result.search.converged);
}

#[test]
fn test_empty_input_yields_no_blocks() {
    let result = SegmentationPipeline::new().segment_lines(Vec::new()).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.block_count, 0);
}

#[test]
fn test_two_column_resume_reads_left_column_first() {
    let left_x1 = [150.0, 170.0, 190.0, 200.0];
    let right_x1 = [500.0, 520.0, 560.0, 580.0];
    let left_texts = [
        "SKILLS",
        "Rust and Go",
        "Distributed systems",
        "SQL and Postgres",
        "LANGUAGES",
        "English, native",
        "German, fluent",
        "Spanish, basic",
    ];
    let right_texts = [
        "EXPERIENCE",
        "Staff engineer at Initech since 2019",
        "Led the storage team of six",
        "Cut p99 latency by a half",
        "EDUCATION",
        "M.Sc. Computer Science, 2015",
        "Thesis on consensus protocols",
        "Teaching assistant for networks",
    ];

    let mut lines = Vec::new();
    for (i, text) in left_texts.iter().enumerate() {
        lines.push(mock_body(text, 30.0, left_x1[i % 4], 100.0 + i as f32 * 40.0));
    }
    for (i, text) in right_texts.iter().enumerate() {
        lines.push(mock_body(text, 320.0, right_x1[i % 4], 100.0 + i as f32 * 40.0));
    }
    // Supply the right column first; reading order must not depend on it.
    lines.reverse();

    let result = SegmentationPipeline::new().segment_lines(lines).unwrap();

    assert_eq!(result.pages[0].columns.cuts(), &[0.0, 260.0, 600.0]);
    let columns: Vec<usize> = result.lines.iter().map(|l| l.column).collect();
    let first_right = columns.iter().position(|&c| c == 1).unwrap();
    assert!(columns[..first_right].iter().all(|&c| c == 0));
    assert!(columns[first_right..].iter().all(|&c| c == 1));
    assert_well_formed(16, &result, &SegmenterConfig::default());
}

#[test]
fn test_many_sections_are_merged_down_to_ten() {
    let mut lines = vec![mock_heading("Jane Doe", 50.0, 20.0, 24.0)];
    for i in 0..11 {
        let y = 200.0 + i as f32 * 70.0;
        lines.push(mock_heading(&format!("SECTION {}", i + 1), 50.0, y, 14.0));
        lines.push(mock_body("one two three four five six seven", 50.0, 500.0, y + 18.0));
        lines.push(mock_body("eight nine ten eleven twelve thirteen", 50.0, 500.0, y + 31.0));
    }
    let input_len = lines.len();

    let config = SegmenterConfig::default();
    let result = SegmentationPipeline::with_config(config.clone())
        .segment_lines(lines)
        .unwrap();

    assert_eq!(result.search.block_count, 11);
    assert_eq!(result.search.threshold, 3.0);
    assert_eq!(result.block_count, 10);
    assert_eq!(result.lines[0].text, "Jane Doe");
    assert_well_formed(input_len, &result, &config);
}

#[test]
fn test_multi_page_document() {
    let first = Page::new(600.0, 800.0).with_lines(vec![
        mock_heading("SUMMARY", 50.0, 40.0, 14.0),
        mock_body("Backend engineer with ten years in payments", 50.0, 400.0, 60.0),
    ]);
    let second = Page::new(600.0, 800.0).with_lines(vec![
        mock_heading("PROJECTS", 50.0, 40.0, 14.0),
        mock_body("An embedded key-value store written in Rust", 50.0, 400.0, 60.0),
    ]);

    let result = SegmentationPipeline::new()
        .segment(Document::new(vec![first, second]))
        .unwrap();

    assert_eq!(result.pages.len(), 2);
    let pages: Vec<usize> = result.lines.iter().map(|l| l.page).collect();
    assert_eq!(pages, vec![0, 0, 1, 1]);
    assert_well_formed(4, &result, &SegmenterConfig::default());
}

#[test]
fn test_sparse_page_indices_are_compacted() {
    let lines = vec![
        mock_heading("PROJECTS", 50.0, 40.0, 14.0).on_page(usize::MAX),
        mock_body("An embedded key-value store written in Rust", 50.0, 400.0, 60.0)
            .on_page(usize::MAX),
        mock_heading("SUMMARY", 50.0, 40.0, 14.0).on_page(10_000_000),
        mock_body("Backend engineer with ten years in payments", 50.0, 400.0, 60.0)
            .on_page(10_000_000),
    ];

    let result = SegmentationPipeline::new().segment_lines(lines).unwrap();

    assert_eq!(result.pages.len(), 2);
    assert_eq!(
        texts(&result),
        vec![
            "SUMMARY",
            "Backend engineer with ten years in payments",
            "PROJECTS",
            "An embedded key-value store written in Rust",
        ]
    );
    let pages: Vec<usize> = result.lines.iter().map(|l| l.page).collect();
    assert_eq!(pages, vec![0, 0, 1, 1]);
    assert_eq!(result.block_count, 2);
    assert_well_formed(4, &result, &SegmenterConfig::default());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_empty_text_is_rejected() {
    let page = Page::default().with_lines(vec![mock_body("  ", 0.0, 100.0, 10.0)]);
    let err = SegmentationPipeline::new()
        .segment(Document::new(vec![page]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLine { index: 0, .. }));
}

#[test]
fn test_inverted_box_is_rejected() {
    let page = Page::default().with_lines(vec![mock_body("backwards", 200.0, 100.0, 10.0)]);
    let err = SegmentationPipeline::new()
        .segment(Document::new(vec![page]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLine { .. }));
}

#[test]
fn test_infinite_font_size_is_rejected() {
    let line = Line::new("big", Rect::from_points(0.0, 0.0, 10.0, 10.0), f32::INFINITY);
    let err = SegmentationPipeline::new()
        .segment_lines(vec![line])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLine { .. }));
}

#[test]
fn test_non_positive_page_is_rejected() {
    let err = SegmentationPipeline::new()
        .segment(Document::new(vec![Page::new(600.0, -1.0)]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPage { .. }));
}

// ============================================================================
// Properties
// ============================================================================

const VOCABULARY: &[&str] = &[
    "EDUCATION",
    "Experience",
    "SKILLS:",
    "Projects",
    "Jan 2020 - Present",
    "Built a search engine in Rust",
    "Led a team of five engineers across two sites",
    "Python",
    "B.Sc. Physics, 2014",
    "Volunteer at the local food bank every weekend",
];

fn arb_line() -> impl Strategy<Value = Line> {
    (
        0..VOCABULARY.len(),
        0.0f32..500.0,
        20.0f32..100.0,
        0.0f32..950.0,
        prop::sample::select(vec![9.0f32, 10.0, 11.0, 12.0, 14.0, 18.0]),
        0usize..2,
    )
        .prop_map(|(word, x, width, y, size, page)| {
            Line::new(
                VOCABULARY[word],
                Rect::from_points(x, y, x + width, y + size),
                size,
            )
            .on_page(page)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_segmentation_is_well_formed(lines in prop::collection::vec(arb_line(), 0..60)) {
        let config = SegmenterConfig::default();
        let input_len = lines.len();
        let result = SegmentationPipeline::with_config(config.clone())
            .segment_lines(lines)
            .unwrap();
        assert_well_formed(input_len, &result, &config);
    }

    #[test]
    fn prop_segmentation_ignores_input_order(
        (lines, shuffled) in prop::collection::vec(arb_line(), 1..40)
            .prop_flat_map(|lines| (Just(lines.clone()), Just(lines).prop_shuffle()))
    ) {
        let pipeline = SegmentationPipeline::new();
        let a = pipeline.segment_lines(lines).unwrap();
        let b = pipeline.segment_lines(shuffled).unwrap();
        prop_assert_eq!(a.lines, b.lines);
        prop_assert_eq!(a.block_count, b.block_count);
    }
}
