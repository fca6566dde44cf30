//! Benchmarks for the segmentation pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use section_oxide::geometry::Rect;
use section_oxide::layout::{detect_columns, Line};
use section_oxide::pipeline::SegmentationPipeline;
use section_oxide::SegmenterConfig;

const HEADINGS: &[&str] = &[
    "SUMMARY",
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "PROJECTS",
    "CERTIFICATIONS",
    "LANGUAGES",
    "INTERESTS",
];

/// A two-column resume with `sections` sections per column.
fn synthetic_resume(sections: usize) -> Vec<Line> {
    let mut lines = vec![Line::new(
        "Jane Doe",
        Rect::from_points(40.0, 20.0, 200.0, 44.0),
        24.0,
    )];

    for (column, (x0, x1)) in [(40.0, 260.0), (330.0, 570.0)].into_iter().enumerate() {
        let mut y = 80.0;
        for s in 0..sections {
            let heading = HEADINGS[(s + column) % HEADINGS.len()];
            let page = (y / 900.0) as usize;
            let top = y % 900.0;
            lines.push(
                Line::new(heading, Rect::from_points(x0, top, x0 + 120.0, top + 14.0), 14.0)
                    .on_page(page),
            );
            for i in 0..4 {
                let top = top + 20.0 + i as f32 * 14.0;
                lines.push(
                    Line::new(
                        "Delivered a feature that customers asked for in 2021",
                        Rect::from_points(x0, top, x1 - (i as f32 * 10.0), top + 12.0),
                        10.0,
                    )
                    .on_page(page),
                );
            }
            y += 100.0;
        }
    }
    lines
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let pipeline = SegmentationPipeline::new();
    let mut group = c.benchmark_group("segment_lines");

    for sections in [4, 8, 16] {
        let lines = synthetic_resume(sections);
        group.bench_with_input(BenchmarkId::from_parameter(lines.len()), &lines, |b, lines| {
            b.iter(|| pipeline.segment_lines(black_box(lines.clone())).unwrap());
        });
    }
    group.finish();
}

fn bench_column_detection(c: &mut Criterion) {
    let lines = synthetic_resume(8);
    let config = SegmenterConfig::default();

    c.bench_function("detect_columns", |b| {
        b.iter(|| detect_columns(black_box(&lines), 600.0, &config));
    });
}

criterion_group!(benches, bench_full_pipeline, bench_column_detection);
criterion_main!(benches);
