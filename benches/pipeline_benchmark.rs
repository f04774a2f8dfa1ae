//! Benchmarks for the docpress conversion pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic Markdown document that exercises every
//! block kind.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docpress::render::{write_pdf, EmitOptions, LayoutEngine, PageSize, CLASSIC};
use docpress::{analyze, convert, ConvertOptions, OutputFormat};

/// Creates a Markdown document with the given number of sections.
fn create_test_markdown(sections: usize) -> String {
    let mut text = String::from("# Benchmark Document\n\n");

    for i in 0..sections {
        text.push_str(&format!("## Section {}\n\n", i + 1));
        text.push_str(
            "This paragraph has **bold**, *italic* and `code` spans, and enough \
             words to wrap across several lines of the text column.\n\n",
        );
        text.push_str("- first point\n  - nested detail\n- second point\n\n");
        text.push_str("> A quoted remark.\n\n");
        text.push_str("```rust\nfn main() {\n    println!(\"hello\");\n}\n```\n\n");
        text.push_str("| Name | Value |\n|------|-------|\n| a | 1 |\n| b | 2 |\n\n");
    }

    text
}

/// Benchmark text analysis at various sizes.
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for sections in [1, 10, 50].iter() {
        let text = create_test_markdown(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| analyze(black_box(&text), None));
        });
    }

    group.finish();
}

/// Benchmark layout and PDF serialization.
fn bench_pdf_output(c: &mut Criterion) {
    let doc = analyze(&create_test_markdown(20), None);

    c.bench_function("layout_20_sections", |b| {
        b.iter(|| LayoutEngine::new(&CLASSIC, PageSize::A4).layout(black_box(&doc)));
    });

    let layout = LayoutEngine::new(&CLASSIC, PageSize::A4).layout(&doc);
    let options = EmitOptions::new();
    c.bench_function("write_pdf_20_sections", |b| {
        b.iter(|| write_pdf(black_box(&layout), &doc.title, &options).unwrap());
    });
}

/// Benchmark full conversions per output format.
fn bench_conversion(c: &mut Criterion) {
    let text = create_test_markdown(10);

    for format in OutputFormat::ALL {
        let options = ConvertOptions::new().with_format(format);
        c.bench_function(&format!("convert_{}", format), |b| {
            b.iter(|| convert(black_box(&text), &options).unwrap());
        });
    }
}

criterion_group!(benches, bench_analysis, bench_pdf_output, bench_conversion);
criterion_main!(benches);
