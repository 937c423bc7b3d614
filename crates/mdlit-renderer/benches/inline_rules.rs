//! Benchmarks for inline rule scanning and rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mdlit_renderer::{ExtensionName, ExtensionOptions, HtmlBuffer, Markdown, mdlit};

/// Generate markdown with custom syntax sprinkled through every paragraph.
fn generate_markdown(sections: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(sections * 50 + sections * paragraphs_per_section * 250);
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i} -- overview\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "Paragraph {j} -> [red]hot[/red] and [blue]cold[/blue] with **bold**, \
                 `code -> span` and @(github)(Repo {i})(github.com/org/repo-{j}).\n\n"
            ));
        }
        md.push_str("??? note \"Details\"\n    Hidden -> text.\n\n");
    }
    md
}

/// Markdown without any custom syntax, to measure scanning overhead.
fn generate_plain(paragraphs: usize) -> String {
    let mut md = String::new();
    for i in 0..paragraphs {
        md.push_str(&format!(
            "Plain paragraph {i} with *emphasis*, a [link](https://example.com) and `code`.\n\n"
        ));
    }
    md
}

fn bench_render_simple(c: &mut Criterion) {
    let options = ExtensionOptions::default();

    c.bench_function("render_simple_markdownlit", |b| {
        b.iter(|| {
            let mut out = HtmlBuffer::new();
            mdlit("Hello -> [green]world[/green] -- again", &options, &mut out)
        });
    });
}

fn bench_plain_overhead(c: &mut Criterion) {
    let markdown = generate_plain(50);
    let options = ExtensionOptions::default();
    let mut group = c.benchmark_group("plain_50p");
    group.throughput(Throughput::Bytes(markdown.len() as u64));

    group.bench_function("commonmark", |b| {
        let mut md = Markdown::new();
        b.iter(|| md.convert(&markdown));
    });
    group.bench_function("markdownlit", |b| {
        let mut md = Markdown::new();
        ExtensionName::MarkdownLit.apply(&mut md, &options).unwrap();
        b.iter(|| md.convert(&markdown));
    });

    group.finish();
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let options = ExtensionOptions::default();
    let mut group = c.benchmark_group("render_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(sections, paragraphs);

        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("markdownlit", format!("{sections}s_{paragraphs}p")),
            &markdown,
            |b, text| {
                b.iter(|| {
                    let mut out = HtmlBuffer::new();
                    mdlit(text, &options, &mut out)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_plain_overhead,
    bench_render_varying_sizes
);
criterion_main!(benches);
