//! Conversion benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use fb2epub_core::decoder::Fb2Decoder;
use fb2epub_core::encoder::{Encoder, EpubEncoder};

fn sample_source(sections: usize) -> String {
    let body: String = (1..=sections)
        .map(|i| {
            let paragraphs: String = (0..20)
                .map(|p| {
                    format!("<p>Paragraph {p} of section {i}, with <emphasis>some</emphasis> text.</p>")
                })
                .collect();
            format!("<section><title><p>Section {i}</p></title>{paragraphs}</section>")
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<FictionBook xmlns="http://www.gribuser.ru/xml/fictionbook/2.0">
  <description><title-info><book-title>Bench</book-title></title-info></description>
  <body>{body}</body>
  <binary id="img.png" content-type="image/png">iVBORw0KGgo=</binary>
</FictionBook>"#
    )
}

fn conversion_benchmark(c: &mut Criterion) {
    let source = sample_source(50);
    let decoder = Fb2Decoder::new();
    let encoder = EpubEncoder::new();

    c.bench_function("decode_fb2", |b| {
        b.iter(|| decoder.decode_str(std::hint::black_box(&source)).unwrap())
    });

    let book = decoder.decode_str(&source).unwrap();
    c.bench_function("encode_epub", |b| {
        b.iter(|| {
            let mut output = Vec::new();
            encoder.encode(std::hint::black_box(&book), &mut output).unwrap();
            output
        })
    });
}

criterion_group!(benches, conversion_benchmark);
criterion_main!(benches);
