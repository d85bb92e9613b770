//! Benchmarks for the cleaning pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use teiclean::{CleanOptions, ParseOptions, SerializeOptions, clean, parse_bytes, to_string};

const PLAY_BYTES: &[u8] = include_bytes!("../tests/fixtures/play.xml");

/// The fixture's body repeated until the document is a few hundred KB.
fn large_document() -> String {
    let play = String::from_utf8_lossy(PLAY_BYTES);
    let start = play.find("<body>").unwrap() + "<body>".len();
    let end = play.find("</body>").unwrap();
    let act = &play[start..end];

    let mut xml = String::from(&play[..start]);
    for _ in 0..500 {
        xml.push_str(act);
    }
    xml.push_str(&play[end..]);
    xml
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_fixture", |b| {
        b.iter(|| parse_bytes(PLAY_BYTES, &ParseOptions::default()).unwrap());
    });
}

fn bench_clean(c: &mut Criterion) {
    let large = large_document();
    let doc = parse_bytes(large.as_bytes(), &ParseOptions::default()).unwrap();

    c.bench_function("clean_large", |b| {
        b.iter(|| clean(&doc, &CleanOptions::default()));
    });

    c.bench_function("clean_large_segmented", |b| {
        b.iter(|| clean(&doc, &CleanOptions::new().with_segmentation(true)));
    });
}

fn bench_serialize(c: &mut Criterion) {
    let large = large_document();
    let doc = parse_bytes(large.as_bytes(), &ParseOptions::default()).unwrap();
    let cleaned = clean(&doc, &CleanOptions::default());

    c.bench_function("serialize_large", |b| {
        b.iter(|| to_string(&cleaned.document, &SerializeOptions::default()));
    });
}

criterion_group!(benches, bench_parse, bench_clean, bench_serialize);
criterion_main!(benches);
