use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use redis_porter::codec::{EncodeOptions, Payload};
use redis_porter::dataset::{Dataset, Document, Entry};
use std::collections::{BTreeMap, BTreeSet};

fn sample_payloads(size: usize) -> Vec<Payload> {
    let members: Vec<String> = (0..size).map(|i| format!("member-{}", i)).collect();
    vec![
        Payload::Scalar(Some("x".repeat(size))),
        Payload::List(members.clone()),
        Payload::Set(members.iter().cloned().collect::<BTreeSet<_>>()),
        Payload::ScoredSet(
            members
                .iter()
                .enumerate()
                .map(|(i, m)| (m.clone(), i as f64 * 0.5))
                .collect::<BTreeMap<_, _>>(),
        ),
        Payload::FieldMap(
            members
                .iter()
                .map(|m| (m.clone(), format!("value-of-{}", m)))
                .collect::<BTreeMap<_, _>>(),
        ),
    ]
}

fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for size in [10, 1000] {
        for payload in sample_payloads(size) {
            let tag = payload.tag();
            let codec = tag.codec();
            let json = codec.to_json(&payload).unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("{}_to_json", tag), size),
                &payload,
                |b, payload| b.iter(|| black_box(codec.to_json(black_box(payload)).unwrap())),
            );

            group.bench_with_input(
                BenchmarkId::new(format!("{}_from_json", tag), size),
                &json,
                |b, json| b.iter(|| black_box(codec.from_json(black_box(json.clone())).unwrap())),
            );

            group.bench_with_input(
                BenchmarkId::new(format!("{}_encode", tag), size),
                &payload,
                |b, payload| {
                    b.iter(|| {
                        black_box(
                            codec
                                .encode("key", black_box(payload.clone()), &EncodeOptions::default())
                                .unwrap(),
                        )
                    })
                },
            );
        }
    }

    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let mut dataset = Dataset::new();
    for (i, payload) in sample_payloads(100).into_iter().cycle().take(500).enumerate() {
        dataset.insert(format!("key:{}", i), Entry::new(payload.tag(), -1, payload));
    }
    let bytes = dataset.to_vec(false).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let mut group = c.benchmark_group("document");

    group.bench_function("serialize_compact", |b| {
        b.iter(|| black_box(dataset.to_vec(false).unwrap()))
    });

    group.bench_function("serialize_pretty", |b| {
        b.iter(|| black_box(dataset.to_vec(true).unwrap()))
    });

    group.bench_function("parse_entries", |b| {
        b.iter(|| {
            let document = Document::parse(black_box(&text)).unwrap();
            let valid = document.entries().filter(|(_, entry)| entry.is_ok()).count();
            black_box(valid)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_codec, benchmark_document);
criterion_main!(benches);
