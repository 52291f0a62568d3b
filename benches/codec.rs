//! Deserialize/serialize throughput for representative locus messages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use locus_codec::LocusCodec;

fn bench_deserialize(c: &mut Criterion) {
    let message =
        br#"{"is1Active": true, "is2Active": false, "position1x": 120, "position1y": -45, "position1z": 310, "receiverId": 7}"#;

    c.bench_function("deserialize_typical_state", |b| {
        let mut codec = LocusCodec::new();
        b.iter(|| {
            codec.reset();
            codec.deserialize(black_box(message)).unwrap();
        });
    });
}

fn bench_serialize(c: &mut Criterion) {
    let mut codec = LocusCodec::new();
    codec
        .deserialize(
            br#"{"is1Active": true, "is2Active": false, "position1x": 120, "position1y": -45, "position1z": 310, "receiverId": 7}"#,
        )
        .unwrap();

    c.bench_function("serialize_typical_state", |b| {
        let mut buffer = [0u8; 512];
        b.iter(|| {
            let written = codec.serialize(black_box(&mut buffer)).unwrap();
            black_box(written);
        });
    });
}

criterion_group!(benches, bench_deserialize, bench_serialize);
criterion_main!(benches);
