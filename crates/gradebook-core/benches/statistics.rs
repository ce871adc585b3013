use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::codec;
use gradebook_core::statistics::median;
use gradebook_core::RecordStore;

fn make_store(students: usize, scores_per_student: usize) -> RecordStore {
    let mut store = RecordStore::new();
    for i in 0..students {
        let id = format!("s{i:05}");
        store.add_student(id.as_str(), format!("Student {i}"));
        for j in 0..scores_per_student {
            let value = ((i * 7 + j * 13) % 81) as f64 / 4.0;
            store.add_score(&id, value).unwrap();
        }
    }
    store
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for students in [100, 1_000, 10_000] {
        let store = make_store(students, 8);
        group.bench_function(format!("students={students}"), |b| {
            b.iter(|| black_box(&store).rank())
        });
    }

    group.finish();
}

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");
    let store = make_store(1_000, 12);

    group.bench_function("overall_average", |b| {
        b.iter(|| black_box(&store).overall_average())
    });

    let values: Vec<f64> = (0..1_001).map(|i| (i % 81) as f64 / 4.0).collect();
    group.bench_function("median_1001", |b| b.iter(|| median(black_box(&values))));

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let store = make_store(1_000, 12);
    let text = codec::encode(&store);

    group.bench_function("encode_1000", |b| b.iter(|| codec::encode(black_box(&store))));
    group.bench_function("decode_1000", |b| b.iter(|| codec::decode(black_box(&text))));

    group.finish();
}

criterion_group!(benches, bench_rank, bench_aggregates, bench_codec);
criterion_main!(benches);
