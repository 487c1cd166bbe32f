//! Benchmarks for Streebog hashing

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use streebog_core::{Streebog256, Streebog512, compress, digest_batch, load_words};

fn bench_compress(c: &mut Criterion) {
    let h = load_words(&[0x01; 64]);
    let n = load_words(&[0x02; 64]);
    let m = load_words(&[0x03; 64]);

    c.bench_function("streebog_compress", |b| {
        b.iter(|| compress(black_box(&h), black_box(&n), black_box(&m)))
    });
}

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("streebog_digest");

    for size in [64usize, 1024, 16 * 1024] {
        let input = vec![0xABu8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("256", size), &input, |b, input| {
            b.iter(|| Streebog256::digest(black_box(input)))
        });
        group.bench_with_input(BenchmarkId::new("512", size), &input, |b, input| {
            b.iter(|| Streebog512::digest(black_box(input)))
        });
    }

    group.finish();
}

fn bench_hmac(c: &mut Criterion) {
    let key = [0x0Bu8; 32];
    let data = b"benchmark input data for HMAC-Streebog";

    c.bench_function("streebog_hmac_256", |b| {
        b.iter(|| Streebog256::hmac(black_box(data), black_box(&key)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let messages: Vec<Vec<u8>> = (0..64u8).map(|i| vec![i; 4096]).collect();

    c.bench_function("streebog_batch_512", |b| {
        b.iter(|| digest_batch::<64, _>(black_box(&messages)))
    });
}

criterion_group!(benches, bench_compress, bench_digest, bench_hmac, bench_batch);
criterion_main!(benches);
