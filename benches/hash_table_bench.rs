use chain_table::{fnv, HashTable};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> u64 {
    fnv::hash_bytes(&n.to_le_bytes())
}

fn filled(seed: u64, n: usize) -> (HashTable<u64>, Vec<u64>) {
    let mut t = HashTable::with_buckets(16);
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, &k) in keys.iter().enumerate() {
        t.insert(k, i as u64);
    }
    (t, keys)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("hash_table_insert_10k", |b| {
        b.iter_batched(
            || HashTable::<u64>::with_buckets(16),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.insert(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("hash_table_find_hit", |b| {
        let (t, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(t.find(k));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("hash_table_find_miss", |b| {
        let (t, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef).map(key);
        b.iter(|| {
            let k = miss.next().unwrap();
            black_box(t.find(k));
        })
    });
}

fn bench_cursor_drain(c: &mut Criterion) {
    c.bench_function("hash_table_cursor_drain_10k", |b| {
        b.iter_batched(
            || filled(13, 10_000).0,
            |mut t| {
                let mut cursor = t.cursor();
                while let Some(pair) = cursor.remove() {
                    black_box(pair);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_cursor_drain
}
criterion_main!(benches);
