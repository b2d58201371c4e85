use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hoard::{Cache, CacheConfig, Envelope};

fn populated(n: u64) -> Cache<u64, Vec<u8>> {
    let cache = Cache::with_config(CacheConfig::default().with_initial_capacity(n as usize));
    let data = vec![b'x'; 1024];
    for id in 0..n {
        cache.upsert_value(id, data.clone());
    }
    cache
}

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_envelope_1kb", |b| {
        let cache = populated(100);

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get_envelope(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_lazy_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("lazy_fill");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("miss_then_fill", |b| {
        let cache: Cache<u64, u64> = Cache::with_lookup(|k| Some(k * 2));

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_update_if_newer", |b| {
        let cache = populated(100);
        let data = vec![b'y'; 1024];

        let mut counter = 0u64;
        b.iter(|| {
            let key = counter % 100;
            if counter.is_multiple_of(2) {
                black_box(cache.get_envelope(&key));
            } else {
                black_box(cache.update_if_newer(key, Envelope::new(data.clone())));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_contended_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.sample_size(20);

    group.bench_function("4_threads_1000_gets", |b| {
        let cache = Arc::new(populated(1000));

        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let cache = Arc::clone(&cache);
                    thread::spawn(move || {
                        for id in 0..1000 {
                            black_box(cache.get_envelope(&id));
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(50);

    group.bench_function("scan_1000", |b| {
        let cache: Cache<u64, u64> = Cache::new();
        for id in 0..1000 {
            cache.upsert_value(id, id);
        }

        b.iter(|| black_box(cache.search(|v| v % 7 == 0)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_lazy_fill,
    bench_mixed_50_50,
    bench_contended_reads,
    bench_search
);
criterion_main!(benches);
