use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lru_ttl::LruCache;

fn populated(capacity: usize) -> LruCache<usize, String> {
    let cache = LruCache::new(capacity);
    for i in 0..capacity {
        cache.put(i, format!("value-{i}"));
    }
    cache
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_overwrite_1000", |b| {
        let cache = populated(1000);
        let mut counter = 0usize;
        b.iter(|| {
            cache.put(counter % 1000, "value".to_string());
            counter += 1;
        });
    });

    group.bench_function("put_evicting", |b| {
        let cache = populated(1000);
        let mut counter = 1000usize;
        b.iter(|| {
            cache.put(counter, "value".to_string());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let cache = populated(1000);
        let mut counter = 0usize;
        b.iter(|| {
            black_box(cache.get(&(counter % 1000)));
            counter += 1;
        });
    });

    group.bench_function("get_miss", |b| {
        let cache = populated(1000);
        let mut counter = 1000usize;
        b.iter(|| {
            black_box(cache.get(&counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.sample_size(20);

    group.bench_function("4_threads_50_read_50_write", |b| {
        let cache = Arc::new(populated(1000));
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let cache = Arc::clone(&cache);
                    thread::spawn(move || {
                        for i in 0..1000usize {
                            let key = (i * 7 + t) % 1000;
                            if i % 2 == 0 {
                                black_box(cache.get(&key));
                            } else {
                                cache.put(key, "value".to_string());
                            }
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

criterion_group!(benches, bench_put, bench_get, bench_concurrent);
criterion_main!(benches);
