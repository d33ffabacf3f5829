use criterion::{black_box, criterion_group, criterion_main, Criterion};
use interlock::{backend, Interlocked, InterlockedPtr};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use std::thread;

const THREADS: usize = 4;
const ITEMS: usize = 10_000;

fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("uncontended/{}", backend()));

    group.bench_function("std_atomic_fetch_add", |b| {
        let counter = AtomicI32::new(0);
        b.iter(|| black_box(counter.fetch_add(1, Ordering::SeqCst)));
    });

    group.bench_function("interlocked_increment", |b| {
        let counter = Interlocked::new(0i32);
        b.iter(|| black_box(counter.increment()));
    });

    group.bench_function("interlocked_exchange", |b| {
        let counter = Interlocked::new(0i32);
        b.iter(|| black_box(counter.exchange(black_box(7))));
    });

    group.bench_function("interlocked_compare_exchange_pointer", |b| {
        let mut target = 0u8;
        let ptr: *mut u8 = &mut target;
        let slot = InterlockedPtr::new(ptr);
        b.iter(|| black_box(slot.compare_exchange(ptr, ptr)));
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("contended/{}", backend()));

    group.bench_function("std_mutex_counter", |b| {
        let counter = Mutex::new(0i32);
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..THREADS {
                    s.spawn(|| {
                        for _ in 0..ITEMS {
                            *counter.lock().unwrap() += 1;
                        }
                    });
                }
            });
        });
    });

    group.bench_function("interlocked_counter", |b| {
        let counter = Interlocked::new(0i32);
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..THREADS {
                    s.spawn(|| {
                        for _ in 0..ITEMS {
                            counter.increment();
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_uncontended, bench_contended);
criterion_main!(benches);
