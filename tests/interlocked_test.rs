use crossbeam_utils::CachePadded;
use interlock::concurrency::interlocked;
use interlock::{Interlocked, InterlockedPtr};
use std::collections::HashMap;
use std::sync::Barrier;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn cells_are_send_sync() {
    assert_send_sync::<Interlocked<i32>>();
    assert_send_sync::<InterlockedPtr<u64>>();
    #[cfg(target_pointer_width = "64")]
    assert_send_sync::<Interlocked<i64>>();
}

#[test]
fn increment_then_decrement_restores() {
    let v0 = 17;
    let cell = Interlocked::new(v0);
    assert_eq!(cell.increment(), v0 + 1);
    assert_eq!(cell.decrement(), v0);
    assert_eq!(cell.load(), v0);
}

#[test]
fn concurrent_increments_are_not_lost() {
    const THREADS: i32 = 8;
    const ROUNDS: i32 = 100_000;

    let counter = Interlocked::new(0i32);
    let barrier = Barrier::new(THREADS as usize);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    counter.increment();
                }
            });
        }
    });

    assert_eq!(counter.load(), THREADS * ROUNDS);
    assert_eq!(counter.load(), 800_000);
}

#[test]
fn mixed_adds_and_decrements_balance() {
    const THREADS: usize = 8;
    const ROUNDS: i32 = 20_000;

    let counter = Interlocked::new(1_000i32);
    thread::scope(|s| {
        for t in 0..THREADS {
            let counter = &counter;
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    if t % 2 == 0 {
                        counter.add(3);
                    } else {
                        counter.add(-2);
                        counter.decrement();
                    }
                }
            });
        }
    });

    assert_eq!(counter.load(), 1_000);
}

#[test]
fn add_returns_are_unique_running_sums() {
    // Every add of 1 must observe a distinct post-value: no two threads can be
    // handed the same result.
    const THREADS: usize = 4;
    const ROUNDS: usize = 5_000;

    let counter = Interlocked::new(0i32);
    let seen: Vec<Vec<i32>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|| (0..ROUNDS).map(|_| counter.add(1)).collect::<Vec<_>>()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut all: Vec<i32> = seen.into_iter().flatten().collect();
    all.sort_unstable();
    let expected: Vec<i32> = (1..=(THREADS * ROUNDS) as i32).collect();
    assert_eq!(all, expected);
}

#[test]
fn exchange_never_loses_a_value() {
    const THREADS: i32 = 6;
    const ROUNDS: i32 = 10_000;
    const INITIAL: i32 = -1;

    let slot = Interlocked::new(INITIAL);
    let barrier = Barrier::new(THREADS as usize);

    let previous: Vec<i32> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let slot = &slot;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    (0..ROUNDS)
                        .map(|i| slot.exchange(t * ROUNDS + i))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    // Values written plus the initial value == values returned plus the final value.
    let mut written: HashMap<i32, usize> = HashMap::new();
    *written.entry(INITIAL).or_default() += 1;
    for v in 0..THREADS * ROUNDS {
        *written.entry(v).or_default() += 1;
    }

    let mut observed: HashMap<i32, usize> = HashMap::new();
    for v in previous.into_iter().chain(std::iter::once(slot.load())) {
        *observed.entry(v).or_default() += 1;
    }

    assert_eq!(observed, written);
}

#[test]
fn compare_exchange_has_exactly_one_winner() {
    const THREADS: usize = 8;

    for _ in 0..50 {
        let mut targets: Vec<CachePadded<u64>> = (0..THREADS as u64).map(CachePadded::new).collect();
        let pointers: Vec<usize> = targets
            .iter_mut()
            .map(|t| (&mut **t as *mut u64) as usize)
            .collect();

        let mut initial = 0u64;
        let expected: *mut u64 = &mut initial;
        let slot = InterlockedPtr::new(expected);
        let barrier = Barrier::new(THREADS);

        let winners: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = pointers
                .iter()
                .map(|&mine| {
                    let slot = &slot;
                    let barrier = &barrier;
                    let expected = expected as usize;
                    s.spawn(move || {
                        barrier.wait();
                        let seen = slot.compare_exchange(expected as *mut u64, mine as *mut u64);
                        (seen as usize == expected).then_some(mine)
                    })
                })
                .collect();
            handles
                .into_iter()
                .filter_map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(winners.len(), 1, "exactly one thread must win");
        assert_eq!(slot.load() as usize, winners[0]);
    }
}

#[test]
fn exchange_pointer_hands_off_ownership() {
    let slot: InterlockedPtr<String> = InterlockedPtr::null();

    let first = Box::into_raw(Box::new(String::from("first")));
    assert!(slot.exchange(first).is_null());

    let second = Box::into_raw(Box::new(String::from("second")));
    let taken = slot.exchange(second);
    assert_eq!(taken, first);

    // SAFETY: each pointer came from `Box::into_raw` and is reclaimed once.
    let first = unsafe { Box::from_raw(taken) };
    assert_eq!(*first, "first");
    let second = unsafe { Box::from_raw(slot.exchange(std::ptr::null_mut())) };
    assert_eq!(*second, "second");
    assert!(slot.load().is_null());
}

#[test]
fn raw_functions_on_caller_memory() {
    let mut words = [0i32; 4];
    let base = words.as_mut_ptr();

    thread::scope(|s| {
        for i in 0..4 {
            let addr = base.wrapping_add(i) as usize;
            s.spawn(move || {
                let location = addr as *mut i32;
                for _ in 0..1_000 {
                    // SAFETY: each element is aligned and only touched atomically.
                    unsafe {
                        interlocked::increment(location);
                    }
                }
            });
        }
    });

    assert_eq!(words, [1_000; 4]);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn wide_counter_crosses_32_bits() {
    let counter = Interlocked::new(i64::from(u32::MAX) - 4);
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..10 {
                    counter.increment();
                }
            });
        }
    });
    assert_eq!(counter.load(), i64::from(u32::MAX) + 36);
}
