//! Pool Concurrency Tests
//!
//! Tests for thread safety:
//! - Concurrent name resolution
//! - Concurrent writes to one bucket
//! - Readers racing writers
//! - Independent buckets under load

use crate::*;
use std::collections::HashSet;
use std::sync::Barrier;
use std::thread;

/// Test concurrent writes to the same bucket leave one of the written values
#[test]
fn test_concurrent_bucket_access() {
    let pool: DataPool<usize> = create_pool();
    let bucket = pool.bucket("concurrent");

    const NUM_THREADS: usize = 50;

    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let bucket = bucket.clone();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                bucket.put(i)
            })
        })
        .collect();

    let stamps: Vec<Timestamp> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let (value, ts, fresh) = bucket.get(Timestamp::ZERO).into_parts();
    let value = value.expect("some write should have landed");
    assert!(value < NUM_THREADS);
    assert!(ts > Timestamp::ZERO);
    assert!(fresh);

    // Last write wins: the surviving stamp is the highest one handed out
    assert_eq!(Some(&ts), stamps.iter().max());
    let unique: HashSet<_> = stamps.iter().collect();
    assert_eq!(unique.len(), NUM_THREADS, "Every write to one bucket gets its own stamp");
}

/// Test concurrent creation of distinct names
#[test]
fn test_concurrent_bucket_creation() {
    let pool: DataPool<usize> = create_pool();

    const NUM_THREADS: usize = 10;

    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let pool = pool.clone();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                let bucket = pool.bucket(&format!("bucket-{}", i));
                bucket.put(i);
                bucket.id()
            })
        })
        .collect();

    let ids: HashSet<BucketId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), NUM_THREADS, "Distinct names get distinct ids");
    assert_eq!(pool.len(), NUM_THREADS);

    for i in 0..NUM_THREADS {
        let bucket = pool.lookup(&format!("bucket-{}", i)).expect("bucket should exist");
        assert_eq!(bucket.get(Timestamp::ZERO).value, Some(i));
    }
}

/// Test racing first use of one name creates exactly one bucket
#[test]
fn test_concurrent_same_new_name() {
    let pool: DataPool<usize> = create_pool();
    pool.bucket("unrelated");

    const NUM_THREADS: usize = 32;

    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let pool = pool.clone();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                let bucket = pool.bucket("same-name");
                bucket.put(i);
                bucket.id()
            })
        })
        .collect();

    let ids: HashSet<BucketId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), 1, "All callers should resolve to one bucket");
    assert_eq!(pool.len(), 2, "Pool should grow by exactly one bucket");
    assert!(pool.bucket("same-name").get(Timestamp::ZERO).value.is_some());
}

/// Test resolving an existing name from many threads
#[test]
fn test_concurrent_existing_name() {
    let pool: DataPool<String> = create_pool();
    let bucket = pool.bucket("same-name");
    bucket.put("initial".to_string());

    const NUM_THREADS: usize = 10;

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let pool = pool.clone();
            thread::spawn(move || {
                let b = pool.bucket("same-name");
                b.put(format!("value-{}", i));
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(pool.len(), 1, "Should have only one bucket despite concurrent access");
    let value = pool.bucket("same-name").get(Timestamp::ZERO).into_value();
    assert!(value.map(|v| v.starts_with("value-")).unwrap_or(false));
}

#[derive(Debug, Clone)]
struct Pair {
    left: u64,
    right: u64,
}

/// Test readers never observe a half-written value
#[test]
fn test_readers_never_see_torn_values() {
    let pool: DataPool<Pair> = create_pool();
    let bucket = pool.bucket("pair");
    bucket.put(Pair { left: 0, right: 0 });

    const NUM_WRITERS: usize = 4;
    const NUM_READERS: usize = 4;
    const OPS_PER_THREAD: u64 = 2_000;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS + NUM_READERS));
    let mut handles = Vec::new();

    for w in 0..NUM_WRITERS as u64 {
        let bucket = bucket.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for j in 0..OPS_PER_THREAD {
                let n = w * OPS_PER_THREAD + j;
                bucket.put(Pair { left: n, right: n });
            }
        }));
    }

    for _ in 0..NUM_READERS {
        let bucket = bucket.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let mut last = Timestamp::ZERO;
            for _ in 0..OPS_PER_THREAD {
                let read = bucket.get(last);
                let pair = read.value.expect("bucket was written before readers started");
                assert_eq!(pair.left, pair.right, "torn read: {:?}", pair);
                assert!(read.timestamp >= last, "stamps went backwards for a reader");
                last = read.timestamp;
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
}

/// Test concurrent writes to different buckets stay independent
#[test]
fn test_concurrent_writes_different_buckets() {
    let pool: DataPool<usize> = create_pool();

    const NUM_WRITERS: usize = 10;
    const WRITES_PER_THREAD: usize = 50;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|i| {
            let pool = pool.clone();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                let bucket = pool.bucket(&format!("bucket_{}", i));
                let mut last = Timestamp::ZERO;
                for j in 0..WRITES_PER_THREAD {
                    let ts = bucket.put(j);
                    assert!(ts > last);
                    last = ts;
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    for i in 0..NUM_WRITERS {
        let bucket = pool.bucket(&format!("bucket_{}", i));
        assert_eq!(
            bucket.get(Timestamp::ZERO).value,
            Some(WRITES_PER_THREAD - 1),
            "Bucket {} should hold its last write",
            i
        );
    }
    assert_eq!(pool.len(), NUM_WRITERS);
}

/// Test reads by id stay valid while the registry grows
#[test]
fn test_reads_while_registry_grows() {
    let pool: DataPool<usize> = create_pool();
    let anchor = pool.bucket("anchor");
    let ts = anchor.put(42);

    const NEW_BUCKETS: usize = 200;

    let grower = {
        let pool = pool.clone();
        thread::spawn(move || {
            for i in 0..NEW_BUCKETS {
                pool.bucket(&format!("grow-{}", i)).put(i);
            }
        })
    };

    let reader = {
        let anchor = anchor.clone();
        thread::spawn(move || {
            for _ in 0..NEW_BUCKETS * 10 {
                assert_eq!(anchor.get(Timestamp::ZERO).into_parts(), (Some(42), ts, true));
            }
        })
    };

    grower.join().unwrap();
    reader.join().unwrap();
    assert_eq!(pool.len(), NEW_BUCKETS + 1);
    assert_eq!(anchor.id(), BucketId::new(0));
}
