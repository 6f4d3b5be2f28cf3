//! Concurrency tests for SearchPathRegistry.
//!
//! These verify that concurrent writers are serialized, that readers never
//! see a partially applied mutation, and that lazy context creation yields
//! exactly one instance per name.

use loadpath::{DuplicatePolicy, Location, SearchPathRegistry};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

fn loc(thread: usize, i: usize) -> Location {
    Location::parse(&format!("https://t{}.example.com/{}/", thread, i)).unwrap()
}

#[test]
fn test_concurrent_resolve_returns_one_instance() {
    let registry = Arc::new(SearchPathRegistry::default());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.resolve_context(Some("x"))
            })
        })
        .collect();

    let contexts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for ctx in &contexts[1..] {
        assert!(Arc::ptr_eq(ctx, &contexts[0]));
    }
    assert_eq!(
        registry.contexts().iter().filter(|n| *n == "x").count(),
        1
    );
}

#[test]
fn test_concurrent_prepends_keep_per_thread_order() {
    let registry = Arc::new(SearchPathRegistry::default());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    registry.prepend("shared", loc(t, i)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let order = registry.snapshot(Some("shared")).to_vec();
    assert_eq!(order.len(), THREADS * PER_THREAD);

    // Whatever the interleaving, each thread's own prepends come out reversed.
    for t in 0..THREADS {
        let positions: Vec<usize> = (0..PER_THREAD)
            .map(|i| order.iter().position(|l| *l == loc(t, i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] > w[1]));
    }
}

#[test]
fn test_concurrent_append_then_remove_leaves_empty() {
    let registry = Arc::new(SearchPathRegistry::default());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    registry.append("churn", loc(t, i)).unwrap();
                }
                for i in 0..PER_THREAD {
                    assert!(registry.remove("churn", &loc(t, i)).unwrap().is_removed());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert!(registry.list_locations(Some("churn")).is_empty());
}

#[test]
fn test_readers_only_see_whole_appends() {
    let registry = Arc::new(SearchPathRegistry::default());
    let ctx = registry.resolve_context(Some("growing"));
    let total = 500;

    let writer = {
        let ctx = Arc::clone(&ctx);
        thread::spawn(move || {
            for i in 0..total {
                ctx.append(loc(0, i));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut last_len = 0;
                while last_len < total {
                    let snap = ctx.snapshot();
                    // Appends only: every snapshot is a prefix of the final order.
                    assert!(snap.len() >= last_len);
                    for (i, l) in snap.iter().enumerate() {
                        assert_eq!(*l, loc(0, i));
                    }
                    last_len = snap.len();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(ctx.len(), total);
}

#[test]
fn test_forbid_policy_under_contention() {
    let registry = Arc::new(
        SearchPathRegistry::builder()
            .duplicate_policy(DuplicatePolicy::Forbid)
            .build(),
    );
    let barrier = Arc::new(Barrier::new(THREADS));

    // Every thread inserts the same set; each location must land exactly once.
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    if t % 2 == 0 {
                        registry.append("dedup", loc(99, i)).unwrap();
                    } else {
                        registry.prepend("dedup", loc(99, i)).unwrap();
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let ids = registry.list_locations(Some("dedup"));
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), PER_THREAD);
    assert_eq!(unique.len(), PER_THREAD);
}
