//! Integration Tests for Memoization
//!
//! Checks call counts of wrapped functions through an external counter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use durable_cache::{Cache, Config, Kwargs, MemoKey};
use tempfile::tempdir;

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&calls), calls)
}

#[test]
fn test_square_counts_calls() {
    let cache: Arc<Cache<MemoKey, u64>> = Arc::new(Cache::in_memory(10, Duration::from_secs(5)));
    let (calls, seen) = counter();
    let expensive = cache.memoize("expensive_func", move |x: u64| {
        seen.fetch_add(1, Ordering::SeqCst);
        x * x
    });

    assert_eq!(expensive(5), 25);
    assert_eq!(expensive(5), 25);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(expensive(6), 36);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_keyword_order_is_irrelevant() {
    let cache: Arc<Cache<MemoKey, i64>> = Arc::new(Cache::in_memory(10, Duration::from_secs(5)));
    let (calls, seen) = counter();
    let combine = cache.memoize_kw("combine", move |(x,): (i64,), kwargs: &Kwargs| {
        seen.fetch_add(1, Ordering::SeqCst);
        x + kwargs.get::<i64>("a").unwrap_or(0) * 10 + kwargs.get::<i64>("b").unwrap_or(0) * 100
    });

    let first = combine((1,), Kwargs::new().with("a", 1).with("b", 2));
    let second = combine((1,), Kwargs::new().with("b", 2).with("a", 1));

    assert_eq!(first, 211);
    assert_eq!(second, 211);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    combine((1,), Kwargs::new().with("a", 2).with("b", 2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_multiple_positional_arguments() {
    let cache: Arc<Cache<MemoKey, String>> = Arc::new(Cache::in_memory(10, Duration::from_secs(5)));
    let (calls, seen) = counter();
    let join = cache.memoize("join", move |(a, b): (String, u32)| {
        seen.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", a, b)
    });

    assert_eq!(join(("x".to_string(), 1)), "x-1");
    assert_eq!(join(("x".to_string(), 1)), "x-1");
    assert_eq!(join(("x".to_string(), 2)), "x-2");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_memoized_results_expire() {
    let cache: Arc<Cache<MemoKey, u64>> = Arc::new(Cache::in_memory(10, Duration::from_millis(200)));
    let (calls, seen) = counter();
    let square = cache.memoize("square", move |x: u64| {
        seen.fetch_add(1, Ordering::SeqCst);
        x * x
    });

    square(3);
    sleep(Duration::from_millis(300));
    square(3);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_memoized_results_are_bounded() {
    let cache: Arc<Cache<MemoKey, u64>> = Arc::new(Cache::in_memory(2, Duration::from_secs(5)));
    let (calls, seen) = counter();
    let square = cache.memoize("square", move |x: u64| {
        seen.fetch_add(1, Ordering::SeqCst);
        x * x
    });

    square(1);
    square(2);
    square(3);
    assert_eq!(cache.len(), 2);

    square(1);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_memoized_results_survive_restart() {
    let dir = tempdir().unwrap();
    let config = Config {
        max_size: 10,
        ttl: Duration::from_secs(60),
        persistence_file: dir.path().join("memo.json"),
        ..Config::default()
    };
    let (calls, seen) = counter();

    {
        let cache: Arc<Cache<MemoKey, u64>> = Arc::new(Cache::open(&config).unwrap());
        let seen = Arc::clone(&seen);
        let square = cache.memoize("square", move |x: u64| {
            seen.fetch_add(1, Ordering::SeqCst);
            x * x
        });
        assert_eq!(square(9), 81);
    }

    let cache: Arc<Cache<MemoKey, u64>> = Arc::new(Cache::open(&config).unwrap());
    let square = cache.memoize("square", move |x: u64| {
        seen.fetch_add(1, Ordering::SeqCst);
        x * x
    });
    assert_eq!(square(9), 81);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
