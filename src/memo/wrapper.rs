//! Memoization Wrapper
//!
//! Higher-order adapters that put a [`Cache`] in front of a pure function.

use std::sync::Arc;

use serde::Serialize;
use tracing::{trace, warn};

use crate::cache::{Cache, CacheValue};
use crate::memo::{Kwargs, MemoKey};

impl<V: CacheValue> Cache<MemoKey, V> {
    // == Memoize ==
    /// Wraps `func` so repeated calls with equal arguments are served from
    /// this cache.
    ///
    /// `name` is the function's identity in the key; two wrappers sharing a
    /// cache must use different names. Pass several positional arguments as a
    /// tuple.
    ///
    /// A cached `None` (when `V` is an `Option`) is a hit like any other
    /// value: only a missing entry triggers a call.
    ///
    /// ```ignore
    /// let cache = Arc::new(Cache::in_memory(10, Duration::from_secs(5)));
    /// let square = cache.memoize("square", |x: u64| x * x);
    /// assert_eq!(square(5), 25);
    /// ```
    pub fn memoize<A, F>(self: &Arc<Self>, name: impl Into<String>, func: F) -> impl Fn(A) -> V
    where
        A: Serialize,
        F: Fn(A) -> V,
    {
        let cache = Arc::clone(self);
        let name = name.into();
        let no_kwargs = Kwargs::new();

        move |args: A| {
            let key = MemoKey::derive(&name, &args, &no_kwargs);
            cached_call(&cache, &name, key, || func(args))
        }
    }

    /// Like [`Cache::memoize`] for functions that also take named arguments.
    pub fn memoize_kw<A, F>(
        self: &Arc<Self>,
        name: impl Into<String>,
        func: F,
    ) -> impl Fn(A, Kwargs) -> V
    where
        A: Serialize,
        F: Fn(A, &Kwargs) -> V,
    {
        let cache = Arc::clone(self);
        let name = name.into();

        move |args: A, kwargs: Kwargs| {
            let key = MemoKey::derive(&name, &args, &kwargs);
            cached_call(&cache, &name, key, || func(args, &kwargs))
        }
    }
}

/// Looks the key up and falls back to `compute` on a miss.
///
/// The lock is not held while `compute` runs, so a memoized function may call
/// other memoized functions on the same cache.
fn cached_call<V: CacheValue>(
    cache: &Cache<MemoKey, V>,
    name: &str,
    key: Result<MemoKey, serde_json::Error>,
    compute: impl FnOnce() -> V,
) -> V {
    let key = match key {
        Ok(key) => key,
        Err(e) => {
            warn!(function = name, "Arguments cannot be keyed, calling uncached: {}", e);
            return compute();
        }
    };

    if let Some(value) = cache.get(&key) {
        trace!(function = name, "Memoized hit");
        return value;
    }

    let value = compute();
    cache.put(key, value.clone());
    value
}
