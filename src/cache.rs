//! Process wide caches of compiled localized patterns and zone prefix trees.
//!
//! Values are computed outside of the lock. When two threads race on the
//! same key the first value inserted is kept and returned to both. Entries
//! built for an older generation of a zone provider are dropped when the
//! newer generation is inserted.

use core::hash::Hash;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::{
    format::Composite,
    options::{FormatStyle, TextStyle},
    trie::{MatchPolicy, PrefixTree},
    TemporalResult,
};

/// A cache key that may make older keys unreachable.
pub(crate) trait CacheKey: Hash + Eq {
    /// Returns whether `other` can no longer be looked up once `self` exists.
    fn supersedes(&self, _other: &Self) -> bool {
        false
    }
}

/// A concurrent map with idempotent insertion.
#[derive(Debug)]
pub(crate) struct Cache<K, V> {
    entries: RwLock<FxHashMap<K, Arc<V>>>,
}

impl<K: CacheKey, V> Cache<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<Arc<V>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Returns the cached value for `key`, computing and inserting it if absent.
    pub(crate) fn get_or_try_insert_with(
        &self,
        key: K,
        compute: impl FnOnce() -> TemporalResult<V>,
    ) -> TemporalResult<Arc<V>> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = Arc::new(compute()?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(&key) {
            entries.retain(|existing, _| !key.supersedes(existing));
        }
        Ok(Arc::clone(entries.entry(key).or_insert(value)))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Identifies a provider instance by address.
pub(crate) fn provider_key<T: ?Sized>(provider: &T) -> usize {
    (provider as *const T).cast::<()>() as usize
}

/// (text provider, locale, date style, time style, chronology id)
pub(crate) type LocalizedKey = (
    usize,
    String,
    Option<FormatStyle>,
    Option<FormatStyle>,
    &'static str,
);

/// (zone provider, match policy, generation)
pub(crate) type ZoneIdKey = (usize, MatchPolicy, u64);

/// (zone provider, locale, style, generic names, match policy, generation)
pub(crate) type ZoneNameKey = (usize, String, TextStyle, bool, MatchPolicy, u64);

impl CacheKey for LocalizedKey {}

impl CacheKey for ZoneIdKey {
    fn supersedes(&self, other: &Self) -> bool {
        self.0 == other.0 && other.2 < self.2
    }
}

impl CacheKey for ZoneNameKey {
    fn supersedes(&self, other: &Self) -> bool {
        self.0 == other.0 && other.5 < self.5
    }
}

/// Compiled localized date and time patterns.
pub(crate) static LOCALIZED_PATTERNS: LazyLock<Cache<LocalizedKey, Composite>> =
    LazyLock::new(Cache::new);

/// Prefix trees over every available zone identifier.
pub(crate) static ZONE_ID_TREES: LazyLock<Cache<ZoneIdKey, PrefixTree<&'static str>>> =
    LazyLock::new(Cache::new);

/// Prefix trees over zone identifiers and their display names.
pub(crate) static ZONE_NAME_TREES: LazyLock<Cache<ZoneNameKey, PrefixTree<&'static str>>> =
    LazyLock::new(Cache::new);

#[cfg(test)]
mod tests {
    use super::{Cache, CacheKey, ZoneIdKey};
    use crate::{trie::MatchPolicy, TemporalError};

    impl CacheKey for u8 {}

    #[test]
    fn first_insert_wins() {
        let cache: Cache<u8, String> = Cache::new();
        let first = cache
            .get_or_try_insert_with(1, || Ok("first".to_owned()))
            .unwrap();
        let second = cache
            .get_or_try_insert_with(1, || Ok("second".to_owned()))
            .unwrap();
        assert_eq!(*first, "first");
        assert_eq!(*second, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stale_generations_are_dropped() {
        let cache: Cache<ZoneIdKey, &str> = Cache::new();
        for key in [
            (1, MatchPolicy::Exact, 0),
            (1, MatchPolicy::CaseInsensitive, 0),
            (2, MatchPolicy::Exact, 0),
        ] {
            cache.get_or_try_insert_with(key, || Ok("old")).unwrap();
        }
        assert_eq!(cache.len(), 3);

        let tree = cache
            .get_or_try_insert_with((1, MatchPolicy::Exact, 1), || Ok("new"))
            .unwrap();
        assert_eq!(*tree, "new");
        // Both policies of provider 1 at generation 0 are gone, provider 2 stays.
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&(1, MatchPolicy::CaseInsensitive, 0)).is_none());
        assert!(cache.get(&(2, MatchPolicy::Exact, 0)).is_some());
    }

    #[test]
    fn failures_are_not_cached() {
        let cache: Cache<u8, String> = Cache::new();
        assert!(cache
            .get_or_try_insert_with(1, || Err(TemporalError::general("no")))
            .is_err());
        assert!(cache.get(&1).is_none());
        assert_eq!(cache.len(), 0);
    }
}
