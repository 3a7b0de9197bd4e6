use std::{fmt, mem, slice};

use log::{debug, trace, warn};

use crate::{
    config::{self, MAX_CAPACITY, MIN_CAPACITY, MapConfig},
    error::{Error, Result},
    linked_list::{self, LinkedList},
};

/// Multiplier of the polynomial string hash
const HASH_PRIME: u128 = 31;

/// A key-value pair stored in a bucket chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The key, unique across the whole map
    key: String,
    /// The value associated with the key
    value: V,
}

impl<V> Entry<V> {
    /// The entry's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Display> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// The chain of colliding entries held by one bucket
pub type Chain<V> = LinkedList<Entry<V>>;

/// Computes the bucket of `key` in a table of `capacity` buckets.
///
/// Folds `hash = (31 * hash + unit) % capacity` over the key's UTF-16 code units, reducing at
/// every step so the running value stays below `capacity`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    let modulus = capacity.max(1) as u128;
    let hash = key
        .encode_utf16()
        .fold(0, |hash, unit| (HASH_PRIME * hash + u128::from(unit)) % modulus);
    usize::try_from(hash).unwrap_or(usize::MAX)
}

/// A hash map with separate chaining over [`LinkedList`] buckets.
///
/// Keys are strings. Each bucket is either empty or holds a chain of every entry whose key
/// hashes there; chains are created on first insert and dropped when their last entry goes.
/// The map doubles its bucket count when `len() > capacity() * load_factor()` and halves it,
/// never below 16 buckets, when `len() <= capacity() / 2 * load_factor()`.
///
/// Iteration order follows bucket placement, not insertion order.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// One optional chain per bucket
    buckets: Vec<Option<Chain<V>>>,
    /// Number of entries across all chains
    size: usize,
    /// Entries-per-bucket ratio above which the map grows
    load_factor: f64,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainedHashMap<V> {
    /// Creates a map with 16 buckets and a load factor of 0.75
    #[must_use]
    pub fn new() -> Self {
        let config = MapConfig::default();
        Self::from_parts(config.normalized_capacity(), config.load_factor)
    }

    /// Creates a map with at least `capacity` buckets, rounded up to a power of two
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(config::normalize_capacity(capacity), MapConfig::default().load_factor)
    }

    /// Creates a map from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] or [`Error::InvalidLoadFactor`] if the configuration is
    /// rejected by [`MapConfig::validate`].
    pub fn with_config(config: MapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.normalized_capacity(), config.load_factor))
    }

    /// Builds an empty map with an already normalized capacity
    fn from_parts(capacity: usize, load_factor: f64) -> Self {
        Self { buckets: empty_buckets(capacity), size: 0, load_factor }
    }

    /// Bucket index of `key` at the current capacity
    #[must_use]
    pub fn hash(&self, key: &str) -> usize {
        bucket_index(key, self.capacity())
    }

    /// Inserts or updates a key.
    ///
    /// Returns the previous value when the key was already present; an update never resizes.
    /// A new key is appended to its bucket's chain, after which the map doubles as many times
    /// as needed to bring `len()` back under `capacity() * load_factor()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BucketOutOfBounds`] if the computed index does not address a bucket.
    /// The map is left untouched in that case.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        let key = key.into();
        let index = self.hash(&key);
        let capacity = self.capacity();
        let slot = self.buckets.get_mut(index).ok_or(Error::BucketOutOfBounds { index, capacity })?;

        let chain = slot.get_or_insert_with(|| {
            trace!("creating chain for bucket {index}");
            LinkedList::new()
        });
        if let Some(entry) = chain.find_mut(|entry| entry.key == key) {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }

        chain.append(Entry { key, value });
        self.size = self.size.saturating_add(1);
        self.grow_if_needed();
        Ok(None)
    }

    /// Retrieves the value stored for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain_for(key)?.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
    }

    /// Retrieves a mutable reference to the value stored for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.hash(key);
        self.buckets
            .get_mut(index)?
            .as_mut()?
            .find_mut(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning true if it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and returns its value.
    ///
    /// The bucket is reset to empty when its chain loses its last entry. Afterwards the map
    /// halves its capacity if the remaining entries fit under half the buckets and the result
    /// stays at or above 16 buckets.
    pub fn take(&mut self, key: &str) -> Option<V> {
        let index = self.hash(key);
        let slot = self.buckets.get_mut(index)?;
        let chain = slot.as_mut()?;
        let entry = chain.remove_first(|entry| entry.key == key)?;
        if chain.is_empty() {
            trace!("discarding empty chain for bucket {index}");
            *slot = None;
        }

        self.size = self.size.saturating_sub(1);
        self.shrink_if_needed();
        Some(entry.value)
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Empties every bucket, keeping the capacity and load factor
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.size = 0;
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load factor threshold
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Replaces the load factor, growing right away if the map is already over the new limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoadFactor`] unless `load_factor` is finite and at least
    /// [`MIN_LOAD_FACTOR`](crate::MIN_LOAD_FACTOR); the map is left untouched in that case.
    pub fn set_load_factor(&mut self, load_factor: f64) -> Result<()> {
        config::validate_load_factor(load_factor)?;
        self.load_factor = load_factor;
        self.grow_if_needed();
        Ok(())
    }

    /// The chain held by bucket `index`, or `None` for an empty or nonexistent bucket
    #[must_use]
    pub fn bucket(&self, index: usize) -> Option<&Chain<V>> {
        self.buckets.get(index)?.as_ref()
    }

    /// Iterates entries in bucket order, then chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }

    /// The chain of the bucket `key` hashes to
    fn chain_for(&self, key: &str) -> Option<&Chain<V>> {
        self.bucket(self.hash(key))
    }

    /// Doubles the capacity until `len()` fits under the load factor, then rehashes once
    fn grow_if_needed(&mut self) {
        let target = grow_target(self.size, self.capacity(), self.load_factor);
        if target != self.capacity() {
            self.resize(target);
        }
    }

    /// Halves the capacity when the entries fit under half the buckets, down to 16
    fn shrink_if_needed(&mut self) {
        let half = self.capacity() / 2;
        if half >= MIN_CAPACITY && !exceeds_load(self.size, half, self.load_factor) {
            self.resize(half);
        }
    }

    /// Reallocates the buckets at `new_capacity` and re-places every entry.
    ///
    /// Entries are moved, not cloned, and placement never re-enters the resize check.
    fn resize(&mut self, new_capacity: usize) {
        debug!(
            "{} chained hash map from {} to {} buckets with {} entries",
            if new_capacity > self.capacity() { "growing" } else { "shrinking" },
            self.capacity(),
            new_capacity,
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old_buckets.into_iter().flatten().flatten() {
            self.place(entry);
        }
    }

    /// Appends an entry known to be absent to its bucket's chain
    fn place(&mut self, entry: Entry<V>) {
        let index = self.hash(&entry.key);
        if let Some(slot) = self.buckets.get_mut(index) {
            slot.get_or_insert_with(LinkedList::new).append(entry);
        }
    }
}

/// Smallest capacity reachable by doubling `capacity` that holds `len` entries at
/// `load_factor`, stopping at `MAX_CAPACITY`
fn grow_target(len: usize, capacity: usize, load_factor: f64) -> usize {
    let mut target = capacity;
    while target < MAX_CAPACITY && exceeds_load(len, target, load_factor) {
        target = target.saturating_mul(2).min(MAX_CAPACITY);
    }
    target
}

/// True when `len` entries overflow `capacity` buckets at `load_factor`
#[allow(clippy::cast_precision_loss)]
fn exceeds_load(len: usize, capacity: usize, load_factor: f64) -> bool {
    len as f64 > capacity as f64 * load_factor
}

/// A bucket vector with every slot empty
fn empty_buckets<V>(capacity: usize) -> Vec<Option<Chain<V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

/// Inserts every pair with [`ChainedHashMap::set`], later pairs overwriting earlier ones.
///
/// `set` only fails when a bucket index misses the bucket vector, which `bucket_index` rules
/// out by reducing modulo the bucket count; such a pair would be logged and skipped.
impl<K: Into<String>, V> Extend<(K, V)> for ChainedHashMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(err) = self.set(key, value) {
                warn!("skipping entry during extend: {err}");
            }
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainedHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Iterator over the key-value pairs of a map
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Option<Chain<V>>>,
    /// Chain of the bucket currently being walked
    chain: Option<linked_list::Iter<'a, Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                return Some((entry.key.as_str(), &entry.value));
            }
            self.chain = self.buckets.next()?.as_ref().map(LinkedList::iter);
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
