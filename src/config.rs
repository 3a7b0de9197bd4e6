//! Construction parameters for `ChainedHashMap`

use crate::error::{Error, Result};

/// Number of buckets a map starts with by default
pub const DEFAULT_CAPACITY: usize = 16;

/// Default ratio of entries to buckets that triggers growth
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// A map never shrinks below this many buckets
pub const MIN_CAPACITY: usize = 16;

/// A map never grows beyond this many buckets
pub const MAX_CAPACITY: usize = 1 << 20;

/// Smallest accepted load factor
pub const MIN_LOAD_FACTOR: f64 = 0.01;

/// Capacity and load factor for a new map.
///
/// ```rust
/// use chainhash::{ChainedHashMap, MapConfig};
///
/// let config = MapConfig::default().with_capacity(64).with_load_factor(0.5);
/// let map: ChainedHashMap<u32> = ChainedHashMap::with_config(config)?;
/// assert_eq!(map.capacity(), 64);
/// # Ok::<(), chainhash::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Initial number of buckets, rounded up to a power of two
    pub capacity: usize,
    /// Maximum entries-per-bucket ratio before the map doubles
    pub load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, load_factor: DEFAULT_LOAD_FACTOR }
    }
}

impl MapConfig {
    /// Replaces the initial capacity
    #[must_use]
    pub fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    /// Replaces the load factor
    #[must_use]
    pub fn with_load_factor(self, load_factor: f64) -> Self {
        Self { load_factor, ..self }
    }

    /// Checks that the capacity is in `1..=MAX_CAPACITY` and the load factor is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`], [`Error::CapacityTooLarge`] or
    /// [`Error::InvalidLoadFactor`].
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge { capacity: self.capacity, max: MAX_CAPACITY });
        }
        validate_load_factor(self.load_factor)
    }

    /// Capacity actually allocated for this configuration
    pub(crate) fn normalized_capacity(&self) -> usize {
        normalize_capacity(self.capacity)
    }
}

/// Rounds a requested bucket count up to a power of two within `1..=MAX_CAPACITY`
pub(crate) fn normalize_capacity(capacity: usize) -> usize {
    capacity.clamp(1, MAX_CAPACITY).next_power_of_two()
}

/// A load factor must be finite and at least `MIN_LOAD_FACTOR`
pub(crate) fn validate_load_factor(load_factor: f64) -> Result<()> {
    if load_factor.is_finite() && load_factor >= MIN_LOAD_FACTOR {
        Ok(())
    } else {
        Err(Error::InvalidLoadFactor(load_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = MapConfig::default();
        assert_eq!(config.capacity, 16);
        assert!((config.load_factor - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert_eq!(MapConfig::default().with_capacity(0).validate(), Err(Error::ZeroCapacity));
    }

    #[test]
    fn test_rejects_bad_load_factor() {
        for load_factor in [0.0, -1.0, 1e-9, 1e-20, 0.009, f64::INFINITY] {
            let result = MapConfig::default().with_load_factor(load_factor).validate();
            assert_eq!(result, Err(Error::InvalidLoadFactor(load_factor)));
        }
        assert!(matches!(
            MapConfig::default().with_load_factor(f64::NAN).validate(),
            Err(Error::InvalidLoadFactor(_))
        ));
    }

    #[test]
    fn test_accepts_smallest_load_factor() {
        assert_eq!(MapConfig::default().with_load_factor(MIN_LOAD_FACTOR).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_oversized_capacity() {
        for capacity in [MAX_CAPACITY + 1, usize::MAX] {
            assert_eq!(
                MapConfig::default().with_capacity(capacity).validate(),
                Err(Error::CapacityTooLarge { capacity, max: MAX_CAPACITY })
            );
        }
        assert_eq!(MapConfig::default().with_capacity(MAX_CAPACITY).validate(), Ok(()));
    }

    #[test]
    fn test_normalize_capacity() {
        assert_eq!(normalize_capacity(0), 1);
        assert_eq!(normalize_capacity(1), 1);
        assert_eq!(normalize_capacity(16), 16);
        assert_eq!(normalize_capacity(17), 32);
        assert_eq!(normalize_capacity(MAX_CAPACITY - 1), MAX_CAPACITY);
        assert_eq!(normalize_capacity(usize::MAX), MAX_CAPACITY);
        assert_eq!(MapConfig::default().with_capacity(100).normalized_capacity(), 128);
    }
}
