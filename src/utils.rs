//! Owned projections of a `ChainedHashMap`

use crate::ChainedHashMap;

/// Extension trait returning a map's keys, values or pairs as owned `Vec`s.
///
/// All three walk the buckets in index order and each bucket's chain front to back, so for a
/// given map they agree position by position. The order reflects hash placement, not
/// insertion order.
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the hash map as a Vec
    fn entries(&self) -> Vec<(String, V)>;
}

impl<V: Clone> HashMapExtensions<V> for ChainedHashMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn test_keys_and_values() -> Result<()> {
        let mut map = ChainedHashMap::new();
        map.set("a", 1)?;
        map.set("b", 2)?;
        map.set("c", 3)?;

        let mut keys = map.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_projections_line_up() -> Result<()> {
        let mut map = ChainedHashMap::new();
        for i in 0..40 {
            map.set(format!("key-{i}"), i)?;
        }

        let entries = map.entries();
        let keys = map.keys();
        let values = map.values();

        assert_eq!(entries.len(), 40);
        assert!(entries.iter().zip(&keys).all(|((k, _), key)| k == key));
        assert!(entries.iter().zip(&values).all(|((_, v), value)| v == value));
        assert!(entries.iter().all(|(k, v)| map.get(k) == Some(v)));
        Ok(())
    }

    #[test]
    fn test_empty_map() {
        let map: ChainedHashMap<u8> = ChainedHashMap::new();
        assert!(map.keys().is_empty());
        assert!(map.values().is_empty());
        assert!(map.entries().is_empty());
    }
}
