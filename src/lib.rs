//! # Chained Hash Map
//!
//! A Rust implementation of a separate-chaining hash table over a singly linked list.
//!
//! This crate provides two data structures:
//!
//! - `LinkedList`: a bounds-checked singly linked list whose nodes live in one `Vec`
//! - `ChainedHashMap`: a string-keyed hash map whose buckets are `LinkedList` chains
//!
//! The map hashes keys with a polynomial rolling hash reduced modulo the bucket count, scans
//! the destination chain to keep keys unique, doubles when the entry count passes
//! `capacity * load_factor` and halves again, never below 16 buckets, as entries are removed.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainhash::{ChainedHashMap, HashMapExtensions};
//!
//! // Create a new hash map with 16 buckets and a 0.75 load factor
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.set("apple", "red")?;
//! map.set("banana", "yellow")?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&"red"));
//!
//! // Update values
//! assert_eq!(map.set("apple", "green")?, Some("red"));
//!
//! // Remove values
//! assert!(map.remove("apple"));
//! assert!(!map.has("apple"));
//! assert_eq!(map.keys(), vec!["banana".to_string()]);
//! # Ok::<(), chainhash::Error>(())
//! ```
//!
//! ## Resizing
//!
//! ```rust
//! use chainhash::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new();
//! for i in 0..12 {
//!     map.set(format!("key-{i}"), i)?;
//! }
//! assert_eq!(map.capacity(), 16);
//!
//! // The 13th key passes 16 * 0.75 and doubles the bucket count
//! map.set("key-12", 12)?;
//! assert_eq!(map.capacity(), 32);
//! # Ok::<(), chainhash::Error>(())
//! ```
//!
//! The map is single-threaded; iterators borrow it, so it cannot be mutated mid-iteration.

/// Module implementing the separate-chaining hash map
mod chained_hash_map;
/// Construction parameters for the hash map
mod config;
/// Error type shared by both data structures
mod error;
/// Module implementing the arena-backed singly linked list
mod linked_list;
/// Utility traits for the hash map
mod utils;

pub use chained_hash_map::{Chain, ChainedHashMap, Entry, Iter, bucket_index};
pub use config::{
    DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_CAPACITY, MIN_CAPACITY, MIN_LOAD_FACTOR, MapConfig,
};
pub use error::{Error, Result};
pub use linked_list::LinkedList;
pub use utils::HashMapExtensions;

/// Iterators over a [`LinkedList`]
pub mod list {
    pub use crate::linked_list::{IntoIter, Iter};
}
