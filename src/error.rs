//! Error type shared by the linked list and the hash map

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures raised by chain and map operations.
///
/// Lookup misses are not errors: they are reported through `Option` or `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// A chain position was outside the valid range for the current length
    #[error("index {index} out of bounds for chain of length {len}")]
    IndexOutOfBounds {
        /// The rejected position
        index: usize,
        /// Length of the chain at the time of the call
        len: usize,
    },

    /// A computed bucket index did not address a slot of the bucket vector
    #[error("bucket index {index} out of bounds for capacity {capacity}")]
    BucketOutOfBounds {
        /// The rejected bucket index
        index: usize,
        /// Number of buckets at the time of the call
        capacity: usize,
    },

    /// A map was configured with zero buckets
    #[error("capacity must be non-zero")]
    ZeroCapacity,

    /// A map was configured with more buckets than it may ever hold
    #[error("capacity {capacity} exceeds the maximum of {max} buckets")]
    CapacityTooLarge {
        /// The requested bucket count
        capacity: usize,
        /// The largest bucket count a map may hold
        max: usize,
    },

    /// A load factor that is not finite or is below the accepted minimum
    #[error("load factor must be finite and at least 0.01, got {0}")]
    InvalidLoadFactor(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::IndexOutOfBounds { index: 3, len: 2 }.to_string(),
            "index 3 out of bounds for chain of length 2"
        );
        assert_eq!(
            Error::BucketOutOfBounds { index: 40, capacity: 32 }.to_string(),
            "bucket index 40 out of bounds for capacity 32"
        );
        assert_eq!(Error::ZeroCapacity.to_string(), "capacity must be non-zero");
        assert_eq!(
            Error::InvalidLoadFactor(-0.5).to_string(),
            "load factor must be finite and at least 0.01, got -0.5"
        );
        assert_eq!(
            Error::CapacityTooLarge { capacity: 1 << 21, max: 1 << 20 }.to_string(),
            "capacity 2097152 exceeds the maximum of 1048576 buckets"
        );
    }
}
