//! Error types for the radix trie.
//!
//! This module defines the error types that can occur during radix trie operations.

/// Errors that can occur in radix trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum RadixTrieError {
    /// The prefix length is outside `0..=max`.
    #[error("Invalid prefix length {length}: must be between 0 and {max}")]
    InvalidPrefixLength {
        /// The rejected prefix length.
        length: u8,
        /// The key width of the trie.
        max: u8,
    },

    /// A netmask was not a run of leading ones followed by zeros.
    #[error("Netmask {0} is not contiguous")]
    NonContiguousMask(String),

    /// The value is reserved as the "no value" sentinel and cannot be stored.
    #[error("Value {0} is reserved as the no-value sentinel")]
    ReservedValue(i64),
}

/// Result type for radix trie operations.
pub type RadixTrieResult<T> = Result<T, RadixTrieError>;
