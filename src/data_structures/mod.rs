//! Data structures for IP Radix.
//!
//! This module contains the prefix-matching structures used to map
//! addresses to values:
//! - No unsafe code
//! - Index-addressed node storage instead of per-node allocation
//! - Read-only sharing once a structure has been built

pub mod radix_trie;

// Re-export common data structures
pub use radix_trie::{NarrowTrie, RadixTrie, RadixTrieError, RadixTrieResult, WideTrie};
