//! IPv6 instantiation of the radix trie.

use super::{RadixTrie, RadixTrieResult};
use crate::ingest::{self, IngestResult};

/// Radix trie keyed by 128-bit IPv6 addresses with unsigned 128-bit values.
///
/// Presence is tracked per node, so every `u128` is a legal payload, zero and
/// values with the top bit set included.
#[derive(Debug, Clone, Default)]
pub struct WideTrie {
    inner: RadixTrie<u128, u128>,
}

impl WideTrie {
    /// Creates an empty trie with capacity for 2048 nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trie with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RadixTrie::with_capacity(capacity),
        }
    }

    /// Stores `value` for the `mask_len`-bit prefix of `key`.
    pub fn insert(&mut self, key: u128, mask_len: u8, value: u128) -> RadixTrieResult<()> {
        self.inner.insert(key, mask_len, value)
    }

    /// Stores `value` for `key` under a contiguous netmask.
    pub fn insert_masked(&mut self, key: u128, mask: u128, value: u128) -> RadixTrieResult<()> {
        self.inner.insert_masked(key, mask, value)
    }

    /// Stores `value` for a prefix written as `"addr/len"` in any IPv6 notation.
    pub fn insert_cidr(&mut self, cidr: &str, value: u128) -> IngestResult<()> {
        let cidr = ingest::parse_cidr_v6(cidr)?;
        self.insert(cidr.address, cidr.prefix_len, value)?;
        Ok(())
    }

    /// Value of the most specific prefix covering `key`.
    pub fn select_value(&self, key: u128) -> Option<u128> {
        self.inner.select_value(key).copied()
    }

    /// Looks up an address given in textual IPv6 form.
    pub fn select_value_str(&self, address: &str) -> IngestResult<Option<u128>> {
        Ok(self.select_value(ingest::parse_ipv6(address)?))
    }

    /// Number of nodes, root included.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Number of node slots reserved before the next growth.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}
