//! IPv4 instantiation of the radix trie.

use super::{RadixTrie, RadixTrieError, RadixTrieResult, TrieKey};
use crate::ingest::{self, IngestResult};

/// Radix trie keyed by 32-bit IPv4 addresses with signed 64-bit values.
///
/// [`NarrowTrie::NO_VALUE`] is reserved as the "no match" sentinel for callers
/// that want a plain integer back, so it can never be stored.
#[derive(Debug, Clone, Default)]
pub struct NarrowTrie {
    inner: RadixTrie<u32, i64>,
}

impl NarrowTrie {
    /// Sentinel returned by [`select_value_or_sentinel`](Self::select_value_or_sentinel)
    /// when no prefix matches.
    pub const NO_VALUE: i64 = -1;

    /// Creates an empty trie with capacity for 1024 nodes.
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
    ///
    /// # Errors
    ///
    /// Fails if `mask_len > 32` or `value` is [`NO_VALUE`](Self::NO_VALUE).
    pub fn insert(&mut self, key: u32, mask_len: u8, value: i64) -> RadixTrieResult<()> {
        if value == Self::NO_VALUE {
            return Err(RadixTrieError::ReservedValue(value));
        }
        self.inner.insert(key, mask_len, value)
    }

    /// Stores `value` for `key` under a netmask such as `0xffffff00`.
    pub fn insert_masked(&mut self, key: u32, mask: u32, value: i64) -> RadixTrieResult<()> {
        let mask_len = <u32 as TrieKey>::mask_to_len(mask)
            .ok_or_else(|| RadixTrieError::NonContiguousMask(format!("{mask:#010x}")))?;
        self.insert(key, mask_len, value)
    }

    /// Stores `value` for a prefix written as `"a.b.c.d/len"`.
    pub fn insert_cidr(&mut self, cidr: &str, value: i64) -> IngestResult<()> {
        let cidr = ingest::parse_cidr_v4(cidr)?;
        self.insert(cidr.address, cidr.prefix_len, value)?;
        Ok(())
    }

    /// Value of the most specific prefix covering `key`.
    pub fn select_value(&self, key: u32) -> Option<i64> {
        self.inner.select_value(key).copied()
    }

    /// Like [`select_value`](Self::select_value) but returns
    /// [`NO_VALUE`](Self::NO_VALUE) when nothing matches.
    pub fn select_value_or_sentinel(&self, key: u32) -> i64 {
        self.select_value(key).unwrap_or(Self::NO_VALUE)
    }

    /// Looks up an address given in dotted-quad form.
    pub fn select_value_str(&self, address: &str) -> IngestResult<Option<i64>> {
        Ok(self.select_value(ingest::parse_ipv4(address)?))
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
