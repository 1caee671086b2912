// Copyright (c) 2025 IP Radix Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Binary radix trie for longest-prefix-match lookups.
//!
//! Each level of the trie consumes one key bit, from the most significant bit
//! down. A prefix of length `n` is stored at the node reached by following its
//! first `n` bits, so the deepest value-bearing node on the path of an address is
//! the most specific prefix covering it.
//!
//! # Features
//!
//! - Index-addressed node arena with doubling growth, no per-node allocation.
//! - Generic over the key width (`u32` for IPv4, `u128` for IPv6) and the value type.
//! - Lookups are bounded by the key width and never backtrack.
//!
//! The trie is built once and then read. Insertion takes `&mut self`, so a trie
//! shared behind an `Arc` is immutable for every reader.
//!
//! # Example
//!
//! ```
//! use ip_radix_lib::data_structures::radix_trie::RadixTrie;
//!
//! let mut trie = RadixTrie::<u32, &str>::new();
//! trie.insert(0x0a00_0000, 8, "ten").unwrap();
//! trie.insert(0x0a01_0000, 16, "ten-one").unwrap();
//!
//! assert_eq!(trie.select_value(0x0a01_0203), Some(&"ten-one"));
//! assert_eq!(trie.select_value(0x0a02_0000), Some(&"ten"));
//! assert_eq!(trie.select_value(0x0b00_0000), None);
//! ```

mod error;
mod key;
mod narrow;
mod node;
mod wide;

pub use error::{RadixTrieError, RadixTrieResult};
pub use key::TrieKey;
pub use narrow::NarrowTrie;
pub use node::{NodeIndex, NodeStore, ROOT};
pub use wide::WideTrie;

use std::marker::PhantomData;

/// Radix trie keyed by `K` holding values of type `V`.
#[derive(Debug, Clone)]
pub struct RadixTrie<K: TrieKey, V> {
    /// Node arena; index 0 is the root
    store: NodeStore<V>,

    _key: PhantomData<K>,
}

impl<K: TrieKey, V> RadixTrie<K, V> {
    /// Creates an empty trie with the default capacity for the key width.
    pub fn new() -> Self {
        Self::with_capacity(K::DEFAULT_CAPACITY)
    }

    /// Creates an empty trie with room for `capacity` nodes before the first growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: NodeStore::with_capacity(capacity),
            _key: PhantomData,
        }
    }

    /// Stores `value` under the prefix formed by the `mask_len` most significant bits of `key`.
    ///
    /// Bits of `key` past `mask_len` are ignored. Inserting the same prefix again
    /// replaces the previous value without allocating nodes.
    ///
    /// # Errors
    ///
    /// Returns [`RadixTrieError::InvalidPrefixLength`] if `mask_len` exceeds the key width.
    pub fn insert(&mut self, key: K, mask_len: u8, value: V) -> RadixTrieResult<()> {
        if mask_len > K::BITS {
            return Err(RadixTrieError::InvalidPrefixLength {
                length: mask_len,
                max: K::BITS,
            });
        }

        let mut bit = K::top_bit();
        let mut node = ROOT;
        let mut depth = 0;

        // Follow the existing path as far as it goes
        while depth < mask_len {
            match self.child(node, key.has_bit(bit)) {
                Some(next) => {
                    node = next;
                    bit = bit.next_bit();
                    depth += 1;
                }
                None => break,
            }
        }

        // Create the missing tail, one node per remaining masked bit
        while depth < mask_len {
            let next = self.store.allocate();
            if key.has_bit(bit) {
                self.store.set_right(node, next);
            } else {
                self.store.set_left(node, next);
            }
            node = next;
            bit = bit.next_bit();
            depth += 1;
        }

        self.store.set_value(node, value);
        Ok(())
    }

    /// Same as [`insert`](Self::insert) but takes a netmask such as `0xffffff00` for a /24.
    ///
    /// # Errors
    ///
    /// Returns [`RadixTrieError::NonContiguousMask`] if `mask` has holes.
    pub fn insert_masked(&mut self, key: K, mask: K, value: V) -> RadixTrieResult<()> {
        let mask_len = K::mask_to_len(mask)
            .ok_or_else(|| RadixTrieError::NonContiguousMask(format!("{mask:?}")))?;
        self.insert(key, mask_len, value)
    }

    /// Returns the value of the longest stored prefix matching `key`.
    ///
    /// Walks the bits of `key` from the root, remembering the last value seen, and
    /// stops as soon as the next child does not exist.
    pub fn select_value(&self, key: K) -> Option<&V> {
        let mut bit = K::top_bit();
        let mut node = ROOT;
        let mut best = None;

        loop {
            if let Some(value) = self.store.value(node) {
                best = Some(value);
            }
            match self.child(node, key.has_bit(bit)) {
                Some(next) => node = next,
                None => return best,
            }
            bit = bit.next_bit();
        }
    }

    /// Number of nodes in the trie, root included. Not the number of stored prefixes.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Number of node slots reserved before the next growth.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Read-only view of the node arena, for diagnostics.
    pub fn nodes(&self) -> &NodeStore<V> {
        &self.store
    }

    #[inline]
    fn child(&self, node: NodeIndex, one: bool) -> Option<NodeIndex> {
        if one {
            self.store.right(node)
        } else {
            self.store.left(node)
        }
    }
}

impl<K: TrieKey, V> Default for RadixTrie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = RadixTrie::<u32, i64>::new();

        // Empty trie never matches
        assert_eq!(trie.select_value(0), None);
        assert_eq!(trie.select_value(u32::MAX), None);
        assert_eq!(trie.size(), 1);

        trie.insert(0x0a00_0000, 8, 100).unwrap();
        trie.insert(0x0a01_0000, 16, 200).unwrap();

        assert_eq!(trie.select_value(0x0a01_0203), Some(&200));
        assert_eq!(trie.select_value(0x0a02_0000), Some(&100));
        assert_eq!(trie.select_value(0x0b00_0000), None);

        // 8 nodes for the /8 plus 8 more for the /16 extension
        assert_eq!(trie.size(), 17);
    }

    #[test]
    fn test_overwrite_does_not_allocate() {
        let mut trie = RadixTrie::<u32, i64>::new();
        trie.insert(0xc0a8_0000, 16, 1).unwrap();
        let size = trie.size();

        // Host bits past the mask do not matter
        trie.insert(0xc0a8_ffff, 16, 2).unwrap();
        assert_eq!(trie.size(), size);
        assert_eq!(trie.select_value(0xc0a8_0101), Some(&2));
    }

    #[test]
    fn test_shorter_prefix_on_existing_path() {
        let mut trie = RadixTrie::<u32, i64>::new();
        trie.insert(0x0a01_0000, 16, 200).unwrap();
        let size = trie.size();

        // The /8 node already exists on the /16 path
        trie.insert(0x0a00_0000, 8, 100).unwrap();
        assert_eq!(trie.size(), size);
        assert_eq!(trie.select_value(0x0aff_0000), Some(&100));
        assert_eq!(trie.select_value(0x0a01_0001), Some(&200));
    }

    #[test]
    fn test_default_route_at_root() {
        let mut trie = RadixTrie::<u32, i64>::new();
        trie.insert(0xdead_beef, 0, 1).unwrap();
        assert_eq!(trie.size(), 1);
        assert_eq!(trie.nodes().value(ROOT), Some(&1));

        for key in [0, 1, 0x7fff_ffff, 0x8000_0000, u32::MAX] {
            assert_eq!(trie.select_value(key), Some(&1));
        }
    }

    #[test]
    fn test_full_width_prefix_matches_only_itself() {
        let mut trie = RadixTrie::<u32, i64>::new();
        trie.insert(0x0102_0304, 32, 9).unwrap();
        assert_eq!(trie.size(), 33);
        assert_eq!(trie.select_value(0x0102_0304), Some(&9));
        assert_eq!(trie.select_value(0x0102_0305), None);
        assert_eq!(trie.select_value(0x0102_0300), None);
    }

    #[test]
    fn test_invalid_prefix_length() {
        let mut trie = RadixTrie::<u32, i64>::new();
        assert_eq!(
            trie.insert(0, 33, 1),
            Err(RadixTrieError::InvalidPrefixLength { length: 33, max: 32 })
        );
        assert_eq!(trie.size(), 1);

        let mut wide = RadixTrie::<u128, u128>::new();
        assert!(wide.insert(0, 128, 1).is_ok());
        assert_eq!(
            wide.insert(0, 129, 1),
            Err(RadixTrieError::InvalidPrefixLength { length: 129, max: 128 })
        );
    }

    #[test]
    fn test_insert_masked() {
        let mut trie = RadixTrie::<u32, i64>::new();
        trie.insert_masked(0xc0a8_0100, 0xffff_ff00, 24).unwrap();
        assert_eq!(trie.select_value(0xc0a8_01fe), Some(&24));
        assert_eq!(trie.select_value(0xc0a8_0200), None);

        assert!(matches!(
            trie.insert_masked(0, 0xff00_ff00, 1),
            Err(RadixTrieError::NonContiguousMask(_))
        ));
    }

    #[test]
    fn test_wide_keys_with_top_bit_set() {
        let mut trie = RadixTrie::<u128, u128>::new();
        let key = u128::MAX << 64;
        trie.insert(key, 1, 0).unwrap();
        trie.insert(key, 64, u128::MAX).unwrap();

        assert_eq!(trie.select_value(u128::MAX), Some(&u128::MAX));
        assert_eq!(trie.select_value(1u128 << 127), Some(&0));
        assert_eq!(trie.select_value(0), None);
    }

    #[test]
    fn test_growth_from_tiny_capacity() {
        let mut trie = RadixTrie::<u32, u32>::with_capacity(16);
        for i in 0..2000u32 {
            trie.insert(i << 8, 32, i).unwrap();
        }
        assert!(trie.capacity() >= trie.size());
        for i in 0..2000u32 {
            assert_eq!(trie.select_value(i << 8), Some(&i));
            assert_eq!(trie.select_value((i << 8) | 1), None);
        }
    }

    #[test]
    fn test_concurrent_readers_after_build() {
        const THREAD_COUNT: usize = 8;

        let mut trie = RadixTrie::<u32, u32>::new();
        for i in 0..256u32 {
            trie.insert(i << 24, 8, i).unwrap();
        }
        let trie = Arc::new(trie);

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|t| {
                let trie = Arc::clone(&trie);
                thread::spawn(move || {
                    for i in 0..256u32 {
                        let key = (i << 24) | t as u32;
                        assert_eq!(trie.select_value(key), Some(&i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
