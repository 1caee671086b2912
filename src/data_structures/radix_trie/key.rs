// Copyright (c) 2025 IP Radix Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key widths supported by the radix trie.
//!
//! A key is an unsigned integer scanned from its most significant bit downwards.
//! Every operation here is plain unsigned arithmetic on the native width, so a key
//! with the top bit set is never mistaken for a negative number.

use std::fmt::Debug;

/// Fixed-width unsigned key usable by [`RadixTrie`](super::RadixTrie).
pub trait TrieKey: Copy + Eq + Debug + Send + Sync + 'static {
    /// Number of bits in the key, and therefore the maximum trie depth.
    const BITS: u8;

    /// Initial node capacity used by `RadixTrie::new`.
    const DEFAULT_CAPACITY: usize;

    /// A key with only the most significant bit set.
    fn top_bit() -> Self;

    /// Shifts a single-bit cursor one position towards the least significant bit.
    fn next_bit(self) -> Self;

    /// Returns true if `self` has any bit of `bit` set.
    fn has_bit(self, bit: Self) -> bool;

    /// Mask with the `len` most significant bits set. `len` must not exceed `BITS`.
    fn prefix_mask(len: u8) -> Self;

    /// Keeps the `len` most significant bits of `self` and clears the rest.
    fn truncate(self, len: u8) -> Self;

    /// Converts a contiguous netmask (leading ones followed by zeros) into its
    /// prefix length. Returns `None` for masks with holes.
    fn mask_to_len(mask: Self) -> Option<u8>;
}

macro_rules! impl_trie_key {
    ($ty:ty, $capacity:expr) => {
        impl TrieKey for $ty {
            const BITS: u8 = <$ty>::BITS as u8;
            const DEFAULT_CAPACITY: usize = $capacity;

            #[inline]
            fn top_bit() -> Self {
                1 << (<$ty>::BITS - 1)
            }

            #[inline]
            fn next_bit(self) -> Self {
                self >> 1
            }

            #[inline]
            fn has_bit(self, bit: Self) -> bool {
                self & bit != 0
            }

            #[inline]
            fn prefix_mask(len: u8) -> Self {
                let width = <Self as TrieKey>::BITS;
                debug_assert!(len <= width);
                match len {
                    0 => 0,
                    len => <$ty>::MAX << (width - len),
                }
            }

            #[inline]
            fn truncate(self, len: u8) -> Self {
                self & Self::prefix_mask(len)
            }

            fn mask_to_len(mask: Self) -> Option<u8> {
                let len = mask.leading_ones() as u8;
                (Self::prefix_mask(len) == mask).then_some(len)
            }
        }
    };
}

impl_trie_key!(u32, 1024);
impl_trie_key!(u128, 2048);
