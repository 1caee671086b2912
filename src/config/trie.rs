//! Trie sizing configuration module.

use super::{ConfigResult, Validate};
use crate::data_structures::radix_trie::TrieKey;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Initial node capacities of the IPv4 and IPv6 tries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Nodes reserved up front for IPv4 tries
    pub narrow_capacity: usize,

    /// Nodes reserved up front for IPv6 tries
    pub wide_capacity: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            narrow_capacity: <u32 as TrieKey>::DEFAULT_CAPACITY,
            wide_capacity: <u128 as TrieKey>::DEFAULT_CAPACITY,
        }
    }
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.narrow_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.narrow_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.wide_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.wide_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
