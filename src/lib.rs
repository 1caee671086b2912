//! IP Radix Library
//!
//! This library maps IP prefixes (CIDR ranges) to values and answers
//! longest-prefix-match queries. It contains the radix trie engine, the text
//! ingestion that feeds it, and the supporting configuration and utilities.
//! The library is used by the `ip_radix` binary, but can also be used as a
//! dependency by other projects.
//!
//! # Architecture
//!
//! - [`data_structures::radix_trie`]: array-backed binary trie, one bit per level,
//!   instantiated for IPv4 ([`NarrowTrie`](data_structures::NarrowTrie)) and IPv6
//!   ([`WideTrie`](data_structures::WideTrie)).
//! - [`ingest`]: address and CIDR parsing, and bulk loading from line-oriented tables.
//! - [`utils`]: identifier generation with explicit worker configuration.
//! - [`config`] and [`error`]: layered configuration and the crate-wide error type.

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod ingest;
pub mod utils;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use std::sync::Arc;

/// Version information for IP Radix.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed error reporter. Calling it again is harmless.
pub fn init() {
    error::set_error_reporter(Arc::new(error::TracingErrorReporter));
}
