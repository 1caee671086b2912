//! Test modules for IP Radix.
//!
//! This module contains the crate-internal test suites:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Property-based tests for the radix trie using proptest
//! - Test fixtures and utilities


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{ipv4_prefix_strategy, ipv6_prefix_strategy, TestFixture};
