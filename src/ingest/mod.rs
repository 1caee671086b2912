// Copyright (c) 2025 IP Radix Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Prefix parsing and bulk table loading.
//!
//! This module feeds the radix tries from text: it parses addresses and CIDR
//! strings into native keys and builds whole tries from line-oriented tables.
//! Records whose address is not legal for the table's family are skipped, as are
//! records with an unparseable value or prefix length; neither aborts the load.
//!
//! # Example
//!
//! ```
//! use ip_radix_lib::ingest::TableLoader;
//!
//! let table = "10.0.0.0/8\t100\n10.1.0.0/16\t200\n999.0.0.0/8\t300\n";
//! let (trie, stats) = TableLoader::new().load_narrow(table.as_bytes()).unwrap();
//!
//! assert_eq!(trie.select_value_str("10.1.2.3").unwrap(), Some(200));
//! assert_eq!(stats.inserted, 2);
//! assert_eq!(stats.skipped_illegal, 1);
//! ```

mod address;
mod error;
mod record;

pub use address::{
    format_ipv4, format_ipv6, is_legal_address, is_legal_ipv4, is_legal_ipv6, parse_cidr_v4,
    parse_cidr_v6, parse_ipv4, parse_ipv6, Cidr,
};
pub use error::{IngestError, IngestResult};
pub use record::{parse_record, Record, RecordFormat, RecordValue};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ingest::IngestConfig, trie::TrieConfig};
use crate::data_structures::radix_trie::{NarrowTrie, TrieKey, WideTrie};

/// A trie that can be populated from table records.
pub trait IngestTarget: Sized {
    /// Value type read from the value column.
    type Value: RecordValue;

    /// Address family name used in logs.
    const FAMILY: &'static str;

    /// Creates an empty trie with room for `capacity` nodes.
    fn with_capacity(capacity: usize) -> Self;

    /// Address legality check applied before insertion.
    fn is_legal(address: &str) -> bool;

    /// Parses `prefix` as CIDR and stores `value` under it.
    fn insert_prefix(&mut self, prefix: &str, value: Self::Value) -> IngestResult<()>;

    /// Node count after loading.
    fn node_count(&self) -> usize;
}

impl IngestTarget for NarrowTrie {
    type Value = i64;
    const FAMILY: &'static str = "ipv4";

    fn with_capacity(capacity: usize) -> Self {
        NarrowTrie::with_capacity(capacity)
    }

    fn is_legal(address: &str) -> bool {
        is_legal_ipv4(address)
    }

    fn insert_prefix(&mut self, prefix: &str, value: i64) -> IngestResult<()> {
        self.insert_cidr(prefix, value)
    }

    fn node_count(&self) -> usize {
        self.size()
    }
}

impl IngestTarget for WideTrie {
    type Value = u128;
    const FAMILY: &'static str = "ipv6";

    fn with_capacity(capacity: usize) -> Self {
        WideTrie::with_capacity(capacity)
    }

    fn is_legal(address: &str) -> bool {
        is_legal_ipv6(address)
    }

    fn insert_prefix(&mut self, prefix: &str, value: u128) -> IngestResult<()> {
        self.insert_cidr(prefix, value)
    }

    fn node_count(&self) -> usize {
        self.size()
    }
}

/// Counters collected while loading a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Lines read, blank and comment lines included
    pub lines: usize,

    /// Records stored in the trie
    pub inserted: usize,

    /// Blank and comment lines
    pub skipped_blank: usize,

    /// Records whose address failed the legality check
    pub skipped_illegal: usize,

    /// Records with an unparseable value or prefix length, or rejected by the trie
    pub skipped_malformed: usize,
}

/// Builds tries from line-oriented prefix tables.
#[derive(Debug, Clone)]
pub struct TableLoader {
    format: RecordFormat,
    presize_from_line_count: bool,
    narrow_capacity: usize,
    wide_capacity: usize,
}

impl TableLoader {
    /// Creates a loader for plain decimal tables.
    ///
    /// Tries loaded from a path are sized by the file's line count; readers use the
    /// default trie capacities.
    pub fn new() -> Self {
        Self {
            format: RecordFormat::Plain,
            presize_from_line_count: true,
            narrow_capacity: <u32 as TrieKey>::DEFAULT_CAPACITY,
            wide_capacity: <u128 as TrieKey>::DEFAULT_CAPACITY,
        }
    }

    /// Creates a loader from the ingest and trie configuration sections.
    pub fn from_config(ingest: &IngestConfig, trie: &TrieConfig) -> Self {
        Self {
            format: ingest.format,
            presize_from_line_count: ingest.presize_from_line_count,
            narrow_capacity: trie.narrow_capacity,
            wide_capacity: trie.wide_capacity,
        }
    }

    /// Set the value column encoding.
    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    /// Size tries loaded from a path by the file's line count instead of the configured capacity.
    pub fn with_presize_from_line_count(mut self, presize: bool) -> Self {
        self.presize_from_line_count = presize;
        self
    }

    /// Set the initial node capacities of IPv4 and IPv6 tries.
    pub fn with_capacities(mut self, narrow: usize, wide: usize) -> Self {
        self.narrow_capacity = narrow;
        self.wide_capacity = wide;
        self
    }

    /// Get the value column encoding
    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Loads an IPv4 table from any buffered reader.
    pub fn load_narrow<R: BufRead>(&self, reader: R) -> IngestResult<(NarrowTrie, LoadStats)> {
        self.load(reader, self.narrow_capacity)
    }

    /// Loads an IPv6 table from any buffered reader.
    pub fn load_wide<R: BufRead>(&self, reader: R) -> IngestResult<(WideTrie, LoadStats)> {
        self.load(reader, self.wide_capacity)
    }

    /// Loads an IPv4 table from a local file.
    pub fn load_narrow_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> IngestResult<(NarrowTrie, LoadStats)> {
        self.load_from_path(path.as_ref(), self.narrow_capacity)
    }

    /// Loads an IPv6 table from a local file.
    pub fn load_wide_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> IngestResult<(WideTrie, LoadStats)> {
        self.load_from_path(path.as_ref(), self.wide_capacity)
    }

    fn load_from_path<T: IngestTarget>(
        &self,
        path: &Path,
        capacity: usize,
    ) -> IngestResult<(T, LoadStats)> {
        let capacity = if self.presize_from_line_count {
            count_lines(path)?
        } else {
            capacity
        };
        debug!(path = %path.display(), capacity, "Opening prefix table");

        let reader = BufReader::new(File::open(path)?);
        self.load(reader, capacity)
    }

    /// Builds a trie of type `T` from every record in `reader`.
    pub fn load<T: IngestTarget, R: BufRead>(
        &self,
        reader: R,
        capacity: usize,
    ) -> IngestResult<(T, LoadStats)> {
        let mut trie = T::with_capacity(capacity);
        let mut stats = LoadStats::default();

        // Split on raw bytes so one badly encoded line cannot end the load
        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes?;
            let line_no = index + 1;
            stats.lines += 1;

            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping record that is not valid UTF-8");
                    stats.skipped_malformed += 1;
                    continue;
                }
            };

            let record = match parse_record::<T::Value>(line, self.format) {
                Ok(Some(record)) => record,
                Ok(None) => {
                    stats.skipped_blank += 1;
                    continue;
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping malformed record");
                    stats.skipped_malformed += 1;
                    continue;
                }
            };

            if !T::is_legal(record.address()) {
                debug!(line = line_no, prefix = record.prefix, "Skipping illegal address");
                stats.skipped_illegal += 1;
                continue;
            }

            match trie.insert_prefix(record.prefix, record.value) {
                Ok(()) => stats.inserted += 1,
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping rejected record");
                    stats.skipped_malformed += 1;
                }
            }
        }

        info!(
            family = T::FAMILY,
            lines = stats.lines,
            inserted = stats.inserted,
            skipped_illegal = stats.skipped_illegal,
            skipped_malformed = stats.skipped_malformed,
            nodes = trie.node_count(),
            "Loaded prefix table"
        );

        Ok((trie, stats))
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of lines in a local file.
fn count_lines(path: &Path) -> IngestResult<usize> {
    let reader = BufReader::with_capacity(8192, File::open(path)?);
    let mut count = 0;
    for line in reader.split(b'\n') {
        line?;
        count += 1;
    }
    Ok(count)
}
