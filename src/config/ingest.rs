//! Table loading configuration module.

use super::{ConfigResult, Validate};
use crate::ingest::RecordFormat;
use serde::{Deserialize, Serialize};

/// How prefix tables are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Encoding of the value column
    pub format: RecordFormat,

    /// Size tries by the table's line count instead of the trie capacities
    pub presize_from_line_count: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            format: RecordFormat::Plain,
            presize_from_line_count: true,
        }
    }
}

impl Validate for IngestConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}
