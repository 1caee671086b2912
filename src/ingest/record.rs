//! Line records of a prefix table.
//!
//! A record is `prefix/len<whitespace>value[<whitespace>ignored columns...]`, e.g.
//!
//! ```text
//! 112.60.0.0/18	951728549285331151	2	34	3	2	0
//! ```

use serde::{Deserialize, Serialize};

use super::{IngestError, IngestResult};

/// Encoding of the value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// Decimal value
    #[default]
    Plain,

    /// Hexadecimal value terminated by `;`, as in nginx geo blocks
    Nginx,
}

/// Value types that can be read from the value column.
pub trait RecordValue: Sized {
    /// Parses `text` in the given radix, returning `None` on failure or overflow.
    fn parse_radix(text: &str, radix: u32) -> Option<Self>;
}

impl RecordValue for i64 {
    fn parse_radix(text: &str, radix: u32) -> Option<Self> {
        i64::from_str_radix(text, radix).ok()
    }
}

impl RecordValue for u128 {
    fn parse_radix(text: &str, radix: u32) -> Option<Self> {
        u128::from_str_radix(text, radix).ok()
    }
}

/// One parsed table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a, V> {
    /// The `address/len` column, unparsed
    pub prefix: &'a str,

    /// The parsed value column
    pub value: V,
}

impl<'a, V> Record<'a, V> {
    /// The address part of the prefix column.
    pub fn address(&self) -> &'a str {
        self.prefix.split('/').next().unwrap_or(self.prefix)
    }
}

/// Parses one table line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_record<V: RecordValue>(
    line: &str,
    format: RecordFormat,
) -> IngestResult<Option<Record<'_, V>>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut columns = line.split_whitespace();
    let prefix = columns
        .next()
        .ok_or_else(|| IngestError::MissingValue(line.to_string()))?;
    let raw = columns
        .next()
        .ok_or_else(|| IngestError::MissingValue(line.to_string()))?;

    let value = match format {
        RecordFormat::Plain => V::parse_radix(raw, 10),
        RecordFormat::Nginx => V::parse_radix(raw.strip_suffix(';').unwrap_or(raw), 16),
    }
    .ok_or_else(|| IngestError::InvalidValue(raw.to_string()))?;

    Ok(Some(Record { prefix, value }))
}
