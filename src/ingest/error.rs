//! Error types for prefix parsing and table loading.

use crate::data_structures::radix_trie::RadixTrieError;

/// Errors that can occur while parsing prefixes or loading prefix tables.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The address is not a legal address of the expected family.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A prefix was given without the `/length` part.
    #[error("Missing prefix length in '{0}'")]
    MissingPrefixLength(String),

    /// The prefix length is not a number.
    #[error("Invalid prefix length in '{0}'")]
    InvalidPrefixLength(String),

    /// A record has fewer columns than required.
    #[error("Missing value column in record '{0}'")]
    MissingValue(String),

    /// The value column could not be parsed.
    #[error("Invalid value '{0}'")]
    InvalidValue(String),

    /// The trie rejected the prefix.
    #[error(transparent)]
    Trie(#[from] RadixTrieError),

    /// IO errors while reading a table.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::InvalidAddress("256.1.1.1".to_string());
        assert_eq!(err.to_string(), "Invalid address: 256.1.1.1");

        let err = IngestError::MissingPrefixLength("10.0.0.0".to_string());
        assert_eq!(err.to_string(), "Missing prefix length in '10.0.0.0'");

        let err: IngestError = RadixTrieError::InvalidPrefixLength { length: 40, max: 32 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid prefix length 40: must be between 0 and 32"
        );
    }
}
