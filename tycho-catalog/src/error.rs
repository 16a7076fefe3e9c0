use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Malformed line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Invalid Tycho identifier: {reason}")]
    InvalidId { reason: String },

    #[error("Seek to byte {offset} past end of catalog ({file_len} bytes)")]
    SeekOutOfBounds { offset: u64, file_len: u64 },

    #[error("Catalog truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: u64, actual: u64 },

    #[error("Group {id1} out of range (index has {groups} groups)")]
    OutOfRange { id1: i64, groups: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CatalogError {
    /// Whether a batch run can skip the offending entry and carry on.
    /// Only [`CatalogError::OutOfRange`] is; everything else is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn format_display() {
        let err = CatalogError::Format {
            line: 7,
            reason: "expected two ';'-separated fields".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed line 7: expected two ';'-separated fields"
        );
    }

    #[test]
    fn invalid_id_display() {
        let err = CatalogError::InvalidId {
            reason: "invalid id1 \"x\"".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Tycho identifier: invalid id1 \"x\"");
    }

    #[test]
    fn seek_out_of_bounds_display() {
        let err = CatalogError::SeekOutOfBounds {
            offset: 330,
            file_len: 66,
        };
        assert_eq!(
            err.to_string(),
            "Seek to byte 330 past end of catalog (66 bytes)"
        );
    }

    #[test]
    fn truncated_display() {
        let err = CatalogError::Truncated {
            expected: 99,
            actual: 66,
        };
        assert_eq!(err.to_string(), "Catalog truncated: expected 99 bytes, got 66");
    }

    #[test]
    fn out_of_range_display() {
        let err = CatalogError::OutOfRange { id1: 0, groups: 9537 };
        assert_eq!(
            err.to_string(),
            "Group 0 out of range (index has 9537 groups)"
        );
    }

    #[test]
    fn only_out_of_range_is_recoverable() {
        assert!(CatalogError::OutOfRange { id1: 12, groups: 3 }.is_recoverable());
        assert!(!CatalogError::Format {
            line: 1,
            reason: String::new()
        }
        .is_recoverable());
        assert!(!CatalogError::InvalidId {
            reason: String::new()
        }
        .is_recoverable());
        assert!(!CatalogError::Truncated {
            expected: 33,
            actual: 0
        }
        .is_recoverable());
        assert!(!CatalogError::from(IoError::new(ErrorKind::NotFound, "gone")).is_recoverable());
    }

    #[test]
    fn io_error_automatic_conversion() {
        fn fails() -> Result<()> {
            Err(IoError::new(ErrorKind::UnexpectedEof, "short read"))?
        }

        match fails().unwrap_err() {
            CatalogError::Io(ref inner) => assert_eq!(inner.kind(), ErrorKind::UnexpectedEof),
            other => panic!("expected Io variant, got {:?}", other),
        }
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogError>();
    }
}
