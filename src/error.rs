use crate::extract::TimestampError;
use std::path::PathBuf;
use thiserror::Error;

/// All the errors of the bug history pipeline and its front ends.
#[derive(Error, Debug)]
pub enum Error {
    /// The source file could not be opened.
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading failed part way through the source.
    #[error("could not read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The pattern does not compile or does not have exactly one capture group.
    #[error("invalid pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A matched field is not an RFC 1123 date-time.
    #[error("line {line}: could not parse timestamp {value:?}: {source}")]
    Timestamp {
        line: usize,
        value: String,
        #[source]
        source: TimestampError,
    },

    /// A date given as argument is not YYYY-MM-DD.
    #[error("invalid date {value:?}, expected YYYY-MM-DD: {source}")]
    DateArg {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Neither the creations nor the resolutions have any date.
    #[error("no creation or resolution dates found, cannot determine the first date")]
    NoData,

    /// There is nothing to render.
    #[error("the bug history is empty, nothing to plot")]
    EmptyHistory,

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plotting failed: {0}")]
    Plot(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_the_path() {
        let err = Error::Open {
            path: PathBuf::from("/missing/bugs.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/bugs.xml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_no_data_message() {
        assert_eq!(
            Error::NoData.to_string(),
            "no creation or resolution dates found, cannot determine the first date"
        );
    }

    #[test]
    fn test_timestamp_error_has_source() {
        use std::error::Error as _;
        let err = Error::Timestamp {
            line: 3,
            value: "yesterday".to_string(),
            source: TimestampError::Grammar,
        };
        assert!(err.to_string().starts_with("line 3: could not parse timestamp \"yesterday\""));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_plot_error_keeps_source() {
        use std::error::Error as _;
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = Error::Plot(Box::new(io_err));
        assert_eq!(err.to_string(), "plotting failed: read-only");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "read-only");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }
}
