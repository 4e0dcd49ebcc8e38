use std::{fmt::Display, io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecordError>;

/// Every way an operation on a [`super::DelimitedRecordStream`] can fail.
///
/// All of these are raised at the offending call. Nothing is retried,
/// deferred or swallowed, except inside `close()` which never fails.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: cannot {operation} while the stream is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("null input: {0} is absent")]
    NullInput(&'static str),

    #[error("not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The fieldless shape of a [`RecordError`], handy for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    NullInput,
    NotFound,
    Io,
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RecordError::InvalidState { .. } => ErrorKind::InvalidState,
            RecordError::NullInput(_) => ErrorKind::NullInput,
            RecordError::NotFound { .. } => ErrorKind::NotFound,
            RecordError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> RecordError {
        //! Sort a filesystem failure into [`RecordError::NotFound`] or the
        //! general [`RecordError::Io`] bucket.

        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => RecordError::NotFound { path, source },
            _ => RecordError::Io { path, source },
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::InvalidState => "InvalidState",
            ErrorKind::NullInput => "NullInput",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Io => "IOError",
        };
        write!(f, "{}", kind)
    }
}
