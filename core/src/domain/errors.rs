use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoPhylipError {
    #[error(
        "{path:?} line {line}: found {found} fields where the header declares {expected}"
    )]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("identifier column `{column}` not found in {path:?}. headers: {headers:?}")]
    MissingIdentifierColumn {
        column: String,
        path: PathBuf,
        headers: Vec<String>,
    },

    #[error("no sequence columns selected in {path:?} ({selection})")]
    NoSequenceColumns { path: PathBuf, selection: String },

    #[error("invalid column pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "sequence `{identifier}` has length {found} but the document length is {expected}"
    )]
    InconsistentSequenceLength {
        identifier: String,
        expected: usize,
        found: usize,
    },

    #[error("no sequence entries to write to {path:?}")]
    EmptyDocument { path: PathBuf },

    #[error("unable to launch PHYLIP program {program:?}: {source}")]
    ExternalProgramNotFound {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PHYLIP program {program:?} failed on {input:?} with {status}")]
    ExternalProgramFailure {
        program: PathBuf,
        input: PathBuf,
        status: String,
    },

    #[error("{path:?} already exists and would be overwritten by PHYLIP")]
    OutputCollision { path: PathBuf },

    #[error("file not found: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("invalid configuration in {path:?}: {msg}")]
    Config { path: PathBuf, msg: String },

    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AutoPhylipError {
    /// Stable name of the error kind, printed by the command line ports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRow { .. } => "MalformedRow",
            Self::MissingIdentifierColumn { .. } => "MissingIdentifierColumn",
            Self::NoSequenceColumns { .. } => "NoSequenceColumns",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::InconsistentSequenceLength { .. } => {
                "InconsistentSequenceLength"
            }
            Self::EmptyDocument { .. } => "EmptyDocument",
            Self::ExternalProgramNotFound { .. } => "ExternalProgramNotFound",
            Self::ExternalProgramFailure { .. } => "ExternalProgramFailure",
            Self::OutputCollision { .. } => "OutputCollision",
            Self::FileNotFound { .. } => "FileNotFound",
            Self::Config { .. } => "Config",
            Self::Io { .. } => "IOError",
        }
    }

    /// Map an io error on `path`, splitting out missing files.
    pub fn from_io<P: Into<PathBuf>>(path: P, err: io::Error) -> Self {
        let path = path.into();

        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path },
            _ => Self::Io { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_splits_not_found() {
        let err = AutoPhylipError::from_io(
            "missing.tab",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), "FileNotFound");

        let err = AutoPhylipError::from_io(
            "locked.tab",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), "IOError");
    }
}
