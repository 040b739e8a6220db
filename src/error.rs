//! Error values for declaration building, rendering and extraction.
//!
//! Every fallible operation in the crate returns [`Result`].  The variants
//! are grouped into the four [`ErrorKind`] families so that callers can
//! branch on "what went wrong" without matching every variant.

use std::path::PathBuf;

/// Shorthand used by every fallible function in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Coarse classification of a [`CodegenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Something the caller asked for does not exist (no docblock, no
    /// `@return` tag).
    NotFound,
    /// Text that should have followed a grammar did not (docblock
    /// delimiters, type strings).
    MalformedInput,
    /// The caller handed over a value of an unsupported shape, or a
    /// pluggable handler that does not honour its contract.
    InvalidArgument,
    /// The source file behind a declaration could not be read.
    SourceUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("{function} does not have a docblock")]
    NoDocComment { function: String },

    #[error("{function} does not specify an @return annotation tag; cannot determine return type")]
    MissingReturnAnnotation { function: String },

    #[error("malformed docblock: {0}")]
    MalformedDocComment(String),

    #[error("invalid type specification {0:?}")]
    InvalidTypeSpecification(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid handler for tag @{tag}: {reason}")]
    InvalidTagHandler { tag: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("source file {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDocComment { .. } | Self::MissingReturnAnnotation { .. } => ErrorKind::NotFound,
            Self::MalformedDocComment(_) | Self::InvalidTypeSpecification(_) => {
                ErrorKind::MalformedInput
            }
            Self::InvalidArgument(_) | Self::InvalidTagHandler { .. } | Self::InvalidConfig(_) => {
                ErrorKind::InvalidArgument
            }
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}
