//! Error types for dump reading and writing.
//!
//! All failures surface through the single [`Error`] enum. The reader performs
//! no local recovery: the first line that matches no grammar form, or a field
//! block with a malformed terminator, aborts the whole read. I/O errors are
//! not wrapped in any special way; they propagate to the caller as-is through
//! the transparent [`Error::Io`] variant.
//!
//! ## Examples
//!
//! ```rust
//! use fielddump::{from_slice, Error};
//!
//! let result = from_slice(b"this line has no equals sign\n");
//! assert!(matches!(result, Err(Error::UnparseableLine { .. })));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing a
/// dump, or while dispatching the plugin entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O failure (file not found, permission denied, truncated
    /// read). Propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A line matched none of the recognized grammar forms.
    #[error("line {line}: not a key=value assignment: {content:?}")]
    UnparseableLine { line: usize, content: String },

    /// A field block's payload was not followed by the exact terminator
    /// line `]]`.
    #[error("line {line}: field block for {key:?} is not closed by \"]]\"")]
    MissingTerminator { line: usize, key: String },

    /// A field header was seen but the sibling resolution key needed to
    /// derive the payload length is absent.
    #[error("field block for {key:?} does not declare {dim}")]
    MissingDimension { key: String, dim: &'static str },

    /// Declared field dimensions are nonpositive, or their product
    /// overflows.
    #[error("field block for {key:?} has invalid dimensions {xres}x{yres}")]
    InvalidDimensions { key: String, xres: i64, yres: i64 },

    /// A value under a coerced suffix could not be parsed as its target
    /// numeric type.
    #[error("line {line}: cannot coerce {key:?} value {value:?} to {target}")]
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
        target: &'static str,
    },

    /// The run mode handed to the plugin entry point is not in the
    /// recognized set.
    #[error("unknown run mode {0:?}")]
    InvalidRunMode(String),

    /// The plugin's well-known data key is absent from the document.
    #[error("no data field at key {0:?}")]
    MissingField(String),

    /// `save()` was called on a document with no remembered path.
    #[error("document has no remembered file name")]
    NoPath,
}

pub type Result<T> = std::result::Result<T, Error>;
