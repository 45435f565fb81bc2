//! # fielddump
//!
//! A reader/writer for the line-oriented hybrid text/binary dump format used
//! to exchange 2-D scalar-field data (e.g. microscopy images) between a host
//! application and external processing plugins.
//!
//! ## The format
//!
//! A dump file interleaves human-readable `key=value` metadata with raw
//! binary payloads embedded inline in the same stream:
//!
//! ```text
//! /0/data/xres=2
//! /0/data/yres=2
//! /0/data/xreal=5e-08
//! /0/data/unit-xy=m
//! /0/data=[
//! [<32 bytes of native-endian f64 samples>]]
//! ```
//!
//! There is no file header, no magic number and no format version. Keys use
//! a hierarchical path convention: a channel base key (here `/0/data`) holds
//! the flat row-major sample sequence, and suffixed siblings hold its
//! metadata. On read, `xres`/`yres` are coerced to integers and
//! `xreal`/`yreal` to floats, but only when they precede their channel's
//! binary block; everything else stays text. The payload length is always
//! `xres*yres` samples, derived from those siblings, with no other size
//! marker.
//!
//! Two quirks are part of the wire contract and deliberately preserved:
//!
//! - a scalar line whose value is the literal text `[` is only
//!   distinguishable from a field header by peeking one byte past the
//!   newline, and the reader does exactly that;
//! - samples are written in the host's native byte order with no endianness
//!   tag, so files do not port across architectures of differing byte
//!   order.
//!
//! ## Quick Start
//!
//! ```rust
//! use fielddump::{dump, from_slice, to_vec};
//!
//! let mut doc = dump! {
//!     "/0/data/xres" => 2,
//!     "/0/data/yres" => 2,
//!     "/0/data/unit-z" => "m",
//!     "/0/data" => vec![0.0, 0.25, 0.5, 0.75],
//! };
//!
//! let bytes = to_vec(&doc).unwrap();
//! let back = from_slice(&bytes).unwrap();
//! assert_eq!(back.field("/0/data").unwrap().as_slice(), &[0.0, 0.25, 0.5, 0.75]);
//! ```
//!
//! File-backed documents remember their path, so a plugin can load, mutate
//! and save without threading the path through:
//!
//! ```rust,no_run
//! use fielddump::Dump;
//!
//! let mut doc = Dump::load("scan.dump")?;
//! doc.insert("/meta/comment".to_string(), "processed".into());
//! doc.save()?; // back to scan.dump
//! # Ok::<(), fielddump::Error>(())
//! ```
//!
//! The [`plugin`] module implements the collaborator side of the exchange:
//! a registration handshake and a `run(mode, path)` entry point around a
//! value-inversion transform.
//!
//! ## Errors
//!
//! Every failure surfaces through [`Error`] to the immediate caller; the
//! core performs no recovery, no retries and no partial-document
//! checkpointing. I/O errors propagate as-is.

pub mod de;
pub mod document;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod plugin;
pub mod ser;
pub mod value;

pub use de::Reader;
pub use document::Dump;
pub use error::{Error, Result};
pub use map::DumpMap;
pub use options::{DumpOptions, EntryOrdering};
pub use plugin::RunMode;
pub use ser::Writer;
pub use value::{Field, Value};

use std::io;

/// Reads a document from an in-memory byte slice.
///
/// # Examples
///
/// ```rust
/// use fielddump::from_slice;
///
/// let doc = from_slice(b"/meta/comment=test scan\n").unwrap();
/// assert_eq!(doc.get("/meta/comment").and_then(|v| v.as_str()), Some("test scan"));
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not a well-formed dump.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Dump> {
    Ok(Dump::from_map(Reader::new(bytes).read_document()?))
}

/// Reads a document from an I/O stream.
///
/// The stream is wrapped in a buffered reader internally; the tokenizer
/// consumes the text sections byte by byte.
///
/// # Examples
///
/// ```rust
/// use fielddump::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"/meta/a=1\n")).unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the stream is not a well-formed
/// dump.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Dump> {
    let map = Reader::new(io::BufReader::new(reader)).read_document()?;
    Ok(Dump::from_map(map))
}

/// Serializes a document to a byte vector with default options.
///
/// # Examples
///
/// ```rust
/// use fielddump::{dump, to_vec};
///
/// let doc = dump! { "/meta/a" => "1" };
/// assert_eq!(to_vec(&doc).unwrap(), b"/meta/a=1\n");
/// ```
///
/// # Errors
///
/// Serialization to memory only fails on allocation pressure; the error
/// type is shared with the writer API.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(doc: &Dump) -> Result<Vec<u8>> {
    to_vec_with_options(doc, DumpOptions::default())
}

/// Serializes a document to a byte vector with explicit options.
///
/// # Errors
///
/// As [`to_vec`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options(doc: &Dump, options: DumpOptions) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    to_writer_with_options(&mut bytes, doc, options)?;
    Ok(bytes)
}

/// Serializes a document to a writer with default options.
///
/// # Examples
///
/// ```rust
/// use fielddump::{dump, to_writer};
///
/// let doc = dump! { "/meta/a" => "1" };
/// let mut sink = Vec::new();
/// to_writer(&mut sink, &doc).unwrap();
/// assert_eq!(sink, b"/meta/a=1\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, doc: &Dump) -> Result<()> {
    to_writer_with_options(writer, doc, DumpOptions::default())
}

/// Serializes a document to a writer with explicit options.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W: io::Write>(
    writer: W,
    doc: &Dump,
    options: DumpOptions,
) -> Result<()> {
    Writer::new(writer, options).write_document(doc.entries())
}
