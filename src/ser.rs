//! Dump writing.
//!
//! This module provides the [`Writer`] that serializes a [`DumpMap`] into
//! the on-disk byte layout.
//!
//! ## Layout
//!
//! The writer partitions entries by their runtime shape, not by key name:
//! every [`Value::Field`] is a data entry, everything else is descriptive.
//! All descriptive lines are emitted first, one `key=value` per line, then
//! each data entry as its three-part block:
//!
//! ```text
//! key=[
//! [<len*8 bytes of native-endian f64>]]
//! ```
//!
//! The opening bracket and the payload share a pseudo-line; there is no
//! newline between them. No length prefix is written, a reader re-derives
//! the payload length from the channel's `xres`/`yres` entries. No
//! endianness tag is written either, so files do not port across
//! architectures of differing byte order.
//!
//! Within each section entries are ordered per
//! [`DumpOptions::ordering`](crate::DumpOptions): sorted by key by default,
//! so the same contents always produce the same bytes.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use fielddump::{dump, to_vec};
//!
//! let doc = dump! {
//!     "/meta/date" => "2004-06-01",
//!     "/meta/comment" => "test scan",
//! };
//! let bytes = to_vec(&doc).unwrap();
//! assert_eq!(bytes, b"/meta/comment=test scan\n/meta/date=2004-06-01\n");
//! ```

use crate::{DumpMap, DumpOptions, EntryOrdering, Field, Result, Value};
use byteorder::{NativeEndian, WriteBytesExt};
use std::io::Write;

/// The dump writer.
///
/// Serializes a document map to any [`Write`] sink. Created via
/// [`Writer::new`]; consumed by [`Writer::write_document`].
pub struct Writer<W> {
    inner: W,
    options: DumpOptions,
}

impl<W: Write> Writer<W> {
    /// Creates a writer over a byte sink with the given options.
    pub fn new(inner: W, options: DumpOptions) -> Self {
        Writer { inner, options }
    }

    /// Serializes the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink fails. There is
    /// no partial-write recovery; a failure mid-write leaves whatever was
    /// already emitted in the sink.
    pub fn write_document(mut self, map: &DumpMap) -> Result<()> {
        let (data, descriptive): (Vec<_>, Vec<_>) =
            map.iter().partition(|(_, value)| value.is_field());

        for (key, value) in self.ordered(descriptive) {
            writeln!(self.inner, "{}={}", key, value)?;
        }
        for (key, value) in self.ordered(data) {
            if let Value::Field(field) = value {
                self.write_field(key, field)?;
            }
        }
        Ok(())
    }

    /// Applies the configured ordering policy to one section's entries.
    fn ordered<'a>(
        &self,
        mut entries: Vec<(&'a String, &'a Value)>,
    ) -> Vec<(&'a String, &'a Value)> {
        if self.options.ordering == EntryOrdering::Sorted {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        entries
    }

    /// Emits one binary field block.
    fn write_field(&mut self, key: &str, field: &Field) -> Result<()> {
        write!(self.inner, "{}=[\n[", key)?;
        for &sample in field {
            self.inner.write_f64::<NativeEndian>(sample)?;
        }
        self.inner.write_all(b"]]\n")?;
        Ok(())
    }
}
