//! The assembled dump document.
//!
//! This module provides [`Dump`], the key/value mapping produced by a full
//! read and consumed by a full write, together with its file lifecycle: a
//! document remembers the path of its last successful load or save and uses
//! it as the default target for the next pathless [`save`](Dump::save).
//!
//! ## Examples
//!
//! ```rust,no_run
//! use fielddump::{Dump, Value};
//!
//! let mut doc = Dump::load("scan.dump")?;
//! if let Some(field) = doc.field_mut("/0/data") {
//!     for sample in field.as_mut_slice() {
//!         *sample *= 2.0;
//!     }
//! }
//! doc.save()?; // writes back to scan.dump
//! # Ok::<(), fielddump::Error>(())
//! ```

use crate::de::Reader;
use crate::ser::Writer;
use crate::{DumpMap, DumpOptions, Error, Field, Result, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A dump document: an ordered mapping from string key to [`Value`], plus
/// the remembered path of its backing file.
///
/// The document never holds the backing file open; each [`load`](Dump::load)
/// and [`save`](Dump::save) acquires a handle for the duration of the call
/// and releases it on every exit path. A failure mid-save leaves a
/// truncated file; there is no atomic-rename strategy.
///
/// `Dump` is not safe for concurrent mutation. Callers adapting it into a
/// concurrent system must serialize access themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dump {
    entries: DumpMap,
    last_path: Option<PathBuf>,
}

impl Dump {
    /// Creates an empty document with no remembered path.
    #[must_use]
    pub fn new() -> Self {
        Dump::default()
    }

    /// Wraps an already-assembled map in a document.
    #[must_use]
    pub fn from_map(entries: DumpMap) -> Self {
        Dump {
            entries,
            last_path: None,
        }
    }

    /// Reads a document from a file, remembering `path` for a later
    /// [`save`](Dump::save).
    ///
    /// # Errors
    ///
    /// Any [`Error::Io`] from opening or reading the file, or any format
    /// error from the reader.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let entries = Reader::new(BufReader::new(file)).read_document()?;
        Ok(Dump {
            entries,
            last_path: Some(path.to_path_buf()),
        })
    }

    /// Writes the document back to its remembered path.
    ///
    /// # Errors
    ///
    /// [`Error::NoPath`] if the document was never loaded from or saved to
    /// a file; otherwise as [`save_as`](Dump::save_as).
    pub fn save(&mut self) -> Result<()> {
        let path = self.last_path.clone().ok_or(Error::NoPath)?;
        self.save_as(path)
    }

    /// Writes the document to `path` with default options, remembering the
    /// path on success.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with_options(path, DumpOptions::default())
    }

    /// Writes the document to `path` with explicit options, remembering the
    /// path on success.
    pub fn save_with_options(
        &mut self,
        path: impl AsRef<Path>,
        options: DumpOptions,
    ) -> Result<()> {
        let path = path.as_ref();
        let mut sink = BufWriter::new(File::create(path)?);
        Writer::new(&mut sink, options).write_document(&self.entries)?;
        sink.flush()?;
        self.last_path = Some(path.to_path_buf());
        Ok(())
    }

    /// The path of the last successful load or save, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the value for `key`.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts an entry, returning the previous value under that key.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Removes an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns `true` if the document contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Borrows the underlying map.
    #[must_use]
    pub fn entries(&self) -> &DumpMap {
        &self.entries
    }

    /// Borrows the underlying map mutably.
    #[must_use]
    pub fn entries_mut(&mut self) -> &mut DumpMap {
        &mut self.entries
    }

    /// Consumes the document, returning the underlying map.
    #[must_use]
    pub fn into_entries(self) -> DumpMap {
        self.entries
    }

    /// The data field stored at `base`, if present.
    #[must_use]
    pub fn field(&self, base: &str) -> Option<&Field> {
        self.entries.get(base).and_then(Value::as_field)
    }

    /// The data field stored at `base`, mutably.
    #[must_use]
    pub fn field_mut(&mut self, base: &str) -> Option<&mut Field> {
        self.entries.get_mut(base).and_then(Value::as_field_mut)
    }

    /// The coerced `(xres, yres)` sample counts of channel `base`, if both
    /// are present as integers.
    #[must_use]
    pub fn dimensions(&self, base: &str) -> Option<(i64, i64)> {
        let xres = self.entries.get(&format!("{base}/xres"))?.as_i64()?;
        let yres = self.entries.get(&format!("{base}/yres"))?.as_i64()?;
        Some((xres, yres))
    }

    /// Stores a data field with its resolution metadata in one step.
    ///
    /// Inserts `base/xres`, `base/yres` and the field itself. The sample
    /// count is not checked against `xres * yres`; the format trusts the
    /// declared dimensions.
    pub fn set_field(&mut self, base: &str, xres: i64, yres: i64, samples: Vec<f64>) {
        self.entries
            .insert(format!("{base}/xres"), Value::Integer(xres));
        self.entries
            .insert(format!("{base}/yres"), Value::Integer(yres));
        self.entries
            .insert(base.to_string(), Value::Field(Field::new(samples)));
    }
}

impl<'a> IntoIterator for &'a Dump {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
