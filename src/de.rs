//! Dump reading.
//!
//! This module provides the streaming [`Reader`] that parses a dump byte
//! stream into a [`DumpMap`].
//!
//! ## Overview
//!
//! The reader is a single-pass line classifier with exactly one byte of
//! lookahead. Each line is one of:
//!
//! - a **field header** `key=[` followed by a line whose first byte is `[`,
//!   which opens a binary block of `xres*yres` native-endian f64 samples
//!   closed by a literal `]]` line,
//! - a **scalar assignment** `key=rest-of-line`, stored verbatim,
//! - anything else, which is a fatal [`Error::UnparseableLine`].
//!
//! The single byte of lookahead resolves the format's inherent ambiguity: a
//! scalar line whose value is the literal text `[` is indistinguishable from
//! a field header until the byte after the newline is examined. If that byte
//! is `[` the header is confirmed; otherwise the byte is pushed back into
//! the lookahead buffer and the value is the one-character string `"["`.
//! This is observable format behavior, not a parsing shortcut, and it is
//! preserved exactly.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use fielddump::from_slice;
//!
//! let doc = from_slice(b"/meta/comment=test scan\n").unwrap();
//! assert_eq!(
//!     doc.get("/meta/comment").and_then(|v| v.as_str()),
//!     Some("test scan")
//! );
//! ```

use crate::{DumpMap, Error, Field, Result, Value};
use byteorder::{NativeEndian, ReadBytesExt};
use std::io::{ErrorKind, Read};

/// Suffixes coerced to integers when a channel's field header is reached.
const INTEGER_SUFFIXES: [&str; 2] = ["xres", "yres"];

/// Suffixes coerced to floats when a channel's field header is reached.
const FLOAT_SUFFIXES: [&str; 2] = ["xreal", "yreal"];

/// The streaming dump reader.
///
/// Wraps any [`Read`] source with a one-byte lookahead buffer and a line
/// counter for error reporting. The source should be buffered; the
/// tokenizer consumes the text sections byte by byte.
///
/// Created via [`Reader::new`]; consumed by [`Reader::read_document`].
pub struct Reader<R> {
    inner: R,
    peeked: Option<u8>,
    line: usize,
}

impl<R: Read> Reader<R> {
    /// Creates a reader over a byte source.
    pub fn new(inner: R) -> Self {
        Reader {
            inner,
            peeked: None,
            line: 0,
        }
    }

    /// Pulls one byte from the underlying source, bypassing the lookahead
    /// buffer. `None` at end of stream.
    fn fetch(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Returns the next byte without consuming it. The byte stays in the
    /// lookahead buffer until the next [`read_byte`](Self::read_byte).
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.fetch()?;
        }
        Ok(self.peeked)
    }

    /// Consumes and returns the next byte, draining the lookahead buffer
    /// first.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.peeked.take() {
            Some(b) => Ok(Some(b)),
            None => self.fetch(),
        }
    }

    /// Reads the next line as raw bytes, without the trailing newline.
    ///
    /// Returns `None` at end of stream with nothing consumed. A final line
    /// lacking its newline is still returned.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        loop {
            match self.read_byte()? {
                None if buf.is_empty() => return Ok(None),
                None | Some(b'\n') => {
                    self.line += 1;
                    return Ok(Some(buf));
                }
                Some(b) => buf.push(b),
            }
        }
    }

    /// Reads `count` native-endian f64 samples directly from the source.
    ///
    /// Only called with the lookahead buffer empty (the confirmed header
    /// consumed the peeked `[`), so reading past it is sound.
    fn read_payload(&mut self, count: usize) -> Result<Vec<f64>> {
        debug_assert!(self.peeked.is_none());
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(self.inner.read_f64::<NativeEndian>()?);
        }
        Ok(samples)
    }

    /// Parses the whole stream into a document map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnparseableLine`] for a line with no `=`,
    /// [`Error::MissingTerminator`] for a field block not closed by `]]`,
    /// [`Error::MissingDimension`]/[`Error::InvalidDimensions`]/
    /// [`Error::InvalidNumber`] for broken channel metadata, and
    /// [`Error::Io`] for anything the source itself reports. There is no
    /// partial recovery; the document assembled so far is discarded.
    pub fn read_document(mut self) -> Result<DumpMap> {
        let mut map = DumpMap::new();
        while let Some(raw) = self.read_line()? {
            let line = self.line;
            let text = String::from_utf8(raw).map_err(|e| Error::UnparseableLine {
                line,
                content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            })?;
            let Some(eq) = text.find('=') else {
                return Err(Error::UnparseableLine {
                    line,
                    content: text,
                });
            };
            let key = &text[..eq];
            let value = &text[eq + 1..];

            if value == "[" && self.peek_byte()? == Some(b'[') {
                // Confirmed field header. Consume the opening bracket of the
                // payload pseudo-line and read the binary block.
                self.read_byte()?;
                self.read_field(&mut map, key)?;
            } else {
                // Plain scalar. When the value was `[` the peeked byte stays
                // in the lookahead buffer and opens the next line.
                map.insert(key.to_string(), Value::Text(value.to_string()));
            }
        }
        Ok(map)
    }

    /// Reads one binary field block for `base`, the header line already
    /// consumed.
    fn read_field(&mut self, map: &mut DumpMap, base: &str) -> Result<()> {
        coerce_channel_metadata(map, base, self.line)?;
        let xres = dimension(map, base, "xres")?;
        let yres = dimension(map, base, "yres")?;

        let count = sample_count(xres, yres).ok_or_else(|| Error::InvalidDimensions {
            key: base.to_string(),
            xres,
            yres,
        })?;

        let samples = self.read_payload(count)?;

        let terminator = self.read_line()?;
        if terminator.as_deref() != Some(&b"]]"[..]) {
            return Err(Error::MissingTerminator {
                line: self.line,
                key: base.to_string(),
            });
        }

        // A scalar that previously used this base key is replaced without
        // warning, matching the on-disk format's semantics.
        map.insert(base.to_string(), Value::Field(Field::new(samples)));
        Ok(())
    }
}

/// Derives the payload sample count, rejecting nonpositive dimensions and
/// overflowing products.
fn sample_count(xres: i64, yres: i64) -> Option<usize> {
    if xres <= 0 || yres <= 0 {
        return None;
    }
    let x = usize::try_from(xres).ok()?;
    let y = usize::try_from(yres).ok()?;
    x.checked_mul(y)
}

/// Coerces the recognized metadata suffixes of `base` that are already
/// present in the map.
///
/// Keys appearing in the file after the channel's field header are never
/// coerced; they stay text. This order dependency is part of the format's
/// observable behavior.
fn coerce_channel_metadata(map: &mut DumpMap, base: &str, line: usize) -> Result<()> {
    for suffix in INTEGER_SUFFIXES {
        let key = format!("{base}/{suffix}");
        if let Some(Value::Text(raw)) = map.get(&key) {
            let raw = raw.clone();
            let n: i64 = raw.parse().map_err(|_| Error::InvalidNumber {
                line,
                key: key.clone(),
                value: raw.clone(),
                target: "integer",
            })?;
            map.insert(key, Value::Integer(n));
        }
    }
    for suffix in FLOAT_SUFFIXES {
        let key = format!("{base}/{suffix}");
        if let Some(Value::Text(raw)) = map.get(&key) {
            let raw = raw.clone();
            let x: f64 = raw.parse().map_err(|_| Error::InvalidNumber {
                line,
                key: key.clone(),
                value: raw.clone(),
                target: "float",
            })?;
            map.insert(key, Value::Float(x));
        }
    }
    Ok(())
}

/// Looks up a coerced dimension of `base`.
fn dimension(map: &DumpMap, base: &str, dim: &'static str) -> Result<i64> {
    let key = format!("{base}/{dim}");
    match map.get(&key) {
        Some(Value::Integer(n)) => Ok(*n),
        _ => Err(Error::MissingDimension {
            key: base.to_string(),
            dim,
        }),
    }
}
