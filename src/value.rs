//! Typed value representation for dump entries.
//!
//! This module provides the [`Value`] enum, the tagged union stored for every
//! document key, and [`Field`], the flat float-sequence payload of a data
//! channel.
//!
//! ## Core Types
//!
//! - [`Value`]: one of text, integer, float, or a data field
//! - [`Field`]: an ordered sequence of 64-bit floats with an optional 2-D
//!   row view
//!
//! Everything read from a file starts out as [`Value::Text`]; the reader
//! coerces the recognized resolution and extent suffixes to [`Value::Integer`]
//! and [`Value::Float`] when it encounters the channel's field header (see
//! the crate docs for the ordering caveat).
//!
//! ## Examples
//!
//! ```rust
//! use fielddump::Value;
//!
//! let text = Value::from("nm");
//! let res = Value::from(256);
//! let extent = Value::from(5e-6);
//! let data = Value::from(vec![0.0_f64; 4]);
//!
//! assert!(text.is_text());
//! assert_eq!(res.as_i64(), Some(256));
//! assert_eq!(extent.as_f64(), Some(5e-6));
//! assert!(data.is_field());
//! ```

use std::fmt;
use std::slice::ChunksExact;

/// A dynamically-typed dump entry value.
///
/// On the wire every descriptive entry is text; [`Value::Integer`] and
/// [`Value::Float`] only appear after read-time coercion of the recognized
/// suffixes (`xres`, `yres`, `xreal`, `yreal`) or when a consumer stores
/// numbers directly.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An uncoerced scalar, stored verbatim (no escaping, no trimming).
    Text(String),
    /// A coerced sample count (`xres`/`yres`).
    Integer(i64),
    /// A coerced physical extent (`xreal`/`yreal`).
    Float(f64),
    /// A data channel payload.
    Field(Field),
}

impl Value {
    /// Returns `true` if this is a text value.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if this is a data field payload.
    ///
    /// The writer uses this runtime shape, not the key name, to decide which
    /// entries belong to the binary section of the file.
    #[inline]
    #[must_use]
    pub const fn is_field(&self) -> bool {
        matches!(self, Value::Field(_))
    }

    /// Returns the text content if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content if this is an integer value.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float content if this is a float value.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the field payload if this is a data field.
    #[must_use]
    pub const fn as_field(&self) -> Option<&Field> {
        match self {
            Value::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the field payload mutably if this is a data field.
    #[must_use]
    pub fn as_field_mut(&mut self) -> Option<&mut Field> {
        match self {
            Value::Field(f) => Some(f),
            _ => None,
        }
    }
}

/// Formats the value exactly as it appears on a descriptive line.
///
/// Text is verbatim. Integers are plain decimal. Floats use the shortest
/// decimal representation that round-trips, which is what `f64`'s `Display`
/// produces, so a written extent re-reads to the identical value. Fields
/// have no single-line text form; formatting one is a logic error and yields
/// a placeholder, never wire bytes (the serializer routes fields through the
/// binary block writer instead).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Field(field) => write!(f, "<field of {} samples>", field.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Vec<f64>> for Value {
    fn from(samples: Vec<f64>) -> Self {
        Value::Field(Field::new(samples))
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        Value::Field(field)
    }
}

/// The payload of one data channel: a flat, row-major sequence of 64-bit
/// floats.
///
/// The sequence itself carries no shape; width and height live in the
/// sibling `<base>/xres` and `<base>/yres` entries and the length is always
/// their product at read time. [`Field::rows`] offers a borrowed 2-D view
/// for consumers that want one; nothing in the codec requires it.
///
/// # Examples
///
/// ```rust
/// use fielddump::Field;
///
/// let field = Field::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let rows: Vec<&[f64]> = field.rows(3).collect();
/// assert_eq!(rows, vec![&[1.0, 2.0, 3.0][..], &[4.0, 5.0, 6.0][..]]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Field {
    samples: Vec<f64>,
}

impl Field {
    /// Creates a field from a flat sample vector.
    #[must_use]
    pub fn new(samples: Vec<f64>) -> Self {
        Field { samples }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the field holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrows the samples as a flat slice in stream (row-major) order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Borrows the samples mutably, for in-place transforms.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Iterates over the samples in stream order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    /// Consumes the field, returning the flat sample vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }

    /// A borrowed 2-D view: rows of `xres` samples each.
    ///
    /// A trailing partial row (possible only if the consumer resized the
    /// samples out of step with the metadata) is not yielded.
    pub fn rows(&self, xres: usize) -> ChunksExact<'_, f64> {
        self.samples.chunks_exact(xres)
    }
}

impl From<Vec<f64>> for Field {
    fn from(samples: Vec<f64>) -> Self {
        Field::new(samples)
    }
}

impl FromIterator<f64> for Field {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Field::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Field {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
