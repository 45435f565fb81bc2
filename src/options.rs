//! Configuration options for dump serialization.
//!
//! This module provides types to customize the write-side output:
//!
//! - [`DumpOptions`]: main configuration struct
//! - [`EntryOrdering`]: how descriptive entries are ordered in the output
//!
//! The file format itself has no variability; the only knob is the order in
//! which entries are emitted. Two orderings exist in the wild, so both are
//! supported, with sorted-by-key as the default for reproducible output.
//!
//! ## Examples
//!
//! ```rust
//! use fielddump::{dump, to_vec_with_options, DumpOptions, EntryOrdering};
//!
//! let doc = dump! {
//!     "/meta/b" => "2",
//!     "/meta/a" => "1",
//! };
//!
//! let sorted = to_vec_with_options(&doc, DumpOptions::new()).unwrap();
//! assert_eq!(sorted, b"/meta/a=1\n/meta/b=2\n");
//!
//! let options = DumpOptions::new().with_ordering(EntryOrdering::Insertion);
//! let as_read = to_vec_with_options(&doc, options).unwrap();
//! assert_eq!(as_read, b"/meta/b=2\n/meta/a=1\n");
//! ```

/// Ordering of entries within each section of the serialized output.
///
/// Descriptive entries always precede data entries; this policy decides the
/// order inside each of the two groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EntryOrdering {
    /// Sort entries by key before emission. Deterministic: two documents
    /// with the same contents serialize byte-identically regardless of
    /// insertion order. This is the default.
    #[default]
    Sorted,
    /// Emit entries in map (insertion) order.
    Insertion,
}

/// Configuration options for dump serialization.
///
/// # Examples
///
/// ```rust
/// use fielddump::{DumpOptions, EntryOrdering};
///
/// let options = DumpOptions::new();
/// assert_eq!(options.ordering, EntryOrdering::Sorted);
///
/// let options = DumpOptions::new().with_ordering(EntryOrdering::Insertion);
/// assert_eq!(options.ordering, EntryOrdering::Insertion);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DumpOptions {
    pub ordering: EntryOrdering,
}

impl DumpOptions {
    /// Creates default options (sorted-by-key ordering).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry ordering policy.
    #[must_use]
    pub fn with_ordering(mut self, ordering: EntryOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}
