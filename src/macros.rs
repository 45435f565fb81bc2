//! Convenience macro for building documents.

/// Constructs a [`Dump`](crate::Dump) from `key => value` pairs.
///
/// Keys are anything with `ToString`; values are anything with
/// `Into<Value>`, so string slices, integers, floats and `Vec<f64>` data
/// fields all work directly.
///
/// # Examples
///
/// ```rust
/// use fielddump::dump;
///
/// let doc = dump! {
///     "/0/data/xres" => 2,
///     "/0/data/yres" => 2,
///     "/0/data/unit-z" => "m",
///     "/0/data" => vec![0.0, 1.0, 2.0, 3.0],
/// };
///
/// assert_eq!(doc.len(), 4);
/// assert_eq!(doc.dimensions("/0/data"), Some((2, 2)));
/// ```
#[macro_export]
macro_rules! dump {
    () => {
        $crate::Dump::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut doc = $crate::Dump::new();
        $(
            doc.insert(::std::string::ToString::to_string(&$key), $crate::Value::from($value));
        )+
        doc
    }};
}
