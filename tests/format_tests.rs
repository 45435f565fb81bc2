//! Wire-format contract tests: exact byte layouts, grammar edge cases and
//! the format's documented ambiguities.

use fielddump::{dump, from_slice, to_vec, to_vec_with_options, DumpOptions, EntryOrdering, Error, Value};

fn field_block(base: &str, xres: i64, yres: i64, samples: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(format!("{base}/xres={xres}\n").as_bytes());
    bytes.extend_from_slice(format!("{base}/yres={yres}\n").as_bytes());
    bytes.extend_from_slice(format!("{base}=[\n[").as_bytes());
    for x in samples {
        bytes.extend_from_slice(&x.to_ne_bytes());
    }
    bytes.extend_from_slice(b"]]\n");
    bytes
}

#[test]
fn writer_emits_the_exact_block_layout() {
    let doc = dump! {
        "/0/data/xres" => 2,
        "/0/data/yres" => 1,
        "/0/data" => vec![0.5, -0.5],
    };
    let bytes = to_vec(&doc).unwrap();
    assert_eq!(bytes, field_block("/0/data", 2, 1, &[0.5, -0.5]));
}

#[test]
fn descriptive_section_precedes_every_field_block() {
    // The field key sorts before its own metadata keys, but shape-based
    // partitioning still puts the binary block last.
    let doc = dump! {
        "/0/data" => vec![1.0],
        "/0/data/xres" => 1,
        "/0/data/yres" => 1,
        "/zzz" => "tail",
    };
    let bytes = to_vec(&doc).unwrap();
    let text_end = bytes.windows(3).position(|w| w == b"=[\n").unwrap();
    let text = std::str::from_utf8(&bytes[..text_end]).unwrap();
    assert!(text.contains("/zzz=tail"));
}

#[test]
fn sorted_output_is_insertion_order_independent() {
    let forward = dump! {
        "/meta/a" => "1",
        "/meta/b" => "2",
        "/meta/c" => "3",
    };
    let backward = dump! {
        "/meta/c" => "3",
        "/meta/b" => "2",
        "/meta/a" => "1",
    };
    assert_eq!(to_vec(&forward).unwrap(), to_vec(&backward).unwrap());
}

#[test]
fn insertion_ordering_is_available_as_the_second_policy() {
    let doc = dump! {
        "/meta/b" => "2",
        "/meta/a" => "1",
    };
    let options = DumpOptions::new().with_ordering(EntryOrdering::Insertion);
    assert_eq!(
        to_vec_with_options(&doc, options).unwrap(),
        b"/meta/b=2\n/meta/a=1\n"
    );
}

#[test]
fn ambiguous_bracket_value_reads_back_as_scalar() {
    // `foo=[` followed by anything but `[` is a degenerate scalar whose
    // value is the single character `[`.
    let doc = from_slice(b"foo=[\nnext=value\n").unwrap();
    assert_eq!(doc.get("foo"), Some(&Value::from("[")));
    assert_eq!(doc.get("next"), Some(&Value::from("value")));
}

#[test]
fn bracket_value_followed_by_bracket_key_is_a_field_header() {
    // The same two lines with the next line starting in `[` commit the
    // reader to a binary block, which then fails for want of dimensions.
    // The ambiguity is real and resolved by exactly one byte of lookahead.
    let err = from_slice(b"foo=[\n[more\n").unwrap_err();
    assert!(matches!(err, Error::MissingDimension { .. }));
}

#[test]
fn terminator_must_be_exactly_two_brackets() {
    for bad in [&b"]\n"[..], &b"]] \n"[..], &b"]]]\n"[..], &b"x]]\n"[..]] {
        let mut bytes = Vec::from(&b"/0/data/xres=1\n/0/data/yres=1\n/0/data=[\n["[..]);
        bytes.extend_from_slice(&7.0_f64.to_ne_bytes());
        bytes.extend_from_slice(bad);
        let err = from_slice(&bytes).unwrap_err();
        assert!(
            matches!(err, Error::MissingTerminator { .. }),
            "terminator {:?} should be rejected",
            bad
        );
    }
}

#[test]
fn missing_terminator_does_not_yield_a_partial_document() {
    let mut bytes = Vec::from(&b"/meta/kept=yes\n/0/data/xres=1\n/0/data/yres=1\n/0/data=[\n["[..]);
    bytes.extend_from_slice(&7.0_f64.to_ne_bytes());
    bytes.extend_from_slice(b"__\n");
    assert!(from_slice(&bytes).is_err());
}

#[test]
fn line_without_equals_is_rejected() {
    let err = from_slice(b"/meta/good=1\ngarbage line\n").unwrap_err();
    assert!(matches!(err, Error::UnparseableLine { line: 2, .. }));
}

#[test]
fn key_may_be_empty_and_value_may_contain_equals() {
    let doc = from_slice(b"=anonymous\n/meta/eq=a=b\n").unwrap();
    assert_eq!(doc.get(""), Some(&Value::from("anonymous")));
    assert_eq!(doc.get("/meta/eq"), Some(&Value::from("a=b")));
}

#[test]
fn coercion_applies_only_to_metadata_seen_before_the_block() {
    let mut bytes = field_block("/0/data", 1, 1, &[3.0]);
    bytes.extend_from_slice(b"/0/data/xreal=5e-6\n/1/data/xres=16\n");
    let doc = from_slice(&bytes).unwrap();

    // Declared before their block: coerced.
    assert_eq!(doc.get("/0/data/xres"), Some(&Value::Integer(1)));
    // Declared after the block, or for a channel with no block: still text.
    assert_eq!(doc.get("/0/data/xreal"), Some(&Value::from("5e-6")));
    assert_eq!(doc.get("/1/data/xres"), Some(&Value::from("16")));
}

#[test]
fn unit_keys_are_never_coerced() {
    let mut bytes = Vec::from(&b"/0/data/unit-xy=m\n/0/data/unit-z=1e-9\n"[..]);
    bytes.extend_from_slice(&field_block("/0/data", 1, 1, &[0.0]));
    let doc = from_slice(&bytes).unwrap();
    assert_eq!(doc.get("/0/data/unit-z"), Some(&Value::from("1e-9")));
}

#[test]
fn later_block_overwrites_earlier_base_key_silently() {
    let mut bytes = Vec::from(&b"/0/data=stale text\n"[..]);
    bytes.extend_from_slice(&field_block("/0/data", 1, 1, &[6.25]));
    let doc = from_slice(&bytes).unwrap();
    assert_eq!(doc.field("/0/data").unwrap().as_slice(), &[6.25]);
}

#[test]
fn payload_length_comes_from_the_declared_dimensions() {
    // Extra bytes after the block are parsed as further lines, they are not
    // part of the payload.
    let mut bytes = field_block("/0/data", 2, 2, &[1.0, 2.0, 3.0, 4.0]);
    bytes.extend_from_slice(b"/meta/after=ok\n");
    let doc = from_slice(&bytes).unwrap();
    assert_eq!(doc.field("/0/data").unwrap().len(), 4);
    assert_eq!(doc.get("/meta/after"), Some(&Value::from("ok")));
}

#[test]
fn special_float_values_survive_the_binary_block() {
    let samples = [f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE, -0.0];
    let bytes = field_block("/0/data", 4, 1, &samples);
    let doc = from_slice(&bytes).unwrap();
    let back = doc.field("/0/data").unwrap().as_slice();
    for (a, b) in samples.iter().zip(back) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
