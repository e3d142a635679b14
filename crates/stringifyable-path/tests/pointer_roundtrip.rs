use stringifyable_path::{format_pointer, parse_pointer, path, Path, PathSegment};

#[test]
fn test_pointer_roundtrip_preserves_segment_kinds() {
    let cases: Vec<Path> = vec![
        path![],
        path!["a"],
        path!["a", 0, "b"],
        path!["with/slash", "with~tilde", 42],
        path![""],
    ];
    for p in cases {
        assert_eq!(parse_pointer(&format_pointer(&p)), p);
    }
}

#[test]
fn test_numeric_key_reads_back_as_index() {
    // A key that looks like a canonical index cannot survive pointer form.
    let p = path!["0"];
    assert_eq!(parse_pointer(&format_pointer(&p)), vec![PathSegment::index(0)]);
}

#[test]
fn test_path_json_form_is_unambiguous() {
    let p = path!["0", 0];
    let encoded = serde_json::to_string(&p).unwrap();
    assert_eq!(encoded, r#"["0",0]"#);
    let decoded: Path = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, p);
}
