use super::*;

fn member(name: &str) -> PathSegment {
    PathSegment::Member(name.to_string())
}

#[test]
fn test_single_identifier() {
    assert_eq!(parse_path("color"), Some(vec![member("color")]));
    assert_eq!(parse_path("_pad0"), Some(vec![member("_pad0")]));
}

#[test]
fn test_dotted_members() {
    assert_eq!(
        parse_path("camera.view.origin"),
        Some(vec![member("camera"), member("view"), member("origin")])
    );
}

#[test]
fn test_subscripts() {
    assert_eq!(
        parse_path("lights[2].color"),
        Some(vec![
            member("lights"),
            PathSegment::Index(2),
            member("color"),
        ])
    );
    assert_eq!(
        parse_path("m[1][0]"),
        Some(vec![
            member("m"),
            PathSegment::Index(1),
            PathSegment::Index(0),
        ])
    );
}

#[test]
fn test_malformed_paths_rejected() {
    for bad in [
        "", ".", "a.", ".a", "a..b", "2abc", "a[", "a[]", "a[1", "a[x]", "a[-1]", "a[1]b",
        "a b", "[0]",
    ] {
        assert_eq!(parse_path(bad), None, "expected `{bad}` to be rejected");
    }
}

#[test]
fn test_huge_subscript_rejected() {
    // Does not fit in u32
    assert_eq!(parse_path("a[4294967296]"), None);
}
