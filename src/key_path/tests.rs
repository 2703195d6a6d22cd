use super::*;

fn field(name: &str) -> KeySegment {
    KeySegment::Field(name.to_string())
}

#[test]
fn prefixes() {
    assert_eq!(format_next_object_key_prefix("", "animals"), "animals");
    assert_eq!(format_next_object_key_prefix("animals", "byTrait"), "animals.byTrait");
    assert_eq!(format_next_object_key_prefix("websites", "stupidchess.jmn23.com"), r#"websites."stupidchess.jmn23.com""#);
    assert_eq!(format_next_object_key_prefix("fullNames", "John Norwood"), r#"fullNames."John Norwood""#);
    assert_eq!(format_next_object_key_prefix("", "a b"), r#""a b""#);
    assert_eq!(format_next_list_key_prefix("cats", 0), "cats[0]");
    assert_eq!(format_next_list_key_prefix("animals[1].elements", 12), "animals[1].elements[12]");
}

#[test]
fn parse_nested_path() {
    let path = parse_key_path(r#"a.b[2]."c.d""#).unwrap();
    assert_eq!(
        path.segments,
        vec![field("a"), field("b"), KeySegment::Index(2), field("c.d")]
    );
    assert_eq!(path.to_string(), r#"a.b[2]."c.d""#);
}

#[test]
fn parse_round_trip() {
    let keys = [
        "foxtrot",
        "animals[0].elements[1]",
        r#"fullNames."John Norwood""#,
        r#"websites."stupidchess.jmn23.com".status"#,
        "matrix[0][1]",
        "some-key.with_symbols@",
    ];
    for key in keys {
        let path = parse_key_path(key).unwrap();
        assert_eq!(path.to_string(), key);
    }
}

#[test]
fn parse_invalid_paths() {
    assert!(parse_key_path("").is_err());
    assert!(parse_key_path("a..b").is_err());
    assert!(parse_key_path("a[x]").is_err());
    assert!(parse_key_path("a b").is_err());
    assert!(parse_key_path("a.").is_err());
    assert!(parse_key_path(r#"a."unterminated"#).is_err());
}
