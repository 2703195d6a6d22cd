use super::*;

fn scalar(value: &str, tag: ScalarTag) -> ScalarNode {
    ScalarNode {
        value: value.to_string(),
        tag,
    }
}

#[test]
fn plain_tags() {
    assert_eq!(resolve_plain_tag("~"), ScalarTag::Null);
    assert_eq!(resolve_plain_tag("NULL"), ScalarTag::Null);
    assert_eq!(resolve_plain_tag("True"), ScalarTag::Bool);
    assert_eq!(resolve_plain_tag("24"), ScalarTag::Int);
    assert_eq!(resolve_plain_tag("0x1F"), ScalarTag::Int);
    assert_eq!(resolve_plain_tag("3.14159"), ScalarTag::Float);
    assert_eq!(resolve_plain_tag(".inf"), ScalarTag::Float);
    assert_eq!(resolve_plain_tag("inf"), ScalarTag::Str);
    assert_eq!(resolve_plain_tag("nan"), ScalarTag::Str);
    assert_eq!(resolve_plain_tag("Frank"), ScalarTag::Str);
    assert_eq!(resolve_plain_tag("yes"), ScalarTag::Str);
}

#[test]
fn explicit_tags() {
    assert_eq!(resolve_explicit_tag("!!int"), ScalarTag::Int);
    assert_eq!(resolve_explicit_tag("tag:yaml.org,2002:float"), ScalarTag::Float);
    assert_eq!(resolve_explicit_tag("!!timestamp"), ScalarTag::Timestamp);
    assert_eq!(resolve_explicit_tag("!!binary"), ScalarTag::Other("!!binary".to_string()));
    assert_eq!(resolve_explicit_tag("!custom"), ScalarTag::Other("!custom".to_string()));
}

#[test]
fn decode_by_tag() {
    assert_eq!(decode_scalar(&scalar("0x1F", ScalarTag::Int)), Ok(DecodedValue::Integer(31)));
    assert_eq!(decode_scalar(&scalar("3", ScalarTag::Float)), Ok(DecodedValue::Real(3.0)));
    assert_eq!(decode_scalar(&scalar("FALSE", ScalarTag::Bool)), Ok(DecodedValue::Boolean(false)));
    assert_eq!(decode_scalar(&scalar("~", ScalarTag::Null)), Ok(DecodedValue::Null));
    assert_eq!(
        decode_scalar(&scalar("2001-12-14", ScalarTag::Timestamp)),
        Ok(DecodedValue::String("2001-12-14".to_string()))
    );
    assert_eq!(
        decode_scalar(&scalar("12", ScalarTag::Str)),
        Ok(DecodedValue::String("12".to_string()))
    );
}

#[test]
fn decode_mismatch() {
    assert_eq!(
        decode_scalar(&scalar("foo", ScalarTag::Int)),
        Err(DecodeError::Mismatch {
            tag: ScalarTag::Int,
            value: "foo".to_string(),
        })
    );
    assert!(decode_scalar(&scalar("yes", ScalarTag::Bool)).is_err());
    assert!(decode_scalar(&scalar("nan", ScalarTag::Float)).is_err());
    assert_eq!(
        decode_scalar(&scalar("aGk=", ScalarTag::Other("!!binary".to_string()))),
        Err(DecodeError::UnsupportedTag {
            tag: "!!binary".to_string()
        })
    );
}

#[test]
fn float_formatting() {
    assert_eq!(format_float(3.14159), "3.14159");
    assert_eq!(format_float(3.0), "3");
    assert_eq!(format_float(0.0), "0");
    assert_eq!(format_float(1e21), "1e+21");
    assert_eq!(format_float(1.5e300), "1.5e+300");
    assert_eq!(format_float(1e-7), "1e-7");
    assert_eq!(format_float(100000.5), "100000.5");
}

#[test]
fn json_rendering() {
    let mut entries = BTreeMap::new();
    entries.insert("sleepy".to_string(), DecodedValue::List(vec![DecodedValue::String("oscar".to_string())]));
    entries.insert("friendly".to_string(), DecodedValue::Real(2.0));
    entries.insert("html".to_string(), DecodedValue::String("<b>&</b>".to_string()));
    entries.insert("none".to_string(), DecodedValue::Null);
    let value = DecodedValue::Object(entries);

    assert_eq!(
        value.to_json().unwrap(),
        r#"{"friendly":2,"html":"<b>&</b>","none":null,"sleepy":["oscar"]}"#
    );
    assert_eq!(DecodedValue::empty_list().to_json().unwrap(), "[]");
    assert_eq!(DecodedValue::empty_object().to_json().unwrap(), "{}");
    assert_eq!(DecodedValue::String("say \"hi\"".to_string()).to_json().unwrap(), r#""say \"hi\"""#);
    assert!(DecodedValue::List(vec![DecodedValue::Real(f64::NAN)]).to_json().is_err());
}
