use pretty_assertions::assert_eq;

use super::*;

fn err(kind: ParseErrorKind, offset: usize) -> Result<JsonExpr, ParseError> {
    Err(ParseError::new(kind, offset))
}

#[test]
fn parses_nested_documents() {
    let text = r#" { "a": [1, -2.5e3, true, null], "b": {"c": "d"}, "e": [] } "#;
    assert_eq!(
        parse_document(text),
        Ok(JsonExpr::Object(vec![
            (
                "a".into(),
                JsonExpr::Array(vec![
                    JsonExpr::number("1"),
                    JsonExpr::number("-2.5e3"),
                    JsonExpr::Bool(true),
                    JsonExpr::Null,
                ])
            ),
            ("b".into(), JsonExpr::Object(vec![("c".into(), JsonExpr::string("d"))])),
            ("e".into(), JsonExpr::Array(Vec::new())),
        ]))
    );
}

#[test]
fn scalars_parse_only_without_the_container_rule() {
    assert_eq!(parse("42"), Ok(JsonExpr::number("42")));
    assert_eq!(parse(" \"x\" "), Ok(JsonExpr::string("x")));
    assert_eq!(parse_document("  42"), err(ParseErrorKind::ExpectedContainer, 2));
}

#[test]
fn escapes_are_resolved() {
    assert_eq!(
        parse(r#""tab\tquote\"slash\/uni\u00e9pair\ud83d\ude00""#),
        Ok(JsonExpr::string("tab\tquote\"slash/uniépair😀"))
    );
}

#[test]
fn bad_escapes_point_at_the_backslash() {
    assert_eq!(parse(r#""ab\x""#), err(ParseErrorKind::InvalidEscape, 3));
    assert_eq!(parse(r#""\u12""#), err(ParseErrorKind::InvalidEscape, 1));
    assert_eq!(parse(r#"["\ud800"]"#), err(ParseErrorKind::InvalidEscape, 2));
    assert_eq!(parse(r#""\udc00""#), err(ParseErrorKind::InvalidEscape, 1));
}

#[test]
fn empty_and_trailing_input() {
    assert_eq!(parse(""), err(ParseErrorKind::EmptyInput, 0));
    assert_eq!(parse(" \n\t"), err(ParseErrorKind::EmptyInput, 0));
    assert_eq!(parse("[] []"), err(ParseErrorKind::TrailingInput, 3));
}

#[test]
fn malformed_members_are_named() {
    assert_eq!(parse("{1: 2}"), err(ParseErrorKind::ExpectedMember, 1));
    assert_eq!(parse(r#"{"a" 2}"#), err(ParseErrorKind::ExpectedColon, 5));
    assert_eq!(parse(r#"{"a": 1 "b": 2}"#), err(ParseErrorKind::ExpectedCommaOrEnd, 8));
    assert_eq!(parse(r#"{"a": 1,}"#), err(ParseErrorKind::ExpectedMember, 8));
    assert_eq!(parse("[1,]"), err(ParseErrorKind::ExpectedValue, 3));
    assert_eq!(parse("[1 2]"), err(ParseErrorKind::ExpectedCommaOrEnd, 3));
}

#[test]
fn duplicate_keys_point_at_the_repeat() {
    assert_eq!(parse(r#"{"a": 1, "a": 2}"#), err(ParseErrorKind::DuplicateKey, 9));
    assert_eq!(
        parse(r#"{"a": {"b": 1}, "b": {"b": 2}}"#).as_ref().map(ToString::to_string),
        Ok(r#"{"a":{"b":1},"b":{"b":2}}"#.to_owned())
    );
}

#[test]
fn premature_end_reports_input_length() {
    assert_eq!(parse("[1, "), err(ParseErrorKind::UnexpectedEnd, 4));
    assert_eq!(parse(r#"{"a":"#), err(ParseErrorKind::UnexpectedEnd, 5));
}

#[test]
fn invalid_tokens_fail_fast() {
    assert_eq!(parse("[01]"), err(ParseErrorKind::ExpectedCommaOrEnd, 2));
    assert_eq!(parse("[tru]"), err(ParseErrorKind::InvalidToken, 1));
    assert_eq!(parse("{'a': 1}"), err(ParseErrorKind::InvalidToken, 1));
}

#[test]
fn display_round_trips_through_the_parser() {
    let text = r#"{"k":["a\"b\n",1.50,{"z":null}],"e":{}}"#;
    let tree = parse_document(text);
    assert_eq!(tree.as_ref().map(ToString::to_string).as_deref(), Ok(text));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 3_000;
    let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(parse_document(&text).is_ok());
}
