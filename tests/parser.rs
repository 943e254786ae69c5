//! Parser behavior on whole inputs
//!
//! Covers the documented grammar properties through the public `parse` entry points:
//! dict/set disambiguation, placeholder balancing, literal cleaning, separator
//! leniency, and the failure modes.

use litlog::litlog::parsing::{parse_value, CollectionMode};
use litlog::litlog::testing::factories::{dict, list, object, record, s};
use litlog::{parse, ParseError, Value};
use rstest::rstest;

#[rstest]
#[case("{1: 2, 3: 4}", dict(vec![(Value::Int(1), Value::Int(2)), (Value::Int(3), Value::Int(4))]))]
#[case("{1, 2, 3}", Value::Set(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))]
#[case("{}", Value::Dict(vec![]))]
#[case("{'a'}", Value::Set(vec![s("a")]))]
#[case("{(1, 2): {'k': [None]}}", dict(vec![(
    Value::Tuple(vec![Value::Int(1), Value::Int(2)]),
    record(&[("k", list(vec![Value::Null]))]),
)]))]
fn test_dict_or_set(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(parse_value(source), Ok(expected));
}

#[rstest]
#[case("{1: 2, 3}", CollectionMode::Dict)]
#[case("{1: 2, 3, 4}", CollectionMode::Dict)]
#[case("{1, 2: 3}", CollectionMode::Set)]
fn test_mixed_separators_fail(#[case] source: &str, #[case] mode: CollectionMode) {
    match parse_value(source) {
        Err(ParseError::InconsistentCollectionSeparator { mode: found, .. }) => {
            assert_eq!(found, mode)
        }
        other => panic!("expected inconsistent separator error, got {other:?}"),
    }
}

#[test]
fn test_inconsistent_separator_message() {
    let error = parse_value("{1: 2, 3}").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Inconsistent collection separator. Expected `:` in dict scope, got `}`(RBRACE) at 1:8-1:9"
    );
}

#[rstest]
#[case("<Foo a=<Bar/> b=1>")]
#[case("<Obj x=1>")]
#[case("<function main.<locals>.handler at 0x7f2b1c>")]
#[case("<Response [200]>")]
fn test_placeholders_are_verbatim(#[case] source: &str) {
    assert_eq!(parse_value(source), Ok(object(source)));
}

#[rstest]
#[case("<Foo a=")]
#[case("<Foo <Bar>")]
#[case("[<Obj")]
fn test_unterminated_placeholder(#[case] source: &str) {
    assert!(matches!(
        parse_value(source),
        Err(ParseError::UnexpectedEndOfInput { .. })
    ));
}

#[rstest]
#[case("'hello'", s("hello"))]
#[case("\"double\"", s("double"))]
#[case("'it\\'s'", s("it\\'s"))]
#[case("42", Value::Int(42))]
#[case("-7", Value::Int(-7))]
#[case("3.5", Value::Float(3.5))]
#[case("1e3", Value::Float(1000.0))]
#[case("0x1F", Value::Int(31))]
#[case("None", Value::Null)]
#[case("True", Value::Bool(true))]
#[case("False", Value::Bool(false))]
fn test_literals(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(parse_value(source), Ok(expected));
}

#[test]
fn test_imaginary_numbers_are_rejected() {
    assert!(matches!(
        parse_value("2j"),
        Err(ParseError::InvalidNumber { .. })
    ));
}

#[rstest]
#[case("[1,,2,]", list(vec![Value::Int(1), Value::Int(2)]))]
#[case("[,]", list(vec![]))]
#[case("[1 2]", list(vec![Value::Int(1), Value::Int(2)]))]
#[case("[(1,), ()]", list(vec![Value::Tuple(vec![Value::Int(1)]), Value::Tuple(vec![])]))]
fn test_list_leniency(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(parse(source), Ok(expected));
}

#[test]
fn test_end_to_end_entries() {
    let source = "[{'name': 'a', 'id': 1}, {'name': 'b', 'id': <Obj x=1>}]";
    assert_eq!(
        parse(source),
        Ok(list(vec![
            record(&[("name", s("a")), ("id", Value::Int(1))]),
            record(&[("name", s("b")), ("id", object("<Obj x=1>"))]),
        ]))
    );
}

#[test]
fn test_multiline_log_with_comments() {
    let source = "\
[
    # first run
    {'type': 'task',
     'payload': {'name': 'build', 'started': datetime.datetime(2024, 5, 1, 12, 0)}},
    {'type': 'task_result', 'status': Status.OK, 'tags': {'ci', 'nightly'}},
]
";
    let document = parse(source).unwrap();
    let entries = document.as_sequence().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].get_path(&["payload", "started"]),
        Some(&s("datetime.datetime(2024, 5, 1, 12, 0)"))
    );
    assert_eq!(entries[1].get("status"), Some(&s("Status.OK")));
    assert_eq!(
        entries[1].get("tags"),
        Some(&Value::Set(vec![s("ci"), s("nightly")]))
    );
}

#[rstest]
#[case("[1, 2")]
#[case("[{'a': 1}")]
#[case("[{'a': ")]
#[case("[Foo(1, 2]")]
fn test_missing_closing_bracket(#[case] source: &str) {
    assert!(matches!(
        parse(source),
        Err(ParseError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn test_error_reports_position() {
    let error = parse("[\n  1,\n  ]]").unwrap_err();
    assert!(matches!(error, ParseError::TrailingInput { .. }));
    let position = error.position();
    assert_eq!((position.line, position.column), (3, 3));
}

#[test]
fn test_top_level_must_be_a_list() {
    let error = parse("'entry'").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid token. Expected `[`(LSQB), got `'entry'`(STRING) at 1:0-1:7"
    );
}
