// tests/extract_tests.rs

use indexmap::IndexMap;
use weft_lang::compiler::{compile, compile_all};
use weft_lang::extract::{ExtractError, apply};
use weft_lang::value::Field;

fn text(value: &str) -> Field {
    Field::Text(value.to_string())
}

fn record(fields: Vec<(&str, Field)>) -> Field {
    let mut map = IndexMap::new();
    for (name, field) in fields {
        map.insert(name.to_string(), field);
    }
    Field::Record(map)
}

// ============================================================================
// Flat fields
// ============================================================================

#[test]
fn test_flat_field_collects_all_matches() {
    let scope = compile(r"word = '\w+'").unwrap();
    let result = apply(&scope["word"], "hi there").unwrap();
    assert_eq!(result["word"], vec![text("hi"), text("there")]);
}

#[test]
fn test_unmatched_field_yields_empty_sequence() {
    let scope = compile("word = '[a-z]+'").unwrap();
    let result = apply(&scope["word"], "12345").unwrap();
    assert_eq!(result["word"], Vec::<Field>::new());
}

#[test]
fn test_top_level_matches_are_trimmed() {
    let scope = compile(r"padded = ' ?\w+ ?'").unwrap();
    let result = apply(&scope["padded"], " hi ").unwrap();
    assert_eq!(result["padded"], vec![text("hi")]);
}

// ============================================================================
// Nested fields
// ============================================================================

#[test]
fn test_labelled_fields_build_records() {
    let source = r"date = '\d{4}' :year . '\d{2}' :month . '\d{2}' :day";
    let scope = compile(source).unwrap();
    let result = apply(&scope["date"], "2024 11 05 and 1999 01 31").unwrap();
    assert_eq!(
        result["date"],
        vec![
            record(vec![
                ("year", text("2024")),
                ("month", text("11")),
                ("day", text("05")),
            ]),
            record(vec![
                ("year", text("1999")),
                ("month", text("01")),
                ("day", text("31")),
            ]),
        ]
    );
}

#[test]
fn test_repeated_logical_name_collects_a_list() {
    // Two groups share the stripped name `num`, so one parent match
    // yields both captures
    let source = r"pair = '\d+' :num . '\d+' :num";
    let scope = compile(source).unwrap();
    let result = apply(&scope["pair"], "3 7").unwrap();
    assert_eq!(
        result["pair"],
        vec![record(vec![("num", Field::List(vec![text("3"), text("7")]))])]
    );
}

#[test]
fn test_optional_child_is_missing_when_absent() {
    let source = r"entry = '[a-z]+' :word . ? ('\d+' :num)";
    let scope = compile(source).unwrap();
    let result = apply(&scope["entry"], "abc").unwrap();
    assert_eq!(
        result["entry"],
        vec![record(vec![("word", text("abc")), ("num", Field::Missing)])]
    );
}

#[test]
fn test_nested_references_keep_their_field_names() {
    let source = "inner = '[0-9]+'\nouter = \"v\" . inner";
    let scope = compile(source).unwrap();
    let result = apply(&scope["outer"], "v 42").unwrap();
    assert_eq!(
        result["outer"],
        vec![record(vec![("inner", text("42"))])]
    );
}

// ============================================================================
// Combined patterns
// ============================================================================

#[test]
fn test_combined_pattern_exposes_every_visible_name() {
    let source = "key = '[a-z]+'\nvalue = '[0-9]+'";
    let combined = compile_all(source).unwrap();
    let result = apply(&combined, "x=5 y=17").unwrap();
    assert_eq!(result["key"], vec![text("x"), text("y")]);
    assert_eq!(result["value"], vec![text("5"), text("17")]);
}

#[test]
fn test_invisible_definitions_contribute_no_field() {
    let source = "!sep = \"-\"\nword = '[a-z]+'";
    let combined = compile_all(source).unwrap();
    let result = apply(&combined, "a-b").unwrap();
    assert!(result.contains_key("word"));
    assert!(!result.contains_key("sep"));
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn test_malformed_expression_propagates_ast_error() {
    let err = apply("(?<broken_0>", "anything").unwrap_err();
    assert!(matches!(err, ExtractError::Pattern(_)));
}

#[test]
fn test_apply_accepts_foreign_named_groups() {
    // Any compatible expression works, not only compiler output
    let result = apply("(?<item_0>[a-z]+)", "one two").unwrap();
    assert_eq!(result["item"], vec![text("one"), text("two")]);
}
