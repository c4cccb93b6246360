// tests/integration_tests.rs
//
// End-to-end runs through parse -> compile -> apply, plus the highlighter.

use weft_lang::ast::TokenKind;
use weft_lang::value::Field;
use weft_lang::{apply, compile, compile_all, highlight, parse, to_json, to_json_pretty};

const CONFIG_PATTERNS: &str = r#"
# simple key=value settings
key    = '[a-z][a-z0-9]*'
value  = '[0-9]+'
pair   = key . "=" . value
"#;

fn text(value: &str) -> Field {
    Field::Text(value.to_string())
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_config_pairs_end_to_end() {
    let combined = compile_all(CONFIG_PATTERNS).unwrap();
    let result = apply(&combined, "retries=3 timeout=250").unwrap();

    assert_eq!(result["key"], vec![text("retries"), text("timeout")]);
    assert_eq!(result["value"], vec![text("3"), text("250")]);

    let pairs = &result["pair"];
    assert_eq!(pairs.len(), 2);
    let first = pairs[0].as_record().unwrap();
    assert_eq!(first["key"], text("retries"));
    assert_eq!(first["value"], text("3"));
    let second = pairs[1].as_record().unwrap();
    assert_eq!(second["key"], text("timeout"));
    assert_eq!(second["value"], text("250"));
}

#[test]
fn test_dates_with_optional_day() {
    let source = r"date = '\d{4}' :year . '\d{2}' :month . ? ('\d{2}' :day)";
    let scope = compile(source).unwrap();
    let result = apply(&scope["date"], "2024 11 05, then 1999 01").unwrap();

    let dates = &result["date"];
    assert_eq!(dates.len(), 2);

    let full = dates[0].as_record().unwrap();
    assert_eq!(full["year"], text("2024"));
    assert_eq!(full["month"], text("11"));
    assert_eq!(full["day"], text("05"));

    let partial = dates[1].as_record().unwrap();
    assert_eq!(partial["year"], text("1999"));
    assert_eq!(partial["month"], text("01"));
    assert!(partial["day"].is_missing());
}

#[test]
fn test_alternation_across_definitions() {
    let source = r#"
yes    = "yes" ; "yep"
no     = "no" ; "nope"
answer = yes ; no
"#;
    let scope = compile(source).unwrap();
    let result = apply(&scope["answer"], "yep").unwrap();
    let answer = result["answer"][0].as_record().unwrap();
    assert_eq!(answer["yes"], text("yep"));
    assert!(answer["no"].is_missing());
}

#[test]
fn test_parse_compile_apply_stages_compose() {
    let tree = parse(CONFIG_PATTERNS).unwrap();
    assert_eq!(
        tree.iter().filter(|a| !a.variables.is_empty()).count(),
        3
    );

    let scope = compile(CONFIG_PATTERNS).unwrap();
    assert_eq!(
        scope.keys().collect::<Vec<_>>(),
        vec!["key", "value", "pair"]
    );

    let result = apply(&scope["pair"], "depth=7").unwrap();
    assert_eq!(result["pair"].len(), 1);
}

// ============================================================================
// JSON output
// ============================================================================

#[test]
fn test_json_output_shapes() {
    let scope = compile(r"word = '\w+'").unwrap();
    let result = apply(&scope["word"], "hi there").unwrap();
    assert_eq!(to_json(&result), r#"{"word":["hi","there"]}"#);
    assert!(to_json_pretty(&result).contains("\"word\""));
}

#[test]
fn test_json_output_nests_records() {
    let scope = compile(r"v = '\d+' :major").unwrap();
    let result = apply(&scope["v"], "42").unwrap();
    assert_eq!(to_json(&result), r#"{"v":[{"major":"42"}]}"#);
}

// ============================================================================
// Error propagation through the pipeline
// ============================================================================

#[test]
fn test_parse_error_stops_compilation() {
    let err = compile("ok = 'x'\nbroken = (").unwrap_err();
    assert!(err.to_string().contains("Missing closing parenthesis"));
}

#[test]
fn test_compile_error_reports_the_offending_name() {
    let err = compile_all("a = 'x'\nb = ghost").unwrap_err();
    assert_eq!(err.to_string(), "Variable 'ghost' is not defined");
}

// ============================================================================
// Highlighting
// ============================================================================

#[test]
fn test_highlight_covers_the_source() {
    let tokens = highlight("pair = key . \"=\" . value # note");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Variable,
            TokenKind::Equals,
            TokenKind::Variable,
            TokenKind::Dot,
            TokenKind::String,
            TokenKind::Dot,
            TokenKind::Variable,
            TokenKind::Comment,
        ]
    );
}

#[test]
fn test_highlight_marks_invisible_variables() {
    let tokens = highlight("!sep = '-'");
    assert_eq!(tokens[0].kind, TokenKind::Variable);
    assert_eq!(tokens[0].visible, Some(false));
}

#[test]
fn test_highlight_never_fails() {
    for source in ["broken = \"unterminated", "a = (((", "%%% ???", ": = ;"] {
        let _ = highlight(source);
    }
}
