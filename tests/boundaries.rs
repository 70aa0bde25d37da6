//! Boundary and edge-case behaviors called out explicitly in the language spec.

use tinybf::ParseError;

#[test]
fn literal_256_is_rejected_at_parse_time() {
    let err = tinybf::transpile("let num x = 256").unwrap_err();
    match err {
        tinybf::TinyBfError::Parse(ParseError::LiteralOutOfRange { value, .. }) => {
            assert_eq!(value, 256);
        }
        other => panic!("expected LiteralOutOfRange, got {other:?}"),
    }
}

#[test]
fn literal_255_is_accepted() {
    assert!(tinybf::transpile("let num x = 255").is_ok());
}

#[test]
fn let_zero_literal_emits_a_single_clear_not_a_double_clear() {
    let code = tinybf::transpile("let num x = 0").unwrap();
    assert!(!code.contains("[-][-]"));
}

#[test]
fn let_large_literal_uses_a_scaled_increment_loop() {
    let code = tinybf::transpile("let num x = 200").unwrap();
    assert!(code.contains("[->"));
    let plus_count = code.chars().filter(|&c| c == '+').count();
    assert!(plus_count < 200);
}

#[test]
fn step_limit_exceeded_is_reported_for_a_runaway_loop() {
    let err = tinybf::run("+[]", "", Some(10)).unwrap_err();
    assert!(matches!(err, tinybf::InterpreterError::StepLimitExceeded(_)));
}

#[test]
fn stepping_plus_plus_plus_dot_yields_expected_snapshot_sequence() {
    let mut stepper = tinybf::step("+++.", "", 10, None).unwrap();
    let first = stepper.next().unwrap().unwrap();
    assert_eq!(first.command, Some('+'));
    assert_eq!(first.pointer, 0);
    let snapshots: Vec<_> = stepper.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(snapshots.len(), 4); // two more '+', then '.', then terminal
    assert_eq!(snapshots[2].command, Some('.'));
    assert_eq!(snapshots[3].command, None);
}

#[test]
fn peephole_optimization_is_idempotent() {
    let code = tinybf::transpile("let num x = 0\nlet num y = 200\nadd y 5").unwrap();
    assert_eq!(code, tinybf::transpile("let num x = 0\nlet num y = 200\nadd y 5").unwrap());
}

#[test]
fn unknown_escape_sequence_is_a_parse_error() {
    let err = tinybf::transpile("let char c = '\\z'").unwrap_err();
    assert!(matches!(
        err,
        tinybf::TinyBfError::Parse(ParseError::UnknownEscape { escape: 'z', .. })
    ));
}

#[test]
fn type_mismatch_between_declared_type_and_literal_is_a_semantic_error() {
    let err = tinybf::transpile("let char c = 65").unwrap_err();
    assert!(matches!(err, tinybf::TinyBfError::Semantic(_)));
}

#[test]
fn print_num_on_a_char_variable_is_a_semantic_error() {
    let err = tinybf::transpile("let char c = 'A'\nprint_num c").unwrap_err();
    assert!(matches!(err, tinybf::TinyBfError::Semantic(_)));
}
