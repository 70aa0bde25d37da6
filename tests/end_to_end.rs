//! Scenario tests exercising the public `transpile` + `run` pipeline.

#[test]
fn hello_style_print_char_sequence() {
    let code = tinybf::transpile(
        "let char h = 'H'\nlet char i = 'i'\nprint_char h\nprint_char i",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "Hi");
}

#[test]
fn arithmetic_add_sub_mul_div_between_variables() {
    let code = tinybf::transpile(
        "let num a = 6\nlet num b = 3\nadd a b\nprint_dec a\nsub a b\nprint_dec a\nmul a b\nprint_dec a\ndiv a b\nprint_dec a",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    // a=6+3=9, a=9-3=6, a=6*3=18, a=18/3=6
    assert_eq!(output, "9" .to_string() + "6" + "18" + "6");
}

#[test]
fn add_onto_a_char_target_from_a_num_operand_has_no_type_restriction() {
    let code = tinybf::transpile("let char a = '('\nlet num b = 25\nadd a b\nprint_char a").unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "A");
}

#[test]
fn mul_on_a_char_target_with_a_literal_operand_is_allowed() {
    let code = tinybf::transpile("let char value = '!'\nmul value 2\nprint_char value").unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "B");
}

#[test]
fn add_accepts_a_char_literal_operand_on_a_num_target() {
    let code = tinybf::transpile(
        "let num value = 10\ndiv value 3\nlet char digit = '0'\nset digit = value\nadd digit '0'\nprint_char digit",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "3");
}

#[test]
fn for_loop_accumulates_and_prints_each_iteration() {
    let code = tinybf::transpile(
        "let num total = 0\nfor i from 1 to 4 {\nadd total i\n}\nprint_dec total",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "6"); // 1+2+3
}

#[test]
fn for_loop_with_end_before_start_wraps_mod_256() {
    // (end - start) mod 256 governs the iteration count, not a semantic error:
    // (2 - 250) mod 256 == 8.
    let code = tinybf::transpile(
        "let num count = 0\nfor i from 250 to 2 {\nadd count 1\n}\nprint_dec count",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "8");
}

#[test]
fn if_else_selects_the_right_branch_and_preserves_condition() {
    let code = tinybf::transpile(
        "let char marker = 'Q'\nlet num flag = 0\nif flag {\nprint_char marker\n} else {\nlet num y = 9\nprint_dec y\n}\nprint_dec flag",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "90");
}

#[test]
fn input_char_and_input_num_roundtrip_through_print() {
    let code = tinybf::transpile("let char c = 'x'\ninput_char c\nprint_char c").unwrap();
    let output = tinybf::run(&code, "Z", None).unwrap();
    assert_eq!(output, "Z");
}

#[test]
fn print_dec_suppresses_leading_zeros_but_keeps_trailing_ones() {
    let code = tinybf::transpile("let num n = 7\nprint_dec n").unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "7");
}

#[test]
fn print_dec_prints_a_full_three_digit_number() {
    let code = tinybf::transpile("let num n = 205\nprint_dec n").unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "205");
}

#[test]
fn division_by_zero_literal_compiles_clean_and_yields_zero_at_runtime() {
    let code = tinybf::transpile("let num v = 42\ndiv v 0\nprint_dec v").unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "0");
}

#[test]
fn division_nested_inside_an_if_body_does_not_corrupt_the_enclosing_condition() {
    // div/mul/print_dec all reach for the shared scratch cells internally;
    // nesting one inside an if's body must not clobber the if's own
    // condition-tracking cell mid-loop.
    let code = tinybf::transpile(
        "let num flag = 1\nlet num a = 20\nlet num b = 4\nif flag {\ndiv a b\n}\nprint_dec a",
    )
    .unwrap();
    let output = tinybf::run(&code, "", None).unwrap();
    assert_eq!(output, "5");
}
