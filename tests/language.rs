use std::fs;

use abapi::{DEMO_PROGRAM, Execution, config::Config, execute, execute_with};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn program_files_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "abap"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_output = read_expectation(&path.with_extension("out"));
        let expected_diagnostics = read_expectation(&path.with_extension("err"));

        count += 1;
        let run = execute(&source);
        assert_eq!(run.output, expected_output, "output of {path:?}");
        assert_eq!(run.diagnostics.join("\n"), expected_diagnostics, "diagnostics of {path:?}");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

/// Reads an expectation file without its final newline. A missing file
/// expects nothing.
fn read_expectation(path: &std::path::Path) -> String {
    fs::read_to_string(path).map(|s| s.trim_end_matches('\n').to_string())
                            .unwrap_or_default()
}

fn assert_output(src: &str, expected: &str) {
    let run = execute(src);
    assert!(run.is_clean(), "Program reported diagnostics: {:?}", run.diagnostics);
    assert_eq!(run.output, expected);
}

fn assert_failure(src: &str) -> Execution {
    let run = execute(src);
    assert!(!run.is_clean(), "Program succeeded but was expected to fail");
    run
}

fn assert_structural_failure(src: &str) {
    let run = assert_failure(src);
    assert_eq!(run.output, "", "structural errors must not produce output");
    assert_eq!(run.diagnostics.len(), 1, "{:?}", run.diagnostics);
}

#[test]
fn demo_program_runs() {
    assert_output(DEMO_PROGRAM, "Mensaje: Hola mundo\nResultado: 8");
}

#[test]
fn write_joins_items_on_a_line() {
    assert_output("DATA lv_text TYPE string VALUE 'Hola mundo'. WRITE: / 'Mensaje:', lv_text.",
                  "Mensaje: Hola mundo");
}

#[test]
fn add_then_write() {
    assert_output("DATA lv_num TYPE i VALUE 5. ADD 3 TO lv_num. WRITE: / lv_num.", "8");
}

#[test]
fn declarations_read_back() {
    assert_output("DATA lv_i TYPE i VALUE 3 * 4. WRITE lv_i.", "12");
    assert_output("DATA lv_s TYPE string VALUE `back quoted`. WRITE lv_s.", "back quoted");
    assert_output("DATA: lv_a TYPE i, lv_b TYPE string. WRITE: lv_a, / lv_b, / 'end'.", "0\n\nend");
}

#[test]
fn keywords_and_names_ignore_case() {
    assert_output("data Lv_X type I value 2. add 1 to LV_X. write lv_x.", "3");
}

#[test]
fn comments_and_decimal_points() {
    let source = "* header comment
                  DATA lv_f TYPE f VALUE 2.5. \" trailing comment
                  WRITE lv_f * 2.";
    assert_output(source, "5");
    assert_output("WRITE 'a. \"b'.", "a. \"b");
}

#[test]
fn undeclared_variable_does_not_stop_the_run() {
    let run = assert_failure("WRITE 'antes'. WRITE / lv_missing. WRITE / 'despues'.");
    assert_eq!(run.output, "antes\ndespues");
    assert_eq!(run.diagnostics.len(), 1);
    assert!(run.diagnostics[0].contains("lv_missing"));
}

#[test]
fn wrong_terminator_is_structural() {
    assert_structural_failure("WRITE 'x'. IF 1 = 1. WRITE 'y'. ENDDO.");
}

#[test]
fn structural_errors() {
    assert_structural_failure("WRITE 'x'. IF 1 = 1. WRITE 'y'.");
    assert_structural_failure("WRITE 'x'. DO. ENDDO.");
    assert_structural_failure("WRITE 'x'. LOOP. ENDLOOP.");
    assert_structural_failure("WRITE 'x'. ENDLOOP.");
    assert_structural_failure("WRITE 'x'. DATA lv_x TYPE.");
    assert_structural_failure("IF 1 = 1. ELSE. ELSEIF 2 = 2. ENDIF.");
}

#[test]
fn division_by_zero_prints_ieee_values() {
    assert_output("WRITE: 1 / 0, -1 / 0, 0 / 0.", "Infinity -Infinity NaN");
}

#[test]
fn division_by_zero_cannot_be_stored_in_integers() {
    let run = assert_failure("DATA lv_i TYPE i. lv_i = 1 / 0. WRITE lv_i.");
    assert_eq!(run.output, "0");
    assert_eq!(run.diagnostics, vec!["Value assigned to lv_i must be numeric."]);
}

#[test]
fn clear_empties_tables() {
    let source = "DATA lt_words TYPE TABLE OF string. DATA lv_word TYPE string.
                  APPEND 'a' TO lt_words. APPEND 'b' TO lt_words.
                  CLEAR lt_words.
                  LOOP AT lt_words INTO lv_word. WRITE lv_word. ENDLOOP.
                  WRITE 'vacio'.";
    assert_output(source, "vacio");
}

#[test]
fn table_loop_visits_elements_in_order() {
    let source = "DATA lt_words TYPE TABLE OF string. DATA lv_word TYPE string.
                  APPEND 'uno' TO lt_words. APPEND 'dos' TO lt_words. APPEND 'tres' TO lt_words.
                  LOOP AT lt_words INTO lv_word. WRITE / lv_word. ENDLOOP.";
    assert_output(source, "uno\ndos\ntres");
}

#[test]
fn exactly_one_branch_runs() {
    for (value, expected) in [("1", "uno"), ("2", "dos"), ("3", "otro")] {
        let source = format!("DATA lv_x TYPE i VALUE {value}.
                              IF lv_x = 1. WRITE 'uno'.
                              ELSEIF lv_x = 2. WRITE 'dos'.
                              ELSE. WRITE 'otro'.
                              ENDIF.");
        assert_output(&source, expected);
    }
}

#[test]
fn do_count_is_fixed_at_entry() {
    let source = "DATA lv_n TYPE i VALUE 3.
                  DO lv_n TIMES. ADD 1 TO lv_n. WRITE 'x'. ENDDO.";
    assert_output(source, "x x x");
}

#[test]
fn iteration_budget_is_configurable() {
    let config = Config { max_iterations: 10 };
    let run = execute_with("DO 4 TIMES. DO 4 TIMES. WRITE 'x'. ENDDO. ENDDO. WRITE 'fin'.", &config);
    assert_eq!(run.diagnostics.len(), 1);
    assert!(run.diagnostics[0].starts_with("Too many iterations"));
    assert!(!run.output.contains("fin"));

    assert!(execute("DO 1000 TIMES. ENDDO.").is_clean());
}

#[test]
fn expression_errors_are_diagnostics() {
    for source in ["WRITE 1 == 1.",
                   "WRITE 1 < 2 < 3.",
                   "WRITE 1 = 'a'.",
                   "WRITE 'a' + 1.",
                   "WRITE -'a'.",
                   "WRITE (1 + 2.",
                   "WRITE 1 + 2).",
                   "WRITE 'open.",
                   "WRITE 1 $ 2."]
    {
        let run = assert_failure(source);
        assert_eq!(run.output, "", "{source}");
        assert_eq!(run.diagnostics.len(), 1, "{source}: {:?}", run.diagnostics);
    }
}

#[test]
fn comparisons_produce_booleans() {
    assert_output("WRITE: 2 > 1, 'a' <> 'a'.", "TRUE FALSE");
    assert_output("DATA lv_s TYPE string. lv_s = (1 < 2) = (3 > 4). WRITE lv_s.", "FALSE");
}

#[test]
fn unsupported_statements_are_reported() {
    let run = assert_failure("WRITE 'a'. FORM foo. WRITE 'b'.");
    assert_eq!(run.output, "a b");
    assert_eq!(run.diagnostics, vec!["Unsupported statement: \"FORM foo\"."]);
}

#[test]
fn typed_tables_reject_wrong_elements() {
    let run = assert_failure("DATA lt_n TYPE TABLE OF i. APPEND 'x' TO lt_n. DATA lt_p TYPE TABLE OF p.");
    assert_eq!(run.diagnostics.len(), 2);
}

#[test]
fn oversized_lengths_fail_and_execution_continues() {
    let run = assert_failure("DATA lv_c TYPE c LENGTH 4000000000. WRITE 'after'.");
    assert_eq!(run.output, "after");
    assert_eq!(run.diagnostics,
               vec!["Invalid declaration of lv_c: LENGTH cannot exceed 262143."]);
}

#[test]
fn deeply_nested_expressions_are_diagnosed() {
    let nested = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    let run = assert_failure(&format!("WRITE {nested}. WRITE / 'after'."));
    assert_eq!(run.output, "after");
    assert_eq!(run.diagnostics.len(), 1);
    assert!(run.diagnostics[0].contains("nested too deeply"), "{:?}", run.diagnostics);
}

#[test]
fn deeply_nested_blocks_are_structural_errors() {
    let depth = 2000;
    let source = format!("{}WRITE 'deep'. {}", "IF 1 = 1. ".repeat(depth), "ENDIF. ".repeat(depth));
    assert_structural_failure(&source);

    let source = format!("{}WRITE 'deep'. {}", "IF 1 = 1. ".repeat(100), "ENDIF. ".repeat(100));
    assert_output(&source, "deep");
}

#[test]
fn block_keywords_can_be_assignment_targets() {
    assert_output("DATA do TYPE i. do = 2. DO do TIMES. WRITE do. ENDDO.", "2 2");
}

#[test]
fn value_can_name_a_variable() {
    assert_output("DATA value TYPE i VALUE 1. ADD value TO value. WRITE value.", "2");
}
