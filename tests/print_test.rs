mod common;
use common::*;

#[test]
fn test_print_zones() {
    assert_eq!(exec("10 PRINT 1,2\n"), format!("1{}2\n", " ".repeat(14)));
    assert_eq!(
        exec("10 PRINT \"A\",\n20 PRINT \"B\"\n"),
        format!("A{}B\n", " ".repeat(14))
    );
}

#[test]
fn test_print_semicolon_pads_numbers_only() {
    assert_eq!(exec("10 PRINT 1;2\n"), "1  2\n");
    assert_eq!(exec("10 PRINT 10;5\n"), "10 5\n");
    assert_eq!(exec("10 PRINT \"A\";\"B\"\n"), "AB\n");
}

#[test]
fn test_print_tab() {
    assert_eq!(exec("10 PRINT TAB(5);\"X\"\n"), "     X\n");
    assert_eq!(exec("10 PRINT \"HELLO\";TAB(2);\"X\"\n"), "HELLOX\n");
}

#[test]
fn test_trailing_separator_suppresses_newline() {
    assert_eq!(exec("10 PRINT \"A\";\n20 PRINT \"B\"\n"), "AB\n");
}

#[test]
fn test_empty_print() {
    assert_eq!(exec("10 PRINT\n20 PRINT \"X\"\n"), "\nX\n");
}

#[test]
fn test_question_mark_prints() {
    assert_eq!(exec("10 ?\"HI\"\n"), "HI\n");
}

#[test]
fn test_tab_out_of_range() {
    assert_eq!(
        exec("10 PRINT TAB(1000);\"X\"\n"),
        "?ILLEGAL FUNCTION CALL IN 10; TAB(1000) NOT IN 0 TO 255\n"
    );
    assert_eq!(exec("10 PRINT TAB(0);\"X\"\n"), "X\n");
}
