mod common;
use common::*;
use stepbasic::mach::Config;

#[test]
fn test_squares() {
    let program = "10 FOR I=1 TO 3\n20 PRINT I*I\n30 NEXT I\n";
    assert_eq!(exec(program), "1\n4\n9\n");
}

#[test]
fn test_for_negative_step() {
    let program = "10 FOR I=3 TO 1 STEP -1\n20 PRINT I;\n30 NEXT I\n40 PRINT\n";
    assert_eq!(exec(program), "3  2  1  \n");
}

#[test]
fn test_for_loop_always_runs_once() {
    assert_eq!(exec("10 FOR I=3 TO 0:PRINT I:NEXT I\n"), "3\n");
}

#[test]
fn test_for_on_one_line() {
    let program = "10 FOR I=1 TO 3:PRINT I:NEXT I\n20 PRINT \"DONE\"\n";
    assert_eq!(exec(program), "1\n2\n3\nDONE\n");
}

#[test]
fn test_next_with_two_variables() {
    let program = "10 FOR I=1 TO 2\n20 FOR J=1 TO 2\n30 PRINT I;J\n40 NEXT J,I\n";
    assert_eq!(exec(program), "1  1\n1  2\n2  1\n2  2\n");
}

#[test]
fn test_next_without_variable() {
    assert_eq!(exec("10 FOR I=1 TO 2:PRINT I:NEXT\n"), "1\n2\n");
}

#[test]
fn test_for_depth_restored() {
    let mut r = runtime("10 FOR I=1 TO 2\n20 FOR J=1 TO 3\n30 NEXT J\n40 NEXT I\n", &[]);
    assert_eq!(r.for_depth(), 0);
    assert_eq!(run(&mut r), "");
    assert_eq!(r.for_depth(), 0);
    assert_eq!(r.variables().numeric("i"), 3.0);
    assert_eq!(r.variables().numeric("j"), 4.0);
}

#[test]
fn test_for_reuses_slot() {
    let mut r = runtime("10 FOR I=1 TO 2\n20 FOR J=1 TO 2\n30 FOR I=5 TO 5\n40 NEXT I\n", &[]);
    assert_eq!(run(&mut r), "");
    assert_eq!(r.for_depth(), 0);
}

#[test]
fn test_for_overflow() {
    let program = "10 FOR A=1 TO 2\n20 FOR B=1 TO 2\n30 FOR C=1 TO 2\n\
                   40 FOR D=1 TO 2\n50 FOR E=1 TO 2\n";
    assert_eq!(exec(program), "?OUT OF MEMORY IN 50; FOR STACK OVERFLOW\n");
}

#[test]
fn test_next_without_for() {
    assert_eq!(exec("10 NEXT I\n"), "?NEXT WITHOUT FOR IN 10\n");
    assert_eq!(
        exec("10 FOR I=1 TO 2\n20 NEXT J\n"),
        "?NEXT WITHOUT FOR IN 20; NEXT J DOES NOT MATCH FOR I\n"
    );
}

#[test]
fn test_gosub_return() {
    let program = "10 GOSUB 100:PRINT \"BACK\"\n20 END\n100 PRINT \"SUB\"\n110 RETURN\n";
    assert_eq!(exec(program), "SUB\nBACK\n");
}

#[test]
fn test_gosub_depth_restored() {
    let mut r = runtime("10 GOSUB 30\n20 END\n30 GOSUB 40\n40 RETURN\n", &[]);
    assert_eq!(run(&mut r), "");
    assert_eq!(r.gosub_depth(), 0);
}

#[test]
fn test_return_without_gosub() {
    assert_eq!(exec("10 RETURN\n"), "?RETURN WITHOUT GOSUB IN 10\n");
}

#[test]
fn test_gosub_overflow() {
    let config = Config {
        gosub_depth: 2,
        ..Config::default()
    };
    let mut r = runtime_with_config("10 GOSUB 10\n", &[], config);
    assert_eq!(run(&mut r), "?OUT OF MEMORY IN 10; GOSUB STACK OVERFLOW\n");
    assert_eq!(r.gosub_depth(), 2);
}

#[test]
fn test_on_goto() {
    let program = "10 X=2\n20 ON X GOTO 100,200\n100 PRINT \"A\":END\n200 PRINT \"B\"\n";
    assert_eq!(exec(program), "B\n");
}

#[test]
fn test_on_gosub() {
    let program = "10 ON 1 GOSUB 100:PRINT \"C\"\n20 END\n100 PRINT \"S\":RETURN\n";
    assert_eq!(exec(program), "S\nC\n");
}

#[test]
fn test_on_out_of_range() {
    assert_eq!(
        exec("10 ON 3 GOTO 10,20\n20 END\n"),
        "?ILLEGAL FUNCTION CALL IN 10; ON INDEX 3 NOT IN 1 TO 2\n"
    );
}

#[test]
fn test_goto_indexes_once() {
    let program = "10 GOTO 30\n20 END\n30 X=X+1:IF X<3 THEN 30\n40 PRINT X\n";
    let mut r = runtime(program, &[]);
    assert_eq!(run(&mut r), "3\n");
    assert_eq!(r.line_scans(), 1);
}

#[test]
fn test_backward_goto_needs_no_scan() {
    let program = "10 X=X+1\n20 IF X<5 THEN 10\n30 PRINT X\n";
    let mut r = runtime(program, &[]);
    assert_eq!(run(&mut r), "5\n");
    assert_eq!(r.line_scans(), 0);
}

#[test]
fn test_undefined_line() {
    assert_eq!(exec("10 GOTO 99\n"), "?UNDEFINED LINE IN 10; 99\n");
}

#[test]
fn test_end_and_stop() {
    assert_eq!(exec("10 PRINT 1\n20 END\n30 PRINT 2\n"), "1\n");
    assert_eq!(exec("10 PRINT 1:STOP:PRINT 2\n"), "1\n");
}

#[test]
fn test_rem() {
    assert_eq!(exec("10 REM HELLO: PRINT 1\n20 PRINT 2\n"), "2\n");
}

#[test]
fn test_let() {
    assert_eq!(exec("10 LET A=1, B=A+1\n20 PRINT A+B\n"), "3\n");
    assert_eq!(exec("10 A$=\"X\":B$=A$+A$:PRINT B$\n"), "XX\n");
}

#[test]
fn test_crlf_lines() {
    assert_eq!(exec("10 PRINT 1\r\n20 PRINT 2\r\n"), "1\n2\n");
}

#[test]
fn test_data_read_restore() {
    let program = "10 READ A,B$\n20 PRINT A;B$\n30 RESTORE\n40 READ C\n50 PRINT C\n\
                   60 DATA 7,\"X\"\n";
    assert_eq!(exec(program), "7  X\n7\n");
}

#[test]
fn test_read_negative_data() {
    let program = "10 READ A,B\n20 PRINT A+B\n30 DATA -1.5,4\n";
    assert_eq!(exec(program), "2.5\n");
}

#[test]
fn test_read_across_data_statements() {
    let program = "10 DATA 1,2\n20 FOR I=1 TO 3\n30 READ X\n40 PRINT X\n50 NEXT I\n60 DATA 3\n";
    assert_eq!(exec(program), "1\n2\n3\n");
}

#[test]
fn test_out_of_data() {
    let mut r = runtime("10 READ A\n20 READ B\n30 DATA 1\n", &[]);
    assert_eq!(run(&mut r), "?OUT OF DATA IN 20\n");
    assert!(r.is_finished());
}

#[test]
fn test_read_type_mismatch() {
    assert_eq!(
        exec("10 READ A\n20 DATA \"X\"\n"),
        "?TYPE MISMATCH IN 10; NUMBER EXPECTED\n"
    );
}

#[test]
fn test_syntax_error() {
    assert_eq!(
        exec("10 PRINT 1\n20 FOR\n"),
        "1\n?SYNTAX ERROR IN 20; EXPECTED VARIABLE, GOT NEWLINE\n"
    );
}

#[test]
fn test_randomize() {
    let out = exec("10 RANDOMIZE\n20 X=RND(1)\n30 PRINT X>=0 AND X<1\n");
    assert_eq!(out, "TRUE\n");
}
