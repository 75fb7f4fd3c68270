use super::*;

#[test]
fn test_line_number_tracks_execution() {
    let mut r = runtime("10 X=1\n20 GOTO 40\n30 X=3\n40 X=X+1\n");
    assert_eq!(r.line_number(), None);
    r.run().unwrap();
    assert_eq!(r.line_number(), Some(10));
    r.run().unwrap();
    assert_eq!(r.line_number(), Some(20));
    r.run().unwrap();
    assert_eq!(r.line_number(), Some(40));
    assert!(r.is_finished());
    assert_eq!(r.variables().numeric("x"), 2.0);
}

#[test]
fn test_scan_indexes_lines_it_passes() {
    let mut r = runtime("10 GOTO 40\n20 END\n30 GOTO 20\n40 GOTO 30\n");
    assert_eq!(run(&mut r), "");
    assert_eq!(r.line_scans(), 1);
}

#[test]
fn test_init_resets_state() {
    let mut r = runtime("10 A=A+1\n20 GOSUB 40\n30 END\n40 RETURN\n");
    assert_eq!(run(&mut r), "");
    assert_eq!(r.variables().numeric("a"), 1.0);
    r.init(0).unwrap();
    assert!(!r.is_finished());
    assert_eq!(r.variables().numeric("a"), 0.0);
    assert_eq!(r.line_scans(), 0);
    assert_eq!(run(&mut r), "");
    assert_eq!(r.variables().numeric("a"), 1.0);
}

#[test]
fn test_init_at_offset() {
    let program = "10 PRINT \"SKIPPED\"\n20 PRINT \"RUN\"\n";
    let mut r = Runtime::new(program, Capture::default());
    r.init(program.find("20").unwrap()).unwrap();
    assert_eq!(run(&mut r), "RUN\n");
}

#[test]
fn test_blank_lines() {
    let mut r = runtime("\n10 PRINT 1\n\n20 PRINT 2\n");
    assert_eq!(run(&mut r), "1\n2\n");
}
