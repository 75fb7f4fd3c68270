mod common;
use common::*;

#[test]
fn test_array_basics() {
    let program = "10 DIM A$(100), X(10,10)\n20 A$(42)=\"THE ANSWER\"\n30 X(4,2)=2.5\n\
                   40 PRINT A$(42)+\"!\", X(4,2)\n";
    assert_eq!(exec(program), "THE ANSWER!    2.5\n");
}

#[test]
fn test_full_grid() {
    let program = "10 DIM A(3,3)\n\
                   20 FOR I=0 TO 3:FOR J=0 TO 3:A(I,J)=I*10+J:NEXT J:NEXT I\n\
                   30 PRINT A(0,0);A(3,3);A(2,1)\n";
    assert_eq!(exec(program), "0  33 21\n");
}

#[test]
fn test_subscript_out_of_range() {
    assert_eq!(
        exec("10 DIM A(3)\n20 A(4)=1\n"),
        "?SUBSCRIPT OUT OF RANGE IN 20\n"
    );
    assert_eq!(exec("10 PRINT A(-1)\n"), "?SUBSCRIPT OUT OF RANGE IN 10\n");
}

#[test]
fn test_auto_dimension() {
    assert_eq!(
        exec("10 A(10)=5\n20 PRINT A(10)\n30 A(11)=1\n"),
        "5\n?SUBSCRIPT OUT OF RANGE IN 30\n"
    );
}

#[test]
fn test_zero_bound_is_default() {
    assert_eq!(exec("10 DIM A(0)\n20 A(10)=1:PRINT A(10)\n"), "1\n");
}

#[test]
fn test_redimension() {
    assert_eq!(
        exec("10 DIM A(3)\n20 DIM A(4)\n"),
        "?REDIMENSIONED ARRAY IN 20\n"
    );
    assert_eq!(
        exec("10 A(1)=1\n20 DIM A(4)\n"),
        "?REDIMENSIONED ARRAY IN 20\n"
    );
}

#[test]
fn test_wrong_dimensions() {
    assert_eq!(
        exec("10 DIM A(2,2)\n20 PRINT A(1)\n"),
        "?SUBSCRIPT OUT OF RANGE IN 20; WRONG NUMBER OF DIMENSIONS\n"
    );
}

#[test]
fn test_string_array() {
    assert_eq!(
        exec("10 DIM N$(2)\n20 N$(1)=\"X\"\n30 PRINT N$(1);N$(2);\"|\"\n"),
        "X|\n"
    );
}

#[test]
fn test_names_do_not_collide() {
    let program = "10 A=1:A$=\"S\":A(1)=2:A$(1)=\"T\"\n20 PRINT A;A$;A(1);A$(1)\n";
    assert_eq!(exec(program), "1  S2 T\n");
}
