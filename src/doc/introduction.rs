/*!
# Introduction to stepbasic

stepbasic runs a BASIC program stored in a text file. Every line starts
with a line number; statements on a line are separated by `:`.

```text
10 REM SQUARES
20 FOR I=1 TO 3
30 PRINT I*I
40 NEXT I
```

Save it as `squares.bas` and run it.

<pre><code>&nbsp;$ stepbasic squares.bas
&nbsp;1
&nbsp;4
&nbsp;9
</code></pre>

Stop a running program with CTRL-C. It ends with `?BREAK IN` and the line
that was running.

## Lines are found as they run

Nothing is parsed ahead of time. Lines are read straight from the program
text one at a time. A `GOTO` to a line that has already run is immediate.
A `GOTO` forward to a line not seen yet reads ahead from the top of the
program once and remembers every line number it passes. Line numbers do
not need to be in order, but a `GOTO` finds the first line with that
number when reading from the top.

## Keywords and variables

Keywords may be typed in any case and need no spaces around them, so
`FORI=1TO9` reads as `FOR I=1 TO 9`. `?` is short for `PRINT`.

A variable name is one letter, optionally followed by one digit. A `$`
makes it a string variable. Names are not case sensitive.

```text
A   B7   N$   X1$
```

`A`, `A$`, `A()` and `A$()` are four different variables. Numbers start
at 0 and strings start empty.

## Arrays

`DIM A(3,3)` creates a 4 by 4 array; bounds are inclusive and
subscripts start at 0. An array used without a `DIM` is created with a
bound of 10 on every axis. A second `DIM` of the same array is an error.

## Expressions

From loosest to tightest binding:

| Operators | |
|-|-|
| `OR` `XOR` | logical or bitwise |
| `AND` | logical or bitwise |
| `NOT` | logical or bitwise |
| `=` `<` `>` `<=` `>=` `<>` | comparison |
| `+` `-` | add, subtract, join strings |
| `*` `/` `MOD` `%` | |
| `^` | power, left to right |

Comparisons produce `TRUE` or `FALSE`. `AND`, `OR` and `XOR` on two
comparisons are logical; on two numbers they work on the integer bits.
Mixing strings and numbers is a `TYPE MISMATCH`.

## User functions

```text
10 DEF FNH(A,B)=SQR(A*A+B*B)
20 PRINT FNH(3,4)
```

A function is defined when its `DEF` runs. The parameters are ordinary
variables: calling `FNH(3,4)` leaves `A` at 3 and `B` at 4.

## IF

```text
IF X>1 THEN 100
IF X>1 THEN PRINT "BIG" ELSE PRINT "SMALL"
IF X THEN 100
```

A number is true when it is not zero. After `THEN`, an assignment must
be written with `LET`. `IF X THEN A=5` compares `A` with 5 and does
nothing with the result.

*/
