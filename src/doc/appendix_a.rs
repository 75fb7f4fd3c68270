/*!
# Errors

An error stops the program and prints the error with the line it
happened in, and sometimes more detail after a `;`.

<pre><code>&nbsp;?TYPE MISMATCH IN 20; NUMBER EXPECTED
</code></pre>

| Code | Error | |
|-|-|-|
| 0 | BREAK | CTRL-C was pressed. |
| 1 | NEXT WITHOUT FOR | No loop is open, or NEXT names a different variable than the innermost loop. |
| 2 | SYNTAX ERROR | The line could not be read. |
| 3 | RETURN WITHOUT GOSUB | |
| 4 | OUT OF DATA | READ ran past the last DATA item. |
| 5 | ILLEGAL FUNCTION CALL | A function or ON index was out of range. |
| 7 | OUT OF MEMORY | Too many nested GOSUBs or FOR loops, or an expression too deep. |
| 8 | UNDEFINED LINE | |
| 9 | SUBSCRIPT OUT OF RANGE | |
| 10 | REDIMENSIONED ARRAY | |
| 13 | TYPE MISMATCH | A string where a number belongs, or the reverse. |
| 18 | UNDEFINED USER FUNCTION | FN called before its DEF ran. |
| 62 | INPUT PAST END | The input ran out while INPUT was waiting. |

## INPUT

A number that can't be read is reported without stopping the program and
the variable is set to 0.

## Limits

By default 10 GOSUBs may be nested and 4 FOR loops may be open at once.
Both can be raised with `--gosub-depth` and `--for-depth`.
`TAB` accepts columns 0 to 255; anything else is an ILLEGAL FUNCTION CALL.

*/
