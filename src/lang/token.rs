use std::collections::HashMap;

thread_local!(
    static STRING_TO_WORD: HashMap<&'static str, Word> = Word::ALL
        .iter()
        .map(|w| (w.as_str(), w.clone()))
        .collect();
);

/// The lexical category of the lexeme under the tokenizer cursor.
/// Tokens carry no text; the tokenizer hands out the lexeme on request.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token {
    Error,
    EndOfInput,
    Cr,
    Newline,
    Literal(Literal),
    Ident(Ident),
    Word(Word),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
    Hash,
    Dollar,
}

impl Token {
    /// Tokens which end a statement.
    pub fn is_separator(&self) -> bool {
        matches!(
            self,
            Token::Colon | Token::Cr | Token::Newline | Token::EndOfInput
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Error => write!(f, "ERROR"),
            EndOfInput => write!(f, "END OF INPUT"),
            Cr => write!(f, "CR"),
            Newline => write!(f, "NEWLINE"),
            Literal(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            Hash => write!(f, "#"),
            Dollar => write!(f, "$"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Literal {
    Integer,
    Number,
    String,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer => write!(f, "INTEGER"),
            Number => write!(f, "NUMBER"),
            String => write!(f, "STRING"),
        }
    }
}

/// Variable kinds. Array-ness is decided by the lexer from a `(`
/// immediately following the name.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Ident {
    Numeric,
    String,
    NumericArray,
    StringArray,
}

impl Ident {
    pub fn is_string(&self) -> bool {
        matches!(self, Ident::String | Ident::StringArray)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Ident::NumericArray | Ident::StringArray)
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Ident::*;
        match self {
            Numeric => write!(f, "NUMERIC VARIABLE"),
            String => write!(f, "STRING VARIABLE"),
            NumericArray => write!(f, "NUMERIC ARRAY"),
            StringArray => write!(f, "STRING ARRAY"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Abs,
    And,
    Asc,
    Atn,
    Chr,
    Cos,
    Data,
    Def,
    Dim,
    Else,
    End,
    Exp,
    Fn,
    For,
    Gosub,
    Goto,
    If,
    Input,
    Int,
    Left,
    Len,
    Let,
    Log,
    Mid,
    Mod,
    Next,
    Not,
    On,
    Or,
    Print,
    Randomize,
    Read,
    Rem,
    Restore,
    Return,
    Right,
    Rnd,
    Sgn,
    Sin,
    Sqr,
    Step,
    Stop,
    Str,
    Tab,
    Tan,
    Then,
    To,
    Val,
    Xor,
}

impl Word {
    const ALL: [Word; 49] = [
        Word::Abs,
        Word::And,
        Word::Asc,
        Word::Atn,
        Word::Chr,
        Word::Cos,
        Word::Data,
        Word::Def,
        Word::Dim,
        Word::Else,
        Word::End,
        Word::Exp,
        Word::Fn,
        Word::For,
        Word::Gosub,
        Word::Goto,
        Word::If,
        Word::Input,
        Word::Int,
        Word::Left,
        Word::Len,
        Word::Let,
        Word::Log,
        Word::Mid,
        Word::Mod,
        Word::Next,
        Word::Not,
        Word::On,
        Word::Or,
        Word::Print,
        Word::Randomize,
        Word::Read,
        Word::Rem,
        Word::Restore,
        Word::Return,
        Word::Right,
        Word::Rnd,
        Word::Sgn,
        Word::Sin,
        Word::Sqr,
        Word::Step,
        Word::Stop,
        Word::Str,
        Word::Tab,
        Word::Tan,
        Word::Then,
        Word::To,
        Word::Val,
        Word::Xor,
    ];

    /// Case-insensitive keyword lookup. `s` must already be uppercase.
    pub fn from_string(s: &str) -> Option<Word> {
        STRING_TO_WORD.with(|stw| stw.get(s).cloned())
    }

    pub fn as_str(&self) -> &'static str {
        use Word::*;
        match self {
            Abs => "ABS",
            And => "AND",
            Asc => "ASC",
            Atn => "ATN",
            Chr => "CHR$",
            Cos => "COS",
            Data => "DATA",
            Def => "DEF",
            Dim => "DIM",
            Else => "ELSE",
            End => "END",
            Exp => "EXP",
            Fn => "FN",
            For => "FOR",
            Gosub => "GOSUB",
            Goto => "GOTO",
            If => "IF",
            Input => "INPUT",
            Int => "INT",
            Left => "LEFT$",
            Len => "LEN",
            Let => "LET",
            Log => "LOG",
            Mid => "MID$",
            Mod => "MOD",
            Next => "NEXT",
            Not => "NOT",
            On => "ON",
            Or => "OR",
            Print => "PRINT",
            Randomize => "RANDOMIZE",
            Read => "READ",
            Rem => "REM",
            Restore => "RESTORE",
            Return => "RETURN",
            Right => "RIGHT$",
            Rnd => "RND",
            Sgn => "SGN",
            Sin => "SIN",
            Sqr => "SQR",
            Step => "STEP",
            Stop => "STOP",
            Str => "STR$",
            Tab => "TAB",
            Tan => "TAN",
            Then => "THEN",
            To => "TO",
            Val => "VAL",
            Xor => "XOR",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Percent,
    Plus,
    Minus,
    Equal,
    Less,
    Greater,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        use Operator::*;
        match ch {
            '^' => Some(Caret),
            '*' => Some(Multiply),
            '/' => Some(Divide),
            '%' => Some(Percent),
            '+' => Some(Plus),
            '-' => Some(Minus),
            '=' => Some(Equal),
            '<' => Some(Less),
            '>' => Some(Greater),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Percent => write!(f, "%"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            Less => write!(f, "<"),
            Greater => write!(f, ">"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        assert_eq!(Word::from_string("REM"), Some(Word::Rem));
        assert_eq!(Word::from_string("LEFT$"), Some(Word::Left));
        assert_eq!(Word::from_string("PICKLES"), None);
    }

    #[test]
    fn test_word_table_complete() {
        for word in Word::ALL.iter() {
            assert_eq!(Word::from_string(word.as_str()), Some(*word));
        }
    }
}
