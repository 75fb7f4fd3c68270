use super::token::*;
use super::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Numeric literals longer than this are rejected by the lexer.
pub const MAX_NUMBER_LEN: usize = 15;

fn is_basic_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_basic_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// ## Positional tokenizer
///
/// Nothing is materialized up front. The tokenizer holds the cursor of the
/// current lexeme, the cursor where the following lexeme starts, and the
/// kind of the current lexeme. Moving anywhere in the buffer is a matter of
/// calling [`Tokenizer::goto_position`], which rescans from that offset.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    source: Rc<str>,
    cursor: usize,
    next: usize,
    token: Token,
}

impl Tokenizer {
    pub fn new(source: Rc<str>) -> Tokenizer {
        Tokenizer {
            source,
            cursor: 0,
            next: 0,
            token: Token::EndOfInput,
        }
    }

    pub fn init(&mut self, position: usize) -> Result<()> {
        self.goto_position(position)
    }

    /// Reposition the cursor and compute the token found there.
    pub fn goto_position(&mut self, position: usize) -> Result<()> {
        self.cursor = position.min(self.source.len());
        self.skip_whitespace();
        self.scan()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// The raw text of the current token.
    pub fn lexeme(&self) -> &str {
        &self.source[self.cursor..self.next]
    }

    pub fn next_token(&mut self) -> Result<()> {
        if self.token == Token::EndOfInput {
            return Ok(());
        }
        self.cursor = self.next;
        self.skip_whitespace();
        self.scan()
    }

    pub fn accept(&mut self, expected: Token) -> Result<()> {
        if self.token != expected {
            return Err(error!(SyntaxError;
                format!("EXPECTED {}, GOT {}", expected, self.token)));
        }
        self.next_token()
    }

    /// Move to just past the next line terminator without tokenizing
    /// anything in between.
    pub fn skip_tokens(&mut self) -> Result<()> {
        let rest = &self.source.as_bytes()[self.cursor..];
        let position = match rest.iter().position(|&c| c == b'\n') {
            Some(index) => self.cursor + index + 1,
            None => self.source.len(),
        };
        self.goto_position(position)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.source.len() || self.token == Token::EndOfInput
    }

    pub fn integer(&self) -> Result<i64> {
        match self.token {
            Token::Literal(Literal::Integer) => self
                .lexeme()
                .parse::<i64>()
                .map_err(|_| error!(SyntaxError; "INVALID INTEGER")),
            _ => Err(self.expected("INTEGER")),
        }
    }

    pub fn line_number(&self) -> Result<u16> {
        match self.token {
            Token::Literal(Literal::Integer) => self
                .lexeme()
                .parse::<u16>()
                .map_err(|_| error!(SyntaxError; "INVALID LINE NUMBER")),
            _ => Err(self.expected("LINE NUMBER")),
        }
    }

    pub fn number(&self) -> Result<f64> {
        match self.token {
            Token::Literal(Literal::Integer) | Token::Literal(Literal::Number) => self
                .lexeme()
                .parse::<f64>()
                .map_err(|_| error!(SyntaxError; "INVALID NUMBER")),
            _ => Err(self.expected("NUMBER")),
        }
    }

    pub fn string(&self) -> Result<String> {
        match self.token {
            Token::Literal(Literal::String) => {
                let s = self.lexeme();
                Ok(s[1..s.len() - 1].to_string())
            }
            _ => Err(self.expected("STRING")),
        }
    }

    /// Lowercase variable name including any `$` and `(` suffix, so the
    /// four variable kinds never share a key.
    pub fn variable_name(&self) -> Result<Rc<str>> {
        match self.token {
            Token::Ident(_) => Ok(self.lexeme().to_ascii_lowercase().into()),
            _ => Err(self.expected("VARIABLE")),
        }
    }

    fn expected(&self, what: &str) -> Error {
        error!(SyntaxError; format!("EXPECTED {}, GOT {}", what, self.token))
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.source.as_bytes();
        while self.cursor < bytes.len() && is_basic_whitespace(bytes[self.cursor]) {
            self.cursor += 1;
        }
    }

    fn scan(&mut self) -> Result<()> {
        let bytes = self.source.as_bytes();
        let i = self.cursor;
        if i >= bytes.len() {
            self.token = Token::EndOfInput;
            self.next = bytes.len();
            return Ok(());
        }
        let c = bytes[i];
        let (token, len) = if is_basic_digit(c)
            || (c == b'.' && bytes.get(i + 1).map_or(false, |&d| is_basic_digit(d)))
        {
            self.number_token()?
        } else if is_basic_alphabetic(c) {
            self.alphabetic_token()
        } else if c == b'"' {
            self.string_token()?
        } else {
            self.minutia_token()
        };
        self.token = token;
        self.next = i + len;
        Ok(())
    }

    fn number_token(&self) -> Result<(Token, usize)> {
        let bytes = &self.source.as_bytes()[self.cursor..];
        let mut decimal = false;
        let mut len = 0;
        while len < bytes.len() {
            let c = bytes[len];
            if c == b'.' && !decimal {
                decimal = true;
            } else if !is_basic_digit(c) {
                break;
            }
            len += 1;
        }
        if len > MAX_NUMBER_LEN {
            return Err(error!(SyntaxError; "NUMBER TOO LONG"));
        }
        if decimal {
            Ok((Token::Literal(Literal::Number), len))
        } else {
            Ok((Token::Literal(Literal::Integer), len))
        }
    }

    fn string_token(&self) -> Result<(Token, usize)> {
        let bytes = &self.source.as_bytes()[self.cursor..];
        match bytes[1..].iter().position(|&c| c == b'"' || c == b'\n') {
            Some(index) if bytes[index + 1] == b'"' => {
                Ok((Token::Literal(Literal::String), index + 2))
            }
            _ => Err(error!(SyntaxError; "EXPECTED CLOSING QUOTE")),
        }
    }

    fn alphabetic_token(&self) -> (Token, usize) {
        let bytes = &self.source.as_bytes()[self.cursor..];
        let run = bytes.iter().take_while(|&&c| is_basic_alphabetic(c)).count();
        let upper = self.source[self.cursor..self.cursor + run].to_ascii_uppercase();
        // Longest keyword that prefixes the run of letters. Variables are a
        // single letter, so FORI=1TO9 lexes the way it reads.
        for len in (2..=run).rev() {
            let word = &upper[..len];
            if bytes.get(len) == Some(&b'$') {
                if let Some(w) = Word::from_string(&format!("{}$", word)) {
                    return (Token::Word(w), len + 1);
                }
            }
            if let Some(w) = Word::from_string(word) {
                return (Token::Word(w), len);
            }
        }
        let mut len = 1;
        if bytes.get(len).map_or(false, |&c| is_basic_digit(c)) {
            len += 1;
        }
        let string = bytes.get(len) == Some(&b'$');
        if string {
            len += 1;
        }
        let array = bytes.get(len) == Some(&b'(');
        if array {
            len += 1;
        }
        let ident = match (string, array) {
            (false, false) => Ident::Numeric,
            (true, false) => Ident::String,
            (false, true) => Ident::NumericArray,
            (true, true) => Ident::StringArray,
        };
        (Token::Ident(ident), len)
    }

    fn minutia_token(&self) -> (Token, usize) {
        let ch = match self.source[self.cursor..].chars().next() {
            Some(ch) => ch,
            None => return (Token::EndOfInput, 0),
        };
        let token = match ch {
            '\n' => Token::Newline,
            '\r' => Token::Cr,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '#' => Token::Hash,
            '$' => Token::Dollar,
            '?' => Token::Word(Word::Print),
            _ => match Operator::from_char(ch) {
                Some(op) => Token::Operator(op),
                None => Token::Error,
            },
        };
        (token, ch.len_utf8())
    }
}
