use stepbasic::lang::{token::*, Tokenizer, MAX_NUMBER_LEN};

fn tokenizer(s: &str) -> Tokenizer {
    let mut t = Tokenizer::new(s.into());
    t.init(0).unwrap();
    t
}

fn tokens(s: &str) -> Vec<Token> {
    let mut t = tokenizer(s);
    let mut v = vec![];
    while t.token() != Token::EndOfInput {
        v.push(t.token());
        t.next_token().unwrap();
    }
    v
}

#[test]
fn test_line() {
    assert_eq!(
        tokens("10 PRINT \"HI\";X\n"),
        vec![
            Token::Literal(Literal::Integer),
            Token::Word(Word::Print),
            Token::Literal(Literal::String),
            Token::Semicolon,
            Token::Ident(Ident::Numeric),
            Token::Newline,
        ]
    );
}

#[test]
fn test_relational_operators_are_single_chars() {
    assert_eq!(
        tokens("1<=2"),
        vec![
            Token::Literal(Literal::Integer),
            Token::Operator(Operator::Less),
            Token::Operator(Operator::Equal),
            Token::Literal(Literal::Integer),
        ]
    );
}

#[test]
fn test_idents() {
    let mut t = tokenizer("A1 B$ C( D$(");
    assert_eq!(t.token(), Token::Ident(Ident::Numeric));
    assert_eq!(&*t.variable_name().unwrap(), "a1");
    t.next_token().unwrap();
    assert_eq!(t.token(), Token::Ident(Ident::String));
    t.next_token().unwrap();
    assert_eq!(t.token(), Token::Ident(Ident::NumericArray));
    assert_eq!(&*t.variable_name().unwrap(), "c(");
    t.next_token().unwrap();
    assert_eq!(t.token(), Token::Ident(Ident::StringArray));
    assert_eq!(&*t.variable_name().unwrap(), "d$(");
}

#[test]
fn test_lowercase_keywords() {
    assert_eq!(
        tokens("goto 20"),
        vec![Token::Word(Word::Goto), Token::Literal(Literal::Integer)]
    );
}

#[test]
fn test_question_mark_is_print() {
    assert_eq!(tokens("?"), vec![Token::Word(Word::Print)]);
}

#[test]
fn test_numbers() {
    let mut t = tokenizer(".5 12.25 7");
    assert_eq!(t.token(), Token::Literal(Literal::Number));
    assert_eq!(t.number().unwrap(), 0.5);
    t.next_token().unwrap();
    assert_eq!(t.number().unwrap(), 12.25);
    t.next_token().unwrap();
    assert_eq!(t.token(), Token::Literal(Literal::Integer));
    assert_eq!(t.integer().unwrap(), 7);
}

#[test]
fn test_number_too_long() {
    let s = "1".repeat(MAX_NUMBER_LEN + 1);
    let mut t = Tokenizer::new(s.as_str().into());
    let e = t.init(0).unwrap_err();
    assert!(e.is_syntax());
    assert_eq!(e.to_string(), "SYNTAX ERROR; NUMBER TOO LONG");
    let s = "1".repeat(MAX_NUMBER_LEN);
    assert_eq!(tokenizer(&s).token(), Token::Literal(Literal::Integer));
}

#[test]
fn test_unterminated_string() {
    let mut t = Tokenizer::new("PRINT \"OOPS\n".into());
    t.init(0).unwrap();
    let e = t.next_token().unwrap_err();
    assert_eq!(e.to_string(), "SYNTAX ERROR; EXPECTED CLOSING QUOTE");
}

#[test]
fn test_string_value() {
    let t = tokenizer("\"A, B\"");
    assert_eq!(t.string().unwrap(), "A, B");
}

#[test]
fn test_end_of_input_is_sticky() {
    let mut t = tokenizer("X");
    t.next_token().unwrap();
    assert!(t.is_finished());
    t.next_token().unwrap();
    assert_eq!(t.token(), Token::EndOfInput);
}

#[test]
fn test_accept() {
    let mut t = tokenizer("( 1");
    t.accept(Token::LParen).unwrap();
    let e = t.accept(Token::RParen).unwrap_err();
    assert_eq!(e.to_string(), "SYNTAX ERROR; EXPECTED ), GOT INTEGER");
}

#[test]
fn test_unknown_character() {
    assert_eq!(tokens("@"), vec![Token::Error]);
}
