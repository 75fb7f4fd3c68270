use super::{Config, Function, Operation, Stack, Val, Var};
use crate::error;
use crate::lang::token::{Ident, Literal, Operator, Token, Word};
use crate::lang::{Error, Tokenizer};
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Seed the RND counter starts from until a RANDOMIZE.
pub const INITIAL_SEED: u64 = 0x5EED_0000;

const MAX_FN_NESTING: usize = 64;

/// A `DEF FN` body: where its expression starts in the program text and
/// the numeric variables its arguments are bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    position: usize,
    params: Vec<Rc<str>>,
}

impl FunctionDef {
    pub fn new(position: usize, params: Vec<Rc<str>>) -> FunctionDef {
        FunctionDef { position, params }
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn params(&self) -> &[Rc<str>] {
        &self.params
    }
}

/// An assignable location: a scalar, or an array element once the
/// subscripts have been evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: Rc<str>,
    pub ident: Ident,
    pub indices: Vec<usize>,
}

/// ## Expression evaluator
///
/// Parsing and evaluation happen in the same pass. Each production reads
/// tokens and leaves exactly one value on the operand stack; operators pop
/// their operands and push the result.
///
/// ```text
/// or_expression  := and_expression { (OR | XOR) and_expression }
/// and_expression := not_expression { AND not_expression }
/// not_expression := NOT not_expression | relation
/// relation       := expression [ (= | < | > | <= | >= | <>) expression ]
/// expression     := [+ | -] term { (+ | -) term }
/// term           := exponent { (* | / | MOD | %) exponent }
/// exponent       := factor { ^ factor }
/// ```
#[derive(Debug)]
pub struct Evaluator {
    stack: Stack<Val>,
    vars: Var,
    functions: [Option<FunctionDef>; 26],
    seed: u64,
    fn_nesting: usize,
}

impl Evaluator {
    pub fn new(config: &Config) -> Evaluator {
        Evaluator {
            stack: Stack::new(config.stack_depth, "EXPRESSION TOO COMPLEX"),
            vars: Var::new(),
            functions: Default::default(),
            seed: INITIAL_SEED,
            fn_nesting: 0,
        }
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.vars.clear();
        self.functions = Default::default();
        self.seed = INITIAL_SEED;
        self.fn_nesting = 0;
    }

    pub fn variables(&self) -> &Var {
        &self.vars
    }

    pub fn variables_mut(&mut self) -> &mut Var {
        &mut self.vars
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn randomize(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn define_function(&mut self, letter: char, def: FunctionDef) -> Result<()> {
        let slot = Evaluator::function_slot(letter)?;
        self.functions[slot] = Some(def);
        Ok(())
    }

    pub fn function(&self, letter: char) -> Option<&FunctionDef> {
        let slot = Evaluator::function_slot(letter).ok()?;
        self.functions[slot].as_ref()
    }

    pub fn push(&mut self, val: Val) -> Result<()> {
        self.stack.push(val)
    }

    pub fn pop_object(&mut self) -> Result<Val> {
        self.stack.pop()
    }

    pub fn pop_number(&mut self) -> Result<f64> {
        f64::try_from(self.stack.pop()?)
    }

    pub fn pop_string(&mut self) -> Result<String> {
        String::try_from(self.stack.pop()?)
    }

    pub fn pop_boolean(&mut self) -> Result<bool> {
        bool::try_from(self.stack.pop()?)
    }

    pub fn pop_integer(&mut self) -> Result<i64> {
        i64::try_from(self.stack.pop()?)
    }

    /// Evaluate a full expression, logical operators included, leaving its
    /// value on the stack.
    pub fn evaluate(&mut self, t: &mut Tokenizer) -> Result<()> {
        self.or_expression(t)
    }

    /// Evaluate and pop in one step.
    pub fn evaluate_object(&mut self, t: &mut Tokenizer) -> Result<Val> {
        self.or_expression(t)?;
        self.pop_object()
    }

    pub fn evaluate_number(&mut self, t: &mut Tokenizer) -> Result<f64> {
        self.or_expression(t)?;
        self.pop_number()
    }

    pub fn evaluate_integer(&mut self, t: &mut Tokenizer) -> Result<i64> {
        self.or_expression(t)?;
        self.pop_integer()
    }

    fn or_expression(&mut self, t: &mut Tokenizer) -> Result<()> {
        self.and_expression(t)?;
        loop {
            let op: fn(Val, Val) -> Result<Val> = match t.token() {
                Token::Word(Word::Or) => Operation::or,
                Token::Word(Word::Xor) => Operation::xor,
                _ => return Ok(()),
            };
            t.next_token()?;
            self.and_expression(t)?;
            self.binary(op)?;
        }
    }

    fn and_expression(&mut self, t: &mut Tokenizer) -> Result<()> {
        self.not_expression(t)?;
        while t.token() == Token::Word(Word::And) {
            t.next_token()?;
            self.not_expression(t)?;
            self.binary(Operation::and)?;
        }
        Ok(())
    }

    fn not_expression(&mut self, t: &mut Tokenizer) -> Result<()> {
        if t.token() == Token::Word(Word::Not) {
            t.next_token()?;
            self.not_expression(t)?;
            let val = self.stack.pop()?;
            return self.stack.push(Operation::not(val)?);
        }
        self.relation(t)
    }

    fn relation(&mut self, t: &mut Tokenizer) -> Result<()> {
        self.expression(t)?;
        let op: fn(Val, Val) -> Result<Val> = match t.token() {
            Token::Operator(Operator::Equal) => {
                t.next_token()?;
                Operation::equal
            }
            Token::Operator(Operator::Less) => {
                t.next_token()?;
                match t.token() {
                    Token::Operator(Operator::Equal) => {
                        t.next_token()?;
                        Operation::less_equal
                    }
                    Token::Operator(Operator::Greater) => {
                        t.next_token()?;
                        Operation::not_equal
                    }
                    _ => Operation::less,
                }
            }
            Token::Operator(Operator::Greater) => {
                t.next_token()?;
                match t.token() {
                    Token::Operator(Operator::Equal) => {
                        t.next_token()?;
                        Operation::greater_equal
                    }
                    _ => Operation::greater,
                }
            }
            _ => return Ok(()),
        };
        self.expression(t)?;
        self.binary(op)
    }

    /// Additive level. A leading minus is 0 minus the first term.
    pub fn expression(&mut self, t: &mut Tokenizer) -> Result<()> {
        match t.token() {
            Token::Operator(Operator::Minus) => {
                t.next_token()?;
                self.stack.push(Val::Number(0.0))?;
                self.term(t)?;
                self.binary(Operation::subtract)?;
            }
            Token::Operator(Operator::Plus) => {
                t.next_token()?;
                self.term(t)?;
            }
            _ => self.term(t)?,
        }
        loop {
            let op: fn(Val, Val) -> Result<Val> = match t.token() {
                Token::Operator(Operator::Plus) => Operation::sum,
                Token::Operator(Operator::Minus) => Operation::subtract,
                _ => return Ok(()),
            };
            t.next_token()?;
            self.term(t)?;
            self.binary(op)?;
        }
    }

    fn term(&mut self, t: &mut Tokenizer) -> Result<()> {
        self.exponent(t)?;
        loop {
            let op: fn(Val, Val) -> Result<Val> = match t.token() {
                Token::Operator(Operator::Multiply) => Operation::multiply,
                Token::Operator(Operator::Divide) => Operation::divide,
                Token::Operator(Operator::Percent) | Token::Word(Word::Mod) => Operation::modulus,
                _ => return Ok(()),
            };
            t.next_token()?;
            self.exponent(t)?;
            self.binary(op)?;
        }
    }

    fn exponent(&mut self, t: &mut Tokenizer) -> Result<()> {
        self.factor(t)?;
        while t.token() == Token::Operator(Operator::Caret) {
            t.next_token()?;
            self.factor(t)?;
            self.binary(Operation::power)?;
        }
        Ok(())
    }

    fn factor(&mut self, t: &mut Tokenizer) -> Result<()> {
        match t.token() {
            Token::Literal(Literal::Integer) | Token::Literal(Literal::Number) => {
                let n = t.number()?;
                t.next_token()?;
                self.stack.push(Val::Number(n))
            }
            Token::Literal(Literal::String) => {
                let s = t.string()?;
                t.next_token()?;
                self.stack.push(Val::String(s))
            }
            Token::LParen => {
                t.accept(Token::LParen)?;
                self.or_expression(t)?;
                t.accept(Token::RParen)
            }
            Token::Operator(Operator::Minus) => {
                t.next_token()?;
                self.stack.push(Val::Number(0.0))?;
                self.factor(t)?;
                self.binary(Operation::subtract)
            }
            Token::Ident(_) => {
                let target = self.target(t)?;
                let val = self.fetch(&target)?;
                self.stack.push(val)
            }
            Token::Word(Word::Fn) => self.call_function(t),
            Token::Word(word) if Function::arity(word).is_some() => self.call_builtin(t, word),
            other => Err(error!(SyntaxError; format!("EXPECTED EXPRESSION, GOT {}", other))),
        }
    }

    /// Read a variable reference, evaluating subscripts for arrays.
    pub fn target(&mut self, t: &mut Tokenizer) -> Result<Target> {
        let ident = match t.token() {
            Token::Ident(ident) => ident,
            other => {
                return Err(error!(SyntaxError; format!("EXPECTED VARIABLE, GOT {}", other)))
            }
        };
        let name = t.variable_name()?;
        t.next_token()?;
        let indices = if ident.is_array() {
            self.subscripts(t)?
        } else {
            vec![]
        };
        Ok(Target {
            name,
            ident,
            indices,
        })
    }

    /// Comma separated subscripts through the closing parenthesis. The
    /// opening parenthesis belongs to the array token.
    pub fn subscripts(&mut self, t: &mut Tokenizer) -> Result<Vec<usize>> {
        let mut indices = vec![];
        loop {
            let n = self.evaluate_number(t)?;
            if !(n >= 0.0 && n < usize::max_value() as f64) {
                return Err(error!(SubscriptOutOfRange));
            }
            indices.push(n as usize);
            if t.token() != Token::Comma {
                break;
            }
            t.next_token()?;
        }
        t.accept(Token::RParen)?;
        Ok(indices)
    }

    pub fn fetch(&mut self, target: &Target) -> Result<Val> {
        Ok(match target.ident {
            Ident::Numeric => Val::Number(self.vars.numeric(&target.name)),
            Ident::String => Val::String(self.vars.string(&target.name)),
            Ident::NumericArray => {
                Val::Number(self.vars.numeric_array(&target.name, &target.indices)?)
            }
            Ident::StringArray => {
                Val::String(self.vars.string_array(&target.name, &target.indices)?)
            }
        })
    }

    pub fn store(&mut self, target: &Target, val: Val) -> Result<()> {
        match target.ident {
            Ident::Numeric => self.vars.set_numeric(&target.name, f64::try_from(val)?),
            Ident::String => self.vars.set_string(&target.name, String::try_from(val)?),
            Ident::NumericArray => {
                self.vars
                    .set_numeric_array(&target.name, &target.indices, f64::try_from(val)?)?
            }
            Ident::StringArray => {
                self.vars
                    .set_string_array(&target.name, &target.indices, String::try_from(val)?)?
            }
        }
        Ok(())
    }

    fn call_builtin(&mut self, t: &mut Tokenizer, word: Word) -> Result<()> {
        t.next_token()?;
        let mut count = 0;
        if t.token() == Token::LParen {
            t.next_token()?;
            loop {
                self.or_expression(t)?;
                count += 1;
                if t.token() != Token::Comma {
                    break;
                }
                t.next_token()?;
            }
            t.accept(Token::RParen)?;
        }
        let arity = Function::arity(word).unwrap_or(0..=0);
        if !arity.contains(&count) {
            return Err(error!(SyntaxError; format!("WRONG NUMBER OF ARGUMENTS TO {}", word)));
        }
        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            args.push(self.stack.pop()?);
        }
        args.reverse();
        let val = if word == Word::Rnd {
            self.seed = self.seed.wrapping_sub(1);
            Function::rnd(self.seed)
        } else {
            Function::call(word, args)?
        };
        self.stack.push(val)
    }

    /// `FNx(args)`. Arguments are evaluated where the call is, bound to the
    /// formal parameters as ordinary numeric variables, then the body is
    /// evaluated in place and the tokenizer returns to the call site. The
    /// parameters keep their values after the call.
    fn call_function(&mut self, t: &mut Tokenizer) -> Result<()> {
        t.accept(Token::Word(Word::Fn))?;
        let (letter, ident) = Evaluator::function_name(t)?;
        t.next_token()?;
        let mut count = 0;
        if ident == Ident::NumericArray {
            loop {
                self.or_expression(t)?;
                count += 1;
                if t.token() != Token::Comma {
                    break;
                }
                t.next_token()?;
            }
            t.accept(Token::RParen)?;
        }
        let def = match self.function(letter) {
            Some(def) => def.clone(),
            None => return Err(error!(UndefinedUserFunction; format!("FN{}", letter))),
        };
        if def.params.len() != count {
            return Err(error!(SyntaxError; format!("WRONG NUMBER OF ARGUMENTS TO FN{}", letter)));
        }
        for param in def.params.iter().rev() {
            let n = self.pop_number()?;
            self.vars.set_numeric(param, n);
        }
        if self.fn_nesting >= MAX_FN_NESTING {
            return Err(error!(OutOfMemory; "FN NESTING TOO DEEP"));
        }
        let call_site = t.position();
        self.fn_nesting += 1;
        t.goto_position(def.position)?;
        let result = self.or_expression(t);
        self.fn_nesting -= 1;
        t.goto_position(call_site)?;
        result
    }

    /// The single letter naming a user function, read from the variable
    /// token after `FN`.
    pub fn function_name(t: &Tokenizer) -> Result<(char, Ident)> {
        match t.token() {
            Token::Ident(ident @ Ident::Numeric) | Token::Ident(ident @ Ident::NumericArray) => {
                let letter = t.lexeme().chars().next().unwrap_or('?');
                Ok((letter.to_ascii_uppercase(), ident))
            }
            other => Err(error!(SyntaxError; format!("EXPECTED FUNCTION NAME, GOT {}", other))),
        }
    }

    fn function_slot(letter: char) -> Result<usize> {
        if letter.is_ascii_alphabetic() {
            Ok((letter.to_ascii_uppercase() as u8 - b'A') as usize)
        } else {
            Err(error!(SyntaxError; "EXPECTED FUNCTION NAME"))
        }
    }

    fn binary(&mut self, op: fn(Val, Val) -> Result<Val>) -> Result<()> {
        let (lhs, rhs) = self.stack.pop_2()?;
        self.stack.push(op(lhs, rhs)?)
    }
}
