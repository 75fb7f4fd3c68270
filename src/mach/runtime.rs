use super::evaluator::{Evaluator, FunctionDef};
use super::val::boolean_expected;
use super::{Config, Console, Stack, Val, Var};
use crate::error;
use crate::lang::token::{Ident, Literal, Operator, Token, Word};
use crate::lang::{Error, LineNumber, Tokenizer};
use log::{debug, trace, warn};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Highest column `TAB` will move to.
pub const MAX_TAB: i64 = 255;

#[derive(Debug, Clone)]
struct GosubRecord {
    line_number: LineNumber,
    position: usize,
}

#[derive(Debug, Clone)]
struct ForRecord {
    var: Rc<str>,
    line_number: LineNumber,
    position: usize,
    from: f64,
    to: f64,
    step: f64,
}

/// What the rest of the line does after a statement.
enum Flow {
    /// Keep going with the next statement on this line.
    Continue,
    /// The tokenizer was moved or the program ended. The line is over.
    Transfer,
}

/// ## Statement interpreter
///
/// Executes a program one line per [`Runtime::run`]. The host calls
/// [`Runtime::init`] and then `run` until [`Runtime::is_finished`].
///
/// Line numbers are indexed as lines execute. A jump to a line that has
/// not been seen yet scans forward from the start of the program, adding
/// every line it passes to the index.
pub struct Runtime<C: Console> {
    console: C,
    source: Rc<str>,
    tokenizer: Tokenizer,
    evaluator: Evaluator,
    program_start: usize,
    line_number: LineNumber,
    line_index: HashMap<u16, usize>,
    line_scans: usize,
    gosub: Stack<GosubRecord>,
    for_loops: Stack<ForRecord>,
    data: VecDeque<Val>,
    data_position: usize,
    input: VecDeque<String>,
    ended: bool,
}

impl<C: Console> Runtime<C> {
    pub fn new(source: &str, console: C) -> Runtime<C> {
        Runtime::with_config(source, console, Config::default())
    }

    pub fn with_config(source: &str, console: C, config: Config) -> Runtime<C> {
        let source: Rc<str> = source.into();
        Runtime {
            console,
            tokenizer: Tokenizer::new(source.clone()),
            source,
            evaluator: Evaluator::new(&config),
            program_start: 0,
            line_number: None,
            line_index: HashMap::new(),
            line_scans: 0,
            gosub: Stack::new(config.gosub_depth, "GOSUB STACK OVERFLOW")
                .on_underflow(|| error!(ReturnWithoutGosub)),
            for_loops: Stack::new(config.for_depth, "FOR STACK OVERFLOW")
                .on_underflow(|| error!(NextWithoutFor)),
            data: VecDeque::new(),
            data_position: 0,
            input: VecDeque::new(),
            ended: true,
        }
    }

    /// Reset all program state and place the cursor at `position`.
    pub fn init(&mut self, position: usize) -> Result<()> {
        debug!("init at {} of {} bytes", position, self.source.len());
        self.program_start = position;
        self.line_number = None;
        self.line_index.clear();
        self.line_scans = 0;
        self.gosub.clear();
        self.for_loops.clear();
        self.data.clear();
        self.data_position = position;
        self.input.clear();
        self.evaluator.clear();
        self.ended = false;
        self.tokenizer.init(position)
    }

    /// Execute one line. Errors carry the line number they happened in
    /// and end the program.
    pub fn run(&mut self) -> Result<()> {
        if self.is_finished() {
            return Ok(());
        }
        match self.line_statement() {
            Ok(()) => Ok(()),
            Err(error) => {
                self.ended = true;
                if error.is_direct() {
                    Err(error.in_line_number(self.line_number))
                } else {
                    Err(error)
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ended || self.tokenizer.is_finished()
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    pub fn variables(&self) -> &Var {
        self.evaluator.variables()
    }

    pub fn variables_mut(&mut self) -> &mut Var {
        self.evaluator.variables_mut()
    }

    /// Line currently executing, or the last one executed.
    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    /// Number of forward scans made to resolve jumps to unindexed lines.
    pub fn line_scans(&self) -> usize {
        self.line_scans
    }

    pub fn for_depth(&self) -> usize {
        self.for_loops.len()
    }

    pub fn gosub_depth(&self) -> usize {
        self.gosub.len()
    }

    fn line_statement(&mut self) -> Result<()> {
        match self.tokenizer.token() {
            Token::Literal(Literal::Integer) => {
                let line_number = self.tokenizer.line_number()?;
                self.line_index
                    .insert(line_number, self.tokenizer.position());
                self.line_number = Some(line_number);
                trace!("line {}", line_number);
                self.tokenizer.next_token()?;
            }
            // Resuming after a GOSUB or FOR part way through a line.
            Token::Colon => self.tokenizer.next_token()?,
            // Resuming inside a THEN branch; the ELSE branch is not taken.
            Token::Word(Word::Else) => return self.tokenizer.skip_tokens(),
            Token::Cr | Token::Newline => return self.end_of_line(),
            Token::EndOfInput => return Ok(()),
            other => {
                return Err(error!(SyntaxError;
                    format!("EXPECTED LINE NUMBER, GOT {}", other)))
            }
        }
        self.statements()
    }

    fn statements(&mut self) -> Result<()> {
        loop {
            if let Flow::Transfer = self.statement()? {
                return Ok(());
            }
            match self.tokenizer.token() {
                Token::Colon => self.tokenizer.next_token()?,
                // Reached the end of a THEN branch that was taken.
                Token::Word(Word::Else) => return self.tokenizer.skip_tokens(),
                Token::Cr | Token::Newline | Token::EndOfInput => return self.end_of_line(),
                other => {
                    return Err(error!(SyntaxError;
                        format!("EXPECTED END OF STATEMENT, GOT {}", other)))
                }
            }
        }
    }

    fn end_of_line(&mut self) -> Result<()> {
        if self.tokenizer.token() == Token::Cr {
            self.tokenizer.next_token()?;
        }
        match self.tokenizer.token() {
            Token::Newline => self.tokenizer.next_token(),
            Token::EndOfInput => Ok(()),
            other => Err(error!(SyntaxError; format!("EXPECTED END OF LINE, GOT {}", other))),
        }
    }

    fn statement(&mut self) -> Result<Flow> {
        match self.tokenizer.token() {
            Token::Word(word) => match word {
                Word::Data | Word::Rem => {
                    self.tokenizer.skip_tokens()?;
                    Ok(Flow::Transfer)
                }
                Word::Def => self.r#def(),
                Word::Dim => self.r#dim(),
                Word::End | Word::Stop => {
                    self.tokenizer.next_token()?;
                    self.ended = true;
                    Ok(Flow::Transfer)
                }
                Word::For => self.r#for(),
                Word::Gosub => self.r#gosub(),
                Word::Goto => self.r#goto(),
                Word::If => self.r#if(),
                Word::Input => self.r#input(),
                Word::Let => {
                    self.tokenizer.next_token()?;
                    self.r#let()
                }
                Word::Next => self.r#next(),
                Word::On => self.r#on(),
                Word::Print => self.r#print(),
                Word::Randomize => self.r#randomize(),
                Word::Read => self.r#read(),
                Word::Restore => self.r#restore(),
                Word::Return => self.r#return(),
                _ => Err(error!(SyntaxError; format!("UNEXPECTED {}", word))),
            },
            Token::Ident(_) => self.r#let(),
            Token::Colon | Token::Cr | Token::Newline | Token::EndOfInput => Ok(Flow::Continue),
            other => Err(error!(SyntaxError; format!("EXPECTED STATEMENT, GOT {}", other))),
        }
    }

    fn r#let(&mut self) -> Result<Flow> {
        loop {
            let target = self.evaluator.target(&mut self.tokenizer)?;
            self.tokenizer.accept(Token::Operator(Operator::Equal))?;
            let val = self.evaluator.evaluate_object(&mut self.tokenizer)?;
            self.evaluator.store(&target, val)?;
            if self.tokenizer.token() != Token::Comma {
                return Ok(Flow::Continue);
            }
            self.tokenizer.next_token()?;
        }
    }

    fn r#print(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let mut separated = false;
        let mut after_number = false;
        loop {
            match self.tokenizer.token() {
                Token::Colon
                | Token::Cr
                | Token::Newline
                | Token::EndOfInput
                | Token::Word(Word::Else) => break,
                Token::Comma => {
                    self.tokenizer.next_token()?;
                    let zone = self.console.zone().max(1);
                    let pad = zone - self.console.hpos() % zone;
                    self.console.out(&" ".repeat(pad));
                    separated = true;
                    after_number = false;
                }
                Token::Semicolon => {
                    self.tokenizer.next_token()?;
                    if after_number {
                        let compact = self.console.compact().max(1);
                        let pad = compact - self.console.hpos() % compact;
                        self.console.out(&" ".repeat(pad));
                    }
                    separated = true;
                    after_number = false;
                }
                Token::Word(Word::Tab) => {
                    self.tokenizer.next_token()?;
                    self.tokenizer.accept(Token::LParen)?;
                    let column = self.evaluator.evaluate_integer(&mut self.tokenizer)?;
                    self.tokenizer.accept(Token::RParen)?;
                    if !(0..=MAX_TAB).contains(&column) {
                        return Err(error!(IllegalFunctionCall;
                            format!("TAB({}) NOT IN 0 TO {}", column, MAX_TAB)));
                    }
                    let hpos = self.console.hpos() as i64;
                    if column > hpos {
                        self.console.out(&" ".repeat((column - hpos) as usize));
                    }
                    separated = false;
                    after_number = false;
                }
                _ => {
                    let val = self.evaluator.evaluate_object(&mut self.tokenizer)?;
                    after_number = matches!(val, Val::Number(_));
                    self.console.out(&val.to_string());
                    separated = false;
                }
            }
        }
        if !separated {
            self.console.out("\n");
        }
        Ok(Flow::Continue)
    }

    fn r#input(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        if self.tokenizer.token() == Token::Literal(Literal::String) {
            let prompt = self.tokenizer.string()?;
            self.tokenizer.next_token()?;
            if let Token::Semicolon | Token::Comma = self.tokenizer.token() {
                self.tokenizer.next_token()?;
            }
            self.console.out(&prompt);
        } else {
            self.console.out("? ");
        }
        loop {
            let target = self.evaluator.target(&mut self.tokenizer)?;
            let field = self.input_field()?;
            let val = if target.ident.is_string() {
                Val::String(field)
            } else {
                match field.parse::<f64>() {
                    Ok(n) => Val::Number(n),
                    Err(_) => {
                        let error = error!(TypeMismatch, self.line_number;
                            format!("INPUT {:?} IS NOT A NUMBER", field));
                        warn!("{}", error);
                        self.console.error(&error.to_string());
                        Val::Number(0.0)
                    }
                }
            };
            self.evaluator.store(&target, val)?;
            if self.tokenizer.token() != Token::Comma {
                return Ok(Flow::Continue);
            }
            self.tokenizer.next_token()?;
        }
    }

    /// Next comma separated field of console input, reading a new line
    /// only once the previous one is used up.
    fn input_field(&mut self) -> Result<String> {
        if self.input.is_empty() {
            let line = self.console.input()?;
            self.input
                .extend(line.split(',').map(|field| field.trim().to_string()));
        }
        Ok(self.input.pop_front().unwrap_or_default())
    }

    fn r#if(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let condition = match self.evaluator.evaluate_object(&mut self.tokenizer)? {
            Val::Boolean(b) => b,
            Val::Number(n) => n != 0.0,
            Val::String(_) => return Err(boolean_expected()),
        };
        let goto = match self.tokenizer.token() {
            Token::Word(Word::Then) => false,
            Token::Word(Word::Goto) => true,
            other => return Err(error!(SyntaxError; format!("EXPECTED THEN, GOT {}", other))),
        };
        self.tokenizer.next_token()?;
        if condition {
            return self.consequent(goto);
        }
        loop {
            match self.tokenizer.token() {
                Token::Word(Word::Else) => {
                    self.tokenizer.next_token()?;
                    return self.consequent(false);
                }
                Token::Word(Word::Rem) => {
                    self.tokenizer.skip_tokens()?;
                    return Ok(Flow::Transfer);
                }
                Token::Cr | Token::Newline | Token::EndOfInput => return Ok(Flow::Continue),
                _ => self.tokenizer.next_token()?,
            }
        }
    }

    fn consequent(&mut self, goto: bool) -> Result<Flow> {
        match self.tokenizer.token() {
            Token::Literal(Literal::Integer) => {
                let line_number = self.tokenizer.line_number()?;
                self.tokenizer.next_token()?;
                self.jump_line_number(line_number)?;
                Ok(Flow::Transfer)
            }
            other if goto => Err(error!(SyntaxError;
                format!("EXPECTED LINE NUMBER, GOT {}", other))),
            // THEN followed by a variable evaluates it as an expression and
            // drops the value. No assignment and no jump.
            Token::Ident(_) => {
                self.evaluator.evaluate_object(&mut self.tokenizer)?;
                Ok(Flow::Continue)
            }
            _ => self.statement(),
        }
    }

    fn r#on(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let index = self.evaluator.evaluate_integer(&mut self.tokenizer)?;
        let gosub = match self.tokenizer.token() {
            Token::Word(Word::Goto) | Token::Word(Word::Then) => false,
            Token::Word(Word::Gosub) => true,
            other => return Err(error!(SyntaxError; format!("EXPECTED GOTO, GOT {}", other))),
        };
        self.tokenizer.next_token()?;
        let mut targets = vec![];
        loop {
            targets.push(self.tokenizer.line_number()?);
            self.tokenizer.next_token()?;
            if self.tokenizer.token() != Token::Comma {
                break;
            }
            self.tokenizer.next_token()?;
        }
        if index < 1 || index as usize > targets.len() {
            return Err(error!(IllegalFunctionCall;
                format!("ON INDEX {} NOT IN 1 TO {}", index, targets.len())));
        }
        if gosub {
            self.push_return()?;
        }
        self.jump_line_number(targets[index as usize - 1])?;
        Ok(Flow::Transfer)
    }

    fn r#for(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let target = self.evaluator.target(&mut self.tokenizer)?;
        if target.ident != Ident::Numeric {
            return Err(error!(SyntaxError; "EXPECTED NUMERIC VARIABLE"));
        }
        self.tokenizer.accept(Token::Operator(Operator::Equal))?;
        let from = self.evaluator.evaluate_number(&mut self.tokenizer)?;
        self.tokenizer.accept(Token::Word(Word::To))?;
        let to = self.evaluator.evaluate_number(&mut self.tokenizer)?;
        let step = if self.tokenizer.token() == Token::Word(Word::Step) {
            self.tokenizer.next_token()?;
            self.evaluator.evaluate_number(&mut self.tokenizer)?
        } else {
            1.0
        };
        self.evaluator.store(&target, Val::Number(from))?;
        // A FOR on a variable that already has a loop takes over that slot
        // and abandons any loops opened after it.
        if let Some(index) = self.for_loops.iter().position(|r| r.var == target.name) {
            self.for_loops.truncate(index);
        }
        self.for_loops.push(ForRecord {
            var: target.name,
            line_number: self.line_number,
            position: self.tokenizer.position(),
            from,
            to,
            step,
        })?;
        Ok(Flow::Continue)
    }

    fn r#next(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        loop {
            let name = match self.tokenizer.token() {
                Token::Ident(Ident::Numeric) => {
                    let name = self.tokenizer.variable_name()?;
                    self.tokenizer.next_token()?;
                    Some(name)
                }
                _ => None,
            };
            let record = match self.for_loops.last() {
                Some(record) => record.clone(),
                None => return Err(error!(NextWithoutFor)),
            };
            if let Some(name) = name {
                if name != record.var {
                    return Err(error!(NextWithoutFor; format!(
                        "NEXT {} DOES NOT MATCH FOR {}",
                        name.to_ascii_uppercase(),
                        record.var.to_ascii_uppercase()
                    )));
                }
            }
            let value = self.evaluator.variables().numeric(&record.var) + record.step;
            self.evaluator
                .variables_mut()
                .set_numeric(&record.var, value);
            let done = if record.step >= 0.0 {
                value > record.to
            } else {
                value < record.to
            };
            if !done {
                trace!(
                    "loop {} from {} to {} now {}",
                    record.var,
                    record.from,
                    record.to,
                    value
                );
                self.resume(record.line_number, record.position)?;
                return Ok(Flow::Transfer);
            }
            self.for_loops.pop()?;
            if self.tokenizer.token() != Token::Comma {
                return Ok(Flow::Continue);
            }
            self.tokenizer.next_token()?;
        }
    }

    fn r#goto(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let line_number = self.tokenizer.line_number()?;
        self.tokenizer.next_token()?;
        self.jump_line_number(line_number)?;
        Ok(Flow::Transfer)
    }

    fn r#gosub(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let line_number = self.tokenizer.line_number()?;
        self.tokenizer.next_token()?;
        self.push_return()?;
        self.jump_line_number(line_number)?;
        Ok(Flow::Transfer)
    }

    fn r#return(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let record = self.gosub.pop()?;
        self.resume(record.line_number, record.position)?;
        Ok(Flow::Transfer)
    }

    /// Remember the end of the current statement. RETURN continues from
    /// there, mid-line or at the end of the line.
    fn push_return(&mut self) -> Result<()> {
        self.gosub.push(GosubRecord {
            line_number: self.line_number,
            position: self.tokenizer.position(),
        })
    }

    fn resume(&mut self, line_number: LineNumber, position: usize) -> Result<()> {
        self.line_number = line_number;
        self.tokenizer.goto_position(position)
    }

    fn r#dim(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        loop {
            let ident = match self.tokenizer.token() {
                Token::Ident(ident) if ident.is_array() => ident,
                other => return Err(error!(SyntaxError; format!("EXPECTED ARRAY, GOT {}", other))),
            };
            let name = self.tokenizer.variable_name()?;
            self.tokenizer.next_token()?;
            let bounds = self.evaluator.subscripts(&mut self.tokenizer)?;
            let vars = self.evaluator.variables_mut();
            if ident.is_string() {
                vars.dimension_string_array(&name, &bounds)?;
            } else {
                vars.dimension_numeric_array(&name, &bounds)?;
            }
            if self.tokenizer.token() != Token::Comma {
                return Ok(Flow::Continue);
            }
            self.tokenizer.next_token()?;
        }
    }

    fn r#def(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        self.tokenizer.accept(Token::Word(Word::Fn))?;
        let (letter, ident) = Evaluator::function_name(&self.tokenizer)?;
        self.tokenizer.next_token()?;
        let mut params = vec![];
        if ident == Ident::NumericArray {
            while self.tokenizer.token() != Token::RParen {
                match self.tokenizer.token() {
                    Token::Ident(Ident::Numeric) => {
                        params.push(self.tokenizer.variable_name()?);
                        self.tokenizer.next_token()?;
                    }
                    other => {
                        return Err(error!(SyntaxError;
                            format!("EXPECTED PARAMETER, GOT {}", other)))
                    }
                }
                if self.tokenizer.token() != Token::Comma {
                    break;
                }
                self.tokenizer.next_token()?;
            }
            self.tokenizer.accept(Token::RParen)?;
        }
        self.tokenizer.accept(Token::Operator(Operator::Equal))?;
        let def = FunctionDef::new(self.tokenizer.position(), params);
        self.evaluator.define_function(letter, def)?;
        while !self.tokenizer.token().is_separator() {
            self.tokenizer.next_token()?;
        }
        Ok(Flow::Continue)
    }

    fn r#read(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        loop {
            let target = self.evaluator.target(&mut self.tokenizer)?;
            if self.data.is_empty() {
                self.read_data()?;
            }
            let val = match self.data.pop_front() {
                Some(val) => val,
                None => return Err(error!(OutOfData)),
            };
            self.evaluator.store(&target, val)?;
            if self.tokenizer.token() != Token::Comma {
                return Ok(Flow::Continue);
            }
            self.tokenizer.next_token()?;
        }
    }

    /// Scan forward from the last DATA read for the next DATA statement
    /// and queue its values.
    fn read_data(&mut self) -> Result<()> {
        debug!("scanning for DATA from {}", self.data_position);
        let mut t = Tokenizer::new(self.source.clone());
        t.init(self.data_position)?;
        loop {
            match t.token() {
                Token::EndOfInput => {
                    self.data_position = t.position();
                    self.ended = true;
                    return Err(error!(OutOfData));
                }
                Token::Word(Word::Rem) => t.skip_tokens()?,
                Token::Word(Word::Data) => {
                    t.next_token()?;
                    loop {
                        self.data.push_back(Runtime::<C>::datum(&mut t)?);
                        if t.token() != Token::Comma {
                            break;
                        }
                        t.next_token()?;
                    }
                    self.data_position = t.position();
                    return Ok(());
                }
                _ => t.next_token()?,
            }
        }
    }

    fn datum(t: &mut Tokenizer) -> Result<Val> {
        let negative = match t.token() {
            Token::Operator(Operator::Minus) => {
                t.next_token()?;
                true
            }
            Token::Operator(Operator::Plus) => {
                t.next_token()?;
                false
            }
            _ => false,
        };
        let val = match t.token() {
            Token::Literal(Literal::Integer) | Token::Literal(Literal::Number) => {
                let n = t.number()?;
                Val::Number(if negative { -n } else { n })
            }
            Token::Literal(Literal::String) if !negative => Val::String(t.string()?),
            other => return Err(error!(SyntaxError; format!("EXPECTED DATA, GOT {}", other))),
        };
        t.next_token()?;
        Ok(val)
    }

    fn r#restore(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        self.data.clear();
        self.data_position = self.program_start;
        Ok(Flow::Continue)
    }

    fn r#randomize(&mut self) -> Result<Flow> {
        self.tokenizer.next_token()?;
        let seed = chrono::Utc::now().timestamp_millis() as u64;
        debug!("randomize with seed {}", seed);
        self.evaluator.randomize(seed);
        Ok(Flow::Continue)
    }

    /// Move the tokenizer to the start of `line_number`. Lines already
    /// executed or scanned are found in the index; otherwise the program
    /// is scanned from the start.
    fn jump_line_number(&mut self, line_number: u16) -> Result<()> {
        let position = match self.line_index.get(&line_number) {
            Some(&position) => position,
            None => self.scan_for_line(line_number)?,
        };
        self.tokenizer.goto_position(position)
    }

    fn scan_for_line(&mut self, line_number: u16) -> Result<usize> {
        self.line_scans += 1;
        debug!("line {} not indexed, scanning", line_number);
        let mut t = Tokenizer::new(self.source.clone());
        t.init(self.program_start)?;
        loop {
            match t.token() {
                Token::EndOfInput => {
                    return Err(error!(UndefinedLine; format!("{}", line_number)));
                }
                Token::Literal(Literal::Integer) => {
                    if let Ok(found) = t.line_number() {
                        self.line_index.insert(found, t.position());
                        if found == line_number {
                            return Ok(t.position());
                        }
                    }
                }
                _ => {}
            }
            t.skip_tokens()?;
        }
    }
}
