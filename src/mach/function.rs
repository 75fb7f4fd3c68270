use super::val::format_number;
use super::Val;
use crate::error;
use crate::lang::token::Word;
use crate::lang::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Built-in functions. Arguments arrive already evaluated and in source
/// order; every function produces exactly one value.
pub struct Function {}

impl Function {
    /// Range of argument counts for each built-in, or `None` when the word
    /// is not a function.
    pub fn arity(word: Word) -> Option<std::ops::RangeInclusive<usize>> {
        use Word::*;
        match word {
            Abs | Atn | Cos | Exp | Int | Log | Sgn | Sin | Sqr | Tan => Some(1..=1),
            Asc | Val | Chr | Len | Str => Some(1..=1),
            Rnd => Some(0..=1),
            Left | Right => Some(2..=2),
            Mid => Some(2..=3),
            _ => None,
        }
    }

    pub fn call(word: Word, mut args: Vec<Val>) -> Result<Val> {
        match word {
            Word::Abs => Function::numeric(args, f64::abs),
            Word::Atn => Function::numeric(args, f64::atan),
            Word::Cos => Function::numeric(args, f64::cos),
            Word::Exp => Function::numeric(args, f64::exp),
            Word::Int => Function::numeric(args, f64::floor),
            Word::Log => Function::numeric(args, f64::ln),
            Word::Sin => Function::numeric(args, f64::sin),
            Word::Tan => Function::numeric(args, f64::tan),
            Word::Sgn => Function::numeric(args, |n| {
                if n > 0.0 {
                    1.0
                } else if n < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }),
            Word::Sqr => {
                let n = f64::try_from(Function::one(&mut args)?)?;
                if n < 0.0 {
                    return Err(error!(IllegalFunctionCall; "SQUARE ROOT OF NEGATIVE NUMBER"));
                }
                Ok(Val::Number(n.sqrt()))
            }
            Word::Asc => {
                let s = String::try_from(Function::one(&mut args)?)?;
                match s.chars().next() {
                    Some(ch) => Ok(Val::Number(ch as u32 as f64)),
                    None => Err(error!(IllegalFunctionCall; "ASC OF EMPTY STRING")),
                }
            }
            Word::Val => {
                let s = String::try_from(Function::one(&mut args)?)?;
                Ok(Val::Number(Function::val(&s)))
            }
            Word::Chr => {
                let n = i64::try_from(Function::one(&mut args)?)?;
                match u32::try_from(n).ok().and_then(std::char::from_u32) {
                    Some(ch) => Ok(Val::String(ch.to_string())),
                    None => Err(error!(IllegalFunctionCall; "INVALID CHARACTER CODE")),
                }
            }
            Word::Len => {
                let s = String::try_from(Function::one(&mut args)?)?;
                Ok(Val::Number(s.chars().count() as f64))
            }
            Word::Str => {
                let n = f64::try_from(Function::one(&mut args)?)?;
                Ok(Val::String(format_number(n)))
            }
            Word::Left => {
                let mut args = args.drain(..);
                let s = Function::next_string(&mut args)?;
                let n = Function::next_length(&mut args)?;
                Ok(Val::String(s.chars().take(n).collect()))
            }
            Word::Right => {
                let mut args = args.drain(..);
                let s = Function::next_string(&mut args)?;
                let n = Function::next_length(&mut args)?;
                let len = s.chars().count();
                Ok(Val::String(s.chars().skip(len.saturating_sub(n)).collect()))
            }
            Word::Mid => {
                let mut args = args.drain(..);
                let s = Function::next_string(&mut args)?;
                let start = Function::next_length(&mut args)?.max(1);
                let len = match args.next() {
                    Some(val) => Function::length(val)?,
                    None => usize::max_value(),
                };
                Ok(Val::String(s.chars().skip(start - 1).take(len).collect()))
            }
            _ => Err(error!(InternalError; format!("{} IS NOT A FUNCTION", word))),
        }
    }

    /// RND draws from a generator seeded by `seed`, so each call with a
    /// fresh seed is a fresh draw and the whole sequence is reproducible.
    pub fn rnd(seed: u64) -> Val {
        let mut rng = StdRng::seed_from_u64(seed);
        Val::Number(rng.gen::<f64>())
    }

    /// Leading numeric prefix of `s`, or 0.
    pub fn val(s: &str) -> f64 {
        let s = s.trim();
        let mut end = 0;
        let mut decimal = false;
        for (index, ch) in s.char_indices() {
            if ch.is_ascii_digit() || (index == 0 && (ch == '-' || ch == '+')) {
                end = index + 1;
            } else if ch == '.' && !decimal {
                decimal = true;
                end = index + 1;
            } else {
                break;
            }
        }
        s[..end].parse::<f64>().unwrap_or(0.0)
    }

    fn numeric(mut args: Vec<Val>, f: fn(f64) -> f64) -> Result<Val> {
        let n = f64::try_from(Function::one(&mut args)?)?;
        Ok(Val::Number(f(n)))
    }

    fn one(args: &mut Vec<Val>) -> Result<Val> {
        match args.pop() {
            Some(val) if args.is_empty() => Ok(val),
            _ => Err(error!(SyntaxError; "WRONG NUMBER OF ARGUMENTS")),
        }
    }

    fn next_string<I: Iterator<Item = Val>>(args: &mut I) -> Result<String> {
        match args.next() {
            Some(val) => String::try_from(val),
            None => Err(error!(SyntaxError; "WRONG NUMBER OF ARGUMENTS")),
        }
    }

    fn next_length<I: Iterator<Item = Val>>(args: &mut I) -> Result<usize> {
        match args.next() {
            Some(val) => Function::length(val),
            None => Err(error!(SyntaxError; "WRONG NUMBER OF ARGUMENTS")),
        }
    }

    /// Lengths below 1 are 0; BASIC string functions clamp instead of failing.
    fn length(val: Val) -> Result<usize> {
        let n = i64::try_from(val)?;
        Ok(usize::try_from(n).unwrap_or(0))
    }
}
