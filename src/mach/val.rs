use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Dynamically typed value
///
/// Every cell on the evaluator stack is one of these. Consumers match
/// on the variant and report a typed "EXPECTED" error on a mismatch.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Val {
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Number(_) => "NUMBER",
            Val::String(_) => "STRING",
            Val::Boolean(_) => "BOOLEAN",
        }
    }
}

pub fn number_expected() -> Error {
    error!(TypeMismatch; "NUMBER EXPECTED")
}

pub fn string_expected() -> Error {
    error!(TypeMismatch; "STRING EXPECTED")
}

pub fn boolean_expected() -> Error {
    error!(TypeMismatch; "BOOLEAN EXPECTED")
}

impl TryFrom<Val> for f64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<Self> {
        match val {
            Val::Number(n) => Ok(n),
            _ => Err(number_expected()),
        }
    }
}

impl TryFrom<Val> for String {
    type Error = Error;
    fn try_from(val: Val) -> Result<Self> {
        match val {
            Val::String(s) => Ok(s),
            _ => Err(string_expected()),
        }
    }
}

impl TryFrom<Val> for bool {
    type Error = Error;
    fn try_from(val: Val) -> Result<Self> {
        match val {
            Val::Boolean(b) => Ok(b),
            _ => Err(boolean_expected()),
        }
    }
}

impl TryFrom<Val> for i64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<Self> {
        match val {
            Val::Number(n) => {
                if n.is_finite() && n.abs() < 9.0e15 {
                    Ok(n.trunc() as i64)
                } else {
                    Err(error!(IllegalFunctionCall; "INTEGER OUT OF RANGE"))
                }
            }
            _ => Err(number_expected()),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", format_number(*n)),
            Val::String(s) => write!(f, "{}", s),
            Val::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Shortest text that reads back as the same double. Integral values
/// print without a decimal point.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NAN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let s = n.to_string();
    if s.len() > 16 {
        let e = format!("{:E}", n);
        if e.len() < s.len() {
            return e;
        }
    }
    s
}
