use super::val::{boolean_expected, number_expected, string_expected};
use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// Binary and unary operators over stack values. No coercion happens
/// between variants; a mismatch is a TYPE MISMATCH naming the variant
/// that was required.
pub struct Operation {}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            String(l) => match rhs {
                String(r) => Ok(String(l + &r)),
                _ => Err(string_expected()),
            },
            Number(l) => match rhs {
                Number(r) => Ok(Number(l + r)),
                _ => Err(number_expected()),
            },
            Boolean(_) => Err(number_expected()),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l - r))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l * r))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l / r))
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l % r))
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l.powf(r)))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::compare(lhs, rhs)? == Some(Ordering::Equal)))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::compare(lhs, rhs)? != Some(Ordering::Equal)))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::compare(lhs, rhs)? == Some(Ordering::Less)))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(matches!(
            Operation::compare(lhs, rhs)?,
            Some(Ordering::Less) | Some(Ordering::Equal)
        )))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(Operation::compare(lhs, rhs)? == Some(Ordering::Greater)))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(matches!(
            Operation::compare(lhs, rhs)?,
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::logical(lhs, rhs, |l, r| l && r, |l, r| l & r)
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::logical(lhs, rhs, |l, r| l || r, |l, r| l | r)
    }

    pub fn xor(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::logical(lhs, rhs, |l, r| l ^ r, |l, r| l ^ r)
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Boolean(b) => Ok(Val::Boolean(!b)),
            Val::Number(n) => Ok(Val::Number(!(Operation::bits(n)?) as f64)),
            Val::String(_) => Err(boolean_expected()),
        }
    }

    fn numbers(lhs: Val, rhs: Val) -> Result<(f64, f64)> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok((l, r)),
            _ => Err(number_expected()),
        }
    }

    /// Strings order lexicographically, numbers by IEEE ordering. `None`
    /// means unordered (a NaN was involved).
    fn compare(lhs: Val, rhs: Val) -> Result<Option<Ordering>> {
        use Val::*;
        match lhs {
            Number(l) => match rhs {
                Number(r) => Ok(l.partial_cmp(&r)),
                _ => Err(number_expected()),
            },
            String(l) => match rhs {
                String(r) => Ok(Some(l.cmp(&r))),
                _ => Err(string_expected()),
            },
            Boolean(l) => match rhs {
                Boolean(r) => Ok(Some(l.cmp(&r))),
                _ => Err(boolean_expected()),
            },
        }
    }

    fn logical(
        lhs: Val,
        rhs: Val,
        bool_op: fn(bool, bool) -> bool,
        int_op: fn(i64, i64) -> i64,
    ) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Boolean(l), Boolean(r)) => Ok(Boolean(bool_op(l, r))),
            (Number(l), Number(r)) => {
                Ok(Number(int_op(Operation::bits(l)?, Operation::bits(r)?) as f64))
            }
            _ => Err(boolean_expected()),
        }
    }

    fn bits(n: f64) -> Result<i64> {
        if n.is_finite() && n.abs() < 9.0e15 {
            Ok(n.trunc() as i64)
        } else {
            Err(error!(IllegalFunctionCall; "INTEGER OUT OF RANGE"))
        }
    }
}
