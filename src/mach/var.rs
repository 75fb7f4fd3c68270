use super::array::{Array, DEFAULT_BOUND};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Names are the lowercase lexemes from the tokenizer, `$` and `(`
/// included, so a name can only ever live in one of the four maps.

#[derive(Debug, Default)]
pub struct Var {
    numbers: HashMap<Rc<str>, f64>,
    strings: HashMap<Rc<str>, String>,
    number_arrays: HashMap<Rc<str>, Array<f64>>,
    string_arrays: HashMap<Rc<str>, Array<String>>,
    quick: [i32; 26],
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
        self.strings.clear();
        self.number_arrays.clear();
        self.string_arrays.clear();
        self.quick = [0; 26];
    }

    pub fn numeric(&self, var_name: &str) -> f64 {
        self.numbers.get(var_name).copied().unwrap_or(0.0)
    }

    pub fn set_numeric(&mut self, var_name: &Rc<str>, value: f64) {
        match self.numbers.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.numbers.insert(var_name.clone(), value);
            }
        }
    }

    pub fn string(&self, var_name: &str) -> String {
        self.strings.get(var_name).cloned().unwrap_or_default()
    }

    pub fn set_string(&mut self, var_name: &Rc<str>, value: String) {
        match self.strings.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.strings.insert(var_name.clone(), value);
            }
        }
    }

    pub fn dimension_numeric_array(&mut self, var_name: &Rc<str>, bounds: &[usize]) -> Result<()> {
        if self.number_arrays.contains_key(var_name) {
            return Err(error!(RedimensionedArray));
        }
        let array = Array::new(bounds, 0.0)?;
        self.number_arrays.insert(var_name.clone(), array);
        Ok(())
    }

    pub fn dimension_string_array(&mut self, var_name: &Rc<str>, bounds: &[usize]) -> Result<()> {
        if self.string_arrays.contains_key(var_name) {
            return Err(error!(RedimensionedArray));
        }
        let array = Array::new(bounds, String::new())?;
        self.string_arrays.insert(var_name.clone(), array);
        Ok(())
    }

    pub fn numeric_array(&mut self, var_name: &Rc<str>, indices: &[usize]) -> Result<f64> {
        Ok(*self.numeric_array_entry(var_name, indices.len())?.get(indices)?)
    }

    pub fn set_numeric_array(
        &mut self,
        var_name: &Rc<str>,
        indices: &[usize],
        value: f64,
    ) -> Result<()> {
        self.numeric_array_entry(var_name, indices.len())?
            .set(indices, value)
    }

    pub fn string_array(&mut self, var_name: &Rc<str>, indices: &[usize]) -> Result<String> {
        Ok(self
            .string_array_entry(var_name, indices.len())?
            .get(indices)?
            .clone())
    }

    pub fn set_string_array(
        &mut self,
        var_name: &Rc<str>,
        indices: &[usize],
        value: String,
    ) -> Result<()> {
        self.string_array_entry(var_name, indices.len())?
            .set(indices, value)
    }

    /// Legacy single-letter integer slots, A through Z.
    pub fn quick(&self, letter: char) -> Result<i32> {
        Ok(self.quick[Var::quick_slot(letter)?])
    }

    pub fn set_quick(&mut self, letter: char, value: i32) -> Result<()> {
        self.quick[Var::quick_slot(letter)?] = value;
        Ok(())
    }

    fn quick_slot(letter: char) -> Result<usize> {
        if letter.is_ascii_alphabetic() {
            Ok((letter.to_ascii_lowercase() as u8 - b'a') as usize)
        } else {
            Err(error!(IllegalFunctionCall; "QUICK VARIABLES ARE A-Z"))
        }
    }

    fn numeric_array_entry(&mut self, var_name: &Rc<str>, dims: usize) -> Result<&mut Array<f64>> {
        if !self.number_arrays.contains_key(var_name) {
            let array = Array::new(&vec![DEFAULT_BOUND; dims], 0.0)?;
            self.number_arrays.insert(var_name.clone(), array);
        }
        match self.number_arrays.get_mut(var_name) {
            Some(array) => Ok(array),
            None => Err(error!(InternalError)),
        }
    }

    fn string_array_entry(
        &mut self,
        var_name: &Rc<str>,
        dims: usize,
    ) -> Result<&mut Array<String>> {
        if !self.string_arrays.contains_key(var_name) {
            let array = Array::new(&vec![DEFAULT_BOUND; dims], String::new())?;
            self.string_arrays.insert(var_name.clone(), array);
        }
        match self.string_arrays.get_mut(var_name) {
            Some(array) => Ok(array),
            None => Err(error!(InternalError)),
        }
    }
}
