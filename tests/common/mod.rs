#![allow(dead_code)]
use stepbasic::error;
use stepbasic::lang::Error;
use stepbasic::mach::{advance_hpos, Config, Console, Runtime};
use std::collections::VecDeque;

/// Console that records everything the program prints and answers INPUT
/// from a script.
#[derive(Default)]
pub struct Transcript {
    pub output: String,
    pub errors: Vec<String>,
    pub input: VecDeque<String>,
    hpos: usize,
}

impl Transcript {
    pub fn with_input(lines: &[&str]) -> Transcript {
        Transcript {
            input: lines.iter().map(|s| s.to_string()).collect(),
            ..Transcript::default()
        }
    }
}

impl Console for Transcript {
    fn out(&mut self, text: &str) {
        self.hpos = advance_hpos(self.hpos, text);
        self.output.push_str(text);
    }

    fn input(&mut self) -> Result<String, Error> {
        match self.input.pop_front() {
            Some(line) => {
                self.hpos = 0;
                Ok(line)
            }
            None => Err(error!(InputPastEnd)),
        }
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn hpos(&self) -> usize {
        self.hpos
    }
}

pub fn runtime(program: &str, input: &[&str]) -> Runtime<Transcript> {
    runtime_with_config(program, input, Config::default())
}

pub fn runtime_with_config(program: &str, input: &[&str], config: Config) -> Runtime<Transcript> {
    let mut r = Runtime::with_config(program, Transcript::with_input(input), config);
    r.init(0).unwrap();
    r
}

/// Run until finished. A fatal error is appended to the output as
/// `?MESSAGE` and stops the run.
pub fn run(r: &mut Runtime<Transcript>) -> String {
    let mut lines = 0;
    while !r.is_finished() {
        if let Err(error) = r.run() {
            r.console_mut().output.push_str(&format!("?{}\n", error));
            break;
        }
        lines += 1;
        if lines > 100_000 {
            r.console_mut().output.push_str("?LINE LIMIT EXCEEDED\n");
            break;
        }
    }
    r.console().output.clone()
}

pub fn exec(program: &str) -> String {
    exec_with_input(program, &[])
}

pub fn exec_with_input(program: &str, input: &[&str]) -> String {
    let mut r = runtime(program, input);
    run(&mut r)
}
