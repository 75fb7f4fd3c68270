use super::{advance_hpos, Console, Runtime};
use crate::error;
use crate::lang::Error;

mod line_test;

#[derive(Default)]
struct Capture {
    text: String,
    hpos: usize,
}

impl Console for Capture {
    fn out(&mut self, text: &str) {
        self.hpos = advance_hpos(self.hpos, text);
        self.text.push_str(text);
    }
    fn input(&mut self) -> Result<String, Error> {
        Err(error!(InputPastEnd))
    }
    fn error(&mut self, _text: &str) {}
    fn hpos(&self) -> usize {
        self.hpos
    }
}

fn runtime(program: &str) -> Runtime<Capture> {
    let mut r = Runtime::new(program, Capture::default());
    r.init(0).unwrap();
    r
}

fn run(r: &mut Runtime<Capture>) -> String {
    while !r.is_finished() {
        if let Err(e) = r.run() {
            r.console_mut().text.push_str(&format!("?{}\n", e));
        }
    }
    r.console().text.clone()
}
