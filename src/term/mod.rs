extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use log::{debug, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stepbasic::error;
use stepbasic::lang::Error;
use stepbasic::mach::{advance_hpos, Config, Console, Runtime};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// BASIC program to run
    file: PathBuf,

    /// Width of a print zone
    #[arg(long, default_value_t = 15)]
    zone: usize,

    /// Padding unit after a number followed by `;`
    #[arg(long, default_value_t = 3)]
    compact: usize,

    /// Maximum nesting of GOSUB
    #[arg(long, default_value_t = 10)]
    gosub_depth: usize,

    /// Maximum number of active FOR loops
    #[arg(long, default_value_t = 4)]
    for_depth: usize,
}

impl Args {
    fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse_args();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!("Ctrl-C handler not installed: {}", error);
    }
    match main_loop(&args, interrupted) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("{}: {}", args.file.display(), error);
            std::process::exit(1);
        }
    }
}

/// Run the program to completion. `Ok(false)` means it stopped on an error.
fn main_loop(args: &Args, interrupted: Arc<AtomicBool>) -> std::io::Result<bool> {
    let source = std::fs::read_to_string(&args.file)?;
    let config = Config {
        gosub_depth: args.gosub_depth,
        for_depth: args.for_depth,
        ..Config::default()
    };
    debug!("{:?}", config);
    let console = TerminalConsole::new(args.zone, args.compact)?;
    let mut runtime = Runtime::with_config(&source, console, config);
    let mut result = runtime.init(0);
    while result.is_ok() && !runtime.is_finished() {
        if interrupted.swap(false, Ordering::SeqCst) {
            result = Err(error!(Break, runtime.line_number()));
            break;
        }
        result = runtime.run();
    }
    let console = runtime.console_mut();
    console.flush();
    match result {
        Ok(()) => Ok(true),
        Err(error) => {
            console.fatal(&error);
            Ok(false)
        }
    }
}

/// Console on the terminal. Output is written a line at a time; an
/// unfinished line becomes the prompt when INPUT reads.
struct TerminalConsole {
    interface: Interface<DefaultTerminal>,
    pending: String,
    hpos: usize,
    zone: usize,
    compact: usize,
}

impl TerminalConsole {
    fn new(zone: usize, compact: usize) -> std::io::Result<TerminalConsole> {
        let interface = Interface::new("stepbasic")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(TerminalConsole {
            interface,
            pending: String::new(),
            hpos: 0,
            zone,
            compact,
        })
    }

    fn write(&self, text: &str) {
        if let Err(error) = self.interface.write_fmt(format_args!("{}", text)) {
            warn!("terminal write failed: {}", error);
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.write(&text);
            self.write("\n");
            self.hpos = 0;
        }
    }

    fn fatal(&mut self, error: &Error) {
        self.flush();
        self.write(&format!("{}\n", Style::new().bold().paint(format!("?{}", error))));
    }
}

impl Console for TerminalConsole {
    fn out(&mut self, text: &str) {
        self.hpos = advance_hpos(self.hpos, text);
        self.pending.push_str(text);
        if let Some(index) = self.pending.rfind('\n') {
            let rest = self.pending.split_off(index + 1);
            let line = std::mem::replace(&mut self.pending, rest);
            self.write(&line);
        }
    }

    fn input(&mut self) -> Result<String, Error> {
        let prompt = std::mem::take(&mut self.pending);
        if let Err(error) = self.interface.set_prompt(&prompt) {
            warn!("prompt not set: {}", error);
        }
        self.hpos = 0;
        match self.interface.read_line() {
            Ok(ReadResult::Input(line)) => {
                self.interface.add_history_unique(line.clone());
                Ok(line)
            }
            Ok(ReadResult::Signal(Signal::Interrupt)) => Err(error!(Break)),
            Ok(_) => Err(error!(InputPastEnd)),
            Err(error) => Err(error!(InternalError; error.to_string())),
        }
    }

    fn error(&mut self, text: &str) {
        self.flush();
        self.write(&format!("{}\n", Style::new().bold().paint(format!("?{}", text))));
    }

    fn hpos(&self) -> usize {
        self.hpos
    }

    fn zone(&self) -> usize {
        self.zone
    }

    fn compact(&self) -> usize {
        self.compact
    }
}
