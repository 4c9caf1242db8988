//! # Console I/O
//!
//! Line-oriented prompts over an injected reader/writer pair. The binary
//! passes locked stdin/stdout; tests pass a `Cursor` and a `Vec<u8>`.
//!
//! ## End of Input
//! Reading past the end of input returns an empty answer and sets
//! [`Console::at_eof`]. Menus check the flag and end the session.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
    eof: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            eof: false,
        }
    }

    /// True once the input stream is exhausted.
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    /// Writes one line.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Asks for one line and returns it trimmed.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "\t{}: ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks for an optional value. A blank answer is `None`.
    pub fn optional(&mut self, label: &str) -> io::Result<Option<String>> {
        let answer = self.prompt(label)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Reads a menu choice, asking again until an integer is given.
    ///
    /// Returns `None` at end of input.
    pub fn read_choice(&mut self) -> io::Result<Option<i32>> {
        loop {
            write!(self.output, "Please make your choice: ")?;
            self.output.flush()?;

            let line = self.read_line()?;
            if self.eof {
                return Ok(None);
            }

            match line.parse::<i32>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(_) => self.say("Your input is invalid!")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
        }
        Ok(line.trim().to_string())
    }
}
