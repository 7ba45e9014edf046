//! # Console
//!
//! Command output and yes/no confirmation over any reader/writer pair, so
//! commands run the same against a terminal and against test buffers.

use std::io::{self, BufRead, Write};

/// Line-oriented console.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Writes one line of output.
    pub fn line(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Asks a yes/no question. Anything but `y`/`yes` is a no, and so is
    /// end of input.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }

        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    /// Consumes the console and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn confirm_with(input: &str) -> (bool, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let answer = console.confirm("Delete product?").unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (answer, output)
    }

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(confirm_with("y\n").0);
        assert!(confirm_with("  YES \n").0);
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        assert!(!confirm_with("\n").0);
        assert!(!confirm_with("nope\n").0);
        assert!(!confirm_with("").0);
    }

    #[test]
    fn test_confirm_prints_question() {
        let (_, output) = confirm_with("n\n");
        assert_eq!(output, "Delete product? [y/N] ");
    }
}
