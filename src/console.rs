// 🖥️ Console - line-buffered prompting for the command loops
//
// Generic over the reader/writer pair so the desks run against stdin/stdout
// in the binary and against in-memory buffers in tests.
//
// Numeric prompts reprompt on unparsable input instead of failing the loop;
// EOF is reported as `None` so callers can wind down cleanly.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Formats a dollar amount the way the desks print it: whole dollars keep a
/// trailing `.0` (`$50.0`), fractional amounts print as-is (`$699.99`).
pub fn money(amount: f64) -> String {
    format!("{:?}", amount)
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Print a line to the output sink.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Prompt (no trailing newline) and read one line. `None` on EOF.
    pub fn line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for a number, reprompting until the input parses. `None` on EOF.
    pub fn number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(line) = self.line(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Invalid number. Please try again.")?,
            }
        }
    }

    /// Print a numbered option list and read the chosen index (1-based).
    pub fn menu(&mut self, options: &[&str]) -> Result<Option<u32>> {
        self.say("\nOptions:")?;
        for (index, option) in options.iter().enumerate() {
            self.say(&format!("{}. {}", index + 1, option))?;
        }
        self.number("Choose an option: ")
    }

    /// Consume the console and hand back the reader/writer pair. Tests use
    /// this to inspect everything that was written.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console_for(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_inner().1).unwrap()
    }

    #[test]
    fn test_line_strips_newline() {
        let mut console = console_for("Alice\r\n");
        let line = console.line("Enter Name: ").unwrap();
        assert_eq!(line, Some("Alice".to_string()));
        assert!(written(console).contains("Enter Name: "));
    }

    #[test]
    fn test_line_reports_eof() {
        let mut console = console_for("");
        assert_eq!(console.line("Enter Name: ").unwrap(), None);
    }

    #[test]
    fn test_number_reprompts_on_garbage() {
        let mut console = console_for("abc\n\n42\n");
        let value: Option<u32> = console.number("Enter ID: ").unwrap();
        assert_eq!(value, Some(42));

        let output = written(console);
        assert_eq!(
            output.matches("Invalid number. Please try again.").count(),
            2
        );
    }

    #[test]
    fn test_number_eof_while_reprompting() {
        let mut console = console_for("not-a-number\n");
        let value: Option<f64> = console.number("Enter Amount: ").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_menu_prints_options() {
        let mut console = console_for("2\n");
        let choice = console.menu(&["Add Driver", "Exit"]).unwrap();
        assert_eq!(choice, Some(2));

        let output = written(console);
        assert!(output.contains("1. Add Driver"));
        assert!(output.contains("2. Exit"));
        assert!(output.contains("Choose an option: "));
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(50.0), "50.0");
        assert_eq!(money(699.99), "699.99");
        assert_eq!(money(0.0), "0.0");
    }
}
