use std::io::{self, Write};

use colored::Colorize;

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Output side of the shell: everything the user sees goes through here.
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Console { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |t| t.green().to_string());
        writeln!(self.out, "{text}")
    }

    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |t| t.yellow().to_string());
        writeln!(self.out, "{text}")
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |t| t.red().to_string());
        writeln!(self.out, "{text}")
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |t| t.yellow().bold().to_string());
        writeln!(self.out, "{text}")
    }

    /// A label in the accent colour followed by plain text.
    pub fn entry(&mut self, label: &str, text: &str) -> io::Result<()> {
        let label = self.paint(label, |t| t.yellow().to_string());
        writeln!(self.out, "{label}{text}")
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |t| t.cyan().to_string());
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn banner(&mut self, lines: &[&str]) -> io::Result<()> {
        for line in lines {
            let line = self.paint(line, |t| t.cyan().bold().to_string());
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.out, "{CLEAR_SCREEN}")?;
        self.out.flush()
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().to_string())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Console;

    #[test]
    fn test_plain_console_writes_no_escapes() {
        let mut console = Console::new(Vec::new(), false);

        console.success("3 row(s) affected.").unwrap();
        console.error("ERROR: boom").unwrap();
        console.prompt("SQL> ").unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "3 row(s) affected.\nERROR: boom\nSQL> ");
    }

    #[test]
    fn test_clear_screen_sequence() {
        let mut console = Console::new(Vec::new(), false);

        console.clear_screen().unwrap();

        assert_eq!(console.into_inner(), b"\x1b[H\x1b[2J");
    }
}
