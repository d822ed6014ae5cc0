pub const PRIMARY_PROMPT: &str = "SQL> ";
pub const CONTINUATION_PROMPT: &str = "  2> ";

/// Collects SQL lines until a terminator is seen: a trailing `;` or a lone
/// `/` on its own line.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    text: String,
}

impl StatementBuffer {
    pub fn new() -> Self {
        StatementBuffer::default()
    }

    pub fn is_accumulating(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn prompt(&self) -> &'static str {
        if self.is_accumulating() {
            CONTINUATION_PROMPT
        } else {
            PRIMARY_PROMPT
        }
    }

    /// Feed one line. Returns the complete statement, trimmed and without its
    /// terminator, once the line finishes it.
    pub fn push(&mut self, line: &str) -> Option<String> {
        let line = line.trim();

        if line.is_empty() {
            return None;
        }

        if line == "/" {
            return self.take();
        }

        match line.strip_suffix(';') {
            Some(body) => {
                self.append(body.trim());
                self.take()
            }
            None => {
                self.append(line);
                None
            }
        }
    }

    /// Drop anything buffered so far.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    fn append(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push(' ');
    }

    fn take(&mut self) -> Option<String> {
        let statement = self.text.trim().to_string();
        self.text.clear();

        if statement.is_empty() {
            None
        } else {
            Some(statement)
        }
    }
}
