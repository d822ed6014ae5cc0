//! Static banner and help text.

use std::io::{self, Write};

use crate::console::Console;

const BANNER: &[&str] = &[
    "╔══════════════════════════════════════════╗",
    "║        rsqlplus                          ║",
    "║   A SQL*Plus-like shell for Oracle       ║",
    "║   Type 'help' or '?' for commands        ║",
    "╚══════════════════════════════════════════╝",
];

const COMMANDS: &[(&str, &str)] = &[
    ("  exit / quit                  ", "- Disconnect and exit"),
    ("  conn user/pass@host:port:sid ", "- Connect to a database"),
    ("  status / conn?               ", "- Show connection info"),
    ("  cls / clear                  ", "- Clear the screen"),
    ("  help / ?                     ", "- Show this help"),
];

const SQL_USAGE: &[(&str, &str)] = &[
    ("  SELECT * FROM emp;           ", "- End with ; to execute"),
    ("  INSERT INTO ... (newline) /  ", "- Or end multi-line input with /"),
    ("  DESC tableName;              ", "- Show table structure"),
    ("  CREATE TABLE ...;            ", "- DDL is supported"),
    ("  COMMIT; / ROLLBACK;          ", "- Changes need an explicit COMMIT"),
];

pub fn print_banner<W: Write>(console: &mut Console<W>) -> io::Result<()> {
    console.blank()?;
    console.banner(BANNER)?;
    console.blank()
}

pub fn print_help<W: Write>(console: &mut Console<W>) -> io::Result<()> {
    console.blank()?;
    console.heading("Commands:")?;
    for (usage, description) in COMMANDS {
        console.entry(usage, description)?;
    }
    console.blank()?;
    console.heading("SQL usage:")?;
    for (usage, description) in SQL_USAGE {
        console.entry(usage, description)?;
    }
    console.blank()
}

#[cfg(test)]
mod tests {
    use super::print_help;
    use crate::console::Console;

    #[test]
    fn test_help_lists_every_command() {
        let mut console = Console::new(Vec::new(), false);

        print_help(&mut console).unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        insta::assert_snapshot!(out.trim(), @r"
        Commands:
          exit / quit                  - Disconnect and exit
          conn user/pass@host:port:sid - Connect to a database
          status / conn?               - Show connection info
          cls / clear                  - Clear the screen
          help / ?                     - Show this help

        SQL usage:
          SELECT * FROM emp;           - End with ; to execute
          INSERT INTO ... (newline) /  - Or end multi-line input with /
          DESC tableName;              - Show table structure
          CREATE TABLE ...;            - DDL is supported
            COMMIT; / ROLLBACK;          - Changes need an explicit COMMIT
        ");
    }
}
