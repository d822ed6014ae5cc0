/// What a single input line asks the shell to do.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    Exit,
    Clear,
    Status,
    Reconnect(String),
    Help,
    SqlLine(String),
}

impl Command {
    /// Classify a raw input line. Special commands are single-line only and
    /// win over SQL accumulation whatever state the buffer is in.
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "exit" | "quit" => Command::Exit,
            "cls" | "clear" => Command::Clear,
            "status" | "conn?" => Command::Status,
            "help" | "?" => Command::Help,
            _ => match strip_prefix_ignore_case(trimmed, "conn ") {
                Some(spec) => Command::Reconnect(spec.trim().to_string()),
                None => Command::SqlLine(trimmed.to_string()),
            },
        }
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn test_parse_special_commands_ignore_case() {
        assert_eq!(Command::parse("EXIT"), Command::Exit);
        assert_eq!(Command::parse("  quit "), Command::Exit);
        assert_eq!(Command::parse("Cls"), Command::Clear);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("STATUS"), Command::Status);
        assert_eq!(Command::parse("conn?"), Command::Status);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse("Help"), Command::Help);
    }

    #[test]
    fn test_parse_reconnect_keeps_spec_case() {
        assert_eq!(
            Command::parse("CONN Scott/Tiger@db:1521:ORCL"),
            Command::Reconnect("Scott/Tiger@db:1521:ORCL".into())
        );
    }

    #[test]
    fn test_parse_everything_else_is_sql() {
        assert_eq!(
            Command::parse("select * from dual;"),
            Command::SqlLine("select * from dual;".into())
        );
        // no space after the prefix, so not a reconnect
        assert_eq!(
            Command::parse("connect_by_root;"),
            Command::SqlLine("connect_by_root;".into())
        );
        assert_eq!(Command::parse("exit;"), Command::SqlLine("exit;".into()));
    }
}
