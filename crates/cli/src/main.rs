use std::io::{self, IsTerminal};

use clap::Parser;
use rsqlplus_core::{
    BufReadLines, Config, LineReader, OracleDriver, Repl, ReplError, DEFAULT_PASSWORD,
    DEFAULT_URL, DEFAULT_USER,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A SQL*Plus-like interactive shell for Oracle
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the first connection, oracle:thin:@host:port:sid
    #[arg(long, env = "RSQLPLUS_URL", default_value = DEFAULT_URL)]
    url: String,

    #[arg(short, long, env = "RSQLPLUS_USER", default_value = DEFAULT_USER)]
    user: String,

    #[arg(
        short,
        long,
        env = "RSQLPLUS_PASSWORD",
        default_value = DEFAULT_PASSWORD,
        hide_env_values = true,
        hide_default_value = true
    )]
    password: String,

    /// Print without ANSI colours
    #[arg(long)]
    no_color: bool,
}

/// Line editing for interactive use. History lives only as long as the
/// process.
struct EditorLines {
    editor: DefaultEditor,
}

impl LineReader for EditorLines {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReplError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    // a full history is not worth stopping for
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // ctrl-c abandons the current line only
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(ReplError::Input(e)),
            Err(e) => Err(ReplError::Input(io::Error::other(e))),
        }
    }

    fn shows_prompt(&self) -> bool {
        true
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let stdout = io::stdout();
    let config = Config {
        url: args.url,
        user: args.user,
        password: args.password,
        color: !args.no_color && stdout.is_terminal(),
    };

    let mut repl = Repl::new(OracleDriver, &config, stdout);
    repl.start()?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        debug!("reading statements from the terminal");
        let mut reader = EditorLines {
            editor: DefaultEditor::new()?,
        };
        repl.run(&mut reader)?;
    } else {
        debug!("reading statements from piped stdin");
        repl.run(&mut BufReadLines::new(stdin.lock()))?;
    }

    Ok(())
}
