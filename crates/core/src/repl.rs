//! The read-execute-print loop.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::buffer::StatementBuffer;
use crate::command::Command;
use crate::config::Config;
use crate::console::Console;
use crate::driver::Driver;
use crate::error::{ConnectionError, ReconnectError, ReplError};
use crate::executor::execute;
use crate::help::{print_banner, print_help};
use crate::session::{Session, Status};

const FORMAT_HINT: &str = "Format: conn user/password@host:port:sid";

/// Where input lines come from.
pub trait LineReader {
    /// Next line, or `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReplError>;

    /// Whether the reader draws `prompt` itself.
    fn shows_prompt(&self) -> bool {
        false
    }
}

/// Plain buffered input, for pipes and tests.
pub struct BufReadLines<R> {
    reader: R,
}

impl<R: BufRead> BufReadLines<R> {
    pub fn new(reader: R) -> Self {
        BufReadLines { reader }
    }
}

impl<R: BufRead> LineReader for BufReadLines<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, ReplError> {
        let mut bytes = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut bytes)
            .map_err(ReplError::Input)?;

        // a stray non-UTF-8 byte is replaced, not fatal
        Ok((read > 0).then(|| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

pub struct Repl<D: Driver, W: Write> {
    session: Session<D>,
    buffer: StatementBuffer,
    console: Console<W>,
}

impl<D: Driver, W: Write> Repl<D, W> {
    pub fn new(driver: D, config: &Config, out: W) -> Self {
        Repl {
            session: Session::new(driver, config),
            buffer: StatementBuffer::new(),
            console: Console::new(out, config.color),
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    /// Banner plus the first connection attempt with the configured
    /// credentials. A failure is reported and the shell starts disconnected.
    pub fn start(&mut self) -> Result<(), ReplError> {
        print_banner(&mut self.console)?;

        match self.session.open() {
            Ok(()) => self.report_connected()?,
            Err(error) => {
                self.report_connection_failure(&error)?;
                self.console
                    .warn("Type 'conn user/pass@host:port:sid' to reconnect.")?;
            }
        }
        self.console.blank()?;
        Ok(())
    }

    /// Read and handle lines until `exit` or end of input.
    pub fn run<R: LineReader>(&mut self, reader: &mut R) -> Result<(), ReplError> {
        loop {
            let prompt = self.buffer.prompt();
            if !reader.shows_prompt() {
                self.console.prompt(prompt)?;
            }

            let Some(line) = reader.read_line(prompt)? else {
                debug!("end of input");
                self.exit()?;
                return Ok(());
            };

            if self.handle_line(&line)?.is_break() {
                return Ok(());
            }
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Result<ControlFlow<()>, ReplError> {
        match Command::parse(line) {
            Command::Exit => {
                self.exit()?;
                return Ok(ControlFlow::Break(()));
            }
            Command::Clear => self.console.clear_screen()?,
            Command::Status => self.status()?,
            Command::Reconnect(spec) => self.reconnect(&spec)?,
            Command::Help => print_help(&mut self.console)?,
            Command::SqlLine(text) => {
                if let Some(statement) = self.buffer.push(&text) {
                    execute(&self.session, &statement, &mut self.console)?;
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn exit(&mut self) -> Result<(), ReplError> {
        self.console.warn("Disconnected. Bye!")?;
        self.session.close();
        self.console.flush()?;
        Ok(())
    }

    fn reconnect(&mut self, spec: &str) -> Result<(), ReplError> {
        match self.session.reconnect(spec) {
            Ok(()) => {
                info!(url = self.session.url(), "reconnected");
                self.report_connected()?;
            }
            Err(ReconnectError::Format(error)) => {
                self.console.error(&format!("Invalid connect spec: {error}"))?;
                self.console.warn(FORMAT_HINT)?;
            }
            Err(ReconnectError::Connection(error)) => {
                self.report_connection_failure(&error)?;
                self.console.warn(FORMAT_HINT)?;
            }
        }
        self.console.blank()?;
        Ok(())
    }

    fn status(&mut self) -> Result<(), ReplError> {
        match self.session.status() {
            Ok(Status::NotConnected) => self.console.error("Not connected.")?,
            Ok(Status::Connected {
                open,
                url,
                user,
                autocommit,
            }) => {
                self.console.success(&format!("Connected  : {open}"))?;
                self.console.success(&format!("URL        : {url}"))?;
                self.console
                    .success(&format!("User       : {}", user.to_uppercase()))?;
                self.console.success(&format!("AutoCommit : {autocommit}"))?;
            }
            Err(error) => self.console.error(&format!("Error: {error}"))?,
        }
        self.console.blank()?;
        Ok(())
    }

    fn report_connected(&mut self) -> Result<(), ReplError> {
        let url = self.session.url().to_string();
        let user = self.session.user().to_uppercase();
        self.console.success(&format!("Connected to: {url}"))?;
        self.console.success(&format!("User        : {user}"))?;
        Ok(())
    }

    fn report_connection_failure(&mut self, error: &ConnectionError) -> Result<(), ReplError> {
        self.console
            .error(&format!("Connection failed: {}", error.message))?;
        if let Some(cause) = &error.cause {
            self.console.error(&format!("Cause: {cause}"))?;
        }
        Ok(())
    }
}
