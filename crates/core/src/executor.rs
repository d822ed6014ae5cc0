use std::io::{self, Write};

use tracing::debug;

use crate::console::Console;
use crate::driver::{Connection, Driver};
use crate::error::StatementError;
use crate::render::{render_description, render_rows, RenderError};
use crate::session::Session;
use crate::statement::{describe_target, StatementKind};

pub const NOT_CONNECTED: &str = "ERROR: Not connected. Use 'conn user/pass@host:port:sid'";

/// What happened to one submitted statement.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    NotConnected,
    Selected(usize),
    Affected(u64),
    Described(usize),
    TableNotFound,
    Usage,
    Failed,
}

/// Run one complete statement against the session's connection and print
/// the result. Database errors are reported here and never escape; only a
/// failing console does.
pub fn execute<D: Driver, W: Write>(
    session: &Session<D>,
    sql: &str,
    console: &mut Console<W>,
) -> io::Result<Outcome> {
    let Some(connection) = session.connection() else {
        console.error(NOT_CONNECTED)?;
        return Ok(Outcome::NotConnected);
    };

    let kind = StatementKind::of(sql);
    debug!(?kind, sql, "executing");

    let outcome = match kind {
        StatementKind::Describe => describe(connection, sql, console),
        StatementKind::Query => query(connection, sql, console),
        StatementKind::Update => update(connection, sql, console),
    };

    match outcome {
        Ok(outcome) => Ok(outcome),
        Err(RenderError::Statement(error)) => {
            report(console, &error)?;
            Ok(Outcome::Failed)
        }
        Err(RenderError::Output(error)) => Err(error),
    }
}

fn query<C: Connection, W: Write>(
    connection: &C,
    sql: &str,
    console: &mut Console<W>,
) -> Result<Outcome, RenderError> {
    let result = connection.query(sql)?;
    let count = render_rows(console, &result.columns, result.rows)?;

    console.success(&format!("{count} row(s) selected."))?;
    console.blank()?;
    Ok(Outcome::Selected(count))
}

fn update<C: Connection, W: Write>(
    connection: &C,
    sql: &str,
    console: &mut Console<W>,
) -> Result<Outcome, RenderError> {
    let affected = connection.execute(sql)?;

    console.success(&format!("{affected} row(s) affected."))?;
    console.blank()?;
    Ok(Outcome::Affected(affected))
}

fn describe<C: Connection, W: Write>(
    connection: &C,
    sql: &str,
    console: &mut Console<W>,
) -> Result<Outcome, RenderError> {
    let table = match describe_target(sql) {
        Ok(table) => table,
        Err(usage) => {
            console.error(&usage.to_string())?;
            return Ok(Outcome::Usage);
        }
    };

    let columns = connection.columns(&table)?;
    if columns.is_empty() {
        console.warn(&format!("Table '{table}' not found or no columns."))?;
        console.blank()?;
        return Ok(Outcome::TableNotFound);
    }

    let count = render_description(console, &columns)?;
    console.blank()?;
    Ok(Outcome::Described(count))
}

fn report<W: Write>(console: &mut Console<W>, error: &StatementError) -> io::Result<()> {
    let state = error.state.as_deref().unwrap_or("n/a");
    console.error(&format!("ERROR: {}", error.message))?;
    console.error(&format!("SQLState: {state}  Code: {}", error.code))?;
    console.blank()
}
