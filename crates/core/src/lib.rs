mod buffer;
mod command;
mod config;
mod console;
mod driver;
mod error;
mod executor;
mod help;
mod render;
mod repl;
mod session;
mod statement;

#[cfg(test)]
mod testing;

pub use buffer::StatementBuffer;
pub use command::Command;
pub use config::{Config, DEFAULT_PASSWORD, DEFAULT_URL, DEFAULT_USER};
pub use console::Console;
pub use driver::{
    ColumnDescriptor, ColumnMetadata, Connection, Driver, OracleConnection, OracleDriver,
    QueryResult, Row, RowIter,
};
pub use error::{ConnectionError, FormatError, ReconnectError, ReplError, StatementError};
pub use executor::{execute, Outcome};
pub use repl::{BufReadLines, LineReader, Repl};
pub use session::{ConnectSpec, Session, Status};
pub use statement::StatementKind;
