mod oracle;

use crate::error::{ConnectionError, StatementError};

pub use self::oracle::{OracleConnection, OracleDriver};

/// One row of a result, each cell already converted to text.
pub type Row = Vec<Option<String>>;

pub type RowIter<'c> = Box<dyn Iterator<Item = Result<Row, StatementError>> + 'c>;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ColumnDescriptor {
    pub label: String,
    pub display_size: usize,
}

impl ColumnDescriptor {
    pub fn new(label: impl Into<String>, display_size: usize) -> Self {
        ColumnDescriptor {
            label: label.into(),
            display_size,
        }
    }
}

/// A column as reported by the driver's metadata lookup.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ColumnMetadata {
    pub name: String,
    pub type_name: String,
    pub size: Option<u32>,
    pub nullable: bool,
}

/// Column descriptors plus the lazily fetched rows of a query.
///
/// Dropping the value releases the driver-side cursor, so a result that is
/// abandoned half way (render error, bad row) never leaks a statement handle.
pub struct QueryResult<'c> {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: RowIter<'c>,
}

impl std::fmt::Debug for QueryResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryResult")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// The external SQL client library, seen from the shell.
pub trait Driver {
    type Connection: Connection;

    /// Prefix placed in front of `host:port:sid` to build a URL.
    fn scheme(&self) -> &'static str;

    fn connect(
        &self,
        url: &str,
        user: &str,
        password: &str,
    ) -> Result<Self::Connection, ConnectionError>;
}

pub trait Connection {
    fn query(&self, sql: &str) -> Result<QueryResult<'_>, StatementError>;

    /// Runs a row-affecting statement and returns the affected row count.
    fn execute(&self, sql: &str) -> Result<u64, StatementError>;

    /// Columns of every table named exactly `table`, in the order the
    /// database reports them.
    fn columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, StatementError>;

    fn is_closed(&self) -> Result<bool, StatementError>;

    fn autocommit(&self) -> Result<bool, StatementError>;

    fn close(self) -> Result<(), StatementError>;
}
