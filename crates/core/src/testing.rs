//! In-memory driver used by the unit tests. Every call is written to a shared
//! log so tests can check what reached the "database" and in which order.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::driver::{
    ColumnDescriptor, ColumnMetadata, Connection, Driver, QueryResult, Row,
};
use crate::error::{ConnectionError, StatementError};

#[derive(Debug, Clone)]
enum Canned {
    Rows(Vec<ColumnDescriptor>, Vec<Result<Row, StatementError>>),
    Affected(u64),
    Fails(StatementError),
}

#[derive(Debug, Default)]
struct State {
    log: Vec<String>,
    refuse: bool,
    fail_close: bool,
    statements: HashMap<String, Canned>,
    tables: HashMap<String, Vec<ColumnMetadata>>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeDriver {
    state: Rc<RefCell<State>>,
}

pub struct FakeConnection {
    state: Rc<RefCell<State>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        FakeDriver::default()
    }

    pub fn log(&self) -> Vec<String> {
        self.state.borrow().log.clone()
    }

    pub fn refuse_connections(&self) {
        self.state.borrow_mut().refuse = true;
    }

    pub fn fail_close(&self) {
        self.state.borrow_mut().fail_close = true;
    }

    pub fn rows(&self, sql: &str, columns: Vec<ColumnDescriptor>, rows: Vec<Row>) {
        let rows = rows.into_iter().map(Ok).collect();
        self.canned(sql, Canned::Rows(columns, rows));
    }

    /// Rows where one of them fails to fetch.
    pub fn rows_then_error(
        &self,
        sql: &str,
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Result<Row, StatementError>>,
    ) {
        self.canned(sql, Canned::Rows(columns, rows));
    }

    pub fn affects(&self, sql: &str, count: u64) {
        self.canned(sql, Canned::Affected(count));
    }

    pub fn fails(&self, sql: &str, error: StatementError) {
        self.canned(sql, Canned::Fails(error));
    }

    pub fn table(&self, name: &str, columns: Vec<ColumnMetadata>) {
        self.state
            .borrow_mut()
            .tables
            .insert(name.to_string(), columns);
    }

    fn canned(&self, sql: &str, canned: Canned) {
        self.state
            .borrow_mut()
            .statements
            .insert(sql.to_string(), canned);
    }
}

impl Driver for FakeDriver {
    type Connection = FakeConnection;

    fn scheme(&self) -> &'static str {
        "fake:@"
    }

    fn connect(
        &self,
        url: &str,
        user: &str,
        password: &str,
    ) -> Result<FakeConnection, ConnectionError> {
        let mut state = self.state.borrow_mut();
        if state.refuse {
            return Err(ConnectionError::new(format!("could not connect to {url}"))
                .with_cause("ORA-12541: TNS:no listener"));
        }
        state.log.push(format!("connect {url} as {user}/{password}"));

        Ok(FakeConnection {
            state: Rc::clone(&self.state),
        })
    }
}

fn no_such_table() -> StatementError {
    StatementError::new(
        "ORA-00942: table or view does not exist",
        Some("42000".into()),
        942,
    )
}

/// Logs its release when dropped, like a driver cursor handing its
/// statement back.
struct Cursor {
    rows: std::vec::IntoIter<Result<Row, StatementError>>,
    state: Rc<RefCell<State>>,
}

impl Iterator for Cursor {
    type Item = Result<Row, StatementError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.state.borrow_mut().log.push("release".into());
    }
}

impl FakeConnection {
    fn lookup(&self, verb: &str, sql: &str) -> Option<Canned> {
        let mut state = self.state.borrow_mut();
        state.log.push(format!("{verb} {sql}"));
        state.statements.get(sql).cloned()
    }
}

impl Connection for FakeConnection {
    fn query(&self, sql: &str) -> Result<QueryResult<'_>, StatementError> {
        match self.lookup("query", sql) {
            Some(Canned::Rows(columns, rows)) => Ok(QueryResult {
                columns,
                rows: Box::new(Cursor {
                    rows: rows.into_iter(),
                    state: Rc::clone(&self.state),
                }),
            }),
            Some(Canned::Fails(error)) => Err(error),
            Some(Canned::Affected(_)) | None => Err(no_such_table()),
        }
    }

    fn execute(&self, sql: &str) -> Result<u64, StatementError> {
        match self.lookup("execute", sql) {
            Some(Canned::Affected(count)) => Ok(count),
            Some(Canned::Fails(error)) => Err(error),
            Some(Canned::Rows(..)) | None => Ok(0),
        }
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, StatementError> {
        let mut state = self.state.borrow_mut();
        state.log.push(format!("columns {table}"));
        Ok(state.tables.get(table).cloned().unwrap_or_default())
    }

    fn is_closed(&self) -> Result<bool, StatementError> {
        Ok(false)
    }

    fn autocommit(&self) -> Result<bool, StatementError> {
        Ok(true)
    }

    fn close(self) -> Result<(), StatementError> {
        let mut state = self.state.borrow_mut();
        state.log.push("close".into());
        if state.fail_close {
            return Err(StatementError::new(
                "ORA-03113: end-of-file on communication channel",
                None,
                3113,
            ));
        }
        Ok(())
    }
}
