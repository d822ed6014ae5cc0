use ::oracle::sql_type::OracleType;
use ::oracle::{ConnStatus, Connection as OciConnection, Row as OciRow};
use tracing::debug;

use super::{ColumnDescriptor, ColumnMetadata, Connection, Driver, QueryResult, Row};
use crate::error::{ConnectionError, StatementError};

const SCHEME: &str = "oracle:thin:@";

// display size used when the type carries no length of its own
const UNBOUNDED_DISPLAY_SIZE: usize = 40;

const COLUMNS_SQL: &str = "SELECT column_name, data_type, \
     NVL(data_precision, data_length), nullable \
     FROM all_tab_columns WHERE table_name = :1 \
     ORDER BY owner, column_id";

/// Talks to Oracle through ODPI-C via the `oracle` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDriver;

pub struct OracleConnection {
    inner: OciConnection,
}

impl Driver for OracleDriver {
    type Connection = OracleConnection;

    fn scheme(&self) -> &'static str {
        SCHEME
    }

    fn connect(
        &self,
        url: &str,
        user: &str,
        password: &str,
    ) -> Result<OracleConnection, ConnectionError> {
        let connect_string = connect_string(url)?;
        debug!(%connect_string, "opening oracle connection");

        let inner = OciConnection::connect(user, password, &connect_string).map_err(|e| {
            ConnectionError::new(format!("could not connect to {url}")).with_cause(e.to_string())
        })?;

        Ok(OracleConnection { inner })
    }
}

/// Turns `oracle:thin:@host:port:sid` into a TNS descriptor; anything else
/// after the scheme is handed to the client as an Easy Connect string.
fn connect_string(url: &str) -> Result<String, ConnectionError> {
    let rest = url
        .strip_prefix(SCHEME)
        .ok_or_else(|| ConnectionError::new(format!("unsupported url {url}, expected {SCHEME}...")))?;

    let parts: Vec<&str> = rest.split(':').collect();

    match parts.as_slice() {
        [host, port, sid] if port.parse::<u16>().is_ok() => Ok(format!(
            "(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST={host})(PORT={port}))(CONNECT_DATA=(SID={sid})))"
        )),
        _ => Ok(rest.to_string()),
    }
}

fn statement_error(error: &::oracle::Error) -> StatementError {
    match error.db_error() {
        Some(db) => StatementError::new(db.message(), None, db.code()),
        // raised client side (DPI-, type conversion) with no ORA code
        None => StatementError::new(error.to_string(), None, 0),
    }
}

fn display_size(oracle_type: &OracleType) -> usize {
    let size = match oracle_type {
        OracleType::Varchar2(n)
        | OracleType::NVarchar2(n)
        | OracleType::Char(n)
        | OracleType::NChar(n)
        | OracleType::Raw(n) => *n as usize,
        OracleType::Number(precision, _) if *precision > 0 => *precision as usize + 2,
        OracleType::Date => 19,
        OracleType::Timestamp(_) => 29,
        OracleType::TimestampTZ(_) | OracleType::TimestampLTZ(_) => 35,
        _ => UNBOUNDED_DISPLAY_SIZE,
    };
    if size == 0 {
        UNBOUNDED_DISPLAY_SIZE
    } else {
        size
    }
}

fn row_cells(row: &OciRow, width: usize) -> Result<Row, StatementError> {
    (0..width)
        .map(|i| row.get::<usize, Option<String>>(i).map_err(|e| statement_error(&e)))
        .collect()
}

impl Connection for OracleConnection {
    fn query(&self, sql: &str) -> Result<QueryResult<'_>, StatementError> {
        let result_set = self
            .inner
            .query(sql, &[])
            .map_err(|e| statement_error(&e))?;

        let columns: Vec<ColumnDescriptor> = result_set
            .column_info()
            .iter()
            .map(|info| ColumnDescriptor::new(info.name(), display_size(info.oracle_type())))
            .collect();

        let width = columns.len();
        let rows = result_set.map(move |row| match row {
            Ok(row) => row_cells(&row, width),
            Err(e) => Err(statement_error(&e)),
        });

        Ok(QueryResult {
            columns,
            rows: Box::new(rows),
        })
    }

    fn execute(&self, sql: &str) -> Result<u64, StatementError> {
        let statement = self
            .inner
            .execute(sql, &[])
            .map_err(|e| statement_error(&e))?;
        statement.row_count().map_err(|e| statement_error(&e))
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, StatementError> {
        let rows = self
            .inner
            .query_as::<(String, String, Option<u32>, String)>(COLUMNS_SQL, &[&table])
            .map_err(|e| statement_error(&e))?;

        rows.map(|row| {
            let (name, type_name, size, nullable) = row.map_err(|e| statement_error(&e))?;
            Ok(ColumnMetadata {
                name,
                type_name,
                size,
                nullable: nullable == "Y",
            })
        })
        .collect()
    }

    fn is_closed(&self) -> Result<bool, StatementError> {
        let status = self.inner.status().map_err(|e| statement_error(&e))?;
        Ok(!matches!(status, ConnStatus::Normal))
    }

    fn autocommit(&self) -> Result<bool, StatementError> {
        Ok(self.inner.autocommit())
    }

    fn close(self) -> Result<(), StatementError> {
        self.inner.close().map_err(|e| statement_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::connect_string;

    #[test]
    fn test_connect_string_from_sid_url() {
        let result = connect_string("oracle:thin:@db.local:1521:orcl").unwrap();

        assert_eq!(
            result,
            "(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST=db.local)(PORT=1521))(CONNECT_DATA=(SID=orcl)))"
        );
    }

    #[test]
    fn test_connect_string_passes_easy_connect_through() {
        let result = connect_string("oracle:thin:@//db.local:1521/FREEPDB1").unwrap();

        assert_eq!(result, "//db.local:1521/FREEPDB1");
    }

    #[test]
    fn test_connect_string_rejects_other_schemes() {
        assert!(connect_string("postgres://localhost/db").is_err());
    }
}
