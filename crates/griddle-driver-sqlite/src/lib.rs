mod value;
use value::Value;

use griddle_core::{Dialect, Error, Param, ParamType, Result, Row, Rows};
use rusqlite::Connection as RusqliteConnection;
use std::path::Path;

/// A SQLite connection speaking the [`griddle_core::Connection`] seam.
#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    /// Open an in-memory SQLite database.
    pub fn in_memory() -> Connection {
        let connection = RusqliteConnection::open_in_memory().unwrap();

        Connection { connection }
    }

    /// Open a SQLite database at the specified file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Connection { connection })
    }

    /// Open from a `sqlite:` connection string; `sqlite::memory:` (or a bare
    /// `sqlite:`) opens an in-memory database.
    pub fn connect(connection_str: &str) -> Result<Connection> {
        if Dialect::detect(connection_str) != Some(Dialect::Sqlite) {
            return Err(Error::UnknownDialect(connection_str.to_string()));
        }

        let rest = &connection_str[Dialect::Sqlite.prefix().len()..];
        if rest.is_empty() || rest == ":memory:" {
            Ok(Self::in_memory())
        } else {
            Self::open(rest)
        }
    }
}

impl griddle_core::Connection for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn exec(&mut self, sql: &str, params: &[Param]) -> Result<u64> {
        let mut stmt = self.connection.prepare(sql).map_err(Error::driver)?;
        let named = named_values(params);
        let count = stmt
            .execute(named_refs(&named).as_slice())
            .map_err(Error::driver)?;
        Ok(count as u64)
    }

    fn query(&mut self, sql: &str, params: &[Param]) -> Result<Rows> {
        let mut stmt = self.connection.prepare(sql).map_err(Error::driver)?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let named = named_values(params);
        let mut rows = stmt
            .query(named_refs(&named).as_slice())
            .map_err(Error::driver)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut record = Row::new();
            for (index, name) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(Error::driver)?;
                record.insert(name.clone(), Value::from_sql(value));
            }
            out.push(record);
        }

        // rusqlite does not report a match count for SELECT
        Ok(Rows {
            rows: out,
            affected: None,
        })
    }

    fn begin(&mut self) -> Result<()> {
        self.connection
            .execute(Dialect::Sqlite.begin_statement(), [])
            .map_err(Error::driver)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.connection.execute("COMMIT", []).map_err(Error::driver)?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.connection
            .execute("ROLLBACK", [])
            .map_err(Error::driver)?;
        Ok(())
    }

    fn last_insert_id(&mut self) -> Result<Option<i64>> {
        Ok(Some(self.connection.last_insert_rowid()))
    }

    fn quote(&self, raw: &str, _hint: Option<ParamType>) -> String {
        format!("'{}'", raw.replace('\'', "''"))
    }
}

fn named_values(params: &[Param]) -> Vec<(String, Value)> {
    params
        .iter()
        .map(|param| (format!(":{}", param.name), Value::from(&param.value)))
        .collect()
}

fn named_refs(named: &[(String, Value)]) -> Vec<(&str, &dyn rusqlite::ToSql)> {
    named
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn rusqlite::ToSql))
        .collect()
}
