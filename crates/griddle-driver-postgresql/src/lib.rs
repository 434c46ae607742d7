mod value;
use value::Value;

use griddle_core::{Dialect, Error, Param, ParamType, Result, Row, Rows};
use postgres::{Client, NoTls};
use std::fmt;

/// A PostgreSQL connection speaking the [`griddle_core::Connection`] seam.
///
/// Generated SQL carries named `:prop` placeholders; they are rewritten to
/// positional `$n` parameters at execution time.
pub struct Connection {
    client: Client,
}

impl Connection {
    /// Connect from a `pgsql:` connection string of `key=value` pairs
    /// separated by `;`, e.g. `pgsql:host=localhost;dbname=app`.
    pub fn connect(connection_str: &str) -> Result<Connection> {
        if Dialect::detect(connection_str) != Some(Dialect::Pgsql) {
            return Err(Error::UnknownDialect(connection_str.to_string()));
        }

        let rest = &connection_str[Dialect::Pgsql.prefix().len()..];
        let config = rest.replace(';', " ");
        let client = Client::connect(&config, NoTls).map_err(Error::driver)?;
        Ok(Connection { client })
    }

    /// Wrap an already-configured client.
    pub fn from_client(client: Client) -> Connection {
        Connection { client }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl griddle_core::Connection for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::Pgsql
    }

    fn exec(&mut self, sql: &str, params: &[Param]) -> Result<u64> {
        let (sql, order) = positional(sql, params)?;
        let values: Vec<Value> = order.iter().map(|&i| Value::from(&params[i].value)).collect();
        let refs: Vec<&(dyn postgres::types::ToSql + Sync)> =
            values.iter().map(|v| v as _).collect();

        self.client.execute(&sql, &refs).map_err(Error::driver)
    }

    fn query(&mut self, sql: &str, params: &[Param]) -> Result<Rows> {
        let (sql, order) = positional(sql, params)?;
        let values: Vec<Value> = order.iter().map(|&i| Value::from(&params[i].value)).collect();
        let refs: Vec<&(dyn postgres::types::ToSql + Sync)> =
            values.iter().map(|v| v as _).collect();

        let fetched = self.client.query(&sql, &refs).map_err(Error::driver)?;

        let mut rows = Vec::with_capacity(fetched.len());
        for row in &fetched {
            let mut record = Row::new();
            for (index, column) in row.columns().iter().enumerate() {
                record.insert(
                    column.name().to_string(),
                    value::from_column(row, index, column.type_())?,
                );
            }
            rows.push(record);
        }

        let affected = Some(rows.len() as u64);
        Ok(Rows { rows, affected })
    }

    fn begin(&mut self) -> Result<()> {
        self.client
            .batch_execute(Dialect::Pgsql.begin_statement())
            .map_err(Error::driver)
    }

    fn commit(&mut self) -> Result<()> {
        self.client.batch_execute("COMMIT").map_err(Error::driver)
    }

    fn rollback(&mut self) -> Result<()> {
        self.client.batch_execute("ROLLBACK").map_err(Error::driver)
    }

    fn last_insert_id(&mut self) -> Result<Option<i64>> {
        // LASTVAL errors until a sequence has been touched this session.
        match self.client.query_one("SELECT LASTVAL()", &[]) {
            Ok(row) => Ok(row.try_get::<_, i64>(0).ok()),
            Err(_) => Ok(None),
        }
    }

    fn quote(&self, raw: &str, _hint: Option<ParamType>) -> String {
        format!("'{}'", raw.replace('\'', "''"))
    }
}

/// Rewrite named `:prop` placeholders to positional `$n` parameters,
/// returning the rewritten SQL and, for each placeholder number, the index
/// of its binding in `params`. Repeated names reuse their number. The scan
/// leaves string literals alone.
fn positional(sql: &str, params: &[Param]) -> Result<(String, Vec<usize>)> {
    let mut out = String::with_capacity(sql.len());
    let mut order: Vec<usize> = Vec::new();
    let mut assigned: Vec<(String, usize)> = Vec::new();

    let mut chars = sql.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\'' {
                in_string = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_string = true;
                out.push(c);
            }
            // a `::` cast is not a placeholder
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.push_str("::");
            }
            ':' if chars
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '_') =>
            {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }

                let number = match assigned.iter().find(|(n, _)| *n == name) {
                    Some((_, number)) => *number,
                    None => {
                        let index = params
                            .iter()
                            .position(|p| p.name == name)
                            .ok_or_else(|| {
                                Error::driver(format!("no binding for placeholder `:{name}`"))
                            })?;
                        order.push(index);
                        assigned.push((name.clone(), order.len()));
                        order.len()
                    }
                };

                out.push('$');
                out.push_str(&number.to_string());
            }
            _ => out.push(c),
        }
    }

    Ok((out, order))
}
