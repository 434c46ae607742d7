use crate::QueryCatalog;

use griddle_core::{Connection, Dialect, Error, Param, ParamType, Result, Row, Rows};
use tracing::debug;

/// Record of one executed query: statement text plus its bound arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub sql: String,
    pub params: Vec<Param>,
}

/// Record of one driver error, paired with the query that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub query: QueryRecord,
    pub message: String,
}

/// A database handle: a pass-through proxy over one native connection that
/// adds dialect metadata, call logging, an append-only query/error audit
/// trail, and a stored-query catalog.
///
/// Not synchronized — use one handle per worker.
#[derive(Debug)]
pub struct Db {
    connection: Option<Box<dyn Connection>>,
    dialect: Dialect,
    catalog: QueryCatalog,
    queries: Vec<QueryRecord>,
    errors: Vec<ErrorRecord>,
}

impl Db {
    /// Connect from a connection string, detecting the dialect from its
    /// prefix. An unrecognized prefix is a configuration error; a recognized
    /// dialect without a compiled-in driver reports
    /// [`Error::UnsupportedDriver`].
    pub fn connect(connection_str: &str) -> Result<Db> {
        let dialect = Dialect::detect(connection_str)
            .ok_or_else(|| Error::UnknownDialect(connection_str.to_string()))?;

        match dialect {
            #[cfg(feature = "sqlite")]
            Dialect::Sqlite => Ok(Self::from_connection(Box::new(
                griddle_driver_sqlite::Connection::connect(connection_str)?,
            ))),
            #[cfg(feature = "postgresql")]
            Dialect::Pgsql => Ok(Self::from_connection(Box::new(
                griddle_driver_postgresql::Connection::connect(connection_str)?,
            ))),
            other => Err(Error::UnsupportedDriver(other)),
        }
    }

    /// Wrap an existing connection; the dialect is read from the connection's
    /// own metadata.
    pub fn from_connection(connection: Box<dyn Connection>) -> Db {
        Self::with_catalog(connection, QueryCatalog::new())
    }

    /// Wrap an existing connection with a pre-populated stored-query catalog.
    pub fn with_catalog(connection: Box<dyn Connection>, catalog: QueryCatalog) -> Db {
        Db {
            dialect: connection.dialect(),
            connection: Some(connection),
            catalog,
            queries: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn is_active(&self) -> bool {
        self.connection.is_some()
    }

    /// Drop the underlying connection. Subsequent primitive calls return
    /// zero values rather than erroring.
    pub fn close(&mut self) {
        self.connection = None;
    }

    /// Executed queries, in execution order. Never pruned.
    pub fn queries(&self) -> &[QueryRecord] {
        &self.queries
    }

    /// Driver errors encountered, each paired with its offending query.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    /// Execute a statement, returning the affected row count. Zero on an
    /// inactive handle.
    pub fn exec(&mut self, sql: &str, params: &[Param]) -> Result<u64> {
        let Some(connection) = self.connection.as_deref_mut() else {
            return Ok(0);
        };

        debug!("exec: {sql}");
        let result = connection.exec(sql, params);
        self.record(sql, params, result.as_ref().err());
        result
    }

    /// Execute a query, returning its rows. Empty on an inactive handle.
    pub fn query(&mut self, sql: &str, params: &[Param]) -> Result<Rows> {
        let Some(connection) = self.connection.as_deref_mut() else {
            return Ok(Rows::default());
        };

        debug!("query: {sql}");
        let result = connection.query(sql, params);
        self.record(sql, params, result.as_ref().err());
        result
    }

    /// Execute a query and return its first row, if any.
    pub fn query_one(&mut self, sql: &str, params: &[Param]) -> Result<Option<Row>> {
        Ok(self.query(sql, params)?.rows.into_iter().next())
    }

    pub fn begin(&mut self) -> Result<()> {
        match self.connection.as_deref_mut() {
            Some(connection) => connection.begin(),
            None => Ok(()),
        }
    }

    pub fn commit(&mut self) -> Result<()> {
        match self.connection.as_deref_mut() {
            Some(connection) => connection.commit(),
            None => Ok(()),
        }
    }

    pub fn rollback(&mut self) -> Result<()> {
        match self.connection.as_deref_mut() {
            Some(connection) => connection.rollback(),
            None => Ok(()),
        }
    }

    /// Identifier generated by the most recent insert, when the driver
    /// tracks one. `None` on an inactive handle.
    pub fn last_insert_id(&mut self) -> Result<Option<i64>> {
        match self.connection.as_deref_mut() {
            Some(connection) => connection.last_insert_id(),
            None => Ok(None),
        }
    }

    /// Quote a string literal via the native connection. Empty on an
    /// inactive handle.
    pub fn quote(&self, raw: &str, hint: Option<ParamType>) -> String {
        match self.connection.as_deref() {
            Some(connection) => connection.quote(raw, hint),
            None => String::new(),
        }
    }

    /// Register a stored query template. See [`QueryCatalog::store`].
    pub fn store_query(
        &mut self,
        dialect: &str,
        key: &str,
        sql: &str,
        args: &[(&str, ParamType)],
    ) -> bool {
        self.catalog.store(dialect, key, sql, args)
    }

    /// Register a batch of templates for one dialect. See
    /// [`QueryCatalog::store_all`].
    pub fn store_queries(
        &mut self,
        dialect: &str,
        entries: &[(&str, &str, &[(&str, ParamType)])],
    ) -> bool {
        self.catalog.store_all(dialect, entries)
    }

    /// Look up the stored SQL registered under `key` for this handle's own
    /// dialect. An absent key is a safe miss, not an error.
    pub fn stored_sql(&self, key: &str) -> Option<&str> {
        self.catalog
            .get(self.dialect, key)
            .map(|template| template.sql())
    }

    /// Execute the stored query registered under `key` for this handle's own
    /// dialect. An absent key, or a supplied argument count that does not
    /// exactly match the template's declared argument count, is a safe miss
    /// returning `Ok(None)`. Execution failures of a found template follow
    /// the normal record-and-raise path.
    pub fn exec_stored(&mut self, key: &str, params: &[Param]) -> Result<Option<u64>> {
        match self.stored_for(key, params) {
            Some(sql) => self.exec(&sql, params).map(Some),
            None => Ok(None),
        }
    }

    /// Query counterpart of [`Db::exec_stored`], with the same safe-miss
    /// policy.
    pub fn query_stored(&mut self, key: &str, params: &[Param]) -> Result<Option<Rows>> {
        match self.stored_for(key, params) {
            Some(sql) => self.query(&sql, params).map(Some),
            None => Ok(None),
        }
    }

    fn stored_for(&self, key: &str, params: &[Param]) -> Option<String> {
        let template = self.catalog.get(self.dialect, key)?;
        if template.arg_count() != params.len() {
            return None;
        }
        Some(template.sql().to_string())
    }

    fn record(&mut self, sql: &str, params: &[Param], error: Option<&Error>) {
        let query = QueryRecord {
            sql: sql.to_string(),
            params: params.to_vec(),
        };

        match error {
            None => self.queries.push(query),
            Some(error) => self.errors.push(ErrorRecord {
                query,
                message: error.to_string(),
            }),
        }
    }
}
