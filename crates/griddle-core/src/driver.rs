use crate::{Dialect, ParamType, Result, Value};

use indexmap::IndexMap;
use std::fmt::Debug;

/// One named placeholder binding (`:name` style).
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
    pub ty: ParamType,
}

impl Param {
    pub fn new(name: impl Into<String>, value: Value, ty: ParamType) -> Param {
        Param {
            name: name.into(),
            value,
            ty,
        }
    }
}

/// One result row, keyed by column name in select order.
pub type Row = IndexMap<String, Value>;

/// Result of a query operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    pub rows: Vec<Row>,

    /// Row count as reported by the driver. `None` when the driver does not
    /// report one for this statement kind.
    pub affected: Option<u64>,
}

/// The seam to a native database client.
///
/// Implementations are synchronous and blocking; any timeout semantics are
/// whatever the underlying transport provides. A connection is not
/// synchronized — use one connection per worker.
pub trait Connection: Debug {
    /// The dialect this connection speaks.
    fn dialect(&self) -> Dialect;

    /// Execute a statement, returning the affected row count.
    fn exec(&mut self, sql: &str, params: &[Param]) -> Result<u64>;

    /// Execute a query, returning its rows.
    fn query(&mut self, sql: &str, params: &[Param]) -> Result<Rows>;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Identifier generated for the most recent insert, when the driver
    /// tracks one.
    fn last_insert_id(&mut self) -> Result<Option<i64>>;

    /// Quote a string literal for direct inclusion in SQL. The hint carries
    /// an explicit parameter type when the caller supplied one.
    fn quote(&self, raw: &str, hint: Option<ParamType>) -> String;
}
