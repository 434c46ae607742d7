mod catalog;
pub use catalog::{QueryCatalog, StoredQuery};

mod db;
pub use db::{Db, ErrorRecord, QueryRecord};

mod engine;

mod model;
pub use model::{Gate, Model};

mod outcome;
pub use outcome::Outcome;

mod schema;
pub use schema::{FieldBinding, ModelSchema, SchemaBuilder};

pub use griddle_core::{
    enumerate, resolve, Connection, Dialect, Enumerated, Error, FieldDescriptor, FieldFlags,
    Param, ParamType, Row, Rows, Value, YMD_HMS,
};
pub use griddle_sql::{QueryKind, Serializer, Transaction};

/// A Result type alias that uses Griddle's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
