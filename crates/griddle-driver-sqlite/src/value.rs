use griddle_core::{Value as CoreValue, YMD_HMS};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// Bridges [`CoreValue`] to rusqlite's parameter and column types.
#[derive(Debug)]
pub(crate) struct Value(CoreValue);

impl From<&CoreValue> for Value {
    fn from(value: &CoreValue) -> Self {
        Self(value.clone())
    }
}

impl Value {
    /// Converts a SQLite column value to a core value. SQLite reals and
    /// blobs have no core representation and come back as text.
    pub(crate) fn from_sql(value: ValueRef<'_>) -> CoreValue {
        match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(value) => CoreValue::Int(value),
            ValueRef::Real(value) => CoreValue::Str(value.to_string()),
            ValueRef::Text(value) => CoreValue::Str(String::from_utf8_lossy(value).into_owned()),
            ValueRef::Blob(value) => CoreValue::Str(String::from_utf8_lossy(value).into_owned()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match &self.0 {
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            CoreValue::Int(value) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*value))),
            CoreValue::Bool(value) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*value as i64))),
            CoreValue::Str(value) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes()))),
            CoreValue::DateTime(value) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                value.format(YMD_HMS).to_string(),
            ))),
        }
    }
}
