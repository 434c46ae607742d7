use chrono::NaiveDateTime;
use griddle_core::{Error, Result, Value as CoreValue, YMD_HMS};
use postgres::types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type};

/// Bridges [`CoreValue`] to the postgres parameter and column types.
#[derive(Debug)]
pub(crate) struct Value(CoreValue);

impl From<&CoreValue> for Value {
    fn from(value: &CoreValue) -> Self {
        Self(value.clone())
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => value.to_sql(ty, out),
            CoreValue::Int(value) => match *ty {
                Type::INT2 => (*value as i16).to_sql(ty, out),
                Type::INT4 => (*value as i32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            // Timestamps marshal through the mapper as formatted text;
            // re-parse when the target column is a real timestamp.
            CoreValue::Str(value) => match *ty {
                Type::TIMESTAMP => NaiveDateTime::parse_from_str(value, YMD_HMS)?.to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::DateTime(value) => value.to_sql(ty, out),
        }
    }

    accepts!(BOOL, INT2, INT4, INT8, TEXT, VARCHAR, BPCHAR, TIMESTAMP);
    to_sql_checked!();
}

/// Converts one column of a result row to a core value.
pub(crate) fn from_column(row: &postgres::Row, index: usize, ty: &Type) -> Result<CoreValue> {
    let value = match *ty {
        Type::BOOL => row
            .try_get::<_, Option<bool>>(index)
            .map_err(Error::driver)?
            .map(CoreValue::Bool),
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map_err(Error::driver)?
            .map(|v| CoreValue::Int(v as i64)),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(index)
            .map_err(Error::driver)?
            .map(|v| CoreValue::Int(v as i64)),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(index)
            .map_err(Error::driver)?
            .map(CoreValue::Int),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(index)
            .map_err(Error::driver)?
            .map(CoreValue::DateTime),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR => row
            .try_get::<_, Option<String>>(index)
            .map_err(Error::driver)?
            .map(CoreValue::Str),
        // Unmodeled column types come back as text when the driver can
        // render them, null otherwise.
        _ => match row.try_get::<_, Option<String>>(index) {
            Ok(value) => value.map(CoreValue::Str),
            Err(_) => None,
        },
    };

    Ok(value.unwrap_or(CoreValue::Null))
}
