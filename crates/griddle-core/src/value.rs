use chrono::{Local, NaiveDateTime};

/// Timestamp format used for storage and serialization.
pub const YMD_HMS: &str = "%Y-%m-%d %H:%M:%S";

/// Native parameter type of a bound value or mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Null,
    Int,
    Str,
    Bool,
    DateTime,
}

/// A value flowing between model fields and the database connection.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,

    /// Signed 64-bit integer
    Int(i64),

    /// String value
    Str(String),

    /// Boolean value
    Bool(bool),

    /// Date and time, no timezone
    DateTime(NaiveDateTime),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Bool(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Booleans read back from storage as 0/1 integers are accepted.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Timestamps read back as `YYYY-MM-DD HH:MM:SS` text are parsed.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(v) => Some(*v),
            Self::Str(s) => NaiveDateTime::parse_from_str(s, YMD_HMS).ok(),
            _ => None,
        }
    }

    /// Convert this value into the flat representation bound to the
    /// connection, driven by the owning field's declared type.
    ///
    /// Booleans store as 0/1, timestamps as formatted text (a missing
    /// timestamp on a non-nullable field stores as "now"), and an absent
    /// value on a nullable field binds with the null parameter type.
    pub fn to_storage(&self, ty: ParamType, allows_null: bool) -> (Value, ParamType) {
        if allows_null && self.is_null() {
            return (Value::Null, ParamType::Null);
        }

        match ty {
            ParamType::Bool => (
                Value::Int(self.as_bool().unwrap_or(false) as i64),
                ParamType::Int,
            ),
            ParamType::DateTime => {
                let text = match self {
                    Value::DateTime(dt) => dt.format(YMD_HMS).to_string(),
                    Value::Str(s) if !s.is_empty() => s.clone(),
                    _ => Local::now().naive_local().format(YMD_HMS).to_string(),
                };
                (Value::Str(text), ParamType::Str)
            }
            ParamType::Null => (Value::Null, ParamType::Null),
            ParamType::Int | ParamType::Str => (self.clone(), ty),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn bool_stores_as_integer() {
        let (value, ty) = Value::Bool(true).to_storage(ParamType::Bool, false);
        assert_eq!(value, Value::Int(1));
        assert_eq!(ty, ParamType::Int);

        let (value, _) = Value::Bool(false).to_storage(ParamType::Bool, false);
        assert_eq!(value, Value::Int(0));
    }

    #[test]
    fn datetime_stores_as_formatted_text() {
        let (value, ty) = Value::DateTime(dt(2024, 3, 9, 17, 5, 33)).to_storage(ParamType::DateTime, false);
        assert_eq!(value, Value::Str("2024-03-09 17:05:33".to_string()));
        assert_eq!(ty, ParamType::Str);
    }

    #[test]
    fn missing_datetime_stores_as_now() {
        let (value, _) = Value::Null.to_storage(ParamType::DateTime, false);
        let text = value.as_str().unwrap().to_string();
        assert!(NaiveDateTime::parse_from_str(&text, YMD_HMS).is_ok());
    }

    #[test]
    fn nullable_absent_value_binds_null() {
        let (value, ty) = Value::Null.to_storage(ParamType::Str, true);
        assert_eq!(value, Value::Null);
        assert_eq!(ty, ParamType::Null);

        let (value, ty) = Value::Null.to_storage(ParamType::DateTime, true);
        assert_eq!(value, Value::Null);
        assert_eq!(ty, ParamType::Null);
    }

    #[test]
    fn datetime_parses_from_text() {
        let value = Value::Str("2024-03-09 17:05:33".to_string());
        assert_eq!(value.as_datetime(), Some(dt(2024, 3, 9, 17, 5, 33)));
        assert_eq!(Value::Str("not a date".to_string()).as_datetime(), None);
    }

    #[test]
    fn bool_reads_from_integer() {
        assert_eq!(Value::Int(1).as_bool(), Some(true));
        assert_eq!(Value::Int(0).as_bool(), Some(false));
        assert_eq!(Value::Int(7).as_bool(), None);
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }
}
