use crate::{Ident, QueryKind, Transaction};

use griddle_core::{Dialect, FieldDescriptor};
use std::fmt::Write;

/// Derives SQL text from a table name and an ordered field-descriptor set.
///
/// Generation is pure: no I/O, no connection state. Column order always
/// equals registration order, and every identifier is wrapped in the
/// dialect's quote pair.
#[derive(Debug)]
pub struct Serializer {
    dialect: Dialect,
}

impl Serializer {
    pub fn new(dialect: Dialect) -> Serializer {
        Serializer { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Serialize one CRUD statement for the given fields, listed as
    /// `(property, descriptor)` pairs in registration order. Placeholders are
    /// named after the property (`:property`). The key filter appends an
    /// AND-joined WHERE clause over key fields; INSERT never carries one.
    pub fn class_query(
        &self,
        table: &str,
        fields: &[(&str, &FieldDescriptor)],
        kind: QueryKind,
        key_filter: bool,
    ) -> String {
        let mut sql = String::new();

        match kind {
            QueryKind::Insert => {
                write!(sql, "INSERT INTO {} (", self.ident(table)).unwrap();
                for (i, (_, descriptor)) in self.insertable(fields).enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    write!(sql, "{}", self.ident(descriptor.column())).unwrap();
                }
                sql.push_str(") VALUES (");
                for (i, (prop, _)) in self.insertable(fields).enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push(':');
                    sql.push_str(prop);
                }
                sql.push(')');
            }
            QueryKind::Select => {
                sql.push_str("SELECT ");
                for (i, (_, descriptor)) in fields.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    write!(sql, "{}", self.ident(descriptor.column())).unwrap();
                }
                write!(sql, " FROM {}", self.ident(table)).unwrap();
            }
            QueryKind::Update => {
                write!(sql, "UPDATE {} SET ", self.ident(table)).unwrap();
                let updatable = fields.iter().filter(|(_, d)| d.should_update());
                for (i, (prop, descriptor)) in updatable.enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    write!(sql, "{} = :{prop}", self.ident(descriptor.column())).unwrap();
                }
            }
            QueryKind::Delete => {
                write!(sql, "DELETE FROM {}", self.ident(table)).unwrap();
            }
        }

        if key_filter && kind != QueryKind::Insert {
            let keys: Vec<_> = fields.iter().filter(|(_, d)| d.is_key()).collect();
            if !keys.is_empty() {
                sql.push_str(" WHERE ");
                for (i, (prop, descriptor)) in keys.into_iter().enumerate() {
                    if i > 0 {
                        sql.push_str(" AND ");
                    }
                    write!(sql, "{} = :{prop}", self.ident(descriptor.column())).unwrap();
                }
            }
        }

        sql.push(';');
        sql
    }

    /// Serialize a transaction control operation.
    pub fn transaction(&self, op: Transaction) -> &'static str {
        match op {
            Transaction::Begin => self.dialect.begin_statement(),
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        }
    }

    fn insertable<'a>(
        &self,
        fields: &'a [(&'a str, &'a FieldDescriptor)],
    ) -> impl Iterator<Item = &'a (&'a str, &'a FieldDescriptor)> {
        fields.iter().filter(|(_, d)| d.should_insert())
    }

    fn ident<'a>(&self, raw: &'a str) -> Ident<'a> {
        Ident::new(raw, self.dialect)
    }
}
