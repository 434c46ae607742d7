use griddle_core::{Dialect, ParamType};

use indexmap::IndexMap;
use std::collections::HashMap;

/// A named, pre-registered, dialect-specific SQL string with typed named
/// arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredQuery {
    sql: String,
    args: IndexMap<String, ParamType>,
}

impl StoredQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Declared arguments, in registration order.
    pub fn args(&self) -> impl Iterator<Item = (&str, ParamType)> {
        self.args.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// Registry of stored query templates keyed by (dialect, key).
///
/// Explicit state with an explicit lifecycle: build one, register templates,
/// and hand it to the [`Db`](crate::Db) that needs it. Registration never
/// overwrites.
#[derive(Debug, Clone, Default)]
pub struct QueryCatalog {
    templates: HashMap<(Dialect, String), StoredQuery>,
}

impl QueryCatalog {
    pub fn new() -> QueryCatalog {
        QueryCatalog::default()
    }

    /// Register one template. Returns `false` — leaving any existing template
    /// unchanged — when the (dialect, key) pair is already present, or when
    /// the dialect string (a bare tag or a prefixed connection string) is
    /// unrecognized.
    pub fn store(
        &mut self,
        dialect: &str,
        key: &str,
        sql: &str,
        args: &[(&str, ParamType)],
    ) -> bool {
        let Some(dialect) = Dialect::parse(dialect) else {
            return false;
        };

        let slot = (dialect, key.to_string());
        if self.templates.contains_key(&slot) {
            return false;
        }

        let args = args
            .iter()
            .map(|(name, ty)| (name.to_string(), *ty))
            .collect();
        self.templates.insert(slot, StoredQuery {
            sql: sql.to_string(),
            args,
        });
        true
    }

    /// Register a batch of `(key, sql, args)` templates for one dialect.
    /// Returns `true` only if every template registered.
    pub fn store_all(
        &mut self,
        dialect: &str,
        entries: &[(&str, &str, &[(&str, ParamType)])],
    ) -> bool {
        let mut all = true;
        for (key, sql, args) in entries {
            all &= self.store(dialect, key, sql, args);
        }
        all
    }

    pub fn get(&self, dialect: Dialect, key: &str) -> Option<&StoredQuery> {
        self.templates.get(&(dialect, key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
