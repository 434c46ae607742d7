use griddle_core::{Dialect, Error, FieldDescriptor, Result, Value, YMD_HMS};
use griddle_sql::{QueryKind, Serializer};

use indexmap::IndexMap;
use tracing::warn;

/// One mapped property: its descriptor plus a statically declared accessor
/// pair.
pub struct FieldBinding<M> {
    descriptor: FieldDescriptor,
    get: fn(&M) -> Value,
    set: fn(&mut M, Value),
}

impl<M> FieldBinding<M> {
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Read the property's current value.
    pub fn get(&self, model: &M) -> Value {
        (self.get)(model)
    }

    /// Write the property. The setter owns any typed conversion (enums by
    /// value or name, timestamps from text, 0/1 booleans).
    pub fn set(&self, model: &mut M, value: Value) {
        (self.set)(model, value)
    }
}

/// The field-descriptor set of one model type: table name plus one binding
/// per mapped property, in registration order.
///
/// Built once per type — typically held in a `static LazyLock` — and
/// immutable afterwards.
pub struct ModelSchema<M> {
    table: String,
    fields: IndexMap<String, FieldBinding<M>>,
}

impl<M> ModelSchema<M> {
    pub fn builder(table: impl Into<String>) -> SchemaBuilder<M> {
        SchemaBuilder {
            table: table.into(),
            fields: IndexMap::new(),
            duplicate: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bindings in registration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldBinding<M>)> {
        self.fields.iter().map(|(prop, binding)| (prop.as_str(), binding))
    }

    pub fn binding(&self, prop: &str) -> Option<&FieldBinding<M>> {
        self.fields.get(prop)
    }

    /// Property of the auto-increment field, if one is registered.
    pub fn auto_increment_prop(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(_, binding)| binding.descriptor.auto_increment())
            .map(|(prop, _)| prop.as_str())
    }

    /// Derive the SQL text of one CRUD statement for this schema.
    pub fn class_query(&self, dialect: Dialect, kind: QueryKind, key_filter: bool) -> String {
        let pairs: Vec<(&str, &FieldDescriptor)> = self
            .fields
            .iter()
            .map(|(prop, binding)| (prop.as_str(), &binding.descriptor))
            .collect();
        Serializer::new(dialect).class_query(&self.table, &pairs, kind, key_filter)
    }

    /// Read a property by name. Unmapped access is not an error: it logs a
    /// warning and yields `None`.
    pub fn get(&self, model: &M, prop: &str) -> Option<Value> {
        match self.fields.get(prop) {
            Some(binding) => Some(binding.get(model)),
            None => {
                warn!("property `{prop}` is not mapped on table `{}`", self.table);
                None
            }
        }
    }

    /// Write a property by name. Unmapped access logs a warning and drops
    /// the assignment.
    pub fn set(&self, model: &mut M, prop: &str, value: Value) {
        match self.fields.get(prop) {
            Some(binding) => binding.set(model, value),
            None => {
                warn!("property `{prop}` is not mapped on table `{}`", self.table);
            }
        }
    }

    /// Flatten the model into a property → value map, in registration order.
    pub fn to_array(&self, model: &M) -> IndexMap<String, Value> {
        self.fields
            .iter()
            .map(|(prop, binding)| (prop.clone(), binding.get(model)))
            .collect()
    }

    /// Flatten the model for serialization: timestamps as formatted strings,
    /// enumerated and boolean fields as their raw values.
    pub fn to_serializable(&self, model: &M) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(prop, binding)| {
                let value = match binding.get(model) {
                    Value::Null => serde_json::Value::Null,
                    Value::Int(v) => serde_json::Value::from(v),
                    Value::Str(v) => serde_json::Value::from(v),
                    Value::Bool(v) => serde_json::Value::from(v),
                    Value::DateTime(v) => {
                        serde_json::Value::from(v.format(YMD_HMS).to_string())
                    }
                };
                (prop.clone(), value)
            })
            .collect()
    }

    /// Construct a model from a flat external mapping (a decoded row, a
    /// request payload).
    ///
    /// Strict arity: after removing `exclude` properties from consideration,
    /// the source must carry exactly one entry per remaining mapped field.
    /// Source keys match case-insensitively against column names first,
    /// falling back to property names; an unmatched key is a distinct
    /// failure from the arity check.
    pub fn from_array(&self, source: &IndexMap<String, Value>, exclude: &[&str]) -> Result<M>
    where
        M: Default,
    {
        if source.is_empty() {
            return Err(Error::EmptySource);
        }

        let excluded = |prop: &str| exclude.iter().any(|e| e.eq_ignore_ascii_case(prop));
        let expected = self.fields.keys().filter(|prop| !excluded(prop)).count();
        if source.len() != expected {
            return Err(Error::ArityMismatch {
                expected,
                actual: source.len(),
            });
        }

        let mut model = M::default();
        for (key, value) in source {
            let matched = self
                .fields
                .iter()
                .filter(|(prop, _)| !excluded(prop))
                .find(|(_, binding)| binding.descriptor.column().eq_ignore_ascii_case(key))
                .or_else(|| {
                    self.fields
                        .iter()
                        .filter(|(prop, _)| !excluded(prop))
                        .find(|(prop, _)| prop.eq_ignore_ascii_case(key))
                });

            let Some((_, binding)) = matched else {
                return Err(Error::PropertyNotFound(key.clone()));
            };
            binding.set(&mut model, value.clone());
        }

        Ok(model)
    }
}

/// Registers the field bindings of a [`ModelSchema`], once, at model
/// definition time. Registering the same property twice is a configuration
/// error surfaced by [`SchemaBuilder::build`].
pub struct SchemaBuilder<M> {
    table: String,
    fields: IndexMap<String, FieldBinding<M>>,
    duplicate: Option<String>,
}

impl<M> SchemaBuilder<M> {
    pub fn field(
        mut self,
        prop: impl Into<String>,
        descriptor: FieldDescriptor,
        get: fn(&M) -> Value,
        set: fn(&mut M, Value),
    ) -> Self {
        let prop = prop.into();

        if self.fields.contains_key(&prop) {
            self.duplicate.get_or_insert(prop);
            return self;
        }

        self.fields.insert(prop, FieldBinding { descriptor, get, set });
        self
    }

    pub fn build(self) -> Result<ModelSchema<M>> {
        if let Some(prop) = self.duplicate {
            return Err(Error::DuplicateField(prop));
        }

        Ok(ModelSchema {
            table: self.table,
            fields: self.fields,
        })
    }
}
