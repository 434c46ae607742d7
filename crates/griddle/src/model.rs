use crate::{ModelSchema, Outcome};

use griddle_sql::QueryKind;

/// Verdict of a precondition hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Proceed with the operation.
    Allow,

    /// Abort, with nothing to report.
    Deny,

    /// Abort when the outcome is not good; its messages are carried into the
    /// operation's outcome.
    Checked(Outcome),
}

/// A struct mapped to one table through a statically registered schema.
///
/// The schema is built once per type — register each field exactly once —
/// and shared by every instance:
///
/// ```
/// use griddle::{FieldDescriptor, FieldFlags, Model, ModelSchema, ParamType, Value};
/// use std::sync::LazyLock;
///
/// #[derive(Debug, Default)]
/// struct Person {
///     id: i64,
///     name: String,
/// }
///
/// static SCHEMA: LazyLock<ModelSchema<Person>> = LazyLock::new(|| {
///     ModelSchema::builder("people")
///         .field(
///             "id",
///             FieldDescriptor::new("id", ParamType::Int, FieldFlags::IS_KEY).unwrap(),
///             |p: &Person| Value::Int(p.id),
///             |p, v| p.id = v.as_int().unwrap_or_default(),
///         )
///         .field(
///             "name",
///             FieldDescriptor::new("name", ParamType::Str, FieldFlags::SHOULD_INSERT).unwrap(),
///             |p| Value::from(p.name.clone()),
///             |p, v| p.name = v.as_str().unwrap_or_default().to_string(),
///         )
///         .build()
///         .expect("person schema is valid")
/// });
///
/// impl Model for Person {
///     fn schema() -> &'static ModelSchema<Person> {
///         &SCHEMA
///     }
/// }
/// ```
pub trait Model: Sized {
    /// The schema shared by every instance of this model.
    fn schema() -> &'static ModelSchema<Self>;

    /// Override point run before each CRUD operation. The default allows
    /// everything.
    fn precondition(&self, _op: QueryKind) -> Gate {
        Gate::Allow
    }
}
