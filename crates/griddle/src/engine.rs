use crate::{Db, Gate, Model, ModelSchema, Outcome};

use griddle_core::{FieldDescriptor, Param, Value};
use griddle_sql::QueryKind;
use std::panic::Location;
use tracing::{error, info};

/// CRUD execution. Every operation returns an [`Outcome`]; driver failures
/// are captured there and never propagate as errors.
impl Db {
    /// Insert the model's insert-eligible fields. On success, a registered
    /// auto-increment field is populated from the connection's last inserted
    /// id.
    #[track_caller]
    pub fn create<M: Model + 'static>(&mut self, model: &mut M) -> Outcome {
        let caller = Location::caller();
        let schema = M::schema();
        let mut outcome = Outcome::new();

        if !gate(model, QueryKind::Insert, &mut outcome) {
            return finish(outcome, caller);
        }

        if schema.is_empty() {
            outcome.push(format!(
                "no fields are registered for table `{}`",
                schema.table()
            ));
            return finish(outcome, caller);
        }

        if !schema.fields().any(|(_, b)| b.descriptor().should_insert()) {
            outcome.push(format!(
                "no insertable fields are registered for table `{}`",
                schema.table()
            ));
            return finish(outcome, caller);
        }

        let sql = schema.class_query(self.dialect(), QueryKind::Insert, false);
        let params = bind(model, schema, FieldDescriptor::should_insert);
        info!("create on `{}`: {sql} {params:?}", schema.table());

        match self.exec(&sql, &params) {
            Ok(_) => {
                if let Some(prop) = schema.auto_increment_prop() {
                    if let Ok(Some(id)) = self.last_insert_id() {
                        schema.set(model, prop, Value::Int(id));
                    }
                }
                outcome.mark_good();
            }
            Err(err) => outcome.push(format!("create failed on `{}`: {err}", schema.table())),
        }

        finish(outcome, caller)
    }

    /// Select one row by the model's key fields and marshal every column
    /// into its mapped property. Zero rows is a normal bad-with-message
    /// outcome.
    #[track_caller]
    pub fn read<M: Model + 'static>(&mut self, model: &mut M) -> Outcome {
        let caller = Location::caller();
        let schema = M::schema();
        let mut outcome = Outcome::new();

        if !gate(model, QueryKind::Select, &mut outcome) {
            return finish(outcome, caller);
        }

        if schema.is_empty() {
            outcome.push(format!(
                "no fields are registered for table `{}`",
                schema.table()
            ));
            return finish(outcome, caller);
        }

        let sql = schema.class_query(self.dialect(), QueryKind::Select, true);
        let params = bind(model, schema, FieldDescriptor::is_key);
        info!("read on `{}`: {sql} {params:?}", schema.table());

        match self.query(&sql, &params) {
            Ok(rows) => {
                // Some drivers do not report row counts for SELECT; for
                // those the fetch result itself decides success.
                let counted = !self.dialect().select_reports_row_count()
                    || rows.affected.unwrap_or(rows.rows.len() as u64) >= 1;

                match rows.rows.into_iter().next() {
                    Some(row) if counted => {
                        for (_, binding) in schema.fields() {
                            if let Some(value) = row.get(binding.descriptor().column()) {
                                binding.set(model, value.clone());
                            }
                        }
                        outcome.mark_good();
                    }
                    _ => outcome.push(format!("no rows found in `{}`", schema.table())),
                }
            }
            Err(err) => outcome.push(format!("read failed on `{}`: {err}", schema.table())),
        }

        finish(outcome, caller)
    }

    /// Update the model's update-eligible fields, filtered on its key
    /// fields.
    #[track_caller]
    pub fn update<M: Model + 'static>(&mut self, model: &M) -> Outcome {
        let caller = Location::caller();
        let schema = M::schema();
        let mut outcome = Outcome::new();

        if !gate(model, QueryKind::Update, &mut outcome) {
            return finish(outcome, caller);
        }

        if let Some(message) = keyed_guard(schema, QueryKind::Update) {
            outcome.push(message);
            return finish(outcome, caller);
        }

        let sql = schema.class_query(self.dialect(), QueryKind::Update, true);
        let mut params = bind(model, schema, FieldDescriptor::should_update);
        for key in bind(model, schema, FieldDescriptor::is_key) {
            if !params.iter().any(|p| p.name == key.name) {
                params.push(key);
            }
        }
        info!("update on `{}`: {sql} {params:?}", schema.table());

        match self.exec(&sql, &params) {
            Ok(_) => outcome.mark_good(),
            Err(err) => outcome.push(format!("update failed on `{}`: {err}", schema.table())),
        }

        finish(outcome, caller)
    }

    /// Delete the row identified by the model's key fields.
    #[track_caller]
    pub fn delete<M: Model + 'static>(&mut self, model: &M) -> Outcome {
        let caller = Location::caller();
        let schema = M::schema();
        let mut outcome = Outcome::new();

        if !gate(model, QueryKind::Delete, &mut outcome) {
            return finish(outcome, caller);
        }

        if let Some(message) = keyed_guard(schema, QueryKind::Delete) {
            outcome.push(message);
            return finish(outcome, caller);
        }

        let sql = schema.class_query(self.dialect(), QueryKind::Delete, true);
        let params = bind(model, schema, FieldDescriptor::is_key);
        info!("delete on `{}`: {sql} {params:?}", schema.table());

        match self.exec(&sql, &params) {
            Ok(_) => outcome.mark_good(),
            Err(err) => outcome.push(format!("delete failed on `{}`: {err}", schema.table())),
        }

        finish(outcome, caller)
    }
}

/// Run the model's precondition hook. A deny, or a checked outcome that is
/// not good, aborts; carried messages move onto `outcome`.
fn gate<M: Model>(model: &M, op: QueryKind, outcome: &mut Outcome) -> bool {
    match model.precondition(op) {
        Gate::Allow => true,
        Gate::Deny => false,
        Gate::Checked(check) => {
            if check.is_good() {
                true
            } else {
                outcome.absorb(&check);
                false
            }
        }
    }
}

fn keyed_guard<M>(schema: &ModelSchema<M>, op: QueryKind) -> Option<String> {
    if schema.is_empty() {
        return Some(format!(
            "no fields are registered for table `{}`",
            schema.table()
        ));
    }

    if !schema.fields().any(|(_, b)| b.descriptor().is_key()) {
        return Some(format!(
            "no key fields are registered for table `{}`, cannot {}",
            schema.table(),
            op.verb()
        ));
    }

    None
}

/// Marshal the fields picked by `pick` into named parameters, each bound
/// with its descriptor's native parameter type.
fn bind<M: Model>(
    model: &M,
    schema: &ModelSchema<M>,
    pick: fn(&FieldDescriptor) -> bool,
) -> Vec<Param> {
    schema
        .fields()
        .filter(|(_, binding)| pick(binding.descriptor()))
        .map(|(prop, binding)| {
            let descriptor = binding.descriptor();
            let (value, ty) = binding
                .get(model)
                .to_storage(descriptor.value_type(), descriptor.allows_nulls());
            Param::new(prop, value, ty)
        })
        .collect()
}

/// Log a failing outcome's messages, tagged with the CRUD call site.
fn finish(outcome: Outcome, caller: &Location<'_>) -> Outcome {
    if !outcome.is_good() {
        for message in outcome.messages() {
            error!("{caller}: {message}");
        }
    }
    outcome
}
