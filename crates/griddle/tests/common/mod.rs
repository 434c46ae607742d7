#![allow(dead_code)]

use chrono::NaiveDateTime;
use griddle::{
    enumerate, resolve, Connection, Dialect, Enumerated, Error, FieldDescriptor, FieldFlags, Gate,
    Model, ModelSchema, Outcome, Param, ParamType, QueryKind, Result, Row, Rows, Value,
};
use std::sync::LazyLock;

enumerate! {
    pub enum Status {
        Draft = 0,
        Active = 1,
    }
}

/// Scriptable in-memory connection for exercising the CRUD engine without a
/// database.
#[derive(Debug)]
pub struct MockConnection {
    pub dialect: Dialect,
    pub rows: Vec<Row>,
    pub affected: Option<u64>,
    pub fail_exec: Option<String>,
    pub last_id: Option<i64>,
}

impl MockConnection {
    pub fn new(dialect: Dialect) -> MockConnection {
        MockConnection {
            dialect,
            rows: Vec::new(),
            affected: None,
            fail_exec: None,
            last_id: None,
        }
    }
}

impl Connection for MockConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn exec(&mut self, _sql: &str, _params: &[Param]) -> Result<u64> {
        match &self.fail_exec {
            Some(message) => Err(Error::Driver(message.clone())),
            None => Ok(1),
        }
    }

    fn query(&mut self, _sql: &str, _params: &[Param]) -> Result<Rows> {
        Ok(Rows {
            rows: self.rows.clone(),
            affected: self.affected,
        })
    }

    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }

    fn last_insert_id(&mut self) -> Result<Option<i64>> {
        Ok(self.last_id)
    }

    fn quote(&self, raw: &str, _hint: Option<ParamType>) -> String {
        format!("'{raw}'")
    }
}

#[derive(Debug, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub joined: Option<NaiveDateTime>,
    pub status: Status,
}

impl Default for Person {
    fn default() -> Person {
        Person {
            id: 0,
            name: String::new(),
            active: false,
            joined: None,
            status: Status::Draft,
        }
    }
}

static PERSON_SCHEMA: LazyLock<ModelSchema<Person>> = LazyLock::new(|| {
    ModelSchema::builder("people")
        .field(
            "id",
            FieldDescriptor::new(
                "id",
                ParamType::Int,
                FieldFlags::IS_KEY | FieldFlags::AUTO_INCREMENT,
            )
            .unwrap(),
            |p: &Person| Value::Int(p.id),
            |p, v| p.id = v.as_int().unwrap_or_default(),
        )
        .field(
            "name",
            FieldDescriptor::new(
                "name",
                ParamType::Str,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |p| Value::from(p.name.clone()),
            |p, v| p.name = v.as_str().unwrap_or_default().to_string(),
        )
        .field(
            "active",
            FieldDescriptor::new(
                "active",
                ParamType::Bool,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |p| Value::Bool(p.active),
            |p, v| p.active = v.as_bool().unwrap_or_default(),
        )
        .field(
            "joined",
            FieldDescriptor::new(
                "joined_at",
                ParamType::DateTime,
                FieldFlags::SHOULD_INSERT | FieldFlags::ALLOWS_NULLS,
            )
            .unwrap(),
            |p| Value::from(p.joined),
            |p, v| p.joined = v.as_datetime(),
        )
        .field(
            "status",
            FieldDescriptor::new(
                "status",
                ParamType::Int,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |p| Value::Int(p.status.value()),
            |p, v| p.status = resolve(&v).unwrap_or(Status::Draft),
        )
        .build()
        .expect("person schema is valid")
});

impl Model for Person {
    fn schema() -> &'static ModelSchema<Person> {
        &PERSON_SCHEMA
    }
}

/// A model with no key fields; update and delete must refuse to run.
#[derive(Debug, Default)]
pub struct Audited {
    pub body: String,
}

static AUDITED_SCHEMA: LazyLock<ModelSchema<Audited>> = LazyLock::new(|| {
    ModelSchema::builder("audit_log")
        .field(
            "body",
            FieldDescriptor::new(
                "body",
                ParamType::Str,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |a: &Audited| Value::from(a.body.clone()),
            |a, v| a.body = v.as_str().unwrap_or_default().to_string(),
        )
        .build()
        .expect("audit schema is valid")
});

impl Model for Audited {
    fn schema() -> &'static ModelSchema<Audited> {
        &AUDITED_SCHEMA
    }
}

/// A model whose precondition hook vetoes creation outright and rejects
/// updates with a populated outcome.
#[derive(Debug, Default)]
pub struct Gated {
    pub id: i64,
    pub name: String,
}

static GATED_SCHEMA: LazyLock<ModelSchema<Gated>> = LazyLock::new(|| {
    ModelSchema::builder("gated")
        .field(
            "id",
            FieldDescriptor::new("id", ParamType::Int, FieldFlags::IS_KEY).unwrap(),
            |g: &Gated| Value::Int(g.id),
            |g, v| g.id = v.as_int().unwrap_or_default(),
        )
        .field(
            "name",
            FieldDescriptor::new(
                "name",
                ParamType::Str,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |g| Value::from(g.name.clone()),
            |g, v| g.name = v.as_str().unwrap_or_default().to_string(),
        )
        .build()
        .expect("gated schema is valid")
});

impl Model for Gated {
    fn schema() -> &'static ModelSchema<Gated> {
        &GATED_SCHEMA
    }

    fn precondition(&self, op: QueryKind) -> Gate {
        match op {
            QueryKind::Insert => Gate::Deny,
            QueryKind::Update => Gate::Checked(Outcome::bad("update vetoed")),
            _ => Gate::Allow,
        }
    }
}
