//! Map a struct to a table over an in-memory SQLite database.

use griddle::{
    Connection as _, Db, FieldDescriptor, FieldFlags, Model, ModelSchema, ParamType, Value,
};
use std::sync::LazyLock;

#[derive(Debug, Default)]
struct Todo {
    id: i64,
    title: String,
    done: bool,
}

static SCHEMA: LazyLock<ModelSchema<Todo>> = LazyLock::new(|| {
    ModelSchema::builder("todos")
        .field(
            "id",
            FieldDescriptor::new(
                "id",
                ParamType::Int,
                FieldFlags::IS_KEY | FieldFlags::AUTO_INCREMENT,
            )
            .unwrap(),
            |t: &Todo| Value::Int(t.id),
            |t, v| t.id = v.as_int().unwrap_or_default(),
        )
        .field(
            "title",
            FieldDescriptor::new(
                "title",
                ParamType::Str,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |t| Value::from(t.title.clone()),
            |t, v| t.title = v.as_str().unwrap_or_default().to_string(),
        )
        .field(
            "done",
            FieldDescriptor::new(
                "done",
                ParamType::Bool,
                FieldFlags::SHOULD_INSERT | FieldFlags::SHOULD_UPDATE,
            )
            .unwrap(),
            |t| Value::Bool(t.done),
            |t, v| t.done = v.as_bool().unwrap_or_default(),
        )
        .build()
        .expect("todo schema is valid")
});

impl Model for Todo {
    fn schema() -> &'static ModelSchema<Todo> {
        &SCHEMA
    }
}

fn main() -> griddle::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut connection = griddle_driver_sqlite::Connection::in_memory();
    connection.exec(
        "CREATE TABLE todos (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, done INTEGER);",
        &[],
    )?;

    let mut db = Db::from_connection(Box::new(connection));

    let mut todo = Todo {
        title: "write the demo".to_string(),
        ..Default::default()
    };
    let created = db.create(&mut todo);
    println!("created #{} (good: {})", todo.id, created.is_good());

    todo.done = true;
    db.update(&todo);

    let mut found = Todo {
        id: todo.id,
        ..Default::default()
    };
    db.read(&mut found);
    println!("{} — done: {}", found.title, found.done);

    for record in db.queries() {
        println!("ran: {}", record.sql);
    }

    Ok(())
}
