use griddle::{Connection as _, Db, Param, ParamType, Value};

fn sqlite_db() -> Db {
    let mut connection = griddle_driver_sqlite::Connection::in_memory();
    connection
        .exec(
            "CREATE TABLE people (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);",
            &[],
        )
        .unwrap();
    Db::from_connection(Box::new(connection))
}

const FIND: &str = "SELECT \"id\", \"name\" FROM \"people\" WHERE \"id\" = :id;";

#[test]
fn registration_is_idempotent_rejecting() {
    let mut db = sqlite_db();

    assert!(db.store_query("sqlite", "find_person", FIND, &[("id", ParamType::Int)]));
    assert!(!db.store_query("sqlite", "find_person", "SELECT 1;", &[]));

    // the stored template is unchanged after the rejected call
    assert_eq!(db.stored_sql("find_person"), Some(FIND));
}

#[test]
fn unknown_dialect_string_is_rejected() {
    let mut db = sqlite_db();
    assert!(!db.store_query("interbase", "ping", "SELECT 1;", &[]));
}

#[test]
fn missing_key_is_a_safe_miss() {
    let mut db = sqlite_db();

    assert_eq!(db.stored_sql("nope"), None);
    assert_eq!(db.exec_stored("nope", &[]).unwrap(), None);
    assert!(db.query_stored("nope", &[]).unwrap().is_none());
    assert!(db.queries().is_empty());
}

#[test]
fn argument_count_mismatch_is_a_safe_miss() {
    let mut db = sqlite_db();
    db.store_query("sqlite", "find_person", FIND, &[("id", ParamType::Int)]);

    assert!(db.query_stored("find_person", &[]).unwrap().is_none());
    assert!(db
        .query_stored(
            "find_person",
            &[
                Param::new("id", Value::Int(1), ParamType::Int),
                Param::new("extra", Value::Int(2), ParamType::Int),
            ],
        )
        .unwrap()
        .is_none());
    assert!(db.queries().is_empty());
}

#[test]
fn stored_queries_resolve_against_the_handles_dialect() {
    let mut db = sqlite_db();

    // same key under another dialect occupies a different slot and is
    // invisible to this handle
    assert!(db.store_query("mysql", "find_person", "SELECT 1;", &[]));
    assert_eq!(db.stored_sql("find_person"), None);

    assert!(db.store_query("sqlite", "find_person", FIND, &[("id", ParamType::Int)]));
    assert_eq!(db.stored_sql("find_person"), Some(FIND));
}

#[test]
fn stored_queries_execute_end_to_end() {
    let mut db = sqlite_db();

    let registered = db.store_queries(
        "sqlite",
        &[
            (
                "add_person",
                "INSERT INTO \"people\" (\"name\") VALUES (:name);",
                &[("name", ParamType::Str)],
            ),
            ("find_person", FIND, &[("id", ParamType::Int)]),
        ],
    );
    assert!(registered);

    let affected = db
        .exec_stored(
            "add_person",
            &[Param::new("name", Value::from("Ada"), ParamType::Str)],
        )
        .unwrap();
    assert_eq!(affected, Some(1));

    let rows = db
        .query_stored(
            "find_person",
            &[Param::new("id", Value::Int(1), ParamType::Int)],
        )
        .unwrap()
        .expect("template is registered");
    assert_eq!(rows.rows.len(), 1);
    assert_eq!(rows.rows[0].get("name"), Some(&Value::from("Ada")));

    assert_eq!(db.queries().len(), 2);
}
