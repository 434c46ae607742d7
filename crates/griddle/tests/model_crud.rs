mod common;

use common::{Audited, Gated, MockConnection, Person, Status};
use griddle::{Db, Dialect, Model, ParamType, QueryKind, Row, Value};
use pretty_assertions::assert_eq;

fn mock_db(mock: MockConnection) -> Db {
    Db::from_connection(Box::new(mock))
}

fn person_row() -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), Value::Int(7));
    row.insert("name".to_string(), Value::from("Grace"));
    row.insert("active".to_string(), Value::Int(1));
    row.insert("joined_at".to_string(), Value::from("2024-03-09 17:05:33"));
    row.insert("status".to_string(), Value::Int(1));
    row
}

#[test]
fn class_query_lists_columns_in_registration_order() {
    let sql = Person::schema().class_query(Dialect::Mysql, QueryKind::Select, true);
    assert_eq!(
        sql,
        "SELECT `id`, `name`, `active`, `joined_at`, `status` FROM `people` WHERE `id` = :id;"
    );
}

#[test]
fn create_populates_auto_increment_id() {
    let mut mock = MockConnection::new(Dialect::Mysql);
    mock.last_id = Some(42);
    let mut db = mock_db(mock);

    let mut person = Person {
        name: "Ada".to_string(),
        ..Default::default()
    };
    let outcome = db.create(&mut person);

    assert!(outcome.is_good(), "{:?}", outcome.messages());
    assert_eq!(person.id, 42);

    assert_eq!(db.queries().len(), 1);
    assert_eq!(
        db.queries()[0].sql,
        "INSERT INTO `people` (`name`, `active`, `joined_at`, `status`) \
         VALUES (:name, :active, :joined, :status);"
    );
}

#[test]
fn create_marshals_booleans_to_integers() {
    let mut db = mock_db(MockConnection::new(Dialect::Mysql));

    let mut person = Person {
        name: "Ada".to_string(),
        active: true,
        ..Default::default()
    };
    assert!(db.create(&mut person).is_good());

    let bound = &db.queries()[0].params;
    let active = bound.iter().find(|p| p.name == "active").unwrap();
    assert_eq!(active.value, Value::Int(1));
    assert_eq!(active.ty, ParamType::Int);

    // absent nullable timestamp binds as a typed null
    let joined = bound.iter().find(|p| p.name == "joined").unwrap();
    assert_eq!(joined.value, Value::Null);
    assert_eq!(joined.ty, ParamType::Null);
}

#[test]
fn read_marshals_row_into_fields() {
    let mut mock = MockConnection::new(Dialect::Mysql);
    mock.rows = vec![person_row()];
    mock.affected = Some(1);
    let mut db = mock_db(mock);

    let mut person = Person {
        id: 7,
        ..Default::default()
    };
    assert!(db.read(&mut person).is_good());

    assert_eq!(person.name, "Grace");
    assert!(person.active);
    assert_eq!(person.status, Status::Active);
    assert_eq!(
        person.joined.map(|dt| dt.to_string()),
        Some("2024-03-09 17:05:33".to_string())
    );
}

#[test]
fn read_zero_rows_is_bad_with_message() {
    let mut mock = MockConnection::new(Dialect::Mysql);
    mock.affected = Some(0);
    let mut db = mock_db(mock);

    let mut person = Person::default();
    let outcome = db.read(&mut person);

    assert!(!outcome.is_good());
    assert!(outcome.messages()[0].contains("no rows found"));
}

#[test]
fn quirky_dialect_read_succeeds_from_the_fetch() {
    // SQLite reports no SELECT row count; the fetched row decides.
    let mut mock = MockConnection::new(Dialect::Sqlite);
    mock.rows = vec![person_row()];
    mock.affected = None;
    let mut db = mock_db(mock);

    let mut person = Person {
        id: 7,
        ..Default::default()
    };
    assert!(db.read(&mut person).is_good());
    assert_eq!(person.name, "Grace");
}

#[test]
fn precondition_deny_blocks_create_without_sql() {
    let mut db = mock_db(MockConnection::new(Dialect::Mysql));

    let mut gated = Gated::default();
    let outcome = db.create(&mut gated);

    assert!(!outcome.is_good());
    assert!(db.queries().is_empty());
    assert!(db.errors().is_empty());
}

#[test]
fn precondition_outcome_messages_carry_over() {
    let mut db = mock_db(MockConnection::new(Dialect::Mysql));

    let gated = Gated::default();
    let outcome = db.update(&gated);

    assert!(!outcome.is_good());
    assert_eq!(outcome.messages(), ["update vetoed"]);
    assert!(db.queries().is_empty());
}

#[test]
fn update_and_delete_require_key_fields() {
    let mut db = mock_db(MockConnection::new(Dialect::Mysql));
    let audited = Audited {
        body: "checked".to_string(),
    };

    let outcome = db.update(&audited);
    assert!(!outcome.is_good());
    assert!(outcome.messages()[0].contains("no key fields"));

    let outcome = db.delete(&audited);
    assert!(!outcome.is_good());
    assert!(outcome.messages()[0].contains("no key fields"));

    assert!(db.queries().is_empty());
}

#[test]
fn update_binds_set_and_key_fields() {
    let mut db = mock_db(MockConnection::new(Dialect::Mysql));

    let person = Person {
        id: 7,
        name: "Grace".to_string(),
        ..Default::default()
    };
    assert!(db.update(&person).is_good());

    assert_eq!(
        db.queries()[0].sql,
        "UPDATE `people` SET `name` = :name, `active` = :active, `status` = :status \
         WHERE `id` = :id;"
    );
    let names: Vec<&str> = db.queries()[0]
        .params
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["name", "active", "status", "id"]);
}

#[test]
fn delete_filters_on_key_fields() {
    let mut db = mock_db(MockConnection::new(Dialect::Mysql));

    let person = Person {
        id: 7,
        ..Default::default()
    };
    assert!(db.delete(&person).is_good());
    assert_eq!(
        db.queries()[0].sql,
        "DELETE FROM `people` WHERE `id` = :id;"
    );
}

#[test]
fn driver_errors_are_captured_not_raised() {
    let mut mock = MockConnection::new(Dialect::Mysql);
    mock.fail_exec = Some("duplicate key".to_string());
    let mut db = mock_db(mock);

    let mut person = Person::default();
    let outcome = db.create(&mut person);

    assert!(!outcome.is_good());
    assert!(outcome.messages()[0].contains("duplicate key"));

    assert!(db.queries().is_empty());
    assert_eq!(db.errors().len(), 1);
    assert!(db.errors()[0].query.sql.starts_with("INSERT INTO `people`"));
    assert!(db.errors()[0].message.contains("duplicate key"));
}
