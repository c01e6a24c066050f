//! Integration tests for the SQLite record store. Everything runs against an
//! in-memory database except the persistence test, which exercises a real
//! file in a temporary directory.

use std::collections::HashSet;

use employee_manager::db::{
    close_store, create_employee, delete_employee, fetch_employees, open_store, update_employee,
};

#[test]
fn created_records_come_back_with_unique_ids() {
    let conn = open_store(None).unwrap();
    for i in 0..10 {
        create_employee(&conn, &format!("Employee {i}"), "Staff").unwrap();
    }

    let employees = fetch_employees(&conn).unwrap();
    assert_eq!(employees.len(), 10);

    let ids: HashSet<i64> = employees.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn list_preserves_insertion_order() {
    let conn = open_store(None).unwrap();
    let alice = create_employee(&conn, "Alice", "Engineer").unwrap();
    let bob = create_employee(&conn, "Bob", "Manager").unwrap();

    let employees = fetch_employees(&conn).unwrap();
    assert_eq!(employees, vec![alice.clone(), bob.clone()]);
    assert!(alice.id < bob.id);
}

#[test]
fn update_changes_exactly_one_record() {
    let conn = open_store(None).unwrap();
    let alice = create_employee(&conn, "Alice", "Engineer").unwrap();
    let bob = create_employee(&conn, "Bob", "Manager").unwrap();

    update_employee(&conn, alice.id, "Alice2", "Lead").unwrap();

    let employees = fetch_employees(&conn).unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id, alice.id);
    assert_eq!(employees[0].name, "Alice2");
    assert_eq!(employees[0].position, "Lead");
    assert_eq!(employees[1], bob);
}

#[test]
fn delete_removes_exactly_one_record() {
    let conn = open_store(None).unwrap();
    let alice = create_employee(&conn, "Alice", "Engineer").unwrap();
    let bob = create_employee(&conn, "Bob", "Manager").unwrap();

    delete_employee(&conn, alice.id).unwrap();

    let employees = fetch_employees(&conn).unwrap();
    assert_eq!(employees, vec![bob]);
}

#[test]
fn update_of_a_missing_id_is_a_silent_no_op() {
    let conn = open_store(None).unwrap();
    let alice = create_employee(&conn, "Alice", "Engineer").unwrap();

    update_employee(&conn, alice.id + 100, "Ghost", "Nobody").unwrap();

    assert_eq!(fetch_employees(&conn).unwrap(), vec![alice]);
}

#[test]
fn delete_of_a_missing_id_is_a_silent_no_op() {
    let conn = open_store(None).unwrap();
    let alice = create_employee(&conn, "Alice", "Engineer").unwrap();

    delete_employee(&conn, alice.id + 100).unwrap();

    assert_eq!(fetch_employees(&conn).unwrap(), vec![alice]);
}

#[test]
fn update_then_list_shows_new_values_under_the_original_id() {
    let conn = open_store(None).unwrap();
    let original = create_employee(&conn, "Alice", "Engineer").unwrap();

    update_employee(&conn, original.id, "Alice2", "Lead").unwrap();

    let employees = fetch_employees(&conn).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, original.id);
    assert_eq!(employees[0].name, "Alice2");
    assert_eq!(employees[0].position, "Lead");
}

#[test]
fn records_survive_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("employees.sqlite");

    let conn = open_store(Some(&db_path)).unwrap();
    let alice = create_employee(&conn, "Alice", "Engineer").unwrap();
    close_store(conn).unwrap();

    // Reopening runs the idempotent migration against the existing file.
    let conn = open_store(Some(&db_path)).unwrap();
    assert_eq!(fetch_employees(&conn).unwrap(), vec![alice]);
    close_store(conn).unwrap();
}

#[test]
fn open_store_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("data").join("employees.sqlite");

    let conn = open_store(Some(&db_path)).unwrap();
    assert!(fetch_employees(&conn).unwrap().is_empty());
    assert!(db_path.exists());
}

#[test]
fn in_memory_stores_are_independent() {
    let first = open_store(None).unwrap();
    let second = open_store(None).unwrap();

    create_employee(&first, "Alice", "Engineer").unwrap();

    assert_eq!(fetch_employees(&first).unwrap().len(), 1);
    assert!(fetch_employees(&second).unwrap().is_empty());
}
