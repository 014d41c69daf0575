//! End-to-end engine tests over SQLite.
//!
//! The first two generations (a root and their child) are seeded directly
//! through the repository, matching how the system bootstraps imported
//! records; admission applies to everything created through commands.

use rusqlite::Connection;

use nasab_core::errors::NasabError;
use nasab_core::model::{Gender, KinLabel, ParentEdge, Person, PersonInput, PersonSelector};
use nasab_core::ops::LineageStoreMut;
use nasab_engine::{apply_engine_command, queries, AccessDecision, EngineCommand, EngineCommandResult};
use nasab_store::{db, migrations, SqliteRepo};

fn test_conn() -> Connection {
    let mut conn = db::open_in_memory().expect("open in-memory db");
    db::configure(&conn).expect("configure");
    migrations::apply_migrations(&mut conn).expect("migrate");
    conn
}

fn seed(conn: &Connection, id: &str, name: &str, father: Option<&str>, grandfather: Option<&str>) {
    let mut repo = SqliteRepo::new(conn);
    let mut p = Person::new(id.to_string(), name.to_string(), Gender::Male);
    p.father_name = father.map(str::to_string);
    p.grandfather_name = grandfather.map(str::to_string);
    repo.insert_person(&p).expect("seed person");
}

fn link(conn: &Connection, child: &str, father: &str) {
    let mut repo = SqliteRepo::new(conn);
    repo.upsert_edge(&ParentEdge::new(
        child.to_string(),
        father.to_string(),
        KinLabel::SonOf,
    ))
    .expect("seed edge");
}

/// Omar (root) -> Hassan, with edges in place
fn seeded_conn() -> Connection {
    let conn = test_conn();
    seed(&conn, "omar", "Omar", None, None);
    seed(&conn, "hassan", "Hassan", Some("Omar"), None);
    link(&conn, "hassan", "omar");
    conn
}

fn create(conn: &mut Connection, input: PersonInput) -> Result<Person, NasabError> {
    match apply_engine_command(
        EngineCommand::CreatePerson { input },
        conn,
        AccessDecision::Granted,
    )? {
        EngineCommandResult::Created(person) => Ok(person),
        other => panic!("unexpected result: {other:?}"),
    }
}

fn delete(conn: &mut Connection, selector: PersonSelector) -> Result<Person, NasabError> {
    match apply_engine_command(
        EngineCommand::DeletePerson { selector },
        conn,
        AccessDecision::Granted,
    )? {
        EngineCommandResult::Deleted(person) => Ok(person),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_create_valid_person_adds_node_and_edge() {
    let mut conn = seeded_conn();

    let ali = create(&mut conn, PersonInput::new("Ali", "male", "Hassan", "Omar")).unwrap();

    let persons = queries::list_persons(&conn).unwrap();
    assert_eq!(persons.len(), 3);

    let edges: i64 = conn
        .query_row("SELECT COUNT(*) FROM parent_edges", [], |r| r.get(0))
        .unwrap();
    assert_eq!(edges, 2);

    let repo = SqliteRepo::new(&conn);
    use nasab_core::ops::LineageStore;
    let edge = repo.outgoing_edge(&ali.id).unwrap().unwrap();
    assert_eq!(edge.father_id, "hassan");
    assert_eq!(edge.label, KinLabel::SonOf);
}

#[test]
fn test_duplicate_create_is_rejected_and_state_unchanged() {
    let mut conn = seeded_conn();
    create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    let result = create(&mut conn, PersonInput::new("ali", "m", "hassan", "omar"));
    assert!(matches!(result, Err(NasabError::DuplicateExact { .. })));

    assert_eq!(queries::list_persons(&conn).unwrap().len(), 3);
}

#[test]
fn test_similar_sibling_blocked_distinct_allowed() {
    let mut conn = seeded_conn();
    create(&mut conn, PersonInput::new("Karim", "m", "Hassan", "Omar")).unwrap();

    let blocked = create(&mut conn, PersonInput::new("Karem", "m", "Hassan", "Omar"));
    assert!(matches!(blocked, Err(NasabError::DuplicateSimilar { distance: 1, .. })));

    let allowed = create(&mut conn, PersonInput::new("Karim2000", "m", "Hassan", "Omar"));
    assert!(allowed.is_ok());
}

#[test]
fn test_trace_to_root_chain() {
    let mut conn = seeded_conn();
    create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    let chain = queries::trace_to_root(&conn, "Ali", Some("Hassan")).unwrap();
    let names: Vec<&str> = chain.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ali", "Hassan", "Omar"]);
}

#[test]
fn test_trace_unknown_start_not_found() {
    let conn = seeded_conn();
    let result = queries::trace_to_root(&conn, "Nobody", Some("NoOne"));
    assert!(matches!(result, Err(NasabError::NotFound { .. })));
}

#[test]
fn test_delete_childless_removes_node_and_edge() {
    let mut conn = seeded_conn();
    let ali = create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    let deleted = delete(&mut conn, PersonSelector::ById(ali.id.clone())).unwrap();
    assert_eq!(deleted.id, ali.id);

    assert_eq!(queries::list_persons(&conn).unwrap().len(), 2);
    let edges: i64 = conn
        .query_row("SELECT COUNT(*) FROM parent_edges", [], |r| r.get(0))
        .unwrap();
    assert_eq!(edges, 1);
}

#[test]
fn test_delete_parent_rejected_state_unchanged() {
    let mut conn = seeded_conn();
    create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    let result = delete(&mut conn, PersonSelector::ById("hassan".to_string()));
    assert!(matches!(result, Err(NasabError::HasChildren { child_count: 1, .. })));
    assert_eq!(queries::list_persons(&conn).unwrap().len(), 3);
}

#[test]
fn test_delete_by_id_and_by_name_equivalent() {
    // Two identical databases; delete the same person through each selector
    let mut conn_a = seeded_conn();
    let mut conn_b = seeded_conn();
    let ali_a = create(&mut conn_a, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();
    create(&mut conn_b, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    let by_id = delete(&mut conn_a, PersonSelector::ById(ali_a.id)).unwrap();
    let by_name = delete(
        &mut conn_b,
        PersonSelector::ByNameAndFather {
            name: "ALI".to_string(),
            father_name: Some("hassan".to_string()),
        },
    )
    .unwrap();

    assert_eq!(by_id.name, by_name.name);
    assert_eq!(queries::list_persons(&conn_a).unwrap().len(), 2);
    assert_eq!(queries::list_persons(&conn_b).unwrap().len(), 2);
}

#[test]
fn test_denied_access_blocks_before_any_effect() {
    let mut conn = seeded_conn();

    let result = apply_engine_command(
        EngineCommand::CreatePerson {
            input: PersonInput::new("Ali", "m", "Hassan", "Omar"),
        },
        &mut conn,
        AccessDecision::Denied,
    );
    assert!(matches!(result, Err(NasabError::Unauthorized { .. })));
    assert_eq!(queries::list_persons(&conn).unwrap().len(), 2);
}

#[test]
fn test_failed_validation_commits_nothing() {
    let mut conn = seeded_conn();

    // Grandfather mismatch fails after the father lookup; no person row and
    // no edge row may survive
    let result = create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Yusuf"));
    assert!(matches!(result, Err(NasabError::GrandfatherMismatch { .. })));

    assert_eq!(queries::list_persons(&conn).unwrap().len(), 2);
    let edges: i64 = conn
        .query_row("SELECT COUNT(*) FROM parent_edges", [], |r| r.get(0))
        .unwrap();
    assert_eq!(edges, 1);
}

#[test]
fn test_audit_passes_on_engine_built_data() {
    let mut conn = seeded_conn();
    create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    assert!(queries::audit_lineage(&conn).is_ok());
}

#[test]
fn test_audit_flags_out_of_band_damage() {
    let mut conn = seeded_conn();
    create(&mut conn, PersonInput::new("Ali", "m", "Hassan", "Omar")).unwrap();

    // Remove Ali's edge behind the engine's back
    conn.execute(
        "DELETE FROM parent_edges WHERE father_id = 'hassan'",
        [],
    )
    .unwrap();

    assert!(queries::audit_lineage(&conn).is_err());
}

#[test]
fn test_root_creation_via_command() {
    let mut conn = test_conn();

    let omar = create(&mut conn, PersonInput::root("Omar", "m")).unwrap();
    assert!(omar.is_root());

    let dup = create(&mut conn, PersonInput::root("OMAR", "m"));
    assert!(matches!(dup, Err(NasabError::DuplicateExact { .. })));
}
