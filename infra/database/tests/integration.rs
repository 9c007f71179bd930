use vows_database::*;

const SCHEMA: &[Migration] = &[Migration::new(
    "registry",
    "0001",
    "DEFINE TABLE IF NOT EXISTS claim SCHEMALESS;
     DEFINE INDEX IF NOT EXISTS claim_item_unique ON claim FIELDS item_id UNIQUE;",
)];

async fn connect() -> Database {
    Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .migrations(SCHEMA)
        .init()
        .await
        .expect("connect to mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = connect().await;

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn migrations_are_applied_once() {
    let db = connect().await;

    let report = db.migrate(SCHEMA).await.unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].slice, "registry");
}

#[tokio::test]
async fn edited_migration_aborts() {
    let db = connect().await;

    let edited = [Migration::new("registry", "0001", "DEFINE TABLE IF NOT EXISTS claim;")];
    let err = db.migrate(&edited).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Migration { .. }));
}

#[tokio::test]
async fn failing_migration_is_not_recorded() {
    let db = connect().await;

    let broken = [Migration::new("rsvp", "0001", "THROW 'boom';")];
    assert!(db.migrate(&broken).await.is_err());

    let fixed = [Migration::new("rsvp", "0001", "DEFINE TABLE IF NOT EXISTS rsvp SCHEMALESS;")];
    let report = db.migrate(&fixed).await.unwrap();
    assert_eq!(report.applied.len(), 1);
}

#[tokio::test]
async fn duplicate_unique_key_is_classified() {
    let db = connect().await;
    let insert = "CREATE claim CONTENT { item_id: 'kayak', claimed_by: $name } RETURN NONE;";

    db.query(insert).bind(("name", "Ann")).await.unwrap().check().unwrap();

    let err: DatabaseError = db
        .query(insert)
        .bind(("name", "Bob"))
        .await
        .unwrap()
        .check()
        .map_err(surrealdb::Error::from)
        .unwrap_err()
        .into();

    assert!(err.is_unique_violation());
    assert!(!err.is_retryable());
}
