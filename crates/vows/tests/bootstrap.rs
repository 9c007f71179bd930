use vows::domain::config::{AdminConfig, ApiConfig};
use vows::features::{admin::Admin, registry::Registry, rsvp::Rsvps};
use vows::{VowsError, migrations};
use vows_database::Database;
use vows_event_bus::EventBus;

async fn database() -> Database {
    Database::builder()
        .url("mem://")
        .session("vows", "bootstrap")
        .migrations(&migrations())
        .init()
        .await
        .unwrap()
}

#[test]
fn every_slice_contributes_a_migration() {
    let slices: Vec<_> = migrations().iter().map(|m| m.slice).collect();
    assert_eq!(slices, ["registry", "rsvp"]);
    assert!(vows::features::is_enabled("admin"));
    assert!(!vows::features::is_enabled("gallery"));
}

#[tokio::test]
async fn init_builds_every_slice() {
    let db = database().await;
    let slices = vows::init(&ApiConfig::default(), &db, &EventBus::new()).unwrap();

    assert_eq!(slices.len(), 3);
    assert!(slices[0].downcast_ref::<Registry>().is_some());
    assert!(slices[1].downcast_ref::<Rsvps>().is_some());
    assert!(slices[2].downcast_ref::<Admin>().is_some());
}

#[tokio::test]
async fn slice_failures_surface() {
    let db = database().await;
    let mut config = ApiConfig::default();
    config.admin = AdminConfig { password: String::new() };

    let err = vows::init(&config, &db, &EventBus::new()).unwrap_err();
    assert!(matches!(err, VowsError::Admin { .. }));
}
