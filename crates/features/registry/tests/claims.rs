use std::sync::Arc;
use vows_database::Database;
use vows_domain::config::NameSource;
use vows_domain::gift::{LinkClickState, RegistryItem};
use vows_event_bus::{EventBus, EventReceiverExt};
use vows_registry::{
    Catalog, ClaimCoordinator, ClaimError, ClaimPolicy, ClaimStore, ItemClaimed, MIGRATIONS,
    StoreError, SurrealClaimStore,
};

fn item(id: &str, name: &str, link: Option<&str>, is_fund: bool) -> RegistryItem {
    RegistryItem {
        id: id.to_owned(),
        name: name.to_owned(),
        description: String::new(),
        price: "$100".to_owned(),
        link: link.map(str::to_owned),
        category: "Home".to_owned(),
        is_fund,
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        item("kayak", "Tandem Kayak", None, false),
        item("canon-selphy", "Canon Selphy Printer", Some("https://example.com/selphy"), false),
        item("honeymoon-fund", "Honeymoon Fund", Some("/gift-fund"), true),
    ])
    .unwrap()
}

async fn store() -> SurrealClaimStore {
    let db = Database::builder()
        .url("mem://")
        .session("vows", "registry_test")
        .migrations(MIGRATIONS)
        .init()
        .await
        .expect("in-memory database");
    SurrealClaimStore::new(db)
}

async fn coordinator(policy: ClaimPolicy) -> (ClaimCoordinator<SurrealClaimStore>, EventBus) {
    let events = EventBus::new();
    (ClaimCoordinator::new(catalog(), store().await, events.clone(), policy), events)
}

#[tokio::test]
async fn unique_index_rejects_a_second_insert() {
    let store = store().await;

    let first = store.insert_claim("kayak", "Alex").await.unwrap();
    assert_eq!(first.item_id, "kayak");

    let second = store.insert_claim("kayak", "Sam").await;
    assert!(matches!(second, Err(StoreError::UniqueViolation { .. })), "got {second:?}");

    let claims = store.list_claims().await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].claimer_name, "Alex");
}

#[tokio::test]
async fn kayak_is_claimed_once() {
    let (coordinator, _) = coordinator(ClaimPolicy::default()).await;
    let mut clicks = LinkClickState::new();

    let confirmation = coordinator.claim("kayak", "  Alex ", &mut clicks).await.unwrap();
    assert_eq!(confirmation.claimer_name, "Alex");
    assert_eq!(confirmation.message(), "Thank you! \"Tandem Kayak\" has been claimed by Alex.");

    let stored = coordinator.store().get_claim("kayak").await.unwrap().unwrap();
    assert_eq!(stored.claimer_name, "Alex");

    let second = coordinator.claim("kayak", "Sam", &mut clicks).await;
    assert_eq!(second, Err(ClaimError::AlreadyClaimed));

    let claims = coordinator.store().list_claims().await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].claimer_name, "Alex");
}

#[tokio::test]
async fn linked_item_requires_a_click_first() {
    let (coordinator, _) = coordinator(ClaimPolicy::default()).await;
    let mut clicks = LinkClickState::new();

    let refused = coordinator.claim("canon-selphy", "Jo", &mut clicks).await;
    assert_eq!(refused, Err(ClaimError::LinkNotClicked));
    assert!(coordinator.store().get_claim("canon-selphy").await.unwrap().is_none());

    coordinator.tracker().record_click(&mut clicks, "canon-selphy").unwrap();
    let confirmation = coordinator.claim("canon-selphy", "Jo", &mut clicks).await.unwrap();
    assert_eq!(confirmation.item_id, "canon-selphy");

    assert!(!coordinator.tracker().has_clicked(&clicks, "canon-selphy"));
}

#[tokio::test]
async fn clicks_do_not_leak_between_sessions() {
    let (coordinator, _) = coordinator(ClaimPolicy::default()).await;
    let mut clicked = LinkClickState::new();
    let mut other = LinkClickState::new();

    coordinator.tracker().record_click(&mut clicked, "canon-selphy").unwrap();
    let refused = coordinator.claim("canon-selphy", "Sam", &mut other).await;
    assert_eq!(refused, Err(ClaimError::LinkNotClicked));
}

#[tokio::test]
async fn link_gate_can_be_disabled() {
    let policy = ClaimPolicy { require_link_click: false, ..ClaimPolicy::default() };
    let (coordinator, _) = coordinator(policy).await;

    let result = coordinator.claim("canon-selphy", "Jo", &mut LinkClickState::new()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn fund_is_never_claimable() {
    let (coordinator, _) = coordinator(ClaimPolicy::default()).await;
    let mut clicks = LinkClickState::new();

    let expected = Err(ClaimError::NotClaimable { item_name: "Honeymoon Fund".to_owned() });
    assert_eq!(coordinator.claim("honeymoon-fund", "Jo", &mut clicks).await, expected);

    coordinator.tracker().record_click(&mut clicks, "honeymoon-fund").unwrap();
    assert_eq!(coordinator.claim("honeymoon-fund", "Jo", &mut clicks).await, expected);
    assert!(coordinator.store().list_claims().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_names_write_nothing() {
    let (coordinator, _) = coordinator(ClaimPolicy::default()).await;
    let mut clicks = LinkClickState::new();

    for name in ["", "   ", "\t\n"] {
        assert_eq!(coordinator.claim("kayak", name, &mut clicks).await, Err(ClaimError::EmptyName));
    }
    // The name check wins over an unknown item.
    assert_eq!(coordinator.claim("yacht", " ", &mut clicks).await, Err(ClaimError::EmptyName));
    assert_eq!(coordinator.claim("yacht", "Jo", &mut clicks).await, Err(ClaimError::ItemNotFound));
    assert!(coordinator.store().list_claims().await.unwrap().is_empty());
}

#[tokio::test]
async fn fixed_name_source_records_the_fixed_name() {
    let policy = ClaimPolicy { name_source: NameSource::Fixed, ..ClaimPolicy::default() };
    let (coordinator, _) = coordinator(policy).await;

    let confirmation = coordinator.claim("kayak", "", &mut LinkClickState::new()).await.unwrap();
    assert_eq!(confirmation.claimer_name, "Anonymous Guest");
}

#[tokio::test]
async fn successful_claim_is_announced() {
    let (coordinator, events) = coordinator(ClaimPolicy::default()).await;
    let mut rx = events.subscribe::<ItemClaimed>().unwrap();

    coordinator.claim("kayak", "Alex", &mut LinkClickState::new()).await.unwrap();
    let _ = coordinator.claim("kayak", "Sam", &mut LinkClickState::new()).await;

    let event = rx.next_event().await.unwrap();
    assert_eq!(event.item_id, "kayak");
    assert_eq!(event.claimer_name, "Alex");
    assert!(rx.try_recv().is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_commit_exactly_once() {
    const CLAIMANTS: usize = 16;

    let (coordinator, _) = coordinator(ClaimPolicy::default()).await;
    let coordinator = Arc::new(coordinator);

    let handles: Vec<_> = (0..CLAIMANTS)
        .map(|i| {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                let mut clicks = LinkClickState::new();
                coordinator.claim("kayak", &format!("Guest {i}"), &mut clicks).await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e, ClaimError::AlreadyClaimed),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(coordinator.store().list_claims().await.unwrap().len(), 1);
}
