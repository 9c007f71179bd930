//! Coordinator behavior against a scripted store.

use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use vows_database::DatabaseError;
use vows_domain::gift::{Claim, LinkClickState};
use vows_event_bus::EventBus;
use vows_registry::catalog::builtin_items;
use vows_registry::{Catalog, ClaimCoordinator, ClaimError, ClaimPolicy, ClaimStore, StoreError};

#[derive(Debug, Clone, Copy)]
enum Fault {
    /// Every call fails as unavailable.
    Down,
    /// The first `n` inserts conflict.
    Conflicts(usize),
    /// A concurrent writer commits between pre-check and insert.
    LostRace,
}

#[derive(Debug)]
struct ScriptedStore {
    fault: Fault,
    inserts: AtomicUsize,
    claims: Mutex<Vec<Claim>>,
}

impl ScriptedStore {
    fn new(fault: Fault) -> Self {
        Self { fault, inserts: AtomicUsize::new(0), claims: Mutex::default() }
    }

    fn down() -> StoreError {
        StoreError::Unavailable {
            source: DatabaseError::Connection { message: "refused".into(), context: None },
            context: None,
        }
    }
}

impl ClaimStore for ScriptedStore {
    async fn insert_claim(&self, item_id: &str, claimer_name: &str) -> Result<Claim, StoreError> {
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst);
        match self.fault {
            Fault::Down => return Err(Self::down()),
            Fault::Conflicts(n) if attempt < n => {
                return Err(StoreError::Conflict { message: Cow::Borrowed("retry"), context: None });
            },
            Fault::LostRace => {
                return Err(StoreError::UniqueViolation {
                    message: Cow::Borrowed("already contains"),
                    context: None,
                });
            },
            Fault::Conflicts(_) => {},
        }

        let claim = Claim {
            item_id: item_id.to_owned(),
            claimer_name: claimer_name.to_owned(),
            created_at: "2026-08-29T18:00:00.000000Z".to_owned(),
        };
        self.claims.lock().await.push(claim.clone());
        Ok(claim)
    }

    async fn get_claim(&self, item_id: &str) -> Result<Option<Claim>, StoreError> {
        if matches!(self.fault, Fault::Down) {
            return Err(Self::down());
        }
        Ok(self.claims.lock().await.iter().find(|c| c.item_id == item_id).cloned())
    }

    async fn list_claims(&self) -> Result<Vec<Claim>, StoreError> {
        Ok(self.claims.lock().await.clone())
    }
}

fn coordinator(fault: Fault) -> ClaimCoordinator<ScriptedStore> {
    ClaimCoordinator::new(
        Catalog::new(builtin_items()).unwrap(),
        ScriptedStore::new(fault),
        EventBus::new(),
        ClaimPolicy::default(),
    )
}

#[tokio::test]
async fn unavailable_store_is_reported_generically() {
    let coordinator = coordinator(Fault::Down);
    let result = coordinator.claim("kayak", "Alex", &mut LinkClickState::new()).await;

    assert_eq!(result, Err(ClaimError::StoreUnavailable));
    assert_eq!(
        ClaimError::StoreUnavailable.to_string(),
        "Something went wrong. Please try again."
    );
}

#[tokio::test]
async fn conflicts_are_retried() {
    let coordinator = coordinator(Fault::Conflicts(3));
    let confirmation = coordinator.claim("kayak", "Alex", &mut LinkClickState::new()).await;

    assert!(confirmation.is_ok());
    assert_eq!(coordinator.store().inserts.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn endless_conflicts_give_up() {
    let coordinator = coordinator(Fault::Conflicts(usize::MAX));
    let result = coordinator.claim("kayak", "Alex", &mut LinkClickState::new()).await;

    assert_eq!(result, Err(ClaimError::StoreUnavailable));
    assert!(coordinator.store().claims.lock().await.is_empty());
}

#[tokio::test]
async fn unique_violation_means_already_claimed() {
    let coordinator = coordinator(Fault::LostRace);
    let mut clicks = LinkClickState::new();
    coordinator.tracker().record_click(&mut clicks, "dutch-oven").unwrap();

    let result = coordinator.claim("dutch-oven", "Alex", &mut clicks).await;

    assert_eq!(result, Err(ClaimError::AlreadyClaimed));
    assert!(coordinator.tracker().has_clicked(&clicks, "dutch-oven"));
}
