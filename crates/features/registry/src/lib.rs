//! Gift registry feature slice.
//!
//! Guests browse a fixed [`Catalog`], open external gift links (tracked per
//! session by the [`LinkClickTracker`]) and claim gifts through the
//! [`ClaimCoordinator`], which guarantees a gift is claimed at most once.

pub mod catalog;
pub mod coordinator;
mod error;
pub mod events;
#[cfg(feature = "server")]
pub mod server;
pub mod store;
pub mod tracker;

pub use crate::catalog::{Catalog, ItemStatus};
pub use crate::coordinator::{ClaimConfirmation, ClaimCoordinator, ClaimError, ClaimPolicy};
pub use crate::error::{RegistryError, RegistryErrorExt, StoreError, StoreErrorExt};
pub use crate::events::ItemClaimed;
pub use crate::store::{ClaimStore, SurrealClaimStore};
pub use crate::tracker::LinkClickTracker;

use tracing::info;
use vows_database::{Database, Migration};
use vows_domain::config::ApiConfig;
use vows_event_bus::EventBus;
use vows_kernel::domain::registry::InitializedSlice;

/// Schema owned by this slice.
pub const MIGRATIONS: &[Migration] =
    &[Migration::new("registry", "0001", include_str!("../migrations/0001_claims.surql"))];

/// Registry feature state
#[vows_derive::vows_slice]
pub struct Registry {
    pub coordinator: ClaimCoordinator<SurrealClaimStore>,
}

impl RegistryInner {
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.coordinator.catalog()
    }

    #[must_use]
    pub const fn tracker(&self) -> &LinkClickTracker {
        self.coordinator.tracker()
    }

    /// Every catalog item with its claim status, in catalog order.
    ///
    /// # Errors
    /// Returns [`StoreError`] when claims cannot be loaded.
    pub async fn items(&self) -> Result<Vec<ItemStatus>, StoreError> {
        let claims = self.coordinator.store().list_claims().await?;
        Ok(self.catalog().with_claims(&claims))
    }
}

/// Initialize the registry feature.
///
/// # Errors
/// Returns [`RegistryError::InvalidCatalog`] when configured items are invalid.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<InitializedSlice, RegistryError> {
    let catalog = Catalog::from_config(&config.registry)?;
    let policy = ClaimPolicy::from(&config.registry);

    info!(
        items = catalog.len(),
        require_link_click = policy.require_link_click,
        name_source = ?policy.name_source,
        "Registry slice initialized"
    );

    let coordinator = ClaimCoordinator::new(
        catalog,
        SurrealClaimStore::new(database.clone()),
        events.clone(),
        policy,
    );

    Ok(InitializedSlice::new(Registry::new(RegistryInner { coordinator })))
}
