//! The claim workflow.
//!
//! Checks run in a fixed order and the first failure wins: name, catalog
//! membership, fund items, the link-click gate, then the existing-claim
//! pre-check. The store's unique index decides races the pre-check cannot
//! see; a lost race surfaces as [`ClaimError::AlreadyClaimed`].

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::events::ItemClaimed;
use crate::store::ClaimStore;
use crate::tracker::LinkClickTracker;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use vows_domain::config::{NameSource, RegistryConfig};
use vows_domain::gift::{Claim, LinkClickState, RegistryItem};
use vows_event_bus::EventBus;

const MAX_ATTEMPTS: u32 = 8;
const INITIAL_BACKOFF: Duration = Duration::from_millis(5);
const MAX_BACKOFF: Duration = Duration::from_millis(200);

/// Why a claim was refused. `Display` is the guest-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("Please enter your name.")]
    EmptyName,
    #[error("Item not found.")]
    ItemNotFound,
    #[error("Please use the Contribute button for the {item_name}.")]
    NotClaimable { item_name: String },
    #[error("Please open the gift link first, then come back and claim it.")]
    LinkNotClicked,
    #[error("This item has already been claimed.")]
    AlreadyClaimed,
    #[error("Something went wrong. Please try again.")]
    StoreUnavailable,
}

/// A committed claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimConfirmation {
    pub item_id: String,
    pub item_name: String,
    pub claimer_name: String,
}

impl ClaimConfirmation {
    /// Guest-facing thank-you text.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Thank you! \"{}\" has been claimed by {}.", self.item_name, self.claimer_name)
    }
}

/// Tunable parts of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPolicy {
    /// Enforce the link-click gate for items with an external link.
    pub require_link_click: bool,
    pub name_source: NameSource,
    /// Recorded instead of the guest's input under [`NameSource::Fixed`].
    pub fixed_name: String,
}

impl Default for ClaimPolicy {
    fn default() -> Self {
        Self::from(&RegistryConfig::default())
    }
}

impl From<&RegistryConfig> for ClaimPolicy {
    fn from(config: &RegistryConfig) -> Self {
        Self {
            require_link_click: config.require_link_click,
            name_source: config.name_source,
            fixed_name: config.fixed_name.clone(),
        }
    }
}

impl ClaimPolicy {
    fn recorded_name<'a>(&'a self, guest_input: &'a str) -> &'a str {
        match self.name_source {
            NameSource::GuestProvided => guest_input.trim(),
            NameSource::Fixed => self.fixed_name.trim(),
        }
    }
}

/// Validates claims and commits them exactly once.
#[derive(Debug)]
pub struct ClaimCoordinator<S> {
    catalog: Catalog,
    tracker: LinkClickTracker,
    store: S,
    events: EventBus,
    policy: ClaimPolicy,
}

impl<S: ClaimStore> ClaimCoordinator<S> {
    #[must_use]
    pub fn new(catalog: Catalog, store: S, events: EventBus, policy: ClaimPolicy) -> Self {
        let tracker = LinkClickTracker::new(catalog.clone());
        Self { catalog, tracker, store, events, policy }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn tracker(&self) -> &LinkClickTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn policy(&self) -> &ClaimPolicy {
        &self.policy
    }

    /// Claims `item_id` for the caller whose link clicks are `clicks`.
    ///
    /// On success exactly one claim row exists for the item, the item's click
    /// is cleared from `clicks` and [`ItemClaimed`] is published. Every failure
    /// leaves the store and `clicks` unchanged.
    ///
    /// # Errors
    /// One [`ClaimError`] per refused check; storage faults become
    /// [`ClaimError::StoreUnavailable`].
    #[instrument(skip(self, claimer_name, clicks))]
    pub async fn claim(
        &self,
        item_id: &str,
        claimer_name: &str,
        clicks: &mut LinkClickState,
    ) -> Result<ClaimConfirmation, ClaimError> {
        let name = self.policy.recorded_name(claimer_name);
        if name.is_empty() {
            return Err(ClaimError::EmptyName);
        }

        let item = self.catalog.find_item(item_id).ok_or(ClaimError::ItemNotFound)?;

        if item.is_fund {
            return Err(ClaimError::NotClaimable { item_name: item.name.clone() });
        }

        if self.policy.require_link_click
            && item.has_link()
            && !self.tracker.has_clicked(clicks, item_id)
        {
            debug!("Claim refused until the gift link is opened");
            return Err(ClaimError::LinkNotClicked);
        }

        let claim = self.commit(item, name).await?;
        self.tracker.clear(clicks, item_id);

        info!(claimer = %claim.claimer_name, "Registry item claimed");
        self.announce(item, &claim);

        Ok(ClaimConfirmation {
            item_id: claim.item_id,
            item_name: item.name.clone(),
            claimer_name: claim.claimer_name,
        })
    }

    /// Pre-check then insert, retrying both on transaction conflicts.
    async fn commit(&self, item: &RegistryItem, name: &str) -> Result<Claim, ClaimError> {
        let mut delay = INITIAL_BACKOFF;

        for attempt in 1..=MAX_ATTEMPTS {
            let outcome = match self.store.get_claim(&item.id).await {
                Ok(Some(_)) => return Err(ClaimError::AlreadyClaimed),
                Ok(None) => self.store.insert_claim(&item.id, name).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(claim) => return Ok(claim),
                Err(StoreError::UniqueViolation { .. }) => {
                    debug!(attempt, "Claim lost to a concurrent writer");
                    return Err(ClaimError::AlreadyClaimed);
                },
                Err(StoreError::Conflict { message, .. }) if attempt < MAX_ATTEMPTS => {
                    debug!(attempt, ?delay, %message, "Claim transaction conflicted, retrying");
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_BACKOFF);
                },
                Err(e) => {
                    error!(attempt, error = %e, "Claim store failure");
                    return Err(ClaimError::StoreUnavailable);
                },
            }
        }

        Err(ClaimError::StoreUnavailable)
    }

    fn announce(&self, item: &RegistryItem, claim: &Claim) {
        let event = ItemClaimed {
            item_id: claim.item_id.clone(),
            item_name: item.name.clone(),
            claimer_name: claim.claimer_name.clone(),
            created_at: claim.created_at.clone(),
        };
        if let Err(e) = self.events.publish(event) {
            warn!(error = %e, "Failed to publish ItemClaimed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_messages() {
        assert_eq!(
            ClaimError::NotClaimable { item_name: "Honeymoon Fund".to_owned() }.to_string(),
            "Please use the Contribute button for the Honeymoon Fund."
        );
        let confirmation = ClaimConfirmation {
            item_id: "kayak".to_owned(),
            item_name: "Tandem Kayak".to_owned(),
            claimer_name: "Alex".to_owned(),
        };
        assert_eq!(confirmation.message(), "Thank you! \"Tandem Kayak\" has been claimed by Alex.");
    }

    #[test]
    fn fixed_name_source_ignores_guest_input() {
        let policy = ClaimPolicy {
            name_source: NameSource::Fixed,
            ..ClaimPolicy::default()
        };
        assert_eq!(policy.recorded_name("   "), "Anonymous Guest");
        assert_eq!(ClaimPolicy::default().recorded_name("  Jo "), "Jo");
    }
}
