//! RSVP feature slice: validates guest replies, stores them and announces
//! each one on the event bus.

mod error;
pub mod events;
pub mod form;
#[cfg(feature = "server")]
pub mod server;
pub mod stats;
pub mod store;

pub use crate::error::{RsvpError, RsvpErrorExt};
pub use crate::events::RsvpReceived;
pub use crate::form::{NewRsvp, RsvpForm, SubmitError, thank_you};
pub use crate::stats::RsvpStats;
pub use crate::store::RsvpStore;

use tracing::{error, info, warn};
use vows_database::{Database, Migration};
use vows_domain::rsvp::Rsvp;
use vows_event_bus::EventBus;
use vows_kernel::domain::registry::InitializedSlice;

/// Schema owned by this slice.
pub const MIGRATIONS: &[Migration] =
    &[Migration::new("rsvp", "0001", include_str!("../migrations/0001_rsvps.surql"))];

/// RSVP feature state
#[vows_derive::vows_slice]
pub struct Rsvps {
    pub store: RsvpStore,
    events: EventBus,
}

impl RsvpsInner {
    /// Validates and stores a reply, then publishes [`RsvpReceived`].
    ///
    /// # Errors
    /// [`SubmitError::MissingFields`] for incomplete forms,
    /// [`SubmitError::StoreUnavailable`] when the insert fails.
    pub async fn submit(&self, form: RsvpForm) -> Result<Rsvp, SubmitError> {
        let rsvp = form.validate()?;

        let stored = self.store.insert(rsvp).await.map_err(|e| {
            error!(error = %e, "RSVP submission failed");
            SubmitError::StoreUnavailable
        })?;

        info!(attending = %stored.attending, guests = stored.num_guests, "RSVP received");
        if let Err(e) = self.events.publish(RsvpReceived { rsvp: stored.clone() }) {
            warn!(error = %e, "Failed to publish RsvpReceived");
        }

        Ok(stored)
    }
}

/// Initialize the RSVP feature.
///
/// # Errors
/// Never fails today.
pub fn init(database: &Database, events: &EventBus) -> Result<InitializedSlice, RsvpError> {
    info!("RSVP slice initialized");

    let inner = RsvpsInner { store: RsvpStore::new(database.clone()), events: events.clone() };

    Ok(InitializedSlice::new(Rsvps::new(inner)))
}
