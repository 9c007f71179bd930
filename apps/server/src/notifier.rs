//! Logs guest activity published on the event bus.

use tokio::task::JoinHandle;
use tracing::{debug, info};
use vows::features::registry::ItemClaimed;
use vows::features::rsvp::RsvpReceived;
use vows_event_bus::{EventBus, EventBusError, EventReceiverExt};

/// Subscribes before returning, so no event published afterwards is missed.
/// The task ends once the bus shuts down.
///
/// # Errors
/// Returns [`EventBusError`] when a subscription cannot be created.
pub fn spawn(events: &EventBus) -> Result<JoinHandle<()>, EventBusError> {
    let mut claims = events.subscribe::<ItemClaimed>()?;
    let mut rsvps = events.subscribe::<RsvpReceived>()?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(claim) = claims.next_event() => info!(
                    item_id = %claim.item_id,
                    item = %claim.item_name,
                    claimer = %claim.claimer_name,
                    "Gift claimed"
                ),
                Some(reply) = rsvps.next_event() => info!(
                    name = %reply.rsvp.name,
                    attending = %reply.rsvp.attending,
                    guests = reply.rsvp.num_guests,
                    "RSVP received"
                ),
                else => break,
            }
        }
        debug!("Notifier stopped");
    }))
}
