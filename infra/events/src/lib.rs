//! # Event Bus
//!
//! A typed, fan-out event bus shared by the feature slices. Each event type
//! gets its own `tokio::sync::broadcast` channel, keyed by [`std::any::TypeId`].
//!
//! ```rust
//! use vows_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Debug)]
//! struct GuestArrived { name: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe::<GuestArrived>()?;
//!     bus.publish(GuestArrived { name: "Alex".into() })?;
//!
//!     let event = rx.next_event().await.unwrap();
//!     assert_eq!(event.name, "Alex");
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
