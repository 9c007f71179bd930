//! Common imports for feature slices.

pub use crate::safe_nanoid;
pub use vows_domain::config::{ApiConfig, NameSource};
pub use vows_domain::gift::{Claim, LinkClickState, RegistryItem};
pub use vows_domain::registry::{FeatureSlice, InitializedSlice};
pub use vows_domain::rsvp::{Attendance, Rsvp};

#[cfg(feature = "server")]
pub use crate::server::{
    response::ActionResponse,
    session::{GuestSession, SessionData, SessionStore},
    state::ApiState,
};
