use std::borrow::Cow;
use vows_database::DatabaseError;

/// A specialized [`RsvpError`] enum of this crate.
#[vows_derive::vows_error]
pub enum RsvpError {
    #[error("RSVP storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },

    #[cfg(feature = "server")]
    #[error("RSVP state error{}: {source}", format_context(.context))]
    State {
        #[source]
        source: vows_kernel::server::state::ApiStateError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal RSVP error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
