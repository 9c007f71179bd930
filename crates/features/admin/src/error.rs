use std::borrow::Cow;
use vows_registry::StoreError;
use vows_rsvp::RsvpError;

/// A specialized [`AdminError`] enum of this crate.
#[vows_derive::vows_error]
pub enum AdminError {
    #[error("Invalid admin configuration{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Admin login required{}", format_context(.context))]
    Unauthorized { context: Option<Cow<'static, str>> },

    #[error("Admin RSVP error{}: {source}", format_context(.context))]
    Rsvp {
        #[source]
        source: RsvpError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Admin claim error{}: {source}", format_context(.context))]
    Claims {
        #[source]
        source: StoreError,
        context: Option<Cow<'static, str>>,
    },

    #[cfg(feature = "server")]
    #[error("Admin state error{}: {source}", format_context(.context))]
    State {
        #[source]
        source: vows_kernel::server::state::ApiStateError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal admin error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
