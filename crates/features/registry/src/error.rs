use std::borrow::Cow;
use vows_database::DatabaseError;

pub use store_error::{StoreError, StoreErrorExt};

// `vows_error` emits a module-level `format_context`, so each enum needs its own module.
mod store_error {
    use super::{Cow, DatabaseError};

    /// Failures of the claim store, already classified for the coordinator.
    #[vows_derive::vows_error]
    pub enum StoreError {
        /// The unique index on `item_id` rejected the insert.
        #[error("Claim already exists{}: {message}", format_context(.context))]
        UniqueViolation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

        /// The engine aborted on a transaction conflict; the operation may be retried.
        #[error("Transaction conflict{}: {message}", format_context(.context))]
        Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

        /// Anything else: connectivity, schema or decoding problems.
        #[error("Claim store unavailable{}: {source}", format_context(.context))]
        Unavailable {
            #[source]
            source: DatabaseError,
            context: Option<Cow<'static, str>>,
        },
    }

    impl StoreError {
        /// Sorts an engine error into the variant the coordinator acts on.
        #[must_use]
        pub fn classify(err: DatabaseError, context: &'static str) -> Self {
            if err.is_unique_violation() {
                Self::UniqueViolation { message: err.to_string().into(), context: Some(context.into()) }
            } else if err.is_retryable() {
                Self::Conflict { message: err.to_string().into(), context: Some(context.into()) }
            } else {
                Self::Unavailable { source: err, context: Some(context.into()) }
            }
        }
    }
}

/// Slice-level failures: startup validation and HTTP plumbing.
#[vows_derive::vows_error]
pub enum RegistryError {
    #[error("Invalid catalog{}: {message}", format_context(.context))]
    InvalidCatalog { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Registry store error{}: {source}", format_context(.context))]
    Store {
        #[source]
        source: StoreError,
        context: Option<Cow<'static, str>>,
    },

    #[cfg(feature = "server")]
    #[error("Registry state error{}: {source}", format_context(.context))]
    State {
        #[source]
        source: vows_kernel::server::state::ApiStateError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
