//! Facade crate for the wedding site features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes the slices, it does not implement them.
//!
//! ## Usage
//! - Apply [`migrations`] when connecting the database.
//! - Call [`init`] to build every feature slice, then register them on the
//!   `ApiState`.
//! - With the `server` feature, mount [`server::router::router`] behind the
//!   session layer and [`server::router::system_router`] beside it.

use std::borrow::Cow;
use vows_database::{Database, Migration};
use vows_domain::config::ApiConfig;
use vows_domain::registry::InitializedSlice;
use vows_event_bus::EventBus;

pub use vows_domain as domain;
pub use vows_kernel as kernel;

/// Feature slices, re-exported for binaries and tests.
pub mod features {
    pub use vows_admin as admin;
    pub use vows_registry as registry;
    pub use vows_rsvp as rsvp;

    /// Slices compiled into this build, in initialization order.
    pub const ENABLED: &[&str] = &["registry", "rsvp", "admin"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use utoipa_axum::router::OpenApiRouter;
        pub use vows_kernel::server::router::system_router;
        use vows_kernel::server::state::ApiState;

        /// Every slice's routes. They extract the guest session, so mount
        /// them behind `session_layer`.
        pub fn router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(vows_registry::server::router::registry_router())
                .merge(vows_rsvp::server::router::rsvp_router())
                .merge(vows_admin::server::router::admin_router())
        }
    }
}

#[vows_derive::vows_error]
pub enum VowsError {
    #[error("Registry bootstrap failed{}: {source}", format_context(.context))]
    Registry {
        #[source]
        source: vows_registry::RegistryError,
        context: Option<Cow<'static, str>>,
    },

    #[error("RSVP bootstrap failed{}: {source}", format_context(.context))]
    Rsvp {
        #[source]
        source: vows_rsvp::RsvpError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Admin bootstrap failed{}: {source}", format_context(.context))]
    Admin {
        #[source]
        source: vows_admin::AdminError,
        context: Option<Cow<'static, str>>,
    },
}

/// Every slice's schema migrations.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    [features::registry::MIGRATIONS, features::rsvp::MIGRATIONS].concat()
}

/// Initialize all feature slices.
///
/// # Errors
/// Returns the first slice that fails to initialize.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, VowsError> {
    Ok(vec![
        features::registry::init(config, database, events)?,
        features::rsvp::init(database, events)?,
        features::admin::init(config, database)?,
    ])
}
