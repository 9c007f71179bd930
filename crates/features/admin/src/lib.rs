//! Admin feature slice.
//!
//! A single shared password unlocks the dashboard for the current guest
//! session. The slice reads RSVPs and claims straight from their stores and
//! is the only place RSVPs can be deleted.

mod dashboard;
mod error;
#[cfg(feature = "server")]
pub mod server;

pub use crate::dashboard::Dashboard;
pub use crate::error::{AdminError, AdminErrorExt};

use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};
use vows_database::Database;
use vows_domain::config::{AdminConfig, ApiConfig};
use vows_kernel::domain::registry::InitializedSlice;
use vows_registry::{ClaimStore, SurrealClaimStore};
use vows_rsvp::RsvpStore;

/// Shown after a failed login.
pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

/// Admin feature state
#[vows_derive::vows_slice]
pub struct Admin {
    password_digest: [u8; 32],
    rsvps: RsvpStore,
    claims: SurrealClaimStore,
}

impl AdminInner {
    /// Compares digests so the check takes the same time for any candidate.
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        let candidate = digest(candidate);
        candidate.iter().zip(&self.password_digest).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }

    /// Loads RSVPs and claims, both newest first, with headcount stats.
    ///
    /// # Errors
    /// Returns [`AdminError::Rsvp`] or [`AdminError::Claims`] when a store fails.
    #[instrument(skip_all)]
    pub async fn dashboard(&self) -> Result<Dashboard, AdminError> {
        let rsvps = self.rsvps.list().await.context("Loading RSVPs")?;
        let claims = self.claims.list_claims().await.context("Loading claims")?;
        Ok(Dashboard::new(rsvps, claims))
    }

    /// Deletes an RSVP. Returns whether it existed.
    ///
    /// # Errors
    /// Returns [`AdminError::Rsvp`] when the store fails.
    pub async fn delete_rsvp(&self, id: &str) -> Result<bool, AdminError> {
        let deleted = self.rsvps.delete(id).await.context("Deleting RSVP")?;
        info!(rsvp = id, deleted, "RSVP deletion requested");
        Ok(deleted)
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}

/// Initialize the admin feature.
///
/// # Errors
/// Returns [`AdminError::Config`] when the admin password is blank.
pub fn init(config: &ApiConfig, database: &Database) -> Result<InitializedSlice, AdminError> {
    let AdminConfig { password } = &config.admin;
    if password.trim().is_empty() {
        return Err(AdminError::Config {
            message: "Admin password must not be empty".into(),
            context: Some("admin.password".into()),
        });
    }
    if *password == AdminConfig::default().password {
        warn!("Admin password is the built-in default; set VOWS__ADMIN__PASSWORD");
    }

    info!("Admin slice initialized");

    let inner = AdminInner {
        password_digest: digest(password),
        rsvps: RsvpStore::new(database.clone()),
        claims: SurrealClaimStore::new(database.clone()),
    };

    Ok(InitializedSlice::new(Admin::new(inner)))
}
