use crate::error::RsvpError;
use crate::form::NewRsvp;
use chrono::{SecondsFormat, Utc};
use surrealdb::types::SurrealValue;
use tracing::instrument;
use vows_database::{Database, DatabaseErrorExt};
use vows_domain::rsvp::{Attendance, Rsvp};
use vows_kernel::safe_nanoid;

const RSVP_KEY_LENGTH: usize = 16;

#[derive(Debug, SurrealValue)]
struct RsvpRow {
    key: String,
    name: String,
    email: String,
    num_guests: i64,
    attending: String,
    dietary_restrictions: String,
    song_request: String,
    message: String,
    created_at: String,
}

impl From<RsvpRow> for Rsvp {
    fn from(row: RsvpRow) -> Self {
        Self {
            id: row.key,
            name: row.name,
            email: row.email,
            num_guests: u32::try_from(row.num_guests).unwrap_or(1),
            attending: row.attending.parse().unwrap_or(Attendance::No),
            dietary_restrictions: row.dietary_restrictions,
            song_request: row.song_request,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// RSVP persistence on the `rsvp` table.
#[derive(Debug, Clone)]
pub struct RsvpStore {
    db: Database,
}

impl RsvpStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a validated submission under a fresh id.
    ///
    /// # Errors
    /// Returns [`RsvpError::Database`] when the insert fails.
    #[instrument(skip_all)]
    pub async fn insert(&self, rsvp: NewRsvp) -> Result<Rsvp, RsvpError> {
        let stored = Rsvp {
            id: safe_nanoid!(RSVP_KEY_LENGTH),
            name: rsvp.name,
            email: rsvp.email,
            num_guests: rsvp.num_guests,
            attending: rsvp.attending,
            dietary_restrictions: rsvp.dietary_restrictions,
            song_request: rsvp.song_request,
            message: rsvp.message,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        self.db
            .query(
                "CREATE rsvp CONTENT {
                    key: $key,
                    name: $name,
                    email: $email,
                    num_guests: $num_guests,
                    attending: $attending,
                    dietary_restrictions: $dietary_restrictions,
                    song_request: $song_request,
                    message: $message,
                    created_at: $created_at
                } RETURN NONE",
            )
            .bind(("key", stored.id.clone()))
            .bind(("name", stored.name.clone()))
            .bind(("email", stored.email.clone()))
            .bind(("num_guests", i64::from(stored.num_guests)))
            .bind(("attending", stored.attending.as_str()))
            .bind(("dietary_restrictions", stored.dietary_restrictions.clone()))
            .bind(("song_request", stored.song_request.clone()))
            .bind(("message", stored.message.clone()))
            .bind(("created_at", stored.created_at.clone()))
            .await
            .context("Sending RSVP insert")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Inserting RSVP")?;

        Ok(stored)
    }

    /// All RSVPs, newest first.
    ///
    /// # Errors
    /// Returns [`RsvpError::Database`] when the query fails.
    pub async fn list(&self) -> Result<Vec<Rsvp>, RsvpError> {
        let rows = self
            .db
            .query(
                "SELECT key, name, email, num_guests, attending, dietary_restrictions,
                        song_request, message, created_at
                 FROM rsvp ORDER BY created_at DESC",
            )
            .await
            .context("Listing RSVPs")?
            .take::<Vec<RsvpRow>>(0)
            .context("Decoding RSVPs")?;

        Ok(rows.into_iter().map(Rsvp::from).collect())
    }

    /// Deletes one RSVP. Returns whether it existed.
    ///
    /// # Errors
    /// Returns [`RsvpError::Database`] when the query fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, RsvpError> {
        let removed = self
            .db
            .query("DELETE rsvp WHERE key = $key RETURN BEFORE")
            .bind(("key", id.to_owned()))
            .await
            .context("Deleting RSVP")?
            .take::<Vec<RsvpRow>>(0)
            .context("Decoding deleted RSVP")?;

        Ok(!removed.is_empty())
    }
}
