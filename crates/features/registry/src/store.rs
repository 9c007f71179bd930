//! Durable claims.
//!
//! [`ClaimStore`] is the seam between the coordinator and storage. The
//! SurrealDB implementation relies on the `claim_item_unique` index, so the
//! "at most one claim per item" rule holds across processes and concurrent
//! writers.

use crate::error::StoreError;
use chrono::{SecondsFormat, Utc};
use std::future::Future;
use surrealdb::types::SurrealValue;
use tracing::instrument;
use vows_database::{Database, DatabaseError};
use vows_domain::gift::Claim;

/// Storage contract the claim workflow depends on.
pub trait ClaimStore: Send + Sync + 'static {
    /// Inserts a claim atomically.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when `item_id` is already claimed.
    fn insert_claim(
        &self,
        item_id: &str,
        claimer_name: &str,
    ) -> impl Future<Output = Result<Claim, StoreError>> + Send;

    fn get_claim(
        &self,
        item_id: &str,
    ) -> impl Future<Output = Result<Option<Claim>, StoreError>> + Send;

    /// All claims, newest first.
    fn list_claims(&self) -> impl Future<Output = Result<Vec<Claim>, StoreError>> + Send;
}

#[derive(Debug, SurrealValue)]
struct ClaimRow {
    item_id: String,
    claimer_name: String,
    created_at: String,
}

impl From<ClaimRow> for Claim {
    fn from(row: ClaimRow) -> Self {
        Self { item_id: row.item_id, claimer_name: row.claimer_name, created_at: row.created_at }
    }
}

/// [`ClaimStore`] backed by the `claim` table.
#[derive(Debug, Clone)]
pub struct SurrealClaimStore {
    db: Database,
}

impl SurrealClaimStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Fixed-width UTC timestamp; sorts lexicographically in time order.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn engine(err: surrealdb::Error, context: &'static str) -> StoreError {
    StoreError::classify(DatabaseError::from(err), context)
}

impl ClaimStore for SurrealClaimStore {
    #[instrument(skip(self))]
    async fn insert_claim(&self, item_id: &str, claimer_name: &str) -> Result<Claim, StoreError> {
        let claim = Claim {
            item_id: item_id.to_owned(),
            claimer_name: claimer_name.to_owned(),
            created_at: timestamp(),
        };

        self.db
            .query(
                "CREATE claim CONTENT {
                    item_id: $item_id,
                    claimer_name: $claimer_name,
                    created_at: $created_at
                } RETURN NONE",
            )
            .bind(("item_id", claim.item_id.clone()))
            .bind(("claimer_name", claim.claimer_name.clone()))
            .bind(("created_at", claim.created_at.clone()))
            .await
            .map_err(|e| engine(e, "Sending claim insert"))?
            .check()
            .map_err(|e| engine(surrealdb::Error::from(e), "Inserting claim"))?;

        Ok(claim)
    }

    async fn get_claim(&self, item_id: &str) -> Result<Option<Claim>, StoreError> {
        let rows = self
            .db
            .query(
                "SELECT item_id, claimer_name, created_at FROM claim
                 WHERE item_id = $item_id LIMIT 1",
            )
            .bind(("item_id", item_id.to_owned()))
            .await
            .map_err(|e| engine(e, "Loading claim"))?
            .take::<Vec<ClaimRow>>(0)
            .map_err(|e| engine(e, "Decoding claim"))?;

        Ok(rows.into_iter().next().map(Claim::from))
    }

    async fn list_claims(&self) -> Result<Vec<Claim>, StoreError> {
        let rows = self
            .db
            .query(
                "SELECT item_id, claimer_name, created_at FROM claim
                 ORDER BY created_at DESC, item_id ASC",
            )
            .await
            .map_err(|e| engine(e, "Listing claims"))?
            .take::<Vec<ClaimRow>>(0)
            .map_err(|e| engine(e, "Decoding claims"))?;

        Ok(rows.into_iter().map(Claim::from).collect())
    }
}
