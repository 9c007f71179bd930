use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[vows_derive::vows_error]
pub enum DatabaseError {
    /// Builder parameters are missing or invalid.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Connectivity or health checks failed.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Root sign-in was rejected.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or checksum drift.
    #[error("Migration error{}: {message}", format_context(.context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DatabaseError {
    /// True when the engine rejected a write because a `UNIQUE` index already
    /// holds the value.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        self.engine_message().is_some_and(|msg| msg.contains("already contains"))
    }

    /// True when the engine aborted the transaction on a read/write conflict
    /// and reports that it can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !self.is_unique_violation()
            && self.engine_message().is_some_and(|msg| {
                let msg = msg.to_ascii_lowercase();
                msg.contains("can be retried") || msg.contains("conflict")
            })
    }

    fn engine_message(&self) -> Option<String> {
        match self {
            Self::Surreal { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}
