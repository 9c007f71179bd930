use crate::error::AdminError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vows_kernel::prelude::GuestSession;

/// A guest session that has logged in as admin.
///
/// Rejects with [`AdminError::Unauthorized`] otherwise.
#[derive(Debug, Clone)]
pub struct AdminSession(pub GuestSession);

impl<S: Send + Sync> FromRequestParts<S> for AdminSession {
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = GuestSession::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AdminError::from(message))?;

        if session.lock().await.is_admin {
            Ok(Self(session))
        } else {
            Err(AdminError::Unauthorized { context: Some(session.id().to_owned().into()) })
        }
    }
}
