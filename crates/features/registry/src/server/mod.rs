//! HTTP surface of the registry slice.

pub mod dto;
mod handlers;
pub mod router;

use crate::coordinator::ClaimError;
use crate::error::RegistryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use vows_kernel::server::response::ActionResponse;

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        error!(error = %self, "Registry request failed");
        let status = match &self {
            Self::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, ActionResponse::fail(ClaimError::StoreUnavailable.to_string())).into_response()
    }
}
