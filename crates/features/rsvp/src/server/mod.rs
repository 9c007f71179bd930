//! HTTP surface of the RSVP slice.

pub mod dto;
mod handlers;
pub mod router;

use crate::error::RsvpError;
use crate::form::TRY_AGAIN;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use vows_kernel::server::response::ActionResponse;

impl IntoResponse for RsvpError {
    fn into_response(self) -> Response {
        error!(error = %self, "RSVP request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, ActionResponse::fail(TRY_AGAIN)).into_response()
    }
}
