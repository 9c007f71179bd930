//! HTTP surface of the admin slice.

pub mod dto;
mod guard;
mod handlers;
pub mod router;

pub use guard::AdminSession;

use crate::error::AdminError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};
use vows_kernel::server::response::ActionResponse;
use vows_rsvp::form::TRY_AGAIN;

/// Shown when the dashboard is requested without logging in.
pub const LOGIN_REQUIRED: &str = "Please log in to view the dashboard.";

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized { .. } => {
                debug!("Admin request without an admin session");
                (StatusCode::UNAUTHORIZED, ActionResponse::fail(LOGIN_REQUIRED)).into_response()
            },
            other => {
                error!(error = %other, "Admin request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ActionResponse::fail(TRY_AGAIN)).into_response()
            },
        }
    }
}
