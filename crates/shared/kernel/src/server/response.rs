use axum::Json;
use axum::response::{IntoResponse, Response};
use vows_derive::api_model;

/// `{success, message?}` envelope returned by every guest-facing action.
///
/// Domain failures travel inside this body with HTTP 200; the transport
/// status is reserved for infrastructure and access problems.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true, message: None }
    }

    #[must_use]
    pub fn ok_with(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()) }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()) }
    }
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_omitted_when_absent() {
        let json = serde_json::to_string(&ActionResponse::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);

        let json = serde_json::to_string(&ActionResponse::fail("Item not found.")).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"Item not found."}"#);
    }
}
