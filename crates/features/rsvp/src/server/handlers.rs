use crate::Rsvps;
use crate::error::RsvpError;
use crate::form::thank_you;
use crate::server::dto::RsvpRequest;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::debug;
use vows_derive::api_handler;
use vows_domain::constants::RSVP_TAG;
use vows_kernel::server::response::ActionResponse;
use vows_kernel::server::state::ApiState;

#[api_handler(
    post,
    path = "/rsvp",
    request_body(content = RsvpRequest, description = "Guest reply"),
    responses((status = OK, description = "Outcome in `success`, guest-facing text in `message`", body = ActionResponse)),
    tag = RSVP_TAG,
)]
pub(super) async fn submit_rsvp(
    State(state): State<ApiState>,
    body: Result<Json<RsvpRequest>, JsonRejection>,
) -> Result<ActionResponse, RsvpError> {
    let rsvps = state.try_get_slice::<Rsvps>()?.clone();
    let request = body.map_or_else(
        |rejection| {
            debug!(%rejection, "Unreadable RSVP body");
            RsvpRequest::default()
        },
        |Json(request)| request,
    );

    Ok(match rsvps.submit(request.into()).await {
        Ok(stored) => ActionResponse::ok_with(thank_you(&stored.name, stored.attending)),
        Err(e) => ActionResponse::fail(e.to_string()),
    })
}
