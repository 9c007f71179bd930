use crate::error::AdminError;
use crate::server::AdminSession;
use crate::server::dto::{DashboardView, LoginRequest};
use crate::{Admin, INCORRECT_PASSWORD};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use tracing::{info, warn};
use vows_derive::api_handler;
use vows_domain::constants::ADMIN_TAG;
use vows_kernel::server::response::ActionResponse;
use vows_kernel::server::session::GuestSession;
use vows_kernel::server::state::ApiState;

fn admin(state: &ApiState) -> Result<Admin, AdminError> {
    Ok(state.try_get_slice::<Admin>()?.clone())
}

#[api_handler(
    post,
    path = "/admin/login",
    request_body(content = LoginRequest, description = "Shared admin password"),
    responses((status = OK, description = "`success` tells whether the session is now admin", body = ActionResponse)),
    tag = ADMIN_TAG,
)]
pub(super) async fn login(
    State(state): State<ApiState>,
    session: GuestSession,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ActionResponse, AdminError> {
    let admin = admin(&state)?;
    let password = body.ok().and_then(|Json(request)| request.password).unwrap_or_default();

    if !admin.verify_password(&password) {
        warn!(session = session.id(), "Admin login failed");
        return Ok(ActionResponse::fail(INCORRECT_PASSWORD));
    }

    let session = session.renew().await;
    session.lock().await.is_admin = true;
    info!(session = session.id(), "Admin logged in");
    Ok(ActionResponse::ok())
}

#[api_handler(
    post,
    path = "/admin/logout",
    responses((status = OK, description = "Session destroyed", body = ActionResponse)),
    tag = ADMIN_TAG,
)]
pub(super) async fn logout(session: GuestSession) -> ActionResponse {
    session.destroy();
    ActionResponse::ok()
}

#[api_handler(
    get,
    path = "/admin",
    responses(
        (status = OK, description = "RSVPs, headcount and claims", body = DashboardView),
        (status = UNAUTHORIZED, description = "Not logged in", body = ActionResponse),
    ),
    tag = ADMIN_TAG,
)]
pub(super) async fn dashboard(
    State(state): State<ApiState>,
    _admin: AdminSession,
) -> Result<Json<DashboardView>, AdminError> {
    let dashboard = admin(&state)?.dashboard().await?;
    Ok(Json(dashboard.into()))
}

#[api_handler(
    post,
    path = "/admin/delete-rsvp/{id}",
    params(("id" = String, Path, description = "RSVP id")),
    responses(
        (status = OK, description = "`success` tells whether the RSVP existed", body = ActionResponse),
        (status = UNAUTHORIZED, description = "Not logged in", body = ActionResponse),
    ),
    tag = ADMIN_TAG,
)]
pub(super) async fn delete_rsvp(
    State(state): State<ApiState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> Result<ActionResponse, AdminError> {
    let deleted = admin(&state)?.delete_rsvp(&id).await?;
    Ok(ActionResponse { success: deleted, message: None })
}
