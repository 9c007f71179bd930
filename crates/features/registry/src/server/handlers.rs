use crate::Registry;
use crate::error::{RegistryError, RegistryErrorExt};
use crate::server::dto::{ClaimRequest, RegistryItemView};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use tracing::debug;
use vows_derive::api_handler;
use vows_domain::constants::REGISTRY_TAG;
use vows_kernel::server::response::ActionResponse;
use vows_kernel::server::session::GuestSession;
use vows_kernel::server::state::ApiState;

fn registry(state: &ApiState) -> Result<Registry, RegistryError> {
    Ok(state.try_get_slice::<Registry>()?.clone())
}

#[api_handler(
    get,
    path = "/registry",
    responses(
        (status = OK, description = "Catalog in declaration order with claim status", body = Vec<RegistryItemView>),
        (status = SERVICE_UNAVAILABLE, description = "Claims could not be loaded", body = ActionResponse),
    ),
    tag = REGISTRY_TAG,
)]
pub(super) async fn list_items(
    State(state): State<ApiState>,
) -> Result<Json<Vec<RegistryItemView>>, RegistryError> {
    let items = registry(&state)?.items().await.context("Listing registry")?;
    Ok(Json(items.into_iter().map(RegistryItemView::from).collect()))
}

#[api_handler(
    post,
    path = "/registry/link-click/{item_id}",
    params(("item_id" = String, Path, description = "Registry item id")),
    responses((status = OK, description = "`success` is false for unknown items", body = ActionResponse)),
    tag = REGISTRY_TAG,
)]
pub(super) async fn record_link_click(
    State(state): State<ApiState>,
    session: GuestSession,
    Path(item_id): Path<String>,
) -> Result<ActionResponse, RegistryError> {
    let registry = registry(&state)?;
    let mut data = session.lock().await;

    Ok(match registry.tracker().record_click(&mut data.link_clicks, &item_id) {
        Ok(()) => ActionResponse::ok(),
        Err(e) => ActionResponse::fail(e.to_string()),
    })
}

#[api_handler(
    post,
    path = "/registry/claim/{item_id}",
    params(("item_id" = String, Path, description = "Registry item id")),
    request_body(content = ClaimRequest, description = "Name of the guest claiming the gift"),
    responses((status = OK, description = "Outcome in `success`, guest-facing text in `message`", body = ActionResponse)),
    tag = REGISTRY_TAG,
)]
pub(super) async fn claim_item(
    State(state): State<ApiState>,
    session: GuestSession,
    Path(item_id): Path<String>,
    body: Result<Json<ClaimRequest>, JsonRejection>,
) -> Result<ActionResponse, RegistryError> {
    let registry = registry(&state)?;
    let request = body.map_or_else(
        |rejection| {
            debug!(%rejection, "Unreadable claim body, treating name as empty");
            ClaimRequest::default()
        },
        |Json(request)| request,
    );
    let claimer_name = request.claimer_name.unwrap_or_default();

    let mut data = session.lock().await;
    let outcome = registry.coordinator.claim(&item_id, &claimer_name, &mut data.link_clicks).await;

    Ok(match outcome {
        Ok(confirmation) => ActionResponse::ok_with(confirmation.message()),
        Err(e) => ActionResponse::fail(e.to_string()),
    })
}
