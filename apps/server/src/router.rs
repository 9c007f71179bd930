use axum::Router;
use axum::middleware::from_fn_with_state;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};
use vows::kernel::server::session::session_layer;
use vows::kernel::prelude::ApiState;
use vows::server::router::{router, system_router};

#[derive(OpenApi)]
#[openapi(
    info(title = "Vows", description = "Wedding site API: gift registry, RSVP and admin dashboard"),
    tags(
        (name = "Registry", description = "Gift catalog, link clicks and claims"),
        (name = "RSVP", description = "Guest replies"),
        (name = "Admin", description = "Password-protected dashboard"),
        (name = "System", description = "Health"),
    )
)]
struct ApiDoc;

/// Full application router with API docs served at `/api`.
pub fn init(state: ApiState) -> Router {
    let sessions = from_fn_with_state(state.sessions.clone(), session_layer);

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(router().layer(sessions))
        .merge(system_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(openapi_routes).merge(Scalar::with_url("/api", api_doc))
}
