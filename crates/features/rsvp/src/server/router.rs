use super::handlers;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use vows_kernel::server::state::ApiState;

pub fn rsvp_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(handlers::submit_rsvp))
}
