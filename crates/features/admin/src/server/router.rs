use super::handlers;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use vows_kernel::server::state::ApiState;

pub fn admin_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::login))
        .routes(routes!(handlers::logout))
        .routes(routes!(handlers::dashboard))
        .routes(routes!(handlers::delete_rsvp))
}
