use super::handlers;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use vows_kernel::server::state::ApiState;

pub fn registry_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_items))
        .routes(routes!(handlers::record_link_click))
        .routes(routes!(handlers::claim_item))
}
