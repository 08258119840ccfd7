use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::role::list_roles,
            handlers::role::create_role
        ))
        .routes(routes!(handlers::role::update_role))
        .routes(routes!(handlers::staff::get_staff))
        .routes(routes!(handlers::staff::list_staff))
}
