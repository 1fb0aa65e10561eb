pub mod v1;

use axum::Router;

use crate::infra::app_state::AppState;

/// Create the main API router with all versions
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(v1::create_public_routes())
        .merge(v1::create_admin_routes(state))
}
