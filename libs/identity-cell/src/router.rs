// libs/identity-cell/src/router.rs
use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::IdentityState;

pub fn identity_routes(state: IdentityState) -> Router {
    let protected_routes = Router::new()
        .route("/user/get-all-notification", post(handlers::get_all_notification))
        .route("/user/delete-all-notification", post(handlers::delete_all_notification))

        // Admin only
        .route("/admin/getAllUsers", get(handlers::get_all_users))
        .route("/admin/removeUser", post(handlers::remove_user))

        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
