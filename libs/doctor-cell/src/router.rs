// libs/doctor-cell/src/router.rs
use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::DoctorState;

pub fn doctor_routes(state: DoctorState) -> Router {
    let protected_routes = Router::new()
        .route("/user/apply-doctor", post(handlers::apply_doctor))
        .route("/user/getAllDoctors", get(handlers::get_all_doctors))
        .route("/doctor/getDoctorById", post(handlers::get_doctor_by_id))
        .route("/doctor/getDoctorProfile", post(handlers::get_doctor_profile))

        // Admin only
        .route("/admin/getAllDoctors", get(handlers::admin_get_all_doctors))
        .route("/admin/changeAccountStatus", post(handlers::change_account_status))

        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
