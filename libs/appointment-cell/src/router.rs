// libs/appointment-cell/src/router.rs
use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(state: AppointmentState) -> Router {
    let protected_routes = Router::new()
        // Patient
        .route("/user/book-appointment", post(handlers::book_appointment))
        .route("/user/booking-availability", post(handlers::booking_availability))
        .route("/user/user-appointments", get(handlers::user_appointments))

        // Doctor
        .route("/doctor/doctor-appointments", get(handlers::doctor_appointments))
        .route("/doctor/update-status", post(handlers::update_status))

        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
