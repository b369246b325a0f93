use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use appointment_cell::AppointmentState;
use doctor_cell::router::doctor_routes;
use doctor_cell::DoctorState;
use identity_cell::router::identity_routes;
use identity_cell::IdentityState;
use shared_config::AppConfig;

/// Every cell shares the same account and doctor stores.
pub fn create_router(config: Arc<AppConfig>) -> Router {
    let identity = IdentityState::from_config(config.clone());
    let doctors = DoctorState::from_config(config.clone(), identity.accounts.clone());
    let appointments = AppointmentState::from_config(
        config,
        identity.accounts.clone(),
        doctors.doctors.clone(),
    );

    let api = Router::new()
        .merge(identity_routes(identity))
        .merge(doctor_routes(doctors))
        .merge(appointment_routes(appointments));

    Router::new()
        .route("/", get(|| async { "Clinic scheduling API is running!" }))
        .nest("/api/v1", api)
}
