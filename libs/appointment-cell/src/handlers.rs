// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AvailabilityRequest, BookAppointmentRequest, UpdateStatusRequest};
use crate::state::AppointmentState;

// ==============================================================================
// PATIENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<BookAppointmentRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let outcome = state.scheduler().book(user.id, request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment booked successfully",
        "data": outcome.appointment,
        "notificationDelivered": outcome.notification.is_delivered()
    })))
}

#[axum::debug_handler]
pub async fn booking_availability(
    State(state): State<AppointmentState>,
    WithRejection(Json(request), _): WithRejection<Json<AvailabilityRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let available = state.scheduler()
        .check_availability(request.doctor_id, request.date, request.office_time)
        .await?;

    let message = if available { "Appointment available" } else { "Appointment not available at this time" };

    Ok(Json(json!({
        "success": true,
        "message": message,
        "data": { "available": available }
    })))
}

#[axum::debug_handler]
pub async fn user_appointments(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.scheduler().list_for_patient(user.id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "User appointments fetched successfully",
        "data": appointments
    })))
}

// ==============================================================================
// DOCTOR HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn doctor_appointments(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.doctor_directory().profile_for_account(user.id).await?;
    let appointments = state.scheduler().list_for_doctor(doctor.id).await?;
    debug!("Doctor {} has {} appointments", doctor.id, appointments.len());

    Ok(Json(json!({
        "success": true,
        "message": "Doctor appointments fetched successfully",
        "data": appointments
    })))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateStatusRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let lifecycle = state.lifecycle();
    lifecycle.authorize_decision(user.id, request.appointment_id).await?;

    let outcome = lifecycle.update_status(request.appointment_id, &request.status).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment status updated",
        "data": outcome.appointment,
        "notificationDelivered": outcome.notification.is_delivered()
    })))
}
