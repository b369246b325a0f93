// libs/doctor-cell/src/handlers.rs
use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{ApplyDoctorRequest, ChangeAccountStatusRequest, DoctorIdRequest};
use crate::state::DoctorState;

// ==============================================================================
// APPLICATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn apply_doctor(
    State(state): State<DoctorState>,
    Extension(user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<ApplyDoctorRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let outcome = state.workflow().apply(user.id, request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor account applied successfully",
        "data": outcome.profile,
        "adminsNotified": outcome.admins_notified.delivered_to.len()
    })))
}

#[axum::debug_handler]
pub async fn change_account_status(
    State(state): State<DoctorState>,
    Extension(user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<ChangeAccountStatusRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    state.identity().require_admin(user.id).await?;

    let outcome = state.workflow()
        .change_status(request.doctor_id, &request.status)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Account status updated",
        "data": outcome.profile,
        "notificationDelivered": outcome.notification.is_delivered()
    })))
}

// ==============================================================================
// DIRECTORY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_all_doctors(
    State(state): State<DoctorState>,
) -> Result<Json<Value>, AppError> {
    let doctors = state.directory().list_approved().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctors list fetched successfully",
        "data": doctors
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_by_id(
    State(state): State<DoctorState>,
    WithRejection(Json(request), _): WithRejection<Json<DoctorIdRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.directory().get_doctor(request.doctor_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor info fetched",
        "data": doctor
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_profile(
    State(state): State<DoctorState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.directory().profile_for_account(user.id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor profile fetched",
        "data": doctor
    })))
}

#[axum::debug_handler]
pub async fn admin_get_all_doctors(
    State(state): State<DoctorState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    state.identity().require_admin(user.id).await?;

    let doctors = state.directory().list_all().await?;
    debug!("Admin {} listed {} doctor profiles", user.id, doctors.len());

    Ok(Json(json!({
        "success": true,
        "message": "Doctors data",
        "data": doctors
    })))
}
