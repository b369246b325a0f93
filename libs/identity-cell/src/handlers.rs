// libs/identity-cell/src/handlers.rs
use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::RemoveUserRequest;
use crate::state::IdentityState;

// ==============================================================================
// NOTIFICATION HANDLERS
// ==============================================================================

/// Moves every unseen notification to the seen queue and returns the account.
#[axum::debug_handler]
pub async fn get_all_notification(
    State(state): State<IdentityState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let account = state.relay().mark_all_seen(user.id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "All notifications marked as read",
        "data": account
    })))
}

#[axum::debug_handler]
pub async fn delete_all_notification(
    State(state): State<IdentityState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let account = state.relay().clear_all(user.id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Notifications deleted successfully",
        "data": account
    })))
}

// ==============================================================================
// ADMIN HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_all_users(
    State(state): State<IdentityState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let directory = state.directory();
    directory.require_admin(user.id).await?;

    let accounts = directory.list_accounts().await?;
    debug!("Admin {} listed {} accounts", user.id, accounts.len());

    Ok(Json(json!({
        "success": true,
        "message": "Users data",
        "data": accounts
    })))
}

#[axum::debug_handler]
pub async fn remove_user(
    State(state): State<IdentityState>,
    Extension(user): Extension<User>,
    WithRejection(Json(request), _): WithRejection<Json<RemoveUserRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let directory = state.directory();
    directory.require_admin(user.id).await?;

    let removed = directory.remove_account(user.id, request.user_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "User removed successfully",
        "data": removed
    })))
}
