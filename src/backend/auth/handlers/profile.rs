/**
 * Profile Handlers
 *
 * GET and PUT /api/users/profile. Only `name` and `student_id` are
 * editable; email, role and password are not changed through this route.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::users::{get_user_by_id, update_profile as store_profile};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::types::{ProfileResponse, ProfileUpdateRequest, UserEnvelope};

/// Return the caller's profile
pub async fn get_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserEnvelope>, BackendError> {
    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(UserEnvelope {
        user: user.to_response(),
    }))
}

/// Update the caller's name and/or student id
///
/// Absent fields are left as they are; present ones are trimmed.
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let Json(request) = payload?;

    let name = request.name.as_deref().map(str::trim);
    let student_id = request.student_id.as_deref().map(str::trim);

    let user = store_profile(&pool, auth.user_id, name, student_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Profile update for missing user: {}", auth.user_id);
            BackendError::not_found("User not found")
        })?;

    tracing::info!("Profile updated: {}", user.email);

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: user.to_response(),
    }))
}
