/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * information about the currently authenticated user.
 *
 * # Authentication
 *
 * The route sits behind the auth middleware, which has already verified the
 * bearer token. The user is re-read here so the response reflects the
 * current stored profile.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::types::UserEnvelope;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - rejected by the auth middleware
/// * `404 Not Found` - the user was deleted after the token was checked
///
/// # Example Response
///
/// ```json
/// {"user": {"_id": "…", "email": "student1@example.com", "role": "student", "...": "..."}}
/// ```
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserEnvelope>, BackendError> {
    let user = get_user_by_id(&pool, auth.user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", auth.user_id);
        BackendError::not_found("User not found")
    })?;

    Ok(Json(UserEnvelope {
        user: user.to_response(),
    }))
}
