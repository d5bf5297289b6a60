/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login (and its alias POST /api/users/login).
 *
 * # Authentication Process
 *
 * 1. Look up user by normalized email
 * 2. Verify password using bcrypt
 * 3. Refuse disabled accounts
 * 4. Generate JWT token and return it with the user
 *
 * # Security
 *
 * - Unknown email and wrong password give the same 401 response
 * - User passwords are never logged or returned in responses
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use bcrypt::verify;

use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::types::{LoginRequest, LoginResponse};
use crate::shared::validation::normalize_email;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - missing body, email or password
/// * `401 Unauthorized` - unknown user, wrong password, or disabled account
/// * `500 Internal Server Error` - database, hashing or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Login successful",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": {"_id": "…", "email": "student1@example.com", "role": "student", "...": "..."}
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, BackendError> {
    let Json(request) = payload?;

    if request.email.trim().is_empty() || request.password.is_empty() {
        tracing::warn!("Login without email or password");
        return Err(BackendError::bad_request("Email and password are required"));
    }

    let email = normalize_email(&request.email);
    tracing::info!("Login request for: {}", email);

    let user = get_user_by_email(&app_state.db_pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        tracing::warn!("Login attempt on disabled account: {}", email);
        return Err(BackendError::unauthorized("Account is disabled"));
    }

    let token = app_state.tokens.create_token(&user)?;

    tracing::info!("User logged in successfully: {} ({})", user.email, user.role);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: user.to_response(),
    }))
}
