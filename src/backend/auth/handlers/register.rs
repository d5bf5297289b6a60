/**
 * Registration Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register (and its alias POST /api/users/register).
 *
 * # Registration Process
 *
 * 1. Require email and password
 * 2. Normalize the email, validate its format and the password length
 * 3. Reject emails that are already registered
 * 4. Hash the password using bcrypt
 * 5. Create the user and return it (no token; the client logs in next)
 *
 * # Security
 *
 * - Passwords are hashed with the configured bcrypt cost
 * - Passwords are never logged or returned in responses
 * - New accounts are students unless role selection is enabled
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use bcrypt::hash;

use crate::backend::auth::users::{create_user, email_exists, is_unique_violation, NewUser};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::types::{RegisterRequest, RegisterResponse, Role};
use crate::shared::validation::{normalize_email, validate_email, validate_password, MIN_PASSWORD_LEN};

/// Decide the role of a new account
///
/// An unknown role string is always an error. A known non-student role is
/// only honoured when `allow_selection` is set, otherwise it is downgraded.
pub fn resolve_role(requested: Option<&str>, allow_selection: bool) -> Result<Role, BackendError> {
    let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Role::Student);
    };

    let role: Role = requested.parse()?;
    if role != Role::Student && !allow_selection {
        tracing::warn!("Ignoring self-selected role '{}' at registration", role);
        return Ok(Role::Student);
    }

    Ok(role)
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing body or fields, invalid email, short password, unknown role
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing or database failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {"email": "student1@example.com", "password": "password123", "name": "Wang", "student_id": "S20231001"}
/// ```
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    let Json(request) = payload?;

    if request.email.trim().is_empty() || request.password.is_empty() {
        tracing::warn!("Registration without email or password");
        return Err(BackendError::bad_request("Email and password are required"));
    }

    let email = normalize_email(&request.email);
    tracing::info!("Registration request for: {}", email);

    if !validate_email(&email) {
        tracing::warn!("Invalid email format: {}", email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if !validate_password(&request.password) {
        tracing::warn!("Password too short for: {}", email);
        return Err(BackendError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let role = resolve_role(request.role.as_deref(), app_state.config.allow_role_selection)?;

    if email_exists(&app_state.db_pool, &email).await? {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, app_state.config.bcrypt_cost)?;

    let new_user = NewUser {
        email: email.clone(),
        password_hash,
        role,
        name: request.name.trim().to_string(),
        student_id: request.student_id.trim().to_string(),
    };

    // A concurrent registration can still win the race past `email_exists`
    let user = match create_user(&app_state.db_pool, new_user).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Email registered concurrently: {}", email);
            return Err(BackendError::conflict("Email already registered"));
        }
        Err(e) => return Err(e),
    };

    tracing::info!("User registered successfully: {} ({})", user.email, user.role);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user_id: user.id.to_string(),
            user: user.to_response(),
        }),
    ))
}
