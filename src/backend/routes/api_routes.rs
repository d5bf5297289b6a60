/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/register`, `POST /api/users/register` - User registration
 * - `POST /api/auth/login`, `POST /api/users/login` - User login
 *
 * ## Authenticated
 * - `GET  /api/auth/me` - Current user
 * - `POST /api/auth/logout` - Logout acknowledgement
 * - `GET|PUT /api/users/profile` - Profile
 * - `/api/leave/...` - Leave requests (see [`leave_routes`])
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, get_profile, login, logout, register, update_profile};
use crate::backend::leave::{
    apply_leave, approve_request, leave_types, my_requests, pending_requests, reject_request, request_detail,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Leave routes, relative to `/api/leave`
pub fn leave_routes() -> Router<AppState> {
    Router::new()
        .route("/types", get(leave_types))
        .route("/apply", post(apply_leave))
        .route("/my-requests", get(my_requests))
        .route("/pending", get(pending_requests))
        .route("/request/{request_id}", get(request_detail))
        .route("/approve/{request_id}", post(approve_request))
        .route("/reject/{request_id}", post(reject_request))
}

/// Configure API routes
///
/// Authenticated routes get [`auth_middleware`] as a route layer, so an
/// unknown path still falls through to the 404 fallback instead of a 401.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login));

    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/logout", post(logout))
        .route("/api/users/profile", get(get_profile).put(update_profile))
        .nest("/api/leave", leave_routes())
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(public).merge(protected)
}
