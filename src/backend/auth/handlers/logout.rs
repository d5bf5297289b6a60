//! Logout handler for POST /api/auth/logout.
//!
//! Tokens are stateless; there is nothing to revoke on the server. The
//! endpoint exists so clients have a uniform call before discarding the token.

use axum::response::Json;

use crate::backend::middleware::AuthUser;
use crate::shared::types::MessageResponse;

pub async fn logout(AuthUser(auth): AuthUser) -> Json<MessageResponse> {
    tracing::info!("User logged out: {}", auth.email);

    Json(MessageResponse {
        message: "Logout successful".to_string(),
    })
}
