//! Authentication endpoint.

use api_types::auth::{AuthRequest, AuthResponse};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState, token::Claims};

/// Authenticates a user (registering it on first sight) and issues the
/// bearer credential for the protected routes.
pub async fn authenticate(
    State(state): State<ServerState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ServerError> {
    if payload.username.trim().is_empty() || payload.password.trim().is_empty() {
        return Err(ServerError::Generic(
            "username and password are required".to_string(),
        ));
    }

    let account = state
        .engine
        .authenticate(&payload.username, &payload.password)
        .await?;

    let token = state
        .tokens
        .issue(&Claims {
            account_id: account.id,
            username: account.username,
        })
        .map_err(|err| ServerError::Internal(err.to_string()))?;

    Ok(Json(AuthResponse { token }))
}
