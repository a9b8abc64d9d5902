//! Coin transfer endpoint.

use api_types::coin::SendCoinRequest;
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::TransferCmd;

use crate::{
    ServerError,
    server::{AuthUser, ServerState},
};

pub async fn send(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<SendCoinRequest>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .transfer(TransferCmd::new(user.id, payload.to_user, payload.amount))
        .await?;

    Ok(StatusCode::OK)
}
