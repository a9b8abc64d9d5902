//! Merch purchase endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use engine::PurchaseCmd;

use crate::{
    ServerError,
    server::{AuthUser, ServerState},
};

pub async fn buy(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(item): Path<String>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .purchase(PurchaseCmd::new(user.id, item))
        .await?;

    Ok(StatusCode::OK)
}
