//! Account info endpoint.

use api_types::info::{CoinHistory, InfoResponse, InventoryItem, ReceivedEntry, SentEntry};
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    server::{AuthUser, ServerState},
};

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<InfoResponse>, ServerError> {
    let info = state.engine.account_info(user.id).await?;

    let inventory = info
        .inventory
        .into_iter()
        .map(|entry| InventoryItem {
            item_type: entry.item,
            quantity: entry.count,
        })
        .collect();
    let received = info
        .received
        .into_iter()
        .map(|entry| ReceivedEntry {
            from_user: entry.from_user,
            amount: entry.amount,
        })
        .collect();
    let sent = info
        .sent
        .into_iter()
        .map(|entry| SentEntry {
            to_user: entry.to_user,
            amount: entry.amount,
        })
        .collect();

    Ok(Json(InfoResponse {
        coins: info.coins,
        inventory,
        coin_history: CoinHistory { received, sent },
    }))
}
