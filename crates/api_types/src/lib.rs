use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthRequest {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub token: String,
    }
}

pub mod coin {
    use super::*;

    /// Request body for sending coins to another user.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SendCoinRequest {
        pub to_user: String,
        pub amount: i64,
    }
}

pub mod info {
    use super::*;

    /// Response body for the account info aggregation.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InfoResponse {
        pub coins: i64,
        pub inventory: Vec<InventoryItem>,
        pub coin_history: CoinHistory,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InventoryItem {
        /// Item name; serialized as `type` to match the wire format.
        #[serde(rename = "type")]
        pub item_type: String,
        pub quantity: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CoinHistory {
        pub received: Vec<ReceivedEntry>,
        pub sent: Vec<SentEntry>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReceivedEntry {
        pub from_user: String,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SentEntry {
        pub to_user: String,
        pub amount: i64,
    }
}
