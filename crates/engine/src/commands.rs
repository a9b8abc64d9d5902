//! Command structs for engine operations.
//!
//! These types group parameters for the ledger writes, keeping call sites
//! readable and avoiding long argument lists.

/// Move coins from an authenticated sender to another account.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub sender_id: i64,
    pub to_username: String,
    pub amount: i64,
}

impl TransferCmd {
    #[must_use]
    pub fn new(sender_id: i64, to_username: impl Into<String>, amount: i64) -> Self {
        Self {
            sender_id,
            to_username: to_username.into(),
            amount,
        }
    }
}

/// Buy one catalog item for an authenticated account.
#[derive(Clone, Debug)]
pub struct PurchaseCmd {
    pub account_id: i64,
    pub item: String,
}

impl PurchaseCmd {
    #[must_use]
    pub fn new(account_id: i64, item: impl Into<String>) -> Self {
        Self {
            account_id,
            item: item.into(),
        }
    }
}
