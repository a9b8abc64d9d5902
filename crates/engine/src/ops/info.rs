use std::collections::HashMap;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use serde::Serialize;

use crate::{
    EngineError, ResultEngine, TransactionKind, accounts, purchases, transactions,
};

use super::{Engine, with_tx};

/// Aggregated view of one account: balance, bought items and transfer
/// history, as returned by [`Engine::account_info`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub coins: i64,
    pub inventory: Vec<InventoryEntry>,
    pub received: Vec<ReceivedEntry>,
    pub sent: Vec<SentEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    pub item: String,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReceivedEntry {
    pub from_user: String,
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SentEntry {
    pub to_user: String,
    pub amount: i64,
}

impl Engine {
    /// Read-only aggregation of an account's state.
    ///
    /// Runs in a single read transaction so the balance, inventory and
    /// histories are one consistent snapshot. Inventory entries are sorted
    /// by item name; histories follow creation order.
    ///
    /// A transfer whose counterparty can no longer be resolved is skipped
    /// instead of failing the whole call. Store errors still propagate.
    pub async fn account_info(&self, account_id: i64) -> ResultEngine<AccountInfo> {
        with_tx!(self, |db_tx| {
            let account = accounts::Entity::find_by_id(account_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::UserNotFound(account_id.to_string()))?;

            let purchase_models = purchases::Entity::find()
                .filter(purchases::Column::AccountId.eq(account.id))
                .all(&db_tx)
                .await?;
            let mut counts: HashMap<String, i64> = HashMap::new();
            for purchase in purchase_models {
                *counts.entry(purchase.item).or_insert(0) += 1;
            }
            let mut inventory: Vec<InventoryEntry> = counts
                .into_iter()
                .map(|(item, count)| InventoryEntry { item, count })
                .collect();
            inventory.sort_by(|a, b| a.item.cmp(&b.item));

            let received_models = transactions::Entity::find()
                .filter(transactions::Column::ToAccountId.eq(account.id))
                .filter(transactions::Column::Kind.eq(TransactionKind::Transfer.as_str()))
                .order_by_asc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;
            let mut received = Vec::with_capacity(received_models.len());
            for tx in received_models {
                let Some(from_id) = tx.from_account_id else {
                    continue;
                };
                let Some(counterparty) =
                    accounts::Entity::find_by_id(from_id).one(&db_tx).await?
                else {
                    continue;
                };
                received.push(ReceivedEntry {
                    from_user: counterparty.username,
                    amount: tx.amount,
                });
            }

            let sent_models = transactions::Entity::find()
                .filter(transactions::Column::FromAccountId.eq(account.id))
                .filter(transactions::Column::Kind.eq(TransactionKind::Transfer.as_str()))
                .order_by_asc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;
            let mut sent = Vec::with_capacity(sent_models.len());
            for tx in sent_models {
                let Some(counterparty) = accounts::Entity::find_by_id(tx.to_account_id)
                    .one(&db_tx)
                    .await?
                else {
                    continue;
                };
                sent.push(SentEntry {
                    to_user: counterparty.username,
                    amount: tx.amount,
                });
            }

            Ok(AccountInfo {
                coins: account.coins,
                inventory,
                received,
                sent,
            })
        })
    }
}
