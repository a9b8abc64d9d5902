use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{
    EngineError, PurchaseCmd, ResultEngine, TransactionKind, accounts, purchases, transactions,
};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Buys one catalog item for the account.
    ///
    /// Appends a purchase record with the price snapshotted from the
    /// catalog and a purchase-kind transaction with no source account, and
    /// debits the balance, all in one database transaction. The debit is
    /// guarded the same way as [`Engine::transfer`].
    pub async fn purchase(&self, cmd: PurchaseCmd) -> ResultEngine<i64> {
        let PurchaseCmd { account_id, item } = cmd;
        let item = normalize_required_name(&item, "item")?;
        let price = self
            .catalog
            .price(&item)
            .ok_or_else(|| EngineError::ItemNotFound(item.clone()))?;

        with_tx!(self, |db_tx| {
            let account = accounts::Entity::find_by_id(account_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::UserNotFound(account_id.to_string()))?;
            if account.coins < price {
                return Err(EngineError::InsufficientFunds(format!(
                    "balance {} is less than {price}",
                    account.coins
                )));
            }

            let debit = accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Coins,
                    Expr::col(accounts::Column::Coins).sub(price),
                )
                .filter(accounts::Column::Id.eq(account.id))
                .filter(accounts::Column::Coins.gte(price))
                .exec(&db_tx)
                .await?;
            if debit.rows_affected == 0 {
                return Err(EngineError::InsufficientFunds(format!(
                    "balance fell below {price}"
                )));
            }

            let purchase = purchases::ActiveModel {
                account_id: ActiveValue::Set(account.id),
                item: ActiveValue::Set(item.clone()),
                price: ActiveValue::Set(price),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let purchase = purchase.insert(&db_tx).await?;

            let entry = transactions::ActiveModel {
                from_account_id: ActiveValue::Set(None),
                to_account_id: ActiveValue::Set(account.id),
                amount: ActiveValue::Set(price),
                kind: ActiveValue::Set(TransactionKind::Purchase.as_str().to_string()),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            entry.insert(&db_tx).await?;

            Ok(purchase.id)
        })
    }
}
