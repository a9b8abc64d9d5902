use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{
    EngineError, ResultEngine, TransactionKind, TransferCmd, accounts, transactions,
};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Moves coins from the sender to another account.
    ///
    /// The balance check, both balance updates and the ledger append run in
    /// one database transaction, so a failed transfer never leaves the
    /// sender debited. The debit itself is guarded (`coins >= amount` in the
    /// UPDATE filter): two concurrent transfers from the same account cannot
    /// both pass the balance check.
    ///
    /// Self-transfer is permitted; it is balance-neutral but still recorded.
    pub async fn transfer(&self, cmd: TransferCmd) -> ResultEngine<i64> {
        let TransferCmd {
            sender_id,
            to_username,
            amount,
        } = cmd;
        if amount <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        let to_username = normalize_required_name(&to_username, "username")?;

        with_tx!(self, |db_tx| {
            let sender = accounts::Entity::find_by_id(sender_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::UserNotFound(sender_id.to_string()))?;
            if sender.coins < amount {
                return Err(EngineError::InsufficientFunds(format!(
                    "balance {} is less than {amount}",
                    sender.coins
                )));
            }

            // Recipient existence is verified before any mutation.
            let recipient = accounts::Entity::find()
                .filter(accounts::Column::Username.eq(to_username.as_str()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::UserNotFound(to_username.clone()))?;

            let debit = accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Coins,
                    Expr::col(accounts::Column::Coins).sub(amount),
                )
                .filter(accounts::Column::Id.eq(sender.id))
                .filter(accounts::Column::Coins.gte(amount))
                .exec(&db_tx)
                .await?;
            if debit.rows_affected == 0 {
                return Err(EngineError::InsufficientFunds(format!(
                    "balance fell below {amount}"
                )));
            }

            accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Coins,
                    Expr::col(accounts::Column::Coins).add(amount),
                )
                .filter(accounts::Column::Id.eq(recipient.id))
                .exec(&db_tx)
                .await?;

            let entry = transactions::ActiveModel {
                from_account_id: ActiveValue::Set(Some(sender.id)),
                to_account_id: ActiveValue::Set(recipient.id),
                amount: ActiveValue::Set(amount),
                kind: ActiveValue::Set(TransactionKind::Transfer.as_str().to_string()),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let entry = entry.insert(&db_tx).await?;
            Ok(entry.id)
        })
    }
}
