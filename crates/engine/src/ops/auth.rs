use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, SqlErr, TransactionTrait, prelude::*};

use crate::{Account, EngineError, ResultEngine, accounts};

use super::{Engine, normalize_required_name, with_tx};

/// Coins granted to a brand-new account on first authentication.
pub(crate) const STARTING_BALANCE: i64 = 1000;

impl Engine {
    /// Authenticates a user, registering it on first sight.
    ///
    /// An unknown username creates the account with the starting grant and
    /// the given secret stored verbatim. A known username must present the
    /// same secret, otherwise the call fails with
    /// [`EngineError::InvalidCredentials`].
    ///
    /// Two concurrent first logins with the same username are resolved by
    /// the unique index on `accounts.username`: the losing insert surfaces
    /// as [`EngineError::Conflict`].
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<Account> {
        let username = normalize_required_name(username, "username")?;
        let password = normalize_required_name(password, "password")?;

        with_tx!(self, |db_tx| {
            let existing = accounts::Entity::find()
                .filter(accounts::Column::Username.eq(username.as_str()))
                .one(&db_tx)
                .await?;

            match existing {
                Some(model) => {
                    if model.password == password {
                        Ok(Account::from(model))
                    } else {
                        Err(EngineError::InvalidCredentials)
                    }
                }
                None => {
                    let account = accounts::ActiveModel {
                        username: ActiveValue::Set(username.clone()),
                        password: ActiveValue::Set(password),
                        coins: ActiveValue::Set(STARTING_BALANCE),
                        created_at: ActiveValue::Set(Utc::now()),
                        ..Default::default()
                    };
                    let inserted = account.insert(&db_tx).await.map_err(|err| {
                        match err.sql_err() {
                            Some(SqlErr::UniqueConstraintViolation(_)) => {
                                EngineError::Conflict(username.clone())
                            }
                            _ => EngineError::Database(err),
                        }
                    })?;
                    Ok(Account::from(inserted))
                }
            }
        })
    }
}
