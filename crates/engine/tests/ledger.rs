use std::collections::HashMap;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Catalog, Engine, EngineError, PurchaseCmd, TransferCmd};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .catalog(Catalog::default())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn count_rows(db: &DatabaseConnection, sql: &str, values: Vec<sea_orm::Value>) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(backend, sql, values))
        .await
        .unwrap();
    row.and_then(|r| r.try_get("", "cnt").ok()).unwrap_or(0)
}

#[tokio::test]
async fn first_authentication_registers_with_starting_grant() {
    let (engine, db) = engine_with_db().await;

    let alice = engine.authenticate("alice", "secret").await.unwrap();
    assert_eq!(alice.username, "alice");
    assert_eq!(alice.coins, 1000);

    let accounts = count_rows(&db, "SELECT COUNT(*) AS cnt FROM accounts", vec![]).await;
    assert_eq!(accounts, 1);
}

#[tokio::test]
async fn repeated_authentication_is_stable() {
    let (engine, db) = engine_with_db().await;

    let first = engine.authenticate("alice", "secret").await.unwrap();
    let second = engine.authenticate("alice", "secret").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(second.coins, 1000);

    let accounts = count_rows(&db, "SELECT COUNT(*) AS cnt FROM accounts", vec![]).await;
    assert_eq!(accounts, 1);
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    engine.authenticate("alice", "secret").await.unwrap();
    let err = engine.authenticate("alice", "not-it").await.unwrap_err();
    assert_eq!(err, EngineError::InvalidCredentials);
}

#[tokio::test]
async fn empty_credentials_are_rejected() {
    let (engine, _db) = engine_with_db().await;

    assert!(matches!(
        engine.authenticate("", "secret").await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.authenticate("alice", "  ").await,
        Err(EngineError::InvalidAmount(_))
    ));
}

#[tokio::test]
async fn transfer_moves_coins_and_records_one_entry() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();
    engine.authenticate("bob", "hunter2").await.unwrap();

    engine
        .transfer(TransferCmd::new(alice.id, "bob", 100))
        .await
        .unwrap();

    let alice_info = engine.account_info(alice.id).await.unwrap();
    assert_eq!(alice_info.coins, 900);
    assert_eq!(alice_info.sent.len(), 1);
    assert_eq!(alice_info.sent[0].to_user, "bob");
    assert_eq!(alice_info.sent[0].amount, 100);

    let bob = engine.authenticate("bob", "hunter2").await.unwrap();
    assert_eq!(bob.coins, 1100);
    let bob_info = engine.account_info(bob.id).await.unwrap();
    assert_eq!(bob_info.received.len(), 1);
    assert_eq!(bob_info.received[0].from_user, "alice");
    assert_eq!(bob_info.received[0].amount, 100);

    let transfers = count_rows(
        &db,
        "SELECT COUNT(*) AS cnt FROM transactions WHERE kind = ?",
        vec!["transfer".into()],
    )
    .await;
    assert_eq!(transfers, 1);
}

#[tokio::test]
async fn insufficient_funds_leaves_state_untouched() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();
    let bob = engine.authenticate("bob", "hunter2").await.unwrap();

    let err = engine
        .transfer(TransferCmd::new(alice.id, "bob", 5000))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    assert_eq!(engine.account_info(alice.id).await.unwrap().coins, 1000);
    assert_eq!(engine.account_info(bob.id).await.unwrap().coins, 1000);
    let transactions = count_rows(&db, "SELECT COUNT(*) AS cnt FROM transactions", vec![]).await;
    assert_eq!(transactions, 0);
}

#[tokio::test]
async fn transfer_to_unknown_user_fails_before_any_debit() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();

    let err = engine
        .transfer(TransferCmd::new(alice.id, "nobody", 100))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UserNotFound("nobody".to_string()));

    assert_eq!(engine.account_info(alice.id).await.unwrap().coins, 1000);
    let transactions = count_rows(&db, "SELECT COUNT(*) AS cnt FROM transactions", vec![]).await;
    assert_eq!(transactions, 0);
}

#[tokio::test]
async fn transfer_rejects_non_positive_amounts() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();
    engine.authenticate("bob", "hunter2").await.unwrap();

    assert!(matches!(
        engine.transfer(TransferCmd::new(alice.id, "bob", 0)).await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.transfer(TransferCmd::new(alice.id, "bob", -10)).await,
        Err(EngineError::InvalidAmount(_))
    ));
}

#[tokio::test]
async fn self_transfer_is_balance_neutral_but_recorded() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();

    engine
        .transfer(TransferCmd::new(alice.id, "alice", 50))
        .await
        .unwrap();

    let info = engine.account_info(alice.id).await.unwrap();
    assert_eq!(info.coins, 1000);
    assert_eq!(info.sent.len(), 1);
    assert_eq!(info.sent[0].to_user, "alice");
    assert_eq!(info.received.len(), 1);
    assert_eq!(info.received[0].from_user, "alice");

    let transfers = count_rows(
        &db,
        "SELECT COUNT(*) AS cnt FROM transactions WHERE kind = ?",
        vec!["transfer".into()],
    )
    .await;
    assert_eq!(transfers, 1);
}

#[tokio::test]
async fn purchase_debits_and_records_purchase_and_mint_entry() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();

    engine
        .purchase(PurchaseCmd::new(alice.id, "cup"))
        .await
        .unwrap();

    let info = engine.account_info(alice.id).await.unwrap();
    assert_eq!(info.coins, 980);
    assert_eq!(info.inventory.len(), 1);
    assert_eq!(info.inventory[0].item, "cup");
    assert_eq!(info.inventory[0].count, 1);

    let purchases = count_rows(
        &db,
        "SELECT COUNT(*) AS cnt FROM purchases WHERE item = ? AND price = ?",
        vec!["cup".into(), 20i64.into()],
    )
    .await;
    assert_eq!(purchases, 1);

    // The purchase-kind ledger entry has no source account.
    let minted = count_rows(
        &db,
        "SELECT COUNT(*) AS cnt FROM transactions WHERE kind = ? AND from_account_id IS NULL",
        vec!["purchase".into()],
    )
    .await;
    assert_eq!(minted, 1);
}

#[tokio::test]
async fn purchase_of_unknown_item_fails_without_side_effects() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();

    let err = engine
        .purchase(PurchaseCmd::new(alice.id, "yacht"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ItemNotFound("yacht".to_string()));

    assert_eq!(engine.account_info(alice.id).await.unwrap().coins, 1000);
    let purchases = count_rows(&db, "SELECT COUNT(*) AS cnt FROM purchases", vec![]).await;
    assert_eq!(purchases, 0);
}

#[tokio::test]
async fn purchase_beyond_balance_is_rejected_and_balance_kept() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();
    engine.authenticate("bob", "hunter2").await.unwrap();

    // Drain alice down to 50, then try an 80-coin item.
    engine
        .transfer(TransferCmd::new(alice.id, "bob", 950))
        .await
        .unwrap();
    let err = engine
        .purchase(PurchaseCmd::new(alice.id, "t-shirt"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    assert_eq!(engine.account_info(alice.id).await.unwrap().coins, 50);
    let purchases = count_rows(&db, "SELECT COUNT(*) AS cnt FROM purchases", vec![]).await;
    assert_eq!(purchases, 0);
}

#[tokio::test]
async fn account_info_is_idempotent_without_mutations() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();
    engine.authenticate("bob", "hunter2").await.unwrap();
    engine
        .transfer(TransferCmd::new(alice.id, "bob", 100))
        .await
        .unwrap();
    engine
        .purchase(PurchaseCmd::new(alice.id, "pen"))
        .await
        .unwrap();

    let first = engine.account_info(alice.id).await.unwrap();
    let second = engine.account_info(alice.id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn account_info_for_unknown_account_fails() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.account_info(4242).await.unwrap_err();
    assert_eq!(err, EngineError::UserNotFound("4242".to_string()));
}

#[tokio::test]
async fn inventory_groups_by_item_and_sorts_by_name() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.authenticate("alice", "secret").await.unwrap();

    for item in ["cup", "cup", "book"] {
        engine
            .purchase(PurchaseCmd::new(alice.id, item))
            .await
            .unwrap();
    }

    let info = engine.account_info(alice.id).await.unwrap();
    let entries: Vec<(&str, i64)> = info
        .inventory
        .iter()
        .map(|entry| (entry.item.as_str(), entry.count))
        .collect();
    assert_eq!(entries, vec![("book", 1), ("cup", 2)]);
}

#[tokio::test]
async fn custom_catalog_replaces_the_default_table() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let catalog = Catalog::new(HashMap::from([("sticker".to_string(), 5)])).unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .catalog(catalog)
        .build()
        .await
        .unwrap();

    let alice = engine.authenticate("alice", "secret").await.unwrap();
    engine
        .purchase(PurchaseCmd::new(alice.id, "sticker"))
        .await
        .unwrap();
    let err = engine
        .purchase(PurchaseCmd::new(alice.id, "cup"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ItemNotFound("cup".to_string()));
    assert_eq!(engine.account_info(alice.id).await.unwrap().coins, 995);
}

// The walkthrough from the service description: two fresh users, one
// transfer, one purchase.
#[tokio::test]
async fn alice_and_bob_walkthrough() {
    let (engine, db) = engine_with_db().await;

    let alice = engine.authenticate("alice", "wonder").await.unwrap();
    assert_eq!(alice.coins, 1000);
    let bob = engine.authenticate("bob", "builder").await.unwrap();
    assert_eq!(bob.coins, 1000);

    engine
        .transfer(TransferCmd::new(alice.id, "bob", 100))
        .await
        .unwrap();
    let alice_info = engine.account_info(alice.id).await.unwrap();
    let bob_info = engine.account_info(bob.id).await.unwrap();
    assert_eq!(alice_info.coins, 900);
    assert_eq!(bob_info.coins, 1100);
    assert_eq!(alice_info.sent.len(), 1);
    assert_eq!(bob_info.received.len(), 1);

    engine
        .purchase(PurchaseCmd::new(alice.id, "cup"))
        .await
        .unwrap();
    let alice_info = engine.account_info(alice.id).await.unwrap();
    assert_eq!(alice_info.coins, 880);
    assert_eq!(alice_info.inventory.len(), 1);
    assert_eq!(alice_info.inventory[0].item, "cup");
    assert_eq!(alice_info.inventory[0].count, 1);

    let purchases = count_rows(&db, "SELECT COUNT(*) AS cnt FROM purchases", vec![]).await;
    assert_eq!(purchases, 1);
}
